//! Chat page rendering. Pure functions from session state to HTML so the
//! view can be tested without a server.

use std::collections::HashMap;

use sapdocs_client::models::{Filtering, HealthStatus, Masking, Pipeline, ScoreSet};
use sapdocs_client::ApiError;
use sapdocs_config::catalog;

use crate::pages::{banner, escape_html, layout};
use crate::session::{HistoryEntry, Session};
use crate::state::service_name;

pub fn confidence_class(confidence: f64) -> &'static str {
    if confidence >= 0.75 {
        "confidence-high"
    } else if confidence >= 0.45 {
        "confidence-medium"
    } else {
        "confidence-low"
    }
}

pub fn percent(confidence: f64) -> String {
    format!("{:.0}%", confidence * 100.0)
}

pub fn severity_class(score: f64) -> &'static str {
    if score < 0.3 {
        "safe"
    } else if score < 0.6 {
        "caution"
    } else {
        "danger"
    }
}

fn confidence_label(confidence: f64) -> String {
    format!(
        "<span class=\"{}\">{}</span>",
        confidence_class(confidence),
        percent(confidence)
    )
}

fn service_badge(key: &str, names: &HashMap<String, String>) -> String {
    format!(
        "<span class=\"service-badge\" style=\"background:{}\">{}</span>",
        catalog::service_color(key),
        escape_html(service_name(key, names))
    )
}

pub fn page(
    session: &Session,
    names: &HashMap<String, String>,
    health: &Result<HealthStatus, ApiError>,
    warning: Option<&str>,
) -> String {
    let mut main = String::new();
    main.push_str("<h1>SAP AI Documentation Assistant</h1>");
    main.push_str(
        "<p class=\"muted\">Ask questions about SAP AI services — powered by GPT-4o with tool calling</p>",
    );

    if let Some(warning) = warning {
        main.push_str(&banner("warning", warning));
    }

    if session.history.is_empty() {
        main.push_str("<h3>Try one of these questions to get started:</h3>");
        main.push_str("<div class=\"suggested\">");
        for question in catalog::SUGGESTED_QUESTIONS {
            main.push_str(&format!(
                "<form method=\"post\" action=\"/ask\">\
                 <input type=\"hidden\" name=\"question\" value=\"{q}\" />\
                 <button type=\"submit\">{q}</button></form>",
                q = escape_html(question),
            ));
        }
        main.push_str("</div>");
    } else {
        for entry in &session.history {
            main.push_str(&answer_card(entry, names, session.show_pipeline));
        }
    }

    main.push_str(
        "<form class=\"ask-form\" method=\"post\" action=\"/ask\">\
         <input type=\"text\" name=\"question\" placeholder=\"Ask a question about SAP AI services...\" autocomplete=\"off\" />\
         <button type=\"submit\">Ask</button>\
         <span class=\"htmx-indicator\">Searching SAP AI documentation...</span></form>",
    );

    layout(
        "SAP AI Documentation Assistant",
        &sidebar(session, health),
        &main,
    )
}

fn sidebar(session: &Session, health: &Result<HealthStatus, ApiError>) -> String {
    let mut side = String::from("<h2>Settings</h2>");

    let checked = if session.show_pipeline {
        " checked"
    } else {
        ""
    };
    side.push_str(&format!(
        "<form method=\"post\" action=\"/session/pipeline\" hx-post=\"/session/pipeline\" hx-trigger=\"change\" hx-target=\"body\">\
         <label><input type=\"checkbox\" name=\"show_pipeline\" value=\"on\"{checked} /> Show pipeline details</label>\
         </form>",
    ));

    side.push_str("<hr />");
    side.push_str(
        "<form method=\"post\" action=\"/session/clear\">\
         <button type=\"submit\" class=\"secondary\">New Session</button></form>",
    );
    if !session.history.is_empty() {
        side.push_str("<p><a class=\"button\" href=\"/export\" hx-boost=\"false\">Download Results</a></p>");
    }

    side.push_str("<hr />");
    match health {
        Ok(health) => {
            let status = if health.status.is_empty() {
                "ok"
            } else {
                &health.status
            };
            let version = if health.version.is_empty() {
                "?"
            } else {
                &health.version
            };
            side.push_str(&banner("success", &format!("API: {status} (v{version})")));
        }
        Err(err) => {
            side.push_str(&banner("error", &format!("API offline — {err}")));
        }
    }
    side
}

pub fn answer_card(
    entry: &HistoryEntry,
    names: &HashMap<String, String>,
    show_pipeline: bool,
) -> String {
    let mut card = String::from("<div class=\"card\">");
    card.push_str(&format!(
        "<p><strong>Q:</strong> {}</p>",
        escape_html(&entry.question)
    ));

    if let Some(error) = &entry.error {
        card.push_str(&banner("error", error));
        card.push_str("</div>");
        return card;
    }
    let Some(data) = &entry.response else {
        card.push_str("</div>");
        return card;
    };

    if !data.services.is_empty() {
        card.push_str("<p>");
        for key in &data.services {
            card.push_str(&service_badge(key, names));
        }
        card.push_str("</p>");
    }

    card.push_str(&format!(
        "<p><strong>Confidence:</strong> {}</p>",
        confidence_label(data.confidence)
    ));

    // Blocked/filtered answers are a distinct state from merely off-topic
    // ones: not-on-topic with confidence exactly 0 means the backend
    // refused, not that it was unsure.
    if !data.is_sap_ai && data.confidence == 0.0 {
        card.push_str(&banner("warning", &data.answer));
    } else if !data.is_sap_ai {
        card.push_str(&banner("info", &data.answer));
    } else {
        card.push_str(&format!(
            "<div class=\"answer-text\">{}</div>",
            escape_html(&data.answer)
        ));
    }

    if !data.links.is_empty() {
        card.push_str("<p><strong>Relevant documentation:</strong></p><ul>");
        for link in &data.links {
            card.push_str(&format!(
                "<li><a href=\"{}\">{}</a> — {}</li>",
                escape_html(&link.url),
                escape_html(&link.title),
                escape_html(&link.description)
            ));
        }
        card.push_str("</ul>");
    }

    if show_pipeline {
        if let Some(pipeline) = &data.pipeline {
            card.push_str(&pipeline_details(pipeline));
        }
    }

    card.push_str("</div>");
    card
}

fn pipeline_details(pipeline: &Pipeline) -> String {
    let mut out = String::from("<details class=\"pipeline\"><summary>Pipeline details</summary>");

    out.push_str("<h4>Data Masking</h4>");
    match &pipeline.data_masking {
        Some(masking) => out.push_str(&masking_section(masking)),
        None => out.push_str("<p class=\"muted\">No PII detected — query sent unmasked.</p>"),
    }

    if let Some(filtering) = &pipeline.content_filtering {
        out.push_str("<h4>Content Filtering</h4>");
        out.push_str(&filtering_section(filtering));
    }

    if let Some(llm) = &pipeline.llm {
        out.push_str("<h4>LLM</h4>");
        out.push_str(&format!(
            "<p><strong>Model:</strong> <code>{}</code></p>",
            escape_html(&llm.model)
        ));
        out.push_str(&format!(
            "<p><strong>Tokens:</strong> {} prompt + {} completion = {} total</p>",
            llm.prompt_tokens,
            llm.completion_tokens,
            llm.prompt_tokens + llm.completion_tokens
        ));
    }

    if let Some(tool_calls) = &pipeline.tool_calls {
        out.push_str("<h4>Tool Calls</h4>");
        for call in tool_calls {
            out.push_str(&format!(
                "<p><strong><code>{}</code></strong> — {} results</p>",
                escape_html(&call.tool_name),
                call.result_count
            ));
            let arguments = serde_json::to_string_pretty(&call.arguments).unwrap_or_default();
            out.push_str(&format!("<pre>{}</pre>", escape_html(&arguments)));
            if let Some(previews) = &call.results_preview {
                out.push_str("<p class=\"muted\">Results preview:</p><ul class=\"muted\">");
                for preview in previews {
                    out.push_str(&format!(
                        "<li>{} — {}</li>",
                        escape_html(&preview.id),
                        escape_html(&preview.title)
                    ));
                }
                out.push_str("</ul>");
            }
        }
    }

    if let Some(messages) = &pipeline.messages_to_llm {
        out.push_str("<h4>Messages to LLM</h4>");
        for message in messages {
            out.push_str(&format!(
                "<p><strong>{}</strong></p><pre>{}</pre>",
                escape_html(&message.role),
                escape_html(&message.content)
            ));
        }
    }

    out.push_str("</details>");
    out
}

fn masking_section(masking: &Masking) -> String {
    let mut out = format!(
        "<p><strong>Original query:</strong> {}</p>\
         <p><strong>Masked query:</strong> {}</p>",
        escape_html(&masking.original_query),
        escape_html(&masking.masked_query)
    );
    if masking.entities_masked.is_empty() {
        return out;
    }
    let (custom, native): (Vec<&String>, Vec<&String>) = masking
        .entities_masked
        .iter()
        .partition(|name| catalog::is_client_side_entity(name));
    if !custom.is_empty() {
        out.push_str(&entity_group("Custom filters", &custom));
    }
    if !native.is_empty() {
        out.push_str(&entity_group("SAP DPI", &native));
    }
    out
}

fn entity_group(label: &str, entities: &[&String]) -> String {
    let joined = entities
        .iter()
        .map(|name| escape_html(name))
        .collect::<Vec<_>>()
        .join(", ");
    format!("<p><strong>{label}:</strong> {joined}</p>")
}

fn filtering_section(filtering: &Filtering) -> String {
    format!(
        "<div class=\"cols\"><div>{}</div><div>{}</div></div>",
        score_set_block("Input", &filtering.input),
        score_set_block("Output", &filtering.output)
    )
}

fn score_set_block(label: &str, scores: &ScoreSet) -> String {
    let status = if scores.passed { "Passed" } else { "Blocked" };
    let mut out = format!("<p><strong>{label}:</strong> {status}</p><p>");
    for (name, value) in [
        ("hate", scores.hate),
        ("self_harm", scores.self_harm),
        ("sexual", scores.sexual),
        ("violence", scores.violence),
    ] {
        out.push_str(&format!(
            "<span class=\"score score-{}\">{name}={value}</span>",
            severity_class(value)
        ));
    }
    out.push_str("</p>");
    out
}
