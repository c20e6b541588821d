//! Markdown session export, served as a file download.

use std::collections::HashMap;

use chrono::{Local, Utc};

use crate::chat::render::percent;
use crate::session::Session;
use crate::state::service_name;

pub fn export_filename() -> String {
    Local::now()
        .format("sap_ai_assistant_%Y%m%d_%H%M%S.md")
        .to_string()
}

/// Render the whole session, oldest exchange first. Service keys go
/// through the display-name map, same as the on-screen badges.
pub fn session_markdown(session: &Session, names: &HashMap<String, String>) -> String {
    let mut out = String::from("# SAP AI Documentation Assistant — Session Export\n\n");
    out.push_str(&format!(
        "Exported: {}\n",
        Utc::now().format("%Y-%m-%d %H:%M UTC")
    ));
    out.push_str(&format!("Questions: {}\n", session.history.len()));

    for (i, entry) in session.history.iter().enumerate() {
        out.push_str(&format!("\n---\n\n## Q{}: {}\n\n", i + 1, entry.question));

        if let Some(error) = &entry.error {
            out.push_str(&format!("**Error:** {error}\n"));
            continue;
        }
        let Some(data) = &entry.response else {
            continue;
        };

        if !data.services.is_empty() {
            let displayed: Vec<&str> = data
                .services
                .iter()
                .map(|key| service_name(key, names))
                .collect();
            out.push_str(&format!("**Services:** {}\n\n", displayed.join(", ")));
        }
        out.push_str(&format!(
            "**Confidence:** {}\n\n",
            percent(data.confidence)
        ));
        out.push_str(&data.answer);
        out.push('\n');

        if !data.links.is_empty() {
            out.push_str("\n**Links:**\n");
            for link in &data.links {
                out.push_str(&format!(
                    "- [{}]({}) — {}\n",
                    link.title, link.url, link.description
                ));
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::HistoryEntry;
    use crate::state::service_name_map;
    use sapdocs_client::models::{AskResponse, Link};

    fn answered(question: &str, answer: &str, confidence: f64) -> HistoryEntry {
        HistoryEntry::success(
            question.to_string(),
            AskResponse {
                answer: answer.to_string(),
                confidence,
                is_sap_ai: true,
                services: vec!["ai_core".to_string()],
                links: vec![Link {
                    title: "Deploy guide".to_string(),
                    url: "https://help.sap.com/ai-core".to_string(),
                    description: "Serving and deployment walkthrough".to_string(),
                }],
                pipeline: None,
            },
        )
    }

    #[test]
    fn export_lists_exchanges_oldest_first() {
        let mut session = Session::default();
        session.push(answered("first question", "First answer.", 0.82));
        session.push(HistoryEntry::failure(
            "second question".to_string(),
            "API error: 500".to_string(),
        ));

        let md = session_markdown(&session, &service_name_map(&[]));
        assert!(md.starts_with("# SAP AI Documentation Assistant — Session Export"));
        assert!(md.contains("Questions: 2"));
        let first = md.find("## Q1: first question").expect("Q1 present");
        let second = md.find("## Q2: second question").expect("Q2 present");
        assert!(first < second);
        assert!(md.contains("**Confidence:** 82%"));
        assert!(md.contains("**Error:** API error: 500"));
    }

    #[test]
    fn services_line_uses_display_names() {
        let mut session = Session::default();
        session.push(answered("q", "a", 0.9));
        let md = session_markdown(&session, &service_name_map(&[]));
        assert!(md.contains("**Services:** SAP AI Core"));
        assert!(!md.contains("**Services:** ai_core"));
    }

    #[test]
    fn links_carry_their_description() {
        let mut session = Session::default();
        session.push(answered("q", "a", 0.9));
        let md = session_markdown(&session, &service_name_map(&[]));
        assert!(md.contains(
            "- [Deploy guide](https://help.sap.com/ai-core) — Serving and deployment walkthrough"
        ));
    }

    #[test]
    fn exported_header_is_utc_stamped() {
        let session = Session::default();
        let md = session_markdown(&session, &service_name_map(&[]));
        let stamp = Utc::now().format("Exported: %Y-%m-%d").to_string();
        assert!(md.contains(&stamp));
        assert!(md.contains(" UTC\n"));
    }

    #[test]
    fn error_exchange_omits_answer_sections() {
        let mut session = Session::default();
        session.push(HistoryEntry::failure(
            "broken".to_string(),
            "Cannot connect to the API. Is the backend running?".to_string(),
        ));
        let md = session_markdown(&session, &service_name_map(&[]));
        assert!(md.contains("**Error:** Cannot connect"));
        assert!(!md.contains("**Confidence:**"));
    }

    #[test]
    fn filename_has_markdown_extension() {
        let name = export_filename();
        assert!(name.starts_with("sap_ai_assistant_"));
        assert!(name.ends_with(".md"));
    }
}
