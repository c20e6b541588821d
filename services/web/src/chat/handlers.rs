use axum::extract::State;
use axum::http::header;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use serde::Deserialize;

use crate::chat::{export, render};
use crate::session::HistoryEntry;
use crate::state::{service_name_map, AppState};

pub async fn index(State(state): State<AppState>) -> Html<String> {
    render_page(&state, None).await
}

#[derive(Debug, Deserialize)]
pub struct AskForm {
    #[serde(default)]
    pub question: String,
}

pub async fn ask(State(state): State<AppState>, Form(form): Form<AskForm>) -> Response {
    let question = form.question.trim().to_string();
    if question.is_empty() {
        return Redirect::to("/").into_response();
    }

    let max = state.config.max_question_len;
    if question.chars().count() > max {
        // Rejected locally; the backend never sees oversized questions.
        let warning = format!(
            "Question is too long ({} characters). Maximum is {max}.",
            question.chars().count()
        );
        return render_page(&state, Some(warning.as_str())).await.into_response();
    }

    let show_pipeline = { state.session().show_pipeline };
    let entry = match state.client.ask(&question, show_pipeline).await {
        Ok(response) => HistoryEntry::success(question, response),
        Err(err) => {
            tracing::warn!(error = %err, "ask request failed");
            HistoryEntry::failure(question, err.to_string())
        }
    };
    state.session().push(entry);
    Redirect::to("/").into_response()
}

#[derive(Debug, Deserialize)]
pub struct PipelineForm {
    // Checkboxes are absent from the form body when unchecked.
    #[serde(default)]
    pub show_pipeline: Option<String>,
}

pub async fn set_pipeline(
    State(state): State<AppState>,
    Form(form): Form<PipelineForm>,
) -> Redirect {
    state.session().show_pipeline = form.show_pipeline.is_some();
    Redirect::to("/")
}

pub async fn clear_session(State(state): State<AppState>) -> Redirect {
    state.session().clear();
    Redirect::to("/")
}

pub async fn export(State(state): State<AppState>) -> Response {
    let names = match state.services().await {
        Ok(services) => service_name_map(&services),
        Err(_) => service_name_map(&[]),
    };
    let (markdown, empty) = {
        let session = state.session();
        (
            export::session_markdown(&session, &names),
            session.history.is_empty(),
        )
    };
    if empty {
        return Redirect::to("/").into_response();
    }
    let disposition = format!("attachment; filename=\"{}\"", export::export_filename());
    (
        [
            (header::CONTENT_TYPE, "text/markdown; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        markdown,
    )
        .into_response()
}

async fn render_page(state: &AppState, warning: Option<&str>) -> Html<String> {
    let health = state.client.check_health().await;
    let names = match state.services().await {
        Ok(services) => service_name_map(&services),
        // The static fallback map still covers the known services.
        Err(_) => service_name_map(&[]),
    };
    let session = state.session().clone();
    Html(render::page(&session, &names, &health, warning))
}
