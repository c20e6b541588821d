use axum::extract::{Path, Query, State};
use axum::response::{Html, IntoResponse, Response};
use axum::Form;
use sapdocs_client::models::KbEntry;

use crate::kb::forms::{CreateEntryForm, EditEntryForm, FilterQuery};
use crate::kb::render;
use crate::pages::hx_redirect;
use crate::state::AppState;

pub async fn index(State(state): State<AppState>, Query(query): Query<FilterQuery>) -> Html<String> {
    let filter = query.service_key();
    let services = state.services().await;
    let entries = state.entries(filter).await;
    Html(render::page(&services, &entries, filter))
}

pub async fn new_entry_modal(State(state): State<AppState>) -> Html<String> {
    let services = state.services().await;
    Html(render::create_modal(
        &render::service_options(&services),
        None,
        None,
    ))
}

pub async fn create(State(state): State<AppState>, Form(form): Form<CreateEntryForm>) -> Response {
    let new_entry = match form.validate() {
        Ok(new_entry) => new_entry,
        Err(message) => {
            let services = state.services().await;
            return Html(render::create_modal(
                &render::service_options(&services),
                Some(&form),
                Some(&message),
            ))
            .into_response();
        }
    };
    match state.client.create_entry(&new_entry).await {
        Ok(created) => {
            tracing::info!(id = %created.id, "knowledge base entry created");
            state.cache().invalidate();
            hx_redirect("/kb")
        }
        Err(err) => {
            let services = state.services().await;
            Html(render::create_modal(
                &render::service_options(&services),
                Some(&form),
                Some(&err.to_string()),
            ))
            .into_response()
        }
    }
}

pub async fn edit_entry_modal(State(state): State<AppState>, Path(id): Path<String>) -> Html<String> {
    match find_entry(&state, &id).await {
        Ok(entry) => Html(render::edit_modal(
            &entry.id,
            &EditEntryForm::from_entry(&entry),
            None,
        )),
        Err(message) => Html(render::error_modal(&message)),
    }
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<EditEntryForm>,
) -> Response {
    // The diff baseline comes from the form's hidden original_* fields,
    // so a stale cache cannot turn an unchanged field into an overwrite.
    // Re-renders keep the submitted values so nothing typed is lost.
    let update = match form.diff() {
        Ok(update) => update,
        Err(message) => {
            return Html(render::edit_modal(&id, &form, Some(("error", &message))))
                .into_response();
        }
    };
    if update.is_empty() {
        return Html(render::edit_modal(
            &id,
            &form,
            Some(("info", "No changes detected.")),
        ))
        .into_response();
    }
    match state.client.update_entry(&id, &update).await {
        Ok(_) => {
            tracing::info!(%id, "knowledge base entry updated");
            state.cache().invalidate();
            hx_redirect("/kb")
        }
        Err(err) => {
            Html(render::edit_modal(&id, &form, Some(("error", &err.to_string()))))
                .into_response()
        }
    }
}

pub async fn delete_entry_modal(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Html<String> {
    match find_entry(&state, &id).await {
        Ok(entry) => Html(render::delete_modal(&entry)),
        Err(message) => Html(render::error_modal(&message)),
    }
}

pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match state.client.delete_entry(&id).await {
        Ok(_) => {
            tracing::info!(%id, "knowledge base entry deleted");
            state.cache().invalidate();
            hx_redirect("/kb")
        }
        Err(err) => Html(render::error_modal(&err.to_string())).into_response(),
    }
}

async fn find_entry(state: &AppState, id: &str) -> Result<KbEntry, String> {
    let entries = state
        .entries(None)
        .await
        .map_err(|err| err.to_string())?;
    entries
        .into_iter()
        .find(|entry| entry.id == id)
        .ok_or_else(|| format!("Entry {id} not found."))
}
