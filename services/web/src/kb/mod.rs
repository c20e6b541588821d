pub mod forms;
pub mod handlers;
pub mod render;

use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/kb", get(handlers::index))
        .route("/kb/entries/new", get(handlers::new_entry_modal))
        .route("/kb/entries", post(handlers::create))
        .route("/kb/entries/{id}/edit", get(handlers::edit_entry_modal))
        .route("/kb/entries/{id}", post(handlers::update))
        .route(
            "/kb/entries/{id}/delete",
            get(handlers::delete_entry_modal).post(handlers::delete),
        )
}
