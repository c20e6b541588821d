pub mod export;
pub mod handlers;
pub mod render;

use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::index))
        .route("/ask", post(handlers::ask))
        .route("/session/pipeline", post(handlers::set_pipeline))
        .route("/session/clear", post(handlers::clear_session))
        .route("/export", get(handlers::export))
}
