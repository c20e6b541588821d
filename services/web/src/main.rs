mod cache;
mod chat;
mod kb;
mod pages;
mod session;
mod state;

use std::net::SocketAddr;
use std::time::Duration;

use axum::Router;
use sapdocs_client::ApiClient;
use sapdocs_config::{init_tracing, AppConfig};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(chat::router())
        .merge(kb::router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() {
    init_tracing("info");

    let config = AppConfig::from_env().expect("failed to load config");
    tracing::info!(api = %config.api_base_url, "starting sapdocs-web");

    let client = ApiClient::new(
        &config.api_base_url,
        Duration::from_secs(config.request_timeout_secs),
    )
    .expect("failed to build API client");

    let addr: SocketAddr = config.bind_addr().parse().expect("invalid bind address");
    let app = build_router(AppState::new(config, client));

    tracing::info!(%addr, "listening");
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("failed to bind");
    axum::serve(listener, app).await.expect("server error");
}
