//! Server-rendered front-end. It owns no data; every page is built from
//! calls to the REST API through [`FanHubClient`].

use axum::{Router, middleware, routing::get};
use std::sync::Arc;
use std::time::Duration;
use tower_http::trace::TraceLayer;

use crate::config::Config;

mod assets;
pub mod client;
pub mod pages;
mod routes;

pub use client::{FanHubClient, UiError};

pub struct UiState {
    pub client: FanHubClient,
}

pub fn create_client(config: &Config) -> Result<FanHubClient, UiError> {
    FanHubClient::new(
        &config.ui.api_base_url,
        Duration::from_secs(config.ui.request_timeout_seconds),
    )
}

pub fn router(client: FanHubClient) -> Router {
    let state = Arc::new(UiState { client });

    Router::new()
        .route("/", get(routes::index))
        .route("/shows/{id}", get(routes::show_detail))
        .route("/seasons/{id}", get(routes::season_detail))
        .route("/characters", get(routes::characters))
        .route("/quotes", get(routes::quotes))
        .route("/static/{*path}", get(assets::serve_static))
        .fallback(routes::not_found)
        .with_state(state)
        .layer(middleware::from_fn(
            crate::api::observability::security_headers_middleware,
        ))
        .layer(TraceLayer::new_for_http())
}
