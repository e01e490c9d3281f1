use axum::{
    Json, Router,
    http::{HeaderValue, StatusCode},
    middleware,
    routing::{get, post},
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use crate::config::Config;
use crate::services::AuthService;
use crate::state::SharedState;

pub mod auth;
mod characters;
mod episodes;
mod error;
pub mod extract;
pub mod observability;
mod quotes;
mod references;
mod seasons;
mod shows;
mod system;
mod types;
mod validation;

pub use error::ApiError;
pub use types::*;

#[derive(Clone)]
pub struct AppState {
    pub shared: Arc<SharedState>,

    pub auth_service: Arc<dyn AuthService>,

    pub start_time: std::time::Instant,

    pub prometheus_handle: Option<PrometheusHandle>,
}

impl AppState {
    #[must_use]
    pub fn config(&self) -> &Arc<RwLock<Config>> {
        &self.shared.config
    }

    #[must_use]
    pub fn store(&self) -> &crate::db::Store {
        &self.shared.store
    }
}

#[must_use]
pub fn create_app_state(
    shared: Arc<SharedState>,
    prometheus_handle: Option<PrometheusHandle>,
) -> Arc<AppState> {
    let auth_service = shared.auth_service.clone();

    Arc::new(AppState {
        shared,
        auth_service,
        start_time: std::time::Instant::now(),
        prometheus_handle,
    })
}

pub async fn create_app_state_from_config(
    config: Config,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<Arc<AppState>> {
    let shared = Arc::new(SharedState::new(config).await?);
    Ok(create_app_state(shared, prometheus_handle))
}

pub async fn router(state: Arc<AppState>) -> Router {
    let (cors_origins, secure_cookies, session_minutes) = {
        let config = state.config().read().await;
        (
            config.server.cors_allowed_origins.clone(),
            config.server.secure_cookies,
            config.server.session_minutes,
        )
    };

    let session_store = MemoryStore::default();
    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(secure_cookies)
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(time::Duration::minutes(session_minutes)));

    let api_router = Router::new()
        .merge(catalogue_routes())
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/me", get(auth::me))
        .route("/system/health", get(system::health))
        .route("/metrics", get(observability::get_metrics))
        .fallback(api_not_found)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::auth_middleware,
        ))
        .layer(session_layer)
        .layer(middleware::from_fn(observability::logging_middleware))
        .with_state(state);

    let cors_layer = if cors_origins.iter().any(|origin| origin == "*") {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> =
            cors_origins.iter().filter_map(|s| s.parse().ok()).collect();
        CorsLayer::new().allow_origin(origins)
    };

    Router::new()
        .nest("/api", api_router)
        .layer(cors_layer.allow_methods(Any).allow_headers(Any))
        .layer(middleware::from_fn(
            observability::security_headers_middleware,
        ))
        .layer(TraceLayer::new_for_http())
}

/// Reads are public; handlers that mutate take an `AuthUser` or `AdminUser`.
fn catalogue_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/shows", get(shows::list_shows).post(shows::create_show))
        .route(
            "/shows/{id}",
            get(shows::get_show)
                .put(shows::update_show)
                .delete(shows::delete_show),
        )
        .route(
            "/seasons",
            get(seasons::list_seasons).post(seasons::create_season),
        )
        .route(
            "/seasons/{id}",
            get(seasons::get_season)
                .put(seasons::update_season)
                .delete(seasons::delete_season),
        )
        .route(
            "/episodes",
            get(episodes::list_episodes).post(episodes::create_episode),
        )
        .route(
            "/episodes/{id}",
            get(episodes::get_episode)
                .put(episodes::update_episode)
                .delete(episodes::delete_episode),
        )
        .route(
            "/characters",
            get(characters::list_characters).post(characters::create_character),
        )
        .route(
            "/characters/{id}",
            get(characters::get_character)
                .put(characters::update_character)
                .delete(characters::delete_character),
        )
        .route("/quotes", get(quotes::list_quotes).post(quotes::create_quote))
        .route(
            "/quotes/{id}",
            get(quotes::get_quote)
                .put(quotes::update_quote)
                .delete(quotes::delete_quote),
        )
        .route("/quotes/{id}/like", post(quotes::like_quote))
}

async fn api_not_found() -> (StatusCode, Json<ApiResponse<()>>) {
    (
        StatusCode::NOT_FOUND,
        Json(ApiResponse::error("Route not found")),
    )
}
