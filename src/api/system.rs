//! System API endpoints.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use std::sync::Arc;

use super::{ApiResponse, AppState};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: bool,
    pub version: &'static str,
    pub uptime_seconds: u64,
}

/// `GET /api/system/health`
///
/// Answers 503 with `success: false` when the database does not respond.
pub async fn health(State(state): State<Arc<AppState>>) -> Response {
    let database = match state.store().ping().await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!("Health check database ping failed: {e}");
            false
        }
    };

    let (status_code, status) = if database {
        (StatusCode::OK, "ok")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded")
    };

    let mut body = ApiResponse::success(HealthResponse {
        status,
        database,
        version: env!("CARGO_PKG_VERSION"),
        uptime_seconds: state.start_time.elapsed().as_secs(),
    });

    // Degraded answers still carry the check results.
    if !database {
        body.success = false;
        body.error = Some("Database unavailable".to_string());
    }

    (status_code, Json(body)).into_response()
}
