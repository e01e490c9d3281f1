use axum::{Json, extract::State, http::StatusCode};
use std::sync::Arc;

use super::extract::{AdminUser, ApiJson, ApiPath, AuthUser};
use super::{ApiError, ApiResponse, AppState, validation};
use crate::entities::shows;
use crate::models::ShowInput;

pub async fn list_shows(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<shows::Model>>>, ApiError> {
    let shows = state.store().list_shows().await?;
    Ok(Json(ApiResponse::list(shows)))
}

pub async fn get_show(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<ApiResponse<shows::Model>>, ApiError> {
    let id = validation::validate_id("show", id)?;

    let show = state
        .store()
        .get_show(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Show", id))?;

    Ok(Json(ApiResponse::success(show)))
}

pub async fn create_show(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    ApiJson(payload): ApiJson<ShowInput>,
) -> Result<(StatusCode, Json<ApiResponse<shows::Model>>), ApiError> {
    validation::validate_show(&payload)?;

    let show = state.store().create_show(&payload).await?;
    tracing::info!(user_id = user.id, show_id = show.id, "Show created");

    Ok((StatusCode::CREATED, Json(ApiResponse::success(show))))
}

pub async fn update_show(
    State(state): State<Arc<AppState>>,
    AuthUser(_user): AuthUser,
    ApiPath(id): ApiPath<i32>,
    ApiJson(payload): ApiJson<ShowInput>,
) -> Result<Json<ApiResponse<shows::Model>>, ApiError> {
    let id = validation::validate_id("show", id)?;
    if !state.store().show_exists(id).await? {
        return Err(ApiError::not_found("Show", id));
    }
    validation::validate_show(&payload)?;

    let show = state
        .store()
        .update_show(id, &payload)
        .await?
        .ok_or_else(|| ApiError::not_found("Show", id))?;

    Ok(Json(ApiResponse::success(show)))
}

/// Cascades to the show's seasons, episodes, characters and quotes.
pub async fn delete_show(
    State(state): State<Arc<AppState>>,
    AdminUser(_admin): AdminUser,
    ApiPath(id): ApiPath<i32>,
) -> Result<StatusCode, ApiError> {
    let id = validation::validate_id("show", id)?;

    if state.store().delete_show(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::not_found("Show", id))
    }
}
