use axum::{Json, extract::State, http::StatusCode};
use std::sync::Arc;

use super::extract::{AdminUser, ApiJson, ApiPath, ApiQuery, AuthUser};
use super::{ApiError, ApiResponse, AppState, references, validation};
use crate::entities::episodes;
use crate::models::{EpisodeFilter, EpisodeInput};

pub async fn list_episodes(
    State(state): State<Arc<AppState>>,
    ApiQuery(filter): ApiQuery<EpisodeFilter>,
) -> Result<Json<ApiResponse<Vec<episodes::Model>>>, ApiError> {
    let episodes = state.store().list_episodes(&filter).await?;
    Ok(Json(ApiResponse::list(episodes)))
}

pub async fn get_episode(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<ApiResponse<episodes::Model>>, ApiError> {
    let id = validation::validate_id("episode", id)?;

    let episode = state
        .store()
        .get_episode(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Episode", id))?;

    Ok(Json(ApiResponse::success(episode)))
}

async fn check_references(state: &AppState, payload: &EpisodeInput) -> Result<(), ApiError> {
    references::ensure_show(state.store(), payload.show_id).await?;
    references::ensure_season_in_show(state.store(), payload.season_id, payload.show_id).await
}

pub async fn create_episode(
    State(state): State<Arc<AppState>>,
    AuthUser(_user): AuthUser,
    ApiJson(payload): ApiJson<EpisodeInput>,
) -> Result<(StatusCode, Json<ApiResponse<episodes::Model>>), ApiError> {
    validation::validate_episode(&payload)?;
    check_references(&state, &payload).await?;

    let episode = state.store().create_episode(&payload).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(episode))))
}

pub async fn update_episode(
    State(state): State<Arc<AppState>>,
    AuthUser(_user): AuthUser,
    ApiPath(id): ApiPath<i32>,
    ApiJson(payload): ApiJson<EpisodeInput>,
) -> Result<Json<ApiResponse<episodes::Model>>, ApiError> {
    let id = validation::validate_id("episode", id)?;
    let existing = state
        .store()
        .get_episode(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Episode", id))?;

    validation::validate_episode(&payload)?;
    check_references(&state, &payload).await?;

    if existing.show_id != payload.show_id {
        let quotes = state.store().count_quotes_for_episode(id).await?;
        references::ensure_stays_in_show(
            "Episode",
            id,
            existing.show_id,
            payload.show_id,
            quotes,
        )?;
    }

    let episode = state
        .store()
        .update_episode(id, &payload)
        .await?
        .ok_or_else(|| ApiError::not_found("Episode", id))?;

    Ok(Json(ApiResponse::success(episode)))
}

pub async fn delete_episode(
    State(state): State<Arc<AppState>>,
    AdminUser(_admin): AdminUser,
    ApiPath(id): ApiPath<i32>,
) -> Result<StatusCode, ApiError> {
    let id = validation::validate_id("episode", id)?;

    if state.store().delete_episode(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::not_found("Episode", id))
    }
}
