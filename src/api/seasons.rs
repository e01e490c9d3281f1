use axum::{Json, extract::State, http::StatusCode};
use std::sync::Arc;

use super::extract::{AdminUser, ApiJson, ApiPath, ApiQuery, AuthUser};
use super::{ApiError, ApiResponse, AppState, references, validation};
use crate::entities::seasons;
use crate::models::{SeasonFilter, SeasonInput};

pub async fn list_seasons(
    State(state): State<Arc<AppState>>,
    ApiQuery(filter): ApiQuery<SeasonFilter>,
) -> Result<Json<ApiResponse<Vec<seasons::Model>>>, ApiError> {
    let seasons = state.store().list_seasons(&filter).await?;
    Ok(Json(ApiResponse::list(seasons)))
}

pub async fn get_season(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<ApiResponse<seasons::Model>>, ApiError> {
    let id = validation::validate_id("season", id)?;

    let season = state
        .store()
        .get_season(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Season", id))?;

    Ok(Json(ApiResponse::success(season)))
}

pub async fn create_season(
    State(state): State<Arc<AppState>>,
    AuthUser(_user): AuthUser,
    ApiJson(payload): ApiJson<SeasonInput>,
) -> Result<(StatusCode, Json<ApiResponse<seasons::Model>>), ApiError> {
    validation::validate_season(&payload)?;
    references::ensure_show(state.store(), payload.show_id).await?;

    let season = state.store().create_season(&payload).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(season))))
}

pub async fn update_season(
    State(state): State<Arc<AppState>>,
    AuthUser(_user): AuthUser,
    ApiPath(id): ApiPath<i32>,
    ApiJson(payload): ApiJson<SeasonInput>,
) -> Result<Json<ApiResponse<seasons::Model>>, ApiError> {
    let id = validation::validate_id("season", id)?;
    let existing = state
        .store()
        .get_season(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Season", id))?;

    validation::validate_season(&payload)?;
    references::ensure_show(state.store(), payload.show_id).await?;

    if existing.show_id != payload.show_id {
        let episodes = state.store().count_episodes_in_season(id).await?;
        references::ensure_stays_in_show(
            "Season",
            id,
            existing.show_id,
            payload.show_id,
            episodes,
        )?;
    }

    let season = state
        .store()
        .update_season(id, &payload)
        .await?
        .ok_or_else(|| ApiError::not_found("Season", id))?;

    Ok(Json(ApiResponse::success(season)))
}

pub async fn delete_season(
    State(state): State<Arc<AppState>>,
    AdminUser(_admin): AdminUser,
    ApiPath(id): ApiPath<i32>,
) -> Result<StatusCode, ApiError> {
    let id = validation::validate_id("season", id)?;

    if state.store().delete_season(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::not_found("Season", id))
    }
}
