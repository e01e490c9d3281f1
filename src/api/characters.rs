use axum::{Json, extract::State, http::StatusCode};
use std::sync::Arc;

use super::extract::{AdminUser, ApiJson, ApiPath, ApiQuery, AuthUser};
use super::{ApiError, ApiResponse, AppState, references, validation};
use crate::entities::characters;
use crate::models::{CharacterFilter, CharacterInput};

/// `GET /api/characters?show_id=&search=`
pub async fn list_characters(
    State(state): State<Arc<AppState>>,
    ApiQuery(filter): ApiQuery<CharacterFilter>,
) -> Result<Json<ApiResponse<Vec<characters::Model>>>, ApiError> {
    let characters = state.store().list_characters(&filter).await?;
    Ok(Json(ApiResponse::list(characters)))
}

pub async fn get_character(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<ApiResponse<characters::Model>>, ApiError> {
    let id = validation::validate_id("character", id)?;

    let character = state
        .store()
        .get_character(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Character", id))?;

    Ok(Json(ApiResponse::success(character)))
}

pub async fn create_character(
    State(state): State<Arc<AppState>>,
    AuthUser(_user): AuthUser,
    ApiJson(payload): ApiJson<CharacterInput>,
) -> Result<(StatusCode, Json<ApiResponse<characters::Model>>), ApiError> {
    validation::validate_character(&payload)?;
    references::ensure_show(state.store(), payload.show_id).await?;

    let character = state.store().create_character(&payload).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(character))))
}

pub async fn update_character(
    State(state): State<Arc<AppState>>,
    AuthUser(_user): AuthUser,
    ApiPath(id): ApiPath<i32>,
    ApiJson(payload): ApiJson<CharacterInput>,
) -> Result<Json<ApiResponse<characters::Model>>, ApiError> {
    let id = validation::validate_id("character", id)?;
    let existing = state
        .store()
        .get_character(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Character", id))?;

    validation::validate_character(&payload)?;
    references::ensure_show(state.store(), payload.show_id).await?;

    if existing.show_id != payload.show_id {
        let quotes = state.store().count_quotes_for_character(id).await?;
        references::ensure_stays_in_show(
            "Character",
            id,
            existing.show_id,
            payload.show_id,
            quotes,
        )?;
    }

    let character = state
        .store()
        .update_character(id, &payload)
        .await?
        .ok_or_else(|| ApiError::not_found("Character", id))?;

    Ok(Json(ApiResponse::success(character)))
}

pub async fn delete_character(
    State(state): State<Arc<AppState>>,
    AdminUser(_admin): AdminUser,
    ApiPath(id): ApiPath<i32>,
) -> Result<StatusCode, ApiError> {
    let id = validation::validate_id("character", id)?;

    if state.store().delete_character(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::not_found("Character", id))
    }
}
