use axum::{Json, extract::State, http::StatusCode};
use std::sync::Arc;

use super::extract::{AdminUser, ApiJson, ApiPath, ApiQuery, AuthUser};
use super::{ApiError, ApiResponse, AppState, references, validation};
use crate::entities::quotes;
use crate::models::{QuoteFilter, QuoteInput};

pub async fn list_quotes(
    State(state): State<Arc<AppState>>,
    ApiQuery(filter): ApiQuery<QuoteFilter>,
) -> Result<Json<ApiResponse<Vec<quotes::Model>>>, ApiError> {
    let quotes = state.store().list_quotes(&filter).await?;
    Ok(Json(ApiResponse::list(quotes)))
}

pub async fn get_quote(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<ApiResponse<quotes::Model>>, ApiError> {
    let id = validation::validate_id("quote", id)?;

    let quote = state
        .store()
        .get_quote(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Quote", id))?;

    Ok(Json(ApiResponse::success(quote)))
}

async fn check_references(state: &AppState, payload: &QuoteInput) -> Result<(), ApiError> {
    let store = state.store();
    references::ensure_show(store, payload.show_id).await?;
    references::ensure_character_in_show(store, payload.character_id, payload.show_id).await?;
    references::ensure_episode_in_show(store, payload.episode_id, payload.show_id).await
}

pub async fn create_quote(
    State(state): State<Arc<AppState>>,
    AuthUser(_user): AuthUser,
    ApiJson(payload): ApiJson<QuoteInput>,
) -> Result<(StatusCode, Json<ApiResponse<quotes::Model>>), ApiError> {
    validation::validate_quote(&payload)?;
    check_references(&state, &payload).await?;

    let quote = state.store().create_quote(&payload).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(quote))))
}

pub async fn update_quote(
    State(state): State<Arc<AppState>>,
    AuthUser(_user): AuthUser,
    ApiPath(id): ApiPath<i32>,
    ApiJson(payload): ApiJson<QuoteInput>,
) -> Result<Json<ApiResponse<quotes::Model>>, ApiError> {
    let id = validation::validate_id("quote", id)?;
    if state.store().get_quote(id).await?.is_none() {
        return Err(ApiError::not_found("Quote", id));
    }

    validation::validate_quote(&payload)?;
    check_references(&state, &payload).await?;

    let quote = state
        .store()
        .update_quote(id, &payload)
        .await?
        .ok_or_else(|| ApiError::not_found("Quote", id))?;

    Ok(Json(ApiResponse::success(quote)))
}

pub async fn delete_quote(
    State(state): State<Arc<AppState>>,
    AdminUser(_admin): AdminUser,
    ApiPath(id): ApiPath<i32>,
) -> Result<StatusCode, ApiError> {
    let id = validation::validate_id("quote", id)?;

    if state.store().delete_quote(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::not_found("Quote", id))
    }
}

/// `POST /api/quotes/{id}/like`
pub async fn like_quote(
    State(state): State<Arc<AppState>>,
    AuthUser(_user): AuthUser,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<ApiResponse<quotes::Model>>, ApiError> {
    let id = validation::validate_id("quote", id)?;

    let quote = state
        .store()
        .like_quote(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Quote", id))?;

    metrics::counter!("quotes_liked_total").increment(1);

    Ok(Json(ApiResponse::success(quote)))
}
