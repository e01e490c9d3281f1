use axum::{
    extract::{Path, Query, State, rejection::PathRejection},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use serde::Deserialize;
use std::sync::Arc;

use super::UiState;
use super::client::UiError;
use super::pages;

impl IntoResponse for UiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::warn!("UI upstream failure: {self}");
        }

        let message = match &self {
            Self::NotFound(msg) => msg.clone(),
            _ if status == StatusCode::NOT_FOUND => "Page not found".to_string(),
            _ => "The FanHub API is unavailable right now. Please try again later.".to_string(),
        };

        (status, Html(pages::error_page(status.as_u16(), &message))).into_response()
    }
}

type PageResult = Result<Html<String>, UiError>;

/// Non-numeric and non-positive ids render the 404 page.
fn page_id(path: Result<Path<i32>, PathRejection>) -> Result<i32, UiError> {
    match path {
        Ok(Path(id)) if id > 0 => Ok(id),
        _ => Err(UiError::NotFound("Page not found".to_string())),
    }
}

pub async fn index(State(state): State<Arc<UiState>>) -> PageResult {
    let shows = state.client.list_shows().await?;
    Ok(Html(pages::show_list(&shows)))
}

pub async fn show_detail(
    State(state): State<Arc<UiState>>,
    path: Result<Path<i32>, PathRejection>,
) -> PageResult {
    let id = page_id(path)?;
    let (show, seasons, characters) = futures::try_join!(
        state.client.get_show(id),
        state.client.list_seasons(id),
        state.client.list_characters(Some(id), None),
    )?;

    Ok(Html(pages::show_detail(&show, &seasons, &characters)))
}

pub async fn season_detail(
    State(state): State<Arc<UiState>>,
    path: Result<Path<i32>, PathRejection>,
) -> PageResult {
    let id = page_id(path)?;
    let (season, episodes) = futures::try_join!(
        state.client.get_season(id),
        state.client.list_episodes(id),
    )?;
    let show = state.client.get_show(season.show_id).await?;

    Ok(Html(pages::season_detail(&show, &season, &episodes)))
}

#[derive(Debug, Default, Deserialize)]
pub struct CharacterQuery {
    pub search: Option<String>,
}

pub async fn characters(
    State(state): State<Arc<UiState>>,
    Query(query): Query<CharacterQuery>,
) -> PageResult {
    let search = query
        .search
        .as_deref()
        .map(str::trim)
        .filter(|term| !term.is_empty());

    let characters = state.client.list_characters(None, search).await?;
    Ok(Html(pages::character_list(&characters, search)))
}

#[derive(Debug, Default, Deserialize)]
pub struct QuoteQuery {
    pub famous: Option<bool>,
}

pub async fn quotes(
    State(state): State<Arc<UiState>>,
    Query(query): Query<QuoteQuery>,
) -> PageResult {
    let (quotes, characters) = futures::try_join!(
        state.client.list_quotes(query.famous),
        state.client.list_characters(None, None),
    )?;

    Ok(Html(pages::quote_list(&quotes, &characters)))
}

pub async fn not_found() -> (StatusCode, Html<String>) {
    (
        StatusCode::NOT_FOUND,
        Html(pages::error_page(404, "Page not found")),
    )
}
