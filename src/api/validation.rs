use regex::Regex;
use std::sync::OnceLock;

use super::ApiError;
use crate::models::{CharacterInput, EpisodeInput, QuoteInput, SeasonInput, ShowInput};
use crate::services::RegisterRequest;

const MAX_TITLE_LEN: usize = 200;
const MIN_YEAR: i32 = 1900;
const MAX_YEAR: i32 = 2100;

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("Invalid regex pattern defined in code")
    })
}

fn username_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9_-]{3,32}$").expect("Invalid regex pattern defined in code")
    })
}

pub fn validate_id(resource: &str, id: i32) -> Result<i32, ApiError> {
    if id <= 0 {
        return Err(ApiError::validation(format!(
            "Invalid {resource} ID: {id}. ID must be a positive integer"
        )));
    }
    Ok(id)
}

fn require_text(field: &str, value: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::validation(format!("{field} is required")));
    }
    Ok(())
}

pub fn validate_show(input: &ShowInput) -> Result<(), ApiError> {
    require_text("title", &input.title)?;

    if input.title.trim().chars().count() > MAX_TITLE_LEN {
        return Err(ApiError::validation(format!(
            "title must be {MAX_TITLE_LEN} characters or less"
        )));
    }

    if !(MIN_YEAR..=MAX_YEAR).contains(&input.start_year) {
        return Err(ApiError::validation(format!(
            "start_year must be between {MIN_YEAR} and {MAX_YEAR}"
        )));
    }

    if let Some(end_year) = input.end_year
        && end_year < input.start_year
    {
        return Err(ApiError::validation(
            "end_year cannot be before start_year",
        ));
    }

    Ok(())
}

pub fn validate_season(input: &SeasonInput) -> Result<(), ApiError> {
    validate_id("show", input.show_id)?;

    if input.season_number < 1 {
        return Err(ApiError::validation("season_number must be at least 1"));
    }
    if input.episode_count < 0 {
        return Err(ApiError::validation("episode_count cannot be negative"));
    }

    require_text("title", &input.title)
}

pub fn validate_episode(input: &EpisodeInput) -> Result<(), ApiError> {
    validate_id("show", input.show_id)?;
    validate_id("season", input.season_id)?;

    if input.episode_number < 1 {
        return Err(ApiError::validation("episode_number must be at least 1"));
    }
    if input.runtime_minutes < 1 {
        return Err(ApiError::validation("runtime_minutes must be at least 1"));
    }

    require_text("title", &input.title)
}

pub fn validate_character(input: &CharacterInput) -> Result<(), ApiError> {
    validate_id("show", input.show_id)?;
    require_text("name", &input.name)?;
    require_text("status", &input.status)
}

pub fn validate_quote(input: &QuoteInput) -> Result<(), ApiError> {
    validate_id("show", input.show_id)?;
    validate_id("character", input.character_id)?;
    validate_id("episode", input.episode_id)?;
    require_text("quote_text", &input.quote_text)
}

pub fn validate_registration(
    request: &RegisterRequest,
    min_password_length: usize,
) -> Result<(), ApiError> {
    if !email_regex().is_match(request.email.trim()) {
        return Err(ApiError::validation("email must be a valid address"));
    }

    if !username_regex().is_match(request.username.trim()) {
        return Err(ApiError::validation(
            "username must be 3-32 characters of letters, numbers, '_' or '-'",
        ));
    }

    if request.password.chars().count() < min_password_length {
        return Err(ApiError::validation(format!(
            "password must be at least {min_password_length} characters"
        )));
    }

    Ok(())
}
