//! Existence checks for foreign ids in request payloads. The schema carries no
//! foreign keys, so dangling references are rejected here with a 400.

use super::ApiError;
use crate::db::Store;

pub async fn ensure_show(store: &Store, show_id: i32) -> Result<(), ApiError> {
    if store.show_exists(show_id).await? {
        Ok(())
    } else {
        Err(ApiError::validation(format!("Show {show_id} does not exist")))
    }
}

pub async fn ensure_season_in_show(
    store: &Store,
    season_id: i32,
    show_id: i32,
) -> Result<(), ApiError> {
    match store.get_season(season_id).await? {
        Some(season) if season.show_id == show_id => Ok(()),
        Some(_) => Err(ApiError::validation(format!(
            "Season {season_id} does not belong to show {show_id}"
        ))),
        None => Err(ApiError::validation(format!(
            "Season {season_id} does not exist"
        ))),
    }
}

pub async fn ensure_character_in_show(
    store: &Store,
    character_id: i32,
    show_id: i32,
) -> Result<(), ApiError> {
    match store.get_character(character_id).await? {
        Some(character) if character.show_id == show_id => Ok(()),
        Some(_) => Err(ApiError::validation(format!(
            "Character {character_id} does not belong to show {show_id}"
        ))),
        None => Err(ApiError::validation(format!(
            "Character {character_id} does not exist"
        ))),
    }
}

pub async fn ensure_episode_in_show(
    store: &Store,
    episode_id: i32,
    show_id: i32,
) -> Result<(), ApiError> {
    match store.get_episode(episode_id).await? {
        Some(episode) if episode.show_id == show_id => Ok(()),
        Some(_) => Err(ApiError::validation(format!(
            "Episode {episode_id} does not belong to show {show_id}"
        ))),
        None => Err(ApiError::validation(format!(
            "Episode {episode_id} does not exist"
        ))),
    }
}

/// A row with dependents keeps its show; moving it would strand the
/// dependents under the old one.
pub fn ensure_stays_in_show(
    kind: &str,
    id: i32,
    current_show_id: i32,
    requested_show_id: i32,
    dependents: u64,
) -> Result<(), ApiError> {
    if current_show_id == requested_show_id || dependents == 0 {
        return Ok(());
    }

    Err(ApiError::validation(format!(
        "{kind} {id} has {dependents} dependent record(s) and cannot move to show {requested_show_id}"
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_stays_in_show() {
        assert!(ensure_stays_in_show("Season", 1, 1, 1, 3).is_ok());
        assert!(ensure_stays_in_show("Season", 1, 1, 2, 0).is_ok());

        let err = ensure_stays_in_show("Season", 1, 1, 2, 3).unwrap_err();
        assert!(matches!(err, ApiError::ValidationError(_)));
        assert!(err.to_string().contains("cannot move to show 2"));
    }
}
