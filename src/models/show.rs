use serde::{Deserialize, Serialize};

/// Writable fields of a show. Used for both create and full update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShowInput {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub genre: String,
    pub start_year: i32,
    #[serde(default)]
    pub end_year: Option<i32>,
    #[serde(default)]
    pub network: String,
}
