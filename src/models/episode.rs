use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpisodeInput {
    pub show_id: i32,
    pub season_id: i32,
    pub episode_number: i32,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub runtime_minutes: i32,
    /// `YYYY-MM-DD`
    #[serde(default)]
    pub air_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EpisodeFilter {
    pub show_id: Option<i32>,
    pub season_id: Option<i32>,
}
