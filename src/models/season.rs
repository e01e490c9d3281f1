use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeasonInput {
    pub show_id: i32,
    pub season_number: i32,
    pub title: String,
    #[serde(default)]
    pub episode_count: i32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeasonFilter {
    pub show_id: Option<i32>,
}
