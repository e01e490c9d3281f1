use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharacterInput {
    pub show_id: i32,
    pub name: String,
    #[serde(default)]
    pub actor_name: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub is_main_character: bool,
    #[serde(default = "default_status")]
    pub status: String,
}

fn default_status() -> String {
    "alive".to_string()
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CharacterFilter {
    pub show_id: Option<i32>,
    /// Case-insensitive substring of the character or actor name.
    pub search: Option<String>,
}
