use serde::{Deserialize, Serialize};

/// Writable fields of a quote. `likes` is deliberately absent: it only moves
/// through the like endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteInput {
    pub show_id: i32,
    pub character_id: i32,
    pub episode_id: i32,
    pub quote_text: String,
    #[serde(default)]
    pub is_famous: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuoteFilter {
    pub show_id: Option<i32>,
    pub character_id: Option<i32>,
    pub episode_id: Option<i32>,
    pub famous: Option<bool>,
}
