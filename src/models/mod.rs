//! Request payloads and list filters shared by the API, the store and the UI.

pub mod character;
pub mod episode;
pub mod quote;
pub mod season;
pub mod show;
pub mod user;

pub use character::{CharacterFilter, CharacterInput};
pub use episode::{EpisodeFilter, EpisodeInput};
pub use quote::{QuoteFilter, QuoteInput};
pub use season::{SeasonFilter, SeasonInput};
pub use show::ShowInput;
pub use user::{NewUser, User};
