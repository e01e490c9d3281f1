pub mod character;
pub mod episode;
pub mod quote;
pub mod season;
pub mod show;
pub mod user;
