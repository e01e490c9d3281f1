pub mod prelude;

pub mod characters;
pub mod episodes;
pub mod quotes;
pub mod seasons;
pub mod shows;
pub mod users;
