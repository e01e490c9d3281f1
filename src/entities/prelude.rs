pub use super::characters::Entity as Characters;
pub use super::episodes::Entity as Episodes;
pub use super::quotes::Entity as Quotes;
pub use super::seasons::Entity as Seasons;
pub use super::shows::Entity as Shows;
pub use super::users::Entity as Users;
