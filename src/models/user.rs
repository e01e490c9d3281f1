use serde::Serialize;

use crate::entities::users::{self, UserRole};

/// User data safe to hand out: no password hash, no API key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: i32,
    pub email: String,
    pub username: String,
    pub display_name: String,
    pub role: UserRole,
    pub created_at: String,
}

impl User {
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

impl From<users::Model> for User {
    fn from(model: users::Model) -> Self {
        Self {
            id: model.id,
            email: model.email,
            username: model.username,
            display_name: model.display_name,
            role: model.role,
            created_at: model.created_at,
        }
    }
}

/// A user row about to be inserted; the password is already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub username: String,
    pub display_name: String,
    pub password_hash: String,
    pub role: UserRole,
}
