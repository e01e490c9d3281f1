//! Domain service for registration, login and credential lookup.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::User;

/// Errors specific to authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Unknown email and wrong password share this variant on purpose.
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("User not found")]
    UserNotFound,

    #[error("{0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for AuthError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for AuthError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

/// Returned by a successful login. `token` is the user's API key.
#[derive(Debug, Clone, Serialize)]
pub struct LoginResult {
    pub token: String,
    pub user: User,
}

#[async_trait::async_trait]
pub trait AuthService: Send + Sync {
    /// Creates a regular user. The payload is expected to be validated.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Conflict`] when the email or username is taken.
    async fn register(&self, request: RegisterRequest) -> Result<User, AuthError>;

    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] if login fails.
    async fn login(&self, email: &str, password: &str) -> Result<LoginResult, AuthError>;

    async fn user_for_api_key(&self, api_key: &str) -> Result<Option<User>, AuthError>;

    async fn get_user(&self, id: i32) -> Result<User, AuthError>;
}
