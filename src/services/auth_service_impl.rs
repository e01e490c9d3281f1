//! `SeaORM` implementation of the `AuthService` trait.

use async_trait::async_trait;
use tracing::info;

use crate::config::SecurityConfig;
use crate::db::Store;
use crate::db::repositories::user::{hash_password_blocking, unique_violation};
use crate::entities::users::UserRole;
use crate::models::{NewUser, User};
use crate::services::auth_service::{AuthError, AuthService, LoginResult, RegisterRequest};

pub struct SeaOrmAuthService {
    store: Store,
    security: SecurityConfig,
}

impl SeaOrmAuthService {
    #[must_use]
    pub const fn new(store: Store, security: SecurityConfig) -> Self {
        Self { store, security }
    }
}

#[async_trait]
impl AuthService for SeaOrmAuthService {
    async fn register(&self, request: RegisterRequest) -> Result<User, AuthError> {
        let email = request.email.trim().to_lowercase();
        let username = request.username.trim().to_string();

        if self.store.email_taken(&email).await? {
            return Err(AuthError::Conflict("Email is already registered".to_string()));
        }
        if self.store.username_taken(&username).await? {
            return Err(AuthError::Conflict("Username is already taken".to_string()));
        }

        let password_hash = hash_password_blocking(&request.password, &self.security).await?;

        let display_name = request
            .display_name
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| username.clone());

        // A concurrent registration can pass the checks above and still lose
        // on the unique index.
        let model = match self
            .store
            .create_user(NewUser {
                email,
                username,
                display_name,
                password_hash,
                role: UserRole::User,
            })
            .await
        {
            Ok(model) => model,
            Err(e) => {
                return Err(match unique_violation(&e) {
                    Some(detail) if detail.contains("username") => {
                        AuthError::Conflict("Username is already taken".to_string())
                    }
                    Some(_) => AuthError::Conflict("Email is already registered".to_string()),
                    None => e.into(),
                });
            }
        };

        metrics::counter!("users_registered_total").increment(1);
        info!(user_id = model.id, "Registered user: {}", model.username);

        Ok(User::from(model))
    }

    async fn login(&self, email: &str, password: &str) -> Result<LoginResult, AuthError> {
        let user = self
            .store
            .verify_user_password(email, password)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        Ok(LoginResult {
            token: user.api_key.clone(),
            user: User::from(user),
        })
    }

    async fn user_for_api_key(&self, api_key: &str) -> Result<Option<User>, AuthError> {
        Ok(self.store.verify_api_key(api_key).await?)
    }

    async fn get_user(&self, id: i32) -> Result<User, AuthError> {
        self.store
            .get_user(id)
            .await?
            .ok_or(AuthError::UserNotFound)
    }
}
