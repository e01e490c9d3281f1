use anyhow::{Context, Result};
use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, Set, SqlErr,
};
use tokio::task;

use crate::config::SecurityConfig;
use crate::entities::users;
use crate::models::{NewUser, User};

pub struct UserRepository {
    conn: DatabaseConnection,
}

impl UserRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn create(&self, new_user: NewUser) -> Result<users::Model> {
        let now = chrono::Utc::now().to_rfc3339();

        let model = users::ActiveModel {
            email: Set(new_user.email.trim().to_lowercase()),
            password_hash: Set(new_user.password_hash),
            username: Set(new_user.username),
            display_name: Set(new_user.display_name),
            role: Set(new_user.role),
            api_key: Set(generate_api_key()),
            created_at: Set(now),
            ..Default::default()
        }
        .insert(&self.conn)
        .await
        .context("Failed to insert user")?;

        Ok(model)
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Option<User>> {
        let user = users::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query user by ID")?;

        Ok(user.map(User::from))
    }

    /// Full row including the password hash and API key.
    pub async fn get_model_by_email(&self, email: &str) -> Result<Option<users::Model>> {
        let user = users::Entity::find()
            .filter(users::Column::Email.eq(email.trim().to_lowercase()))
            .one(&self.conn)
            .await
            .context("Failed to query user by email")?;

        Ok(user)
    }

    pub async fn email_taken(&self, email: &str) -> Result<bool> {
        let count = users::Entity::find()
            .filter(users::Column::Email.eq(email.trim().to_lowercase()))
            .count(&self.conn)
            .await
            .context("Failed to count users by email")?;
        Ok(count > 0)
    }

    pub async fn username_taken(&self, username: &str) -> Result<bool> {
        let count = users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .count(&self.conn)
            .await
            .context("Failed to count users by username")?;
        Ok(count > 0)
    }

    /// Verify API key and return the associated user
    pub async fn verify_api_key(&self, api_key: &str) -> Result<Option<User>> {
        let user = users::Entity::find()
            .filter(users::Column::ApiKey.eq(api_key))
            .one(&self.conn)
            .await
            .context("Failed to query user by API key")?;

        Ok(user.map(User::from))
    }

    /// Verify an email/password pair. Returns `None` for an unknown email or
    /// a wrong password alike.
    /// Note: This uses `spawn_blocking` because Argon2 hashing is CPU-intensive
    /// and would block the async runtime if run directly.
    pub async fn verify_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<users::Model>> {
        let Some(user) = self.get_model_by_email(email).await? else {
            return Ok(None);
        };

        let password_hash = user.password_hash.clone();
        let password = password.to_string();

        let is_valid = task::spawn_blocking(move || verify_password_hash(&password, &password_hash))
            .await
            .context("Password verification task panicked")??;

        Ok(is_valid.then_some(user))
    }
}

/// Hash a password using Argon2id with the configured cost parameters.
pub fn hash_password(password: &str, config: &SecurityConfig) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);

    let params = Params::new(
        config.argon2_memory_cost_kib,
        config.argon2_time_cost,
        config.argon2_parallelism,
        None,
    )
    .map_err(|e| anyhow::anyhow!("Invalid Argon2 params: {e}"))?;
    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {e}"))?;

    Ok(hash.to_string())
}

/// Hashes on the blocking pool.
pub async fn hash_password_blocking(password: &str, config: &SecurityConfig) -> Result<String> {
    let password = password.to_string();
    let config = config.clone();
    task::spawn_blocking(move || hash_password(&password, &config))
        .await
        .context("Password hashing task panicked")?
}

/// The parameters are read back from the PHC string, so hashes made with
/// older cost settings still verify.
pub fn verify_password_hash(password: &str, password_hash: &str) -> Result<bool> {
    let parsed_hash = PasswordHash::new(password_hash)
        .map_err(|e| anyhow::anyhow!("Invalid password hash format: {e}"))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// The violated unique index, e.g. `users.email`, when `err` came from one.
#[must_use]
pub fn unique_violation(err: &anyhow::Error) -> Option<String> {
    match err.downcast_ref::<DbErr>().and_then(DbErr::sql_err) {
        Some(SqlErr::UniqueConstraintViolation(detail)) => Some(detail),
        _ => None,
    }
}

/// Generate a random API key (64 character hex string)
#[must_use]
pub fn generate_api_key() -> String {
    use rand::Rng;

    let mut rng = rand::rng();
    let bytes: [u8; 32] = rng.random();

    bytes.iter().fold(String::with_capacity(64), |mut acc, b| {
        use std::fmt::Write;
        let _ = write!(acc, "{b:02x}");
        acc
    })
}
