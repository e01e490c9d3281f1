use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::entities::{characters, episodes, quotes, seasons, shows, users};
use crate::models::{
    CharacterFilter, CharacterInput, EpisodeFilter, EpisodeInput, NewUser, QuoteFilter,
    QuoteInput, SeasonFilter, SeasonInput, ShowInput, User,
};

pub mod migrator;
pub mod repositories;
mod seed;

pub use seed::SeedReport;

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if !db_url.contains(":memory:") {
            let path_str = db_url.trim_start_matches("sqlite://").trim_start_matches("sqlite:");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn show_repo(&self) -> repositories::show::ShowRepository {
        repositories::show::ShowRepository::new(self.conn.clone())
    }

    fn season_repo(&self) -> repositories::season::SeasonRepository {
        repositories::season::SeasonRepository::new(self.conn.clone())
    }

    fn episode_repo(&self) -> repositories::episode::EpisodeRepository {
        repositories::episode::EpisodeRepository::new(self.conn.clone())
    }

    fn character_repo(&self) -> repositories::character::CharacterRepository {
        repositories::character::CharacterRepository::new(self.conn.clone())
    }

    fn quote_repo(&self) -> repositories::quote::QuoteRepository {
        repositories::quote::QuoteRepository::new(self.conn.clone())
    }

    fn user_repo(&self) -> repositories::user::UserRepository {
        repositories::user::UserRepository::new(self.conn.clone())
    }

    // Shows

    pub async fn list_shows(&self) -> Result<Vec<shows::Model>> {
        self.show_repo().list().await
    }

    pub async fn get_show(&self, id: i32) -> Result<Option<shows::Model>> {
        self.show_repo().get(id).await
    }

    pub async fn show_exists(&self, id: i32) -> Result<bool> {
        self.show_repo().exists(id).await
    }

    pub async fn count_shows(&self) -> Result<u64> {
        self.show_repo().count().await
    }

    pub async fn create_show(&self, input: &ShowInput) -> Result<shows::Model> {
        self.show_repo().create(input).await
    }

    pub async fn update_show(&self, id: i32, input: &ShowInput) -> Result<Option<shows::Model>> {
        self.show_repo().update(id, input).await
    }

    pub async fn delete_show(&self, id: i32) -> Result<bool> {
        self.show_repo().delete(id).await
    }

    // Seasons

    pub async fn list_seasons(&self, filter: &SeasonFilter) -> Result<Vec<seasons::Model>> {
        self.season_repo().list(filter).await
    }

    pub async fn get_season(&self, id: i32) -> Result<Option<seasons::Model>> {
        self.season_repo().get(id).await
    }

    pub async fn create_season(&self, input: &SeasonInput) -> Result<seasons::Model> {
        self.season_repo().create(input).await
    }

    pub async fn update_season(
        &self,
        id: i32,
        input: &SeasonInput,
    ) -> Result<Option<seasons::Model>> {
        self.season_repo().update(id, input).await
    }

    pub async fn delete_season(&self, id: i32) -> Result<bool> {
        self.season_repo().delete(id).await
    }

    // Episodes

    pub async fn list_episodes(&self, filter: &EpisodeFilter) -> Result<Vec<episodes::Model>> {
        self.episode_repo().list(filter).await
    }

    pub async fn get_episode(&self, id: i32) -> Result<Option<episodes::Model>> {
        self.episode_repo().get(id).await
    }

    pub async fn count_episodes_in_season(&self, season_id: i32) -> Result<u64> {
        self.episode_repo().count_in_season(season_id).await
    }

    pub async fn create_episode(&self, input: &EpisodeInput) -> Result<episodes::Model> {
        self.episode_repo().create(input).await
    }

    pub async fn update_episode(
        &self,
        id: i32,
        input: &EpisodeInput,
    ) -> Result<Option<episodes::Model>> {
        self.episode_repo().update(id, input).await
    }

    pub async fn delete_episode(&self, id: i32) -> Result<bool> {
        self.episode_repo().delete(id).await
    }

    // Characters

    pub async fn list_characters(
        &self,
        filter: &CharacterFilter,
    ) -> Result<Vec<characters::Model>> {
        self.character_repo().list(filter).await
    }

    pub async fn get_character(&self, id: i32) -> Result<Option<characters::Model>> {
        self.character_repo().get(id).await
    }

    pub async fn create_character(&self, input: &CharacterInput) -> Result<characters::Model> {
        self.character_repo().create(input).await
    }

    pub async fn update_character(
        &self,
        id: i32,
        input: &CharacterInput,
    ) -> Result<Option<characters::Model>> {
        self.character_repo().update(id, input).await
    }

    pub async fn delete_character(&self, id: i32) -> Result<bool> {
        self.character_repo().delete(id).await
    }

    // Quotes

    pub async fn list_quotes(&self, filter: &QuoteFilter) -> Result<Vec<quotes::Model>> {
        self.quote_repo().list(filter).await
    }

    pub async fn get_quote(&self, id: i32) -> Result<Option<quotes::Model>> {
        self.quote_repo().get(id).await
    }

    pub async fn count_quotes_for_episode(&self, episode_id: i32) -> Result<u64> {
        self.quote_repo().count_for_episode(episode_id).await
    }

    pub async fn count_quotes_for_character(&self, character_id: i32) -> Result<u64> {
        self.quote_repo().count_for_character(character_id).await
    }

    pub async fn create_quote(&self, input: &QuoteInput) -> Result<quotes::Model> {
        self.quote_repo().create(input).await
    }

    pub async fn update_quote(&self, id: i32, input: &QuoteInput) -> Result<Option<quotes::Model>> {
        self.quote_repo().update(id, input).await
    }

    pub async fn delete_quote(&self, id: i32) -> Result<bool> {
        self.quote_repo().delete(id).await
    }

    pub async fn like_quote(&self, id: i32) -> Result<Option<quotes::Model>> {
        self.quote_repo().like(id).await
    }

    // Users

    pub async fn create_user(&self, new_user: NewUser) -> Result<users::Model> {
        self.user_repo().create(new_user).await
    }

    pub async fn get_user(&self, id: i32) -> Result<Option<User>> {
        self.user_repo().get_by_id(id).await
    }

    pub async fn get_user_model_by_email(&self, email: &str) -> Result<Option<users::Model>> {
        self.user_repo().get_model_by_email(email).await
    }

    pub async fn email_taken(&self, email: &str) -> Result<bool> {
        self.user_repo().email_taken(email).await
    }

    pub async fn username_taken(&self, username: &str) -> Result<bool> {
        self.user_repo().username_taken(username).await
    }

    pub async fn verify_user_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<users::Model>> {
        self.user_repo().verify_password(email, password).await
    }

    pub async fn verify_api_key(&self, api_key: &str) -> Result<Option<User>> {
        self.user_repo().verify_api_key(api_key).await
    }
}
