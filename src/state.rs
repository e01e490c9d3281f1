use std::sync::Arc;
use tokio::sync::RwLock;

use crate::config::Config;
use crate::db::Store;
use crate::services::{AuthService, SeaOrmAuthService};

#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<RwLock<Config>>,

    pub store: Store,

    pub auth_service: Arc<dyn AuthService>,
}

impl SharedState {
    /// Connects, migrates and, when `seed.enabled`, seeds an empty database.
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        if config.seed.enabled {
            store.seed_if_empty(&config.seed, &config.security).await?;
        }

        Ok(Self::with_store(config, store))
    }

    #[must_use]
    pub fn with_store(config: Config, store: Store) -> Self {
        let auth_service = Arc::new(SeaOrmAuthService::new(
            store.clone(),
            config.security.clone(),
        )) as Arc<dyn AuthService + Send + Sync + 'static>;

        Self {
            config: Arc::new(RwLock::new(config)),
            store,
            auth_service,
        }
    }

    pub async fn config(&self) -> Config {
        self.config.read().await.clone()
    }
}
