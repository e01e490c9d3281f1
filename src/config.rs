use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,

    pub server: ServerConfig,

    pub security: SecurityConfig,

    pub seed: SeedConfig,

    pub ui: UiConfig,

    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub database_path: String,

    pub log_level: String,

    /// "pretty" or "json"
    pub log_format: String,

    /// Number of tokio worker threads (default: 2)
    /// Set to 0 to use the number of CPU cores
    pub worker_threads: usize,

    pub max_db_connections: u32,

    pub min_db_connections: u32,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            database_path: "sqlite:data/fanhub.db".to_string(),
            log_level: "info".to_string(),
            log_format: "pretty".to_string(),
            worker_threads: 2,
            max_db_connections: 5,
            min_db_connections: 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,

    /// `*` allows any origin.
    pub cors_allowed_origins: Vec<String>,

    /// Whether to set the Secure flag on session cookies.
    /// Set to false for local development without HTTPS.
    pub secure_cookies: bool,

    /// Session lifetime after the last request.
    pub session_minutes: i64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 5000,
            cors_allowed_origins: vec![
                "http://localhost:5173".to_string(),
                "http://127.0.0.1:5173".to_string(),
            ],
            secure_cookies: false,
            session_minutes: 60,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Argon2 memory cost in KiB
    pub argon2_memory_cost_kib: u32,

    /// Argon2 time cost (iterations)
    pub argon2_time_cost: u32,

    pub argon2_parallelism: u32,

    pub min_password_length: usize,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            argon2_memory_cost_kib: 8192,
            argon2_time_cost: 3,
            argon2_parallelism: 1,
            min_password_length: 8,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedConfig {
    /// Insert the starter catalogue and admin account on startup.
    pub enabled: bool,

    pub admin_email: String,

    pub admin_username: String,

    /// Empty means a random password is generated at seed time and logged once.
    pub admin_password: String,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            admin_email: "admin@fanhub.test".to_string(),
            admin_username: "admin".to_string(),
            admin_password: String::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub port: u16,

    /// Where the UI reaches the REST API.
    pub api_base_url: String,

    pub request_timeout_seconds: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            port: 5173,
            api_base_url: "http://localhost:5000".to_string(),
            request_timeout_seconds: 10,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    pub metrics_enabled: bool,

    pub loki_enabled: bool,

    pub loki_url: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            metrics_enabled: true,
            loki_enabled: false,
            loki_url: "http://localhost:3100".to_string(),
        }
    }
}

impl Config {
    /// Loads `.env`, the first config file found, then environment overrides.
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let mut config = Self::config_paths()
            .into_iter()
            .find(|path| path.exists())
            .map_or_else(
                || {
                    info!("No config file found, using defaults");
                    Ok(Self::default())
                },
                |path| {
                    info!("Loading config from: {}", path.display());
                    Self::load_from_path(&path)
                },
            )?;

        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Like [`Config::load`] but with an explicit file.
    pub fn load_with_path(path: &Path) -> Result<Self> {
        dotenvy::dotenv().ok();
        let mut config = Self::load_from_path(path)?;
        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// `lookup` is injected so tests do not have to touch the process env.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("FANHUB_DATABASE_URL") {
            self.general.database_path = url;
        }

        if let Some(port) = lookup("FANHUB_PORT") {
            self.server.port = port
                .parse()
                .with_context(|| format!("FANHUB_PORT is not a valid port: {port}"))?;
        }

        if let Some(level) = lookup("FANHUB_LOG_LEVEL") {
            self.general.log_level = level;
        }

        if let Some(url) = lookup("FANHUB_API_BASE_URL") {
            self.ui.api_base_url = url;
        }

        Ok(())
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Config saved to: {}", path.display());
        Ok(())
    }

    fn config_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("config.toml")];

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("fanhub").join("config.toml"));
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".fanhub").join("config.toml"));
        }

        paths
    }

    fn default_config_path() -> PathBuf {
        PathBuf::from("config.toml")
    }

    pub fn create_default_if_missing() -> Result<bool> {
        let path = Self::default_config_path();
        if path.exists() {
            Ok(false)
        } else {
            let config = Self::default();
            config.save_to_path(&path)?;
            info!("Created default config file: {}", path.display());
            Ok(true)
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            anyhow::bail!("server.port must be non-zero");
        }

        if self.general.min_db_connections > self.general.max_db_connections {
            anyhow::bail!(
                "general.min_db_connections ({}) exceeds max_db_connections ({})",
                self.general.min_db_connections,
                self.general.max_db_connections
            );
        }

        let api_url = url::Url::parse(&self.ui.api_base_url)
            .with_context(|| format!("Invalid ui.api_base_url: {}", self.ui.api_base_url))?;
        if !matches!(api_url.scheme(), "http" | "https") {
            anyhow::bail!("ui.api_base_url must be an http(s) URL");
        }

        if !matches!(self.general.log_format.as_str(), "pretty" | "json") {
            anyhow::bail!("general.log_format must be \"pretty\" or \"json\"");
        }

        if self.security.min_password_length == 0 {
            anyhow::bail!("security.min_password_length must be at least 1");
        }

        if self.seed.enabled
            && !self.seed.admin_password.is_empty()
            && self.seed.admin_password.chars().count() < self.security.min_password_length
        {
            anyhow::bail!(
                "seed.admin_password must be at least {} characters",
                self.security.min_password_length
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.ui.api_base_url, "http://localhost:5000");
        assert!(config.seed.enabled);
        assert_eq!(config.security.min_password_length, 8);
        assert!(config.seed.admin_password.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_short_admin_password() {
        let mut config = Config::default();
        config.seed.admin_password = "short".to_string();
        assert!(config.validate().is_err());

        config.seed.enabled = false;
        assert!(config.validate().is_ok());

        config.seed.enabled = true;
        config.seed.admin_password = "long-enough-secret".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[general]"));
        assert!(toml_str.contains("[server]"));
        assert!(toml_str.contains("[ui]"));
    }

    #[test]
    fn test_config_deserialization() {
        let toml_str = r#"
            [general]
            log_level = "debug"

            [server]
            port = 8080
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.log_level, "debug");
        assert_eq!(config.server.port, 8080);

        assert_eq!(config.seed.admin_username, "admin");
    }

    #[test]
    fn test_env_overrides() {
        let mut config = Config::default();
        config
            .apply_env_overrides(|key| match key {
                "FANHUB_PORT" => Some("9000".to_string()),
                "FANHUB_API_BASE_URL" => Some("http://api.internal:9000".to_string()),
                _ => None,
            })
            .unwrap();

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.ui.api_base_url, "http://api.internal:9000");
        assert_eq!(config.general.log_level, "info");
    }

    #[test]
    fn test_env_override_rejects_bad_port() {
        let mut config = Config::default();
        let result = config.apply_env_overrides(|key| {
            (key == "FANHUB_PORT").then(|| "not-a-port".to_string())
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_rejects_bad_api_url() {
        let mut config = Config::default();
        config.ui.api_base_url = "ftp://example.com".to_string();
        assert!(config.validate().is_err());

        config.ui.api_base_url = "not a url".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_inverted_pool() {
        let mut config = Config::default();
        config.general.min_db_connections = 10;
        config.general.max_db_connections = 2;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_save_and_reload() {
        let path = std::env::temp_dir().join(format!("fanhub-config-{}.toml", uuid::Uuid::new_v4()));
        let mut config = Config::default();
        config.server.port = 6001;
        config.save_to_path(&path).unwrap();

        let loaded = Config::load_from_path(&path).unwrap();
        assert_eq!(loaded.server.port, 6001);

        std::fs::remove_file(path).ok();
    }
}
