//! Configuration management

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::constants::{DEFAULT_ACQUIRE_TIMEOUT_SECS, DEFAULT_MAX_CONNECTIONS};

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub database: DatabaseSettings,
    #[serde(default)]
    pub conference: ConferenceSettings,
    #[serde(default)]
    pub log: LogSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub env: String,
    pub host: String,
    pub port: u16,
    pub name: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseSettings {
    /// Connection string of the configuration store. When absent the
    /// server resolves from the static conference definition only.
    pub url: Option<String>,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ConferenceSettings {
    /// JSON file holding the conference definition. The built-in definition
    /// is used when unset.
    pub definition_path: Option<String>,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Json,
    Plain,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LogSettings {
    pub level: String,
    pub format: LogFormat,
    /// Daily rolling log files are written here when set.
    pub directory: Option<String>,
    pub file_prefix: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: LogFormat::Json,
            directory: None,
            file_prefix: "conference".into(),
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let config = Self::with_defaults()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::default().separator("__").try_parsing(true))
            .build()?;
        config.try_deserialize()
    }

    fn with_defaults() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Config::builder()
            .set_default("app.env", "development")?
            .set_default("app.host", "127.0.0.1")?
            .set_default("app.port", 8080)?
            .set_default("app.name", "conference-server")?
            .set_default("database.max_connections", DEFAULT_MAX_CONNECTIONS)?
            .set_default("database.acquire_timeout_secs", DEFAULT_ACQUIRE_TIMEOUT_SECS)?
            .set_default("log.level", "info")?
            .set_default("log.format", "json")?
            .set_default("log.file_prefix", "conference")
    }

    pub fn is_production(&self) -> bool {
        self.app.env.eq_ignore_ascii_case("production")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_deserialize() {
        let config: AppConfig = AppConfig::with_defaults()
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.app.port, 8080);
        assert_eq!(config.database.url, None);
        assert_eq!(config.database.acquire_timeout_secs, 3);
        assert_eq!(config.log.format, LogFormat::Json);
        assert!(config.conference.definition_path.is_none());
        assert!(!config.is_production());
    }

    #[test]
    fn test_overrides_take_precedence() {
        let config: AppConfig = AppConfig::with_defaults()
            .unwrap()
            .set_override("database.url", "postgres://localhost/conference")
            .unwrap()
            .set_override("log.format", "plain")
            .unwrap()
            .set_override("app.env", "production")
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.database.url.as_deref(), Some("postgres://localhost/conference"));
        assert_eq!(config.log.format, LogFormat::Plain);
        assert!(config.is_production());
    }
}
