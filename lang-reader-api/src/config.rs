use std::{path::PathBuf, str::FromStr};

use serde::Deserialize;
use serde_with::serde_as;
use sqlx::postgres::{PgConnectOptions, PgSslMode};
use strum::{Display, EnumString};

#[derive(Deserialize, Clone)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub database: DatabaseSettings,
}

#[serde_as]
#[derive(Deserialize, Clone)]
pub struct ApplicationSettings {
    #[serde_as(as = "serde_with::DisplayFromStr")]
    pub port: u16,
    pub host: String,
    /// Origin allowed through CORS.
    pub app_url: String,
    pub storage: StorageBackend,
}

#[derive(Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Postgres,
    Memory,
}

#[serde_as]
#[derive(Deserialize, Clone, Debug)]
pub struct DatabaseSettings {
    pub username: String,
    pub password: String,
    #[serde_as(as = "serde_with::DisplayFromStr")]
    pub port: u16,
    pub host: String,
    pub database_name: String,
    pub require_ssl: bool,
    pub max_connections: u32,
    pub connect_retries: u32,
    pub initial_retry_delay_secs: u64,
    pub max_retry_delay_secs: u64,
}

impl DatabaseSettings {
    pub fn without_db(&self) -> PgConnectOptions {
        let ssl_mode = if self.require_ssl {
            PgSslMode::Require
        } else {
            PgSslMode::Prefer
        };

        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.username)
            .password(&self.password)
            .ssl_mode(ssl_mode)
    }

    pub fn with_db(&self) -> PgConnectOptions {
        self.without_db().database(&self.database_name)
    }
}

/// The deployment environment, from `APP_ENVIRONMENT` (default `local`).
pub fn current_environment() -> Result<Environment, config::ConfigError> {
    let raw = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "local".into());
    Environment::from_str(&raw)
        .map_err(|_| config::ConfigError::Message(format!("Failed to parse APP_ENVIRONMENT: {raw}")))
}

fn config_directory() -> Result<PathBuf, config::ConfigError> {
    if let Ok(dir) = std::env::var("LANG_READER_CONFIG_DIR") {
        return Ok(PathBuf::from(dir));
    }

    std::env::current_dir()
        .map(|base_path| base_path.join("config"))
        .map_err(|err| {
            config::ConfigError::Message(format!("Failed to determine the current directory: {err}"))
        })
}

pub fn read_config(environment: &Environment) -> Result<Settings, config::ConfigError> {
    let config_directory = config_directory()?;
    let environment_filename = format!("{}.yaml", environment);

    let settings = config::Config::builder()
        .add_source(config::File::from(config_directory.join("base.yaml")))
        .add_source(config::File::from(
            config_directory.join(environment_filename),
        ))
        .add_source(
            config::Environment::with_prefix("LANG_READER")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    settings.try_deserialize::<Settings>()
}

#[derive(Display, Debug, EnumString, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    #[strum(ascii_case_insensitive, serialize = "local")]
    Local,
    #[strum(ascii_case_insensitive, serialize = "production")]
    Production,
}
