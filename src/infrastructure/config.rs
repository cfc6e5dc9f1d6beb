//! Application configuration management.
//!
//! Configuration is read once at start-up from environment variables (after
//! loading a `.env` file if present). Missing or invalid values produce a
//! [`ConfigError`] naming the offending variable.
//!
//! # Environment Variables
//!
//! - `APP_HOST`: server host (default `0.0.0.0`)
//! - `APP_PORT`: server port (default `8080`)
//! - `STORAGE_MODE`: `in_memory` (default) | `postgres`
//! - `DATABASE_URL`: required when `STORAGE_MODE=postgres`
//! - `DATABASE_MAX_CONNECTIONS`: pool size (default `5`)
//! - `TODO_MAX_UNFINISHED`: unfinished-item cap (default `5`, at least `1`)

use std::env;
use std::fmt::Display;
use std::str::FromStr;

use thiserror::Error;

/// Default cap on unfinished items.
pub const DEFAULT_MAX_UNFINISHED: u64 = 5;

/// Configuration error types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A required environment variable is not set.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    /// An environment variable has an invalid value.
    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Where TODO items are stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageMode {
    /// Process-local storage; contents are lost on restart.
    #[default]
    InMemory,
    /// `PostgreSQL` via `DATABASE_URL`.
    Postgres,
}

impl FromStr for StorageMode {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "in_memory" | "inmemory" | "memory" => Ok(Self::InMemory),
            "postgres" | "postgresql" | "pg" => Ok(Self::Postgres),
            _ => Err(ConfigError::InvalidValue {
                key: "STORAGE_MODE".to_string(),
                message: format!("unknown storage mode '{value}'"),
            }),
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// HTTP server host address.
    pub app_host: String,
    /// HTTP server port.
    pub app_port: u16,
    /// Storage backend.
    pub storage_mode: StorageMode,
    /// Postgres connection URL; `Some` whenever `storage_mode` is `Postgres`.
    pub database_url: Option<String>,
    /// Connection pool size.
    pub database_max_connections: u32,
    /// Maximum number of unfinished items allowed before creation is refused.
    pub max_unfinished: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            app_host: "0.0.0.0".to_string(),
            app_port: 8080,
            storage_mode: StorageMode::InMemory,
            database_url: None,
            database_max_connections: 5,
            max_unfinished: DEFAULT_MAX_UNFINISHED,
        }
    }
}

impl AppConfig {
    /// Loads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEnvVar` if `DATABASE_URL` is absent in
    /// postgres mode, and `ConfigError::InvalidValue` for unparsable values or a
    /// zero unfinished-item cap.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Same as [`AppConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let storage_mode = lookup("STORAGE_MODE")
            .map_or(Ok(StorageMode::default()), |value| value.parse())?;
        let database_url = lookup("DATABASE_URL").filter(|url| !url.trim().is_empty());
        if storage_mode == StorageMode::Postgres && database_url.is_none() {
            return Err(ConfigError::MissingEnvVar("DATABASE_URL".to_string()));
        }

        let max_unfinished = parse_or(&lookup, "TODO_MAX_UNFINISHED", defaults.max_unfinished)?;
        if max_unfinished == 0 {
            return Err(ConfigError::InvalidValue {
                key: "TODO_MAX_UNFINISHED".to_string(),
                message: "must be at least 1".to_string(),
            });
        }

        Ok(Self {
            app_host: lookup("APP_HOST").unwrap_or(defaults.app_host),
            app_port: parse_or(&lookup, "APP_PORT", defaults.app_port)?,
            storage_mode,
            database_url,
            database_max_connections: parse_or(
                &lookup,
                "DATABASE_MAX_CONNECTIONS",
                defaults.database_max_connections,
            )?,
            max_unfinished,
        })
    }

    /// `host:port` string for binding the listener.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.app_host, self.app_port)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: Display,
{
    lookup(key).map_or(Ok(default), |value| {
        value
            .trim()
            .parse()
            .map_err(|error: T::Err| ConfigError::InvalidValue {
                key: key.to_string(),
                message: error.to_string(),
            })
    })
}
