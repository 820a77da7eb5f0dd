//! Connection settings, read from the environment.

use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use std::str::FromStr;
use thiserror::Error;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://reservations.db?mode=rwc";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value {value:?} for {key}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub database_url: String,
    pub max_connections: u32,
    pub sqlx_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_owned(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            sqlx_logging: false,
        }
    }
}

impl Config {
    /// Read `DATABASE_URL`, `DATABASE_MAX_CONNECTIONS` and `DATABASE_SQLX_LOGGING`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Ok(Self {
            database_url: lookup("DATABASE_URL").unwrap_or(defaults.database_url),
            max_connections: parse_or(
                &lookup,
                "DATABASE_MAX_CONNECTIONS",
                defaults.max_connections,
            )?,
            sqlx_logging: parse_or(&lookup, "DATABASE_SQLX_LOGGING", defaults.sqlx_logging)?,
        })
    }

    pub fn is_in_memory(&self) -> bool {
        self.database_url.contains(":memory:") || self.database_url.contains("mode=memory")
    }

    pub fn connect_options(&self) -> ConnectOptions {
        // An in-memory SQLite database lives and dies with a single connection
        let max_connections = if self.is_in_memory() {
            1
        } else {
            self.max_connections.max(1)
        };
        let mut opt = ConnectOptions::new(self.database_url.clone());
        opt.max_connections(max_connections)
            .min_connections(1)
            .sqlx_logging(self.sqlx_logging);
        opt
    }

    pub async fn connect(&self) -> Result<DatabaseConnection, DbErr> {
        let db = Database::connect(self.connect_options()).await?;
        tracing::info!(url = %self.database_url, "connected to reservation store");
        Ok(db)
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
    }
}
