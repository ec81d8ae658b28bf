use dotenv::dotenv;
use dotenv::from_path;
use std::env;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load .env file from path {path}: {reason}")]
    EnvFile { path: String, reason: String },

    #[error("Invalid {key}: {reason}")]
    InvalidValue { key: &'static str, reason: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub api_host: String,
    pub api_port: u16,
    pub db_pool_size: u32,
    pub db_busy_timeout_ms: u32,
    pub db_connect_timeout_secs: u64,
}

impl Config {
    /// Load configuration from a specified `.env` file path or default to the root `.env` file.
    pub fn from_env(env_path: Option<&str>) -> Result<Self, ConfigError> {
        if let Some(path) = env_path {
            from_path(path).map_err(|e| ConfigError::EnvFile {
                path: path.to_string(),
                reason: e.to_string(),
            })?;
        } else {
            dotenv().ok();
        }

        Ok(Self {
            database_url: env::var("DATABASE_URL").unwrap_or_else(|_| "catalog.db".to_string()),
            api_host: env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            api_port: parse_var("API_PORT", 8080)?,
            db_pool_size: parse_var("DB_POOL_SIZE", 8)?,
            db_busy_timeout_ms: parse_var("DB_BUSY_TIMEOUT_MS", 5000)?,
            db_connect_timeout_secs: parse_var("DB_CONNECT_TIMEOUT_SECS", 5)?,
        })
    }

    /// Configuration pointing at the given database, everything else defaulted.
    pub fn for_database(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            api_host: "127.0.0.1".to_string(),
            api_port: 8080,
            db_pool_size: 8,
            db_busy_timeout_ms: 5000,
            db_connect_timeout_secs: 5,
        }
    }

    pub fn api_address(&self) -> String {
        format!("{}:{}", self.api_host, self.api_port)
    }
}

fn parse_var<T>(key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
            key,
            reason: format!("{raw:?}: {e}"),
        }),
        Err(_) => Ok(default),
    }
}
