use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::str::FromStr;

use crate::constants::server::{
    DEFAULT_MAX_CONNECTIONS, DEFAULT_PORT, DEFAULT_REQUEST_TIMEOUT_SECS,
};

const DEFAULT_LOG_LEVEL: &str = "customer_api=debug,tower_http=debug";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub environment: String,
    pub port: u16,
    pub storage: StorageBackend,
    pub database_url: Option<String>,
    pub max_connections: u32,
    pub request_timeout: u64,
    pub log_level: String,
    pub log_format: LogFormat,
    /// Insert demo customers on startup when the store is empty
    pub seed_customers: bool,
}

/// Where customer records are kept
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Memory,
    Postgres,
}

impl FromStr for StorageBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" | "inmemory" | "in-memory" => Ok(StorageBackend::Memory),
            "postgres" | "postgresql" => Ok(StorageBackend::Postgres),
            other => Err(anyhow::anyhow!("Unknown STORAGE_BACKEND: {}", other)),
        }
    }
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageBackend::Memory => write!(f, "memory"),
            StorageBackend::Postgres => write!(f, "postgres"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(anyhow::anyhow!("Unknown LOG_FORMAT: {}", other)),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            port: DEFAULT_PORT,
            storage: StorageBackend::Memory,
            database_url: None,
            max_connections: DEFAULT_MAX_CONNECTIONS,
            request_timeout: DEFAULT_REQUEST_TIMEOUT_SECS,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            log_format: LogFormat::Pretty,
            seed_customers: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // Load .env file if it exists

        Self::from_vars(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    pub fn from_vars<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        let storage = match lookup("STORAGE_BACKEND") {
            Some(value) => value.parse()?,
            None => defaults.storage,
        };

        let database_url = lookup("DATABASE_URL").filter(|url| !url.trim().is_empty());
        if storage == StorageBackend::Postgres && database_url.is_none() {
            return Err(anyhow::anyhow!(
                "DATABASE_URL environment variable is required for the postgres backend"
            ));
        }

        Ok(Config {
            environment: lookup("ENVIRONMENT").unwrap_or(defaults.environment),
            port: match lookup("PORT") {
                Some(port) => port
                    .parse()
                    .map_err(|e| anyhow::anyhow!("Invalid PORT '{}': {}", port, e))?,
                None => defaults.port,
            },
            storage,
            database_url,
            max_connections: lookup("MAX_CONNECTIONS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_connections),
            request_timeout: lookup("REQUEST_TIMEOUT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.request_timeout),
            log_level: lookup("LOG_LEVEL").unwrap_or(defaults.log_level),
            log_format: match lookup("LOG_FORMAT") {
                Some(value) => value.parse()?,
                None => defaults.log_format,
            },
            seed_customers: lookup("SEED_CUSTOMERS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.seed_customers),
        })
    }
}
