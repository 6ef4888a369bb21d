//! Configuration management following 12-factor app principles
//!
//! All configuration is loaded from environment variables to ensure
//! clean separation between code and config.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::env;

/// Log filter used when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "info,jobboard=debug";

/// Demo clients seeded into the memory backend when `JOBBOARD_SEED_CLIENTS` is unset
const DEFAULT_SEED_CLIENTS: i64 = 3;

/// Which store backs the repositories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Postgres,
    Memory,
}

impl std::str::FromStr for StoreBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StoreBackend::Postgres),
            "memory" | "in-memory" => Ok(StoreBackend::Memory),
            other => Err(anyhow::anyhow!(
                "Unknown store backend: {}. Supported backends: postgres, memory",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Store backend selection
    pub store: StoreBackend,

    /// Database connection URL, required for the postgres backend
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    pub run_migrations: bool,

    /// Demo clients registered when the memory backend starts
    pub seed_clients: i64,

    /// Comma-separated list of allowed origins, or `*`
    pub cors_allowed_origins: String,

    /// Log filter directives, used when building the subscriber
    pub rust_log: String,
    pub port: u16,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // Load .env file if it exists

        let store = match env::var("JOBBOARD_STORE") {
            Ok(value) => value.parse()?,
            Err(_) => StoreBackend::default(),
        };

        let database_url = env::var("DATABASE_URL").ok();
        if store == StoreBackend::Postgres && database_url.is_none() {
            return Err(anyhow::anyhow!(
                "DATABASE_URL is required for the postgres store"
            ));
        }

        let config = Self {
            store,
            database_url,
            database_max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5),
            run_migrations: env::var("RUN_MIGRATIONS")
                .map(|v| matches!(v.as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
            seed_clients: env::var("JOBBOARD_SEED_CLIENTS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(|n: i64| n.max(0))
                .unwrap_or(DEFAULT_SEED_CLIENTS),
            cors_allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                .unwrap_or_else(|_| "*".to_string()),
            rust_log: env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .unwrap_or(3000),
        };

        Ok(config)
    }
}
