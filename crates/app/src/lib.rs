//! Jobboard application composition root
//!
//! Builds the store selected by configuration and composes the domain
//! routers into a single application.

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    response::IntoResponse,
    Router,
};
use jobboard_common::{config::Config, config::StoreBackend, ApiError};
use jobboard_jobs::{InMemoryStore, JobsRepositories, JobsState};
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing_subscriber::EnvFilter;

/// Maximum accepted request body size
const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Create repositories for the configured store backend
pub async fn create_repositories(config: &Config) -> Result<JobsRepositories, anyhow::Error> {
    match config.store {
        StoreBackend::Memory => {
            let store = InMemoryStore::new();
            store.seed_demo_clients(config.seed_clients).await;
            tracing::info!(seed_clients = config.seed_clients, "Using in-memory store");
            Ok(JobsRepositories::in_memory(store))
        }
        StoreBackend::Postgres => {
            let database_url = config
                .database_url
                .as_deref()
                .ok_or_else(|| anyhow::anyhow!("DATABASE_URL is required for the postgres store"))?;

            let pool = PgPoolOptions::new()
                .max_connections(config.database_max_connections)
                .connect(database_url)
                .await
                .map_err(|e| anyhow::anyhow!("Database connection failed: {}", e))?;
            tracing::info!("Database connection established");

            if config.run_migrations {
                sqlx::migrate!("../../migrations").run(&pool).await?;
                tracing::info!("Database migrations applied");
            }

            Ok(JobsRepositories::new(pool))
        }
    }
}

/// Log filter from the configured directives, falling back to `info` when they do not parse
pub fn env_filter(directives: &str) -> EnvFilter {
    EnvFilter::try_new(directives).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Create the main application router with all routes
pub fn create_app(repos: JobsRepositories) -> Router {
    Router::new()
        .route("/health", axum::routing::get(health_check))
        .route(
            "/",
            axum::routing::get(|| async { "Jobboard API v0.0.1-SNAPSHOT" }),
        )
        .merge(jobboard_jobs::routes().with_state(JobsState::new(repos)))
        .fallback(route_not_found)
}

/// CORS layer from a comma-separated origin list; `*` allows any origin
pub fn build_cors_layer(origins: &str) -> CorsLayer {
    if origins.trim() == "*" {
        return CorsLayer::permissive();
    }

    let allowed: Vec<HeaderValue> = origins
        .split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = o, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

/// Request body size limit
pub fn body_limit_layer() -> DefaultBodyLimit {
    DefaultBodyLimit::max(MAX_BODY_BYTES)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

/// Envelope for unmatched routes
async fn route_not_found() -> impl IntoResponse {
    ApiError::not_found("Route not found")
}
