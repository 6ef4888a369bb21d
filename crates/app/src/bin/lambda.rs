//! Jobboard API - AWS Lambda Runtime

use lambda_http::{run, Error};
use tower_http::trace::TraceLayer;
use tracing::info;

use jobboard_app::{
    body_limit_layer, build_cors_layer, create_app, create_repositories, env_filter,
};
use jobboard_common::config::Config;

#[tokio::main]
async fn main() -> Result<(), Error> {
    let config =
        Config::from_env().map_err(|e| Error::from(format!("Configuration error: {}", e)))?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter(&config.rust_log))
        .json()
        .without_time()
        .init();

    info!("Initializing Jobboard API Lambda");

    let repos = create_repositories(&config)
        .await
        .map_err(|e| Error::from(format!("Store initialization error: {}", e)))?;

    let app = create_app(repos)
        .layer(TraceLayer::new_for_http())
        .layer(build_cors_layer(&config.cors_allowed_origins))
        .layer(body_limit_layer());

    info!("Jobboard API Lambda ready to serve requests");

    run(app).await
}
