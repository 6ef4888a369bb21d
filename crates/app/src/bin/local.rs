// Jobboard API - Local Development Server

use std::net::SocketAddr;
use tokio::signal;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use jobboard_app::{
    body_limit_layer, build_cors_layer, create_app, create_repositories, env_filter,
};
use jobboard_common::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Loaded before the subscriber, which is built from `config.rust_log`
    let config = Config::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter(&config.rust_log))
        .pretty()
        .init();

    info!("Starting Jobboard API local development server");

    info!(store = ?config.store, "Configuration loaded successfully");

    let repos = create_repositories(&config).await.map_err(|e| {
        error!("Failed to initialize store: {}", e);
        e
    })?;

    let app = create_app(repos).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(build_cors_layer(&config.cors_allowed_origins))
            .layer(body_limit_layer())
            .into_inner(),
    );

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));

    info!("Server starting on http://{}", addr);
    info!("Health check available at http://{}/health", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!("Failed to install terminate handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal, starting graceful shutdown");
        },
        _ = terminate => {
            info!("Received terminate signal, starting graceful shutdown");
        },
    }
}
