/// Server setup and initialization
///
/// Wires together the planning store and HTTP routes, and provides the application
/// factory used both by the binary and by integration tests.

use crate::{
    api::{create_api_routes, AppState},
    config::Config,
    store::WorkforceStore,
};
use anyhow::Result;
use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

/// Create the main Axum application with all routes
///
/// Opens (or creates) the SQLite database named by the configuration and mounts the API on it.
pub async fn create_app(config: Config) -> Result<Router> {
    tracing::info!("📁 Using data directory: {}", config.database.data_dir);
    let store = WorkforceStore::open(&config.database.data_dir, &config.database.db_file)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to open workforce database: {}", e))?;

    tracing::info!("📡 Creating HTTP router with all endpoints");
    let app = build_router(store);

    tracing::info!("✅ Application initialized successfully");

    Ok(app)
}

/// Build the router over an already-open store
pub fn build_router(store: WorkforceStore) -> Router {
    Router::new()
        // Health check endpoint
        .route("/healthz", get(health_check))
        // Planning API routes
        .merge(create_api_routes().with_state(AppState { store }))
}

/// Start the HTTP server with the given configuration
///
/// Creates the application and starts the Axum server on the configured address and port.
pub async fn start_server(config: Config) -> Result<()> {
    // RUST_LOG wins; otherwise log at info
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_thread_ids(true)
        .with_level(true)
        .init();

    tracing::info!("Starting workforce planner server...");

    let app = create_app(config.clone()).await?;

    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&bind_addr).await?;

    tracing::info!("Server listening on http://{}", bind_addr);

    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}

/// Health check endpoint handler
async fn health_check() -> &'static str {
    "ok"
}
