//! Shared Countdown - A countdown whose deadline every client agrees on
//! 
//! This is the entry point for the countdown HTTP server.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use shared_countdown::{
    api::{create_router, COUNTDOWN_PATH},
    config::Config,
    services::{CountdownService, RemoteStateStore},
    state::AppState,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("shared_countdown={},tower_http=info", config.log_level()))
        .init();

    info!("Starting shared-countdown server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}", config.host, config.port);

    // Decide once whether the remote store is reachable at all
    let store = RemoteStateStore::from_config(&config);
    let countdown = CountdownService::new(store);
    let state = Arc::new(AppState::new(countdown, config.port, config.host.clone()));

    let app = create_router(state);

    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  GET  {}  - Current countdown", COUNTDOWN_PATH);
    info!("  POST {}  - Start or clear the countdown", COUNTDOWN_PATH);
    info!("  GET  /health         - Health check");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}
