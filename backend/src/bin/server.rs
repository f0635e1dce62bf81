//! Handyman HTTP Server Binary
//!
//! Entry point for the tool panel's REST API. Loads configuration, opens the
//! preference store, builds the router and serves until Ctrl-C.
//!
//! # Usage
//!
//! ```bash
//! # Preferences in ./handyman-preferences.json (default)
//! cargo run --bin handyman-server
//!
//! # In-memory preferences on another port
//! REPOSITORY_TYPE=local PORT=9000 cargo run --bin handyman-server
//! ```
//!
//! # Environment Variables
//!
//! - `HANDYMAN_CONFIG`: Path to a `handyman.toml` (default: searched)
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8080)
//! - `REPOSITORY_TYPE`: `local` or `file` (default: file)
//! - `HANDYMAN_STORE_PATH`: Preference file for the `file` store
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::net::SocketAddr;

use anyhow::Context;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use handyman::config::AppConfig;
use handyman::db::RepositoryFactory;
use handyman::http::{create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("Starting Handyman HTTP Server");

    let config = AppConfig::load().context("Failed to load configuration")?;

    let repository = RepositoryFactory::from_settings(&config.storage)
        .context("Failed to open preference store")?;
    info!("Preference store ready ({})", config.storage.repo_type);

    let app = create_router(AppState::new(repository));

    let addr: SocketAddr = config
        .server
        .bind_address()
        .parse()
        .with_context(|| format!("Invalid bind address {}", config.server.bind_address()))?;

    info!("Server listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
