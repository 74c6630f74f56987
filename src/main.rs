//! # Forum Server
//!
//! A discussion forum backend implemented in Rust.
//!
//! This is the application entry point that initializes:
//! - Tracing/logging subsystem
//! - Configuration loading
//! - The configured store (PostgreSQL pool or in-memory)
//! - HTTP server

use anyhow::Result;
use tracing::info;

use forum_server::config::Settings;
use forum_server::startup::Application;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber for structured logging
    forum_server::telemetry::init_tracing();

    info!("Starting Forum Server...");

    // Load configuration from environment and config files
    let settings = Settings::load()?;
    info!(
        host = %settings.server.host,
        port = %settings.server.port,
        storage = ?settings.storage.backend,
        environment = %settings.environment,
        "Configuration loaded"
    );

    // Build and run the application
    let application = Application::build(settings).await?;

    info!("Server ready to accept connections");
    application.run_until_stopped().await?;

    Ok(())
}
