//! # Catalog Service
//!
//! Product catalog HTTP service backed by PostgreSQL.
//!
//! This is the application entry point that initializes:
//! - Tracing/logging subsystem
//! - Configuration loading
//! - Database connection pool
//! - HTTP server with graceful shutdown

use anyhow::Result;
use tracing::info;

use catalog_service::config::Settings;
use catalog_service::startup::Application;

#[tokio::main]
async fn main() -> Result<()> {
    catalog_service::telemetry::init_tracing();

    info!("Starting Catalog Service...");

    let settings = Settings::load()?;
    info!(
        host = %settings.server.host,
        port = %settings.server.port,
        environment = %settings.environment,
        "Configuration loaded"
    );

    let application = Application::build(settings).await?;

    info!("Server ready to accept connections");
    application.run_until_stopped().await?;

    info!("Catalog Service stopped");
    Ok(())
}
