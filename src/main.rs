// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use anyhow::Context;
use std::{net::SocketAddr, sync::Arc};
use tracing_subscriber::EnvFilter;

use crate::application::diagnosis_service::DiagnosisService;
use crate::infrastructure::config::load_diagnostics_config;
use crate::infrastructure::model_store::load_model;
use crate::presentation::app_state::AppState;
use crate::presentation::routes::router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = load_diagnostics_config()?;

    // Load the classifier once; it is shared read-only by every request
    let model = load_model(&config.model.path).inspect_err(|e| {
        tracing::error!("Cannot start without a classifier: {}", e);
    })?;

    // Create services (application layer)
    let diagnosis_service = DiagnosisService::new(model);

    // Create application state
    let state = Arc::new(AppState { diagnosis_service });

    // Build router (presentation layer)
    let app = router(state);

    // Start server
    let addr: SocketAddr = config
        .server
        .bind
        .parse()
        .with_context(|| format!("Invalid bind address {}", config.server.bind))?;
    tracing::info!("Starting turbine-diagnostics service on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, app).await?;

    Ok(())
}
