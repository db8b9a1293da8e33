//! HTTP server entry point.
//!
//! Loads settings (failing fast on bad configuration), wires the model
//! and Figma clients into the engine, and serves the router.

use std::sync::Arc;

use anyhow::Result;
use layoutgen_config::Settings;
use layoutgen_engine::PipelineEngine;
use layoutgen_figma::FigmaClient;
use layoutgen_llm::UnifiedLlmClient;
use layoutgen_server::{router, ServerState};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Loads .env first so RUST_LOG from it reaches the filter below.
    let settings = Settings::from_env()?;

    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .compact()
        .init();

    let state = Arc::new(init_server_state(&settings));
    let app = router(state);

    let addr = settings.server.addr();
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Builds the engine from settings.
fn init_server_state(settings: &Settings) -> ServerState {
    let llm = UnifiedLlmClient::from_settings(&settings.llm);
    info!("Model: {} via {}", settings.llm.model, settings.llm.provider);

    let figma = FigmaClient::from_settings(settings);
    info!(
        "Figma export: {}{}",
        if figma.is_enabled() { "enabled" } else { "disabled" },
        if settings.debug { " (debug mode)" } else { "" }
    );

    ServerState::new(PipelineEngine::new(Arc::new(llm), Arc::new(figma)))
}
