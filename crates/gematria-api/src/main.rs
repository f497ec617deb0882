//! Gematria API server entry point

use anyhow::Context;
use clap::Parser;
use gematria_api::{build_router, ApiConfig, AppState};
use gematria_core::logging_facility::{init, Profile};
use tokio::net::TcpListener;
use tokio::signal;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is fine; real environment variables still apply
    dotenvy::dotenv().ok();
    let config = ApiConfig::parse();

    init(Profile::from_format(&config.log_format));
    tracing::debug!(?config, "configuration loaded");

    let state = AppState::from_config(&config).context("failed to open database")?;
    let app = build_router(state);

    let addr = config.socket_addr();
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    tracing::info!(%addr, "gematria api listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("gematria api stopped");
    Ok(())
}

async fn shutdown_signal() {
    match signal::ctrl_c().await {
        Ok(()) => tracing::info!("received Ctrl+C, shutting down"),
        Err(err) => tracing::error!(error = %err, "failed to listen for Ctrl+C"),
    }
}
