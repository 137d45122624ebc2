use anyhow::{Context, Result};
use axum::{routing::any, Router};
use tokio::net::TcpListener;

const ALIVE: &str = "Selfbot is alive!";

/// Answers on every path and method.
pub fn router() -> Router {
    Router::new().route("/", any(alive)).fallback(alive)
}

async fn alive() -> &'static str {
    ALIVE
}

/// Serves the liveness route until the process shuts down.
pub async fn serve(port: u16) -> Result<()> {
    let listener = TcpListener::bind(("0.0.0.0", port))
        .await
        .with_context(|| format!("Unable to bind liveness endpoint on port {port}"))?;
    log::info!("HTTP server starting on port {}", port);

    axum::serve(listener, router())
        .await
        .context("Liveness endpoint stopped")
}
