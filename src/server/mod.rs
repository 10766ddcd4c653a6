//! HTTP server module for careplan
//!
//! Serves the password check, plan generation and document export over HTTP.

pub mod api;
pub mod routes;
pub mod state;

use anyhow::{Context, Result};
use tracing::info;

use crate::config::Settings;

pub use routes::router;
pub use state::AppState;

/// Run the HTTP server until Ctrl-C
pub async fn run(settings: Settings) -> Result<()> {
    let addr = settings.listen_addr();
    let app = router(AppState::from_settings(settings));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind HTTP server to {}", addr))?;
    info!("careplan server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("careplan server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
