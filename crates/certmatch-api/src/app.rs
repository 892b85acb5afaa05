//! Application builder: wires router, middleware and state into an Axum
//! app and serves it.

use axum::Router;

use certmatch_core::config::AppConfig;
use certmatch_core::error::AppError;
use certmatch_database::Stores;

use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    build_router(state)
}

/// Runs the CertMatch server until Ctrl-C, then releases the stores.
pub async fn run_server(config: AppConfig, stores: Stores) -> Result<(), AppError> {
    let addr = config.server.bind_address();
    let state = AppState::new(config, stores.clone());
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!(%addr, provider = %stores.provider(), "CertMatch server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    tracing::info!("Shutting down, closing stores");
    stores.close().await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for Ctrl-C; shutting down");
    }
}
