//! Application builder and server loop.

use std::time::Duration;

use axum::Router;
use tokio::net::TcpListener;

use propshop_core::error::AppError;

use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    build_router(state)
}

/// Serves the application until Ctrl+C or SIGTERM.
pub async fn serve(state: AppState) -> Result<(), AppError> {
    let addr = format!("{}:{}", state.config.server.host, state.config.server.port);
    let grace = Duration::from_secs(state.config.server.shutdown_grace_seconds);
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!(%addr, "PropShop server listening");

    axum::serve(listener, build_app(state))
        .with_graceful_shutdown(shutdown_signal(grace))
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    tracing::info!("PropShop server stopped");
    Ok(())
}

/// Resolves on the first shutdown signal, then arms a hard deadline for
/// in-flight requests.
async fn shutdown_signal(grace: Duration) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!(grace_seconds = grace.as_secs(), "Shutdown signal received, draining");
    tokio::spawn(async move {
        tokio::time::sleep(grace).await;
        tracing::warn!("Grace period elapsed, exiting");
        std::process::exit(0);
    });
}
