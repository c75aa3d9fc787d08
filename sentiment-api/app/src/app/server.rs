use crate::error::ServiceError;
use axum::Router;
use std::net::SocketAddr;
use tokio::signal;
use tracing::info;

/// Serve `app` on `bind` until SIGINT or SIGTERM.
pub async fn serve(app: Router, bind: SocketAddr) -> Result<(), ServiceError> {
    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .map_err(|e| ServiceError::Bind {
            address: bind.to_string(),
            source: e,
        })?;
    info!("Server listening on {}", listener.local_addr()?);
    info!("  - GET  /          (service info)");
    info!("  - GET  /health    (health check)");
    info!("  - POST /predict   (sentiment prediction)");
    info!("  - POST /explain   (LIME explanation)");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Wait for SIGTERM or SIGINT (Ctrl+C) for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received SIGINT, initiating graceful shutdown"),
        () = terminate => info!("Received SIGTERM, initiating graceful shutdown"),
    }
}
