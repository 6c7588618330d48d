use crate::core::ConfigProvider;
use crate::utils::error::{AppError, Result};
use axum::Router;
use tokio::net::TcpListener;

pub async fn bind<C: ConfigProvider>(config: &C) -> Result<TcpListener> {
    let address = format!("{}:{}", config.host(), config.port());
    TcpListener::bind(address.as_str())
        .await
        .map_err(|e| AppError::ServerError {
            message: format!("cannot bind {}: {}", address, e),
        })
}

/// Serves until Ctrl-C (or SIGTERM on unix), then drains in-flight requests.
pub async fn serve(listener: TcpListener, router: Router) -> Result<()> {
    if let Ok(address) = listener.local_addr() {
        tracing::info!("🚀 Listening on http://{}", address);
    }

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::ServerError {
            message: e.to_string(),
        })
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("Failed to listen for Ctrl-C: {}", e);
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
                tracing::warn!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("🛑 Shutdown signal received");
}
