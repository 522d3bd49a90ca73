//! Router construction and server startup.

use std::future::Future;
use std::net::SocketAddr;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::routes::{embed, health, method_not_allowed, not_found};
use crate::state::AppState;

type ServeResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

/// Build the router with all routes and middleware.
///
/// CORS is fully permissive; the service is called from browser front-ends
/// on other origins.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health).fallback(method_not_allowed))
        .route("/embed", post(embed::embed_one).fallback(method_not_allowed))
        .route(
            "/embed-batch",
            post(embed::embed_batch).fallback(method_not_allowed),
        )
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(state.max_body_bytes))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve until Ctrl+C or SIGTERM.
pub async fn run_server(addr: SocketAddr, state: AppState) -> ServeResult {
    run_server_with_shutdown(addr, state, shutdown_signal()).await
}

/// Bind `addr` and serve until `shutdown` resolves.
pub async fn run_server_with_shutdown<F>(addr: SocketAddr, state: AppState, shutdown: F) -> ServeResult
where
    F: Future<Output = ()> + Send + 'static,
{
    let listener = TcpListener::bind(addr).await?;
    serve(listener, state, shutdown).await
}

/// Serve on an already-bound listener until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, state: AppState, shutdown: F) -> ServeResult
where
    F: Future<Output = ()> + Send + 'static,
{
    info!(
        addr = %listener.local_addr()?,
        model = %state.session.identifier(),
        dim = state.session.dimension(),
        "Embedding service listening"
    );

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("Embedding service shutdown complete");
    Ok(())
}

/// Resolves on Ctrl+C, or SIGTERM on Unix.
pub async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}
