//! HTTP server for the support bot.
//!
//! Exposes the chat, escalation, session and analytics endpoints and serves
//! the widget bundle for every other path.

pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::{AppState, DEFAULT_STATIC_DIR};

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Default server port.
pub const DEFAULT_PORT: u16 = 3001;

/// Build the full application with CORS and request tracing.
pub fn build_app(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    create_router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Start the HTTP server and run until the process is stopped.
///
/// # Errors
/// Returns an error if the listener cannot be bound or the server fails.
pub async fn run_server(state: Arc<AppState>, port: u16) -> anyhow::Result<()> {
    run_server_with_shutdown(state, port, std::future::pending()).await
}

/// Start the HTTP server, stopping once `shutdown_signal` completes.
///
/// # Errors
/// Returns an error if the listener cannot be bound or the server fails.
pub async fn run_server_with_shutdown<F>(
    state: Arc<AppState>,
    port: u16,
    shutdown_signal: F,
) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = build_app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Support bot listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}
