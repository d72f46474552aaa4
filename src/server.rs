//! Server initialization and routing
//!
//! This module handles the Axum server setup including:
//! - Router configuration with all API endpoints
//! - Middleware stack (CORS gate, request IDs, timeouts, tracing)
//! - Graceful shutdown handling

use crate::config::ServerConfig;
use crate::middleware::{cors, request_id};
use crate::routes::{api_info, not_found};
use crate::routes::{auth, data, health};
use crate::state::ServerState;
use axum::http::StatusCode;
use axum::middleware::from_fn;
use axum::routing::{get, post};
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

/// Build the Axum router with all routes and middleware
///
/// Routes are divided into:
/// - Public routes: /, /health, /ready, /get_token
/// - Protected routes: /api/v1/* (each handler runs the token guard itself,
///   so public endpoints pay no verification cost)
///
/// The CORS gate sits outside the router: preflights are answered before any
/// route matching happens, and every other response picks up the permissive
/// origin header on the way out. Failures anywhere inside the stack surface
/// through the `ApiError` response conversion, the single writer of error
/// bodies.
pub fn build_router(state: Arc<ServerState>) -> Router {
    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/", get(api_info))
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        .route("/get_token", post(auth::get_token));

    // Protected routes (token guard inside each handler)
    let protected_routes = Router::new()
        .route("/api/v1/sheets", get(data::list_sheets))
        .route("/api/v1/sheets/{name}", get(data::get_sheet))
        .route("/api/v1/summary", get(data::column_summary));

    // Combine routes
    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .fallback(not_found)
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            state.config.timeout(),
        ))
        .layer(from_fn(cors))
        .layer(from_fn(request_id))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the Tally HTTP server
///
/// Initializes logging, builds the router from the provided configuration and
/// serves it until SIGTERM or Ctrl+C.
pub async fn start_server(config: ServerConfig) -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(config.log_level.as_str())
        .with_target(false)
        .json()
        .init();

    let addr: SocketAddr = config.socket_addr()?;
    let state = Arc::new(ServerState::new(config));
    let app = build_router(state);

    tracing::info!("Starting tally server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Shutdown signal handler
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C, shutting down..."),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down..."),
    }
}
