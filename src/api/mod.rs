//! REST API for the sizing calculator.
//!
//! Endpoints:
//! - `GET /health` liveness check
//! - `POST /watt-hours` daily load aggregation
//! - `POST /panels` panel count for a daily usage figure
//! - `POST /size` full sizing report for an appliance list

mod handlers;
pub mod types;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tracing::info;

use crate::sizing::SolarSystem;

/// Immutable application state shared across all request handlers.
///
/// Every calculation is a pure function of the request, so the state only
/// holds the fallback generation parameters and needs no locking.
pub struct AppState {
    /// System used by `POST /size` when the request omits `solar`.
    pub system: SolarSystem,
}

/// Builds the axum router with all API routes.
///
/// # Arguments
///
/// * `state` - Shared application state
///
/// # Returns
///
/// Configured `Router` ready to serve.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::get_health))
        .route("/watt-hours", post(handlers::post_watt_hours))
        .route("/panels", post(handlers::post_panels))
        .route("/size", post(handlers::post_size))
        .with_state(state)
}

/// Binds to the given address and serves the API until the process exits.
///
/// # Errors
///
/// Returns an `io::Error` if the listener cannot bind or the server fails.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) -> std::io::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("API server listening on http://{addr}");
    axum::serve(listener, app).await
}
