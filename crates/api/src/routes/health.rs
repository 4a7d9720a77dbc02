//! Health check endpoint.

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use crate::AppState;

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: &'static str,
    /// Service name.
    pub service: &'static str,
    /// Service version.
    pub version: &'static str,
    /// Number of registered action handlers.
    pub action_handlers: usize,
}

/// Health check handler. Reports the engine's dispatch surface so a probe
/// can catch a server that came up with an empty registry.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: if state.registry.is_empty() {
            "degraded"
        } else {
            "healthy"
        },
        service: "atrium",
        version: env!("CARGO_PKG_VERSION"),
        action_handlers: state.registry.len(),
    })
}

/// Creates health check routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
