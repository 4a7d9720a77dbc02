//! HTTP API layer with Axum routes and middleware.
//!
//! This crate provides:
//! - REST API routes for the approval workflow engine
//! - Authentication middleware
//! - Request extractors
//! - Response types

pub mod middleware;
pub mod routes;

use axum::Router;
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use atrium_core::workflow::{ActionRegistry, AuthorizationPolicy, Notifier};
use atrium_shared::JwtService;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: Arc<DatabaseConnection>,
    /// JWT service for token validation.
    pub jwt_service: Arc<JwtService>,
    /// Action handler registry for workflow execution.
    pub registry: Arc<ActionRegistry>,
    /// Notification sink used by the decision processor.
    pub notifier: Arc<dyn Notifier>,
    /// Role/permission policy for approval decisions.
    pub policy: Arc<AuthorizationPolicy>,
}

impl AppState {
    /// Builds the approval repository from the shared state.
    #[must_use]
    pub fn approval_repo(&self) -> atrium_db::ApprovalRepository {
        atrium_db::ApprovalRepository::new(
            (*self.db).clone(),
            self.registry.clone(),
            self.notifier.clone(),
            self.policy.clone(),
        )
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes_with_state(state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
