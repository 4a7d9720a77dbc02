//! Workflow definition management routes. Admin only.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info};
use uuid::Uuid;

use crate::{AppState, middleware::AuthUser};
use atrium_core::workflow::{ActionKey, WorkflowAction, WorkflowModule};
use atrium_db::repositories::{DefinitionRepository, DefinitionWithSteps, NewDefinitionStep};

use super::approvals::{app_error_response, workflow_error_response};
use atrium_shared::AppError;

/// Creates the definition routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/workflow-definitions", get(list_definitions))
        .route("/workflow-definitions", post(create_definition))
        .route(
            "/workflow-definitions/{definition_id}",
            delete(deactivate_definition),
        )
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// One step of a new definition.
#[derive(Debug, Deserialize)]
pub struct StepInput {
    /// Position in the chain, starting at 1.
    pub step_order: i32,
    /// Permission a decider's role must satisfy, e.g. "inventory.approve".
    pub required_permission: String,
}

/// Request body for creating a definition.
#[derive(Debug, Deserialize)]
pub struct CreateDefinitionRequest {
    /// Business module.
    pub module: String,
    /// Gated action.
    pub action: String,
    /// Ordered approval steps.
    pub steps: Vec<StepInput>,
}

/// A definition with its steps.
#[derive(Debug, Serialize)]
pub struct DefinitionResponse {
    /// Definition ID.
    pub id: Uuid,
    /// Business module.
    pub module: String,
    /// Gated action.
    pub action: String,
    /// Whether this definition currently gates submissions.
    pub is_active: bool,
    /// Ordered steps.
    pub steps: Vec<StepResponse>,
    /// Created at timestamp.
    pub created_at: String,
}

/// One step of a definition.
#[derive(Debug, Serialize)]
pub struct StepResponse {
    /// Step ID.
    pub id: Uuid,
    /// Position in the chain.
    pub step_order: i32,
    /// Required permission.
    pub required_permission: String,
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET `/definitions` - List the tenant's definitions.
async fn list_definitions(State(state): State<AppState>, auth: AuthUser) -> impl IntoResponse {
    let repo = DefinitionRepository::new((*state.db).clone());

    match repo.list(auth.tenant_id()).await {
        Ok(definitions) => {
            let items: Vec<DefinitionResponse> =
                definitions.into_iter().map(definition_to_response).collect();
            (StatusCode::OK, Json(json!({ "data": items }))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to list definitions");
            workflow_error_response(&e)
        }
    }
}

/// POST `/definitions` - Create a definition, replacing any active one
/// for the same (module, action).
async fn create_definition(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<CreateDefinitionRequest>,
) -> impl IntoResponse {
    if let Err(response) = require_admin(&auth) {
        return response;
    }

    let Some(module) = WorkflowModule::parse(&body.module) else {
        return bad_request(&format!("Unknown module: '{}'", body.module));
    };
    let Some(action) = WorkflowAction::parse(&body.action) else {
        return bad_request(&format!("Unknown action: '{}'", body.action));
    };

    let steps: Vec<NewDefinitionStep> = body
        .steps
        .into_iter()
        .map(|s| NewDefinitionStep {
            step_order: s.step_order,
            required_permission: s.required_permission,
        })
        .collect();

    let repo = DefinitionRepository::new((*state.db).clone());
    match repo
        .create(auth.tenant_id(), ActionKey::new(module, action), &steps)
        .await
    {
        Ok(definition) => {
            info!(
                definition_id = %definition.definition.id,
                module = %module,
                action = %action,
                "Workflow definition created"
            );
            (
                StatusCode::CREATED,
                Json(definition_to_response(definition)),
            )
                .into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to create definition");
            workflow_error_response(&e)
        }
    }
}

/// DELETE `/definitions/{definition_id}` - Deactivate a definition.
async fn deactivate_definition(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(definition_id): Path<Uuid>,
) -> impl IntoResponse {
    if let Err(response) = require_admin(&auth) {
        return response;
    }

    let repo = DefinitionRepository::new((*state.db).clone());
    match repo.deactivate(auth.tenant_id(), definition_id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "message": "Definition deactivated" })),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, definition_id = %definition_id, "Failed to deactivate definition");
            workflow_error_response(&e)
        }
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn require_admin(auth: &AuthUser) -> Result<(), axum::response::Response> {
    if auth.role() == "admin" {
        Ok(())
    } else {
        Err(app_error_response(&AppError::Forbidden(
            "Admin role required".to_string(),
        )))
    }
}

fn bad_request(message: &str) -> axum::response::Response {
    app_error_response(&AppError::Validation(message.to_string()))
}

fn definition_to_response(definition: DefinitionWithSteps) -> DefinitionResponse {
    DefinitionResponse {
        id: definition.definition.id,
        module: json_enum_str(&definition.definition.module),
        action: json_enum_str(&definition.definition.action),
        is_active: definition.definition.is_active,
        created_at: definition.definition.created_at.to_rfc3339(),
        steps: definition
            .steps
            .into_iter()
            .map(|s| StepResponse {
                id: s.id,
                step_order: s.step_order,
                required_permission: s.required_permission,
            })
            .collect(),
    }
}

/// Renders a serde-serializable enum as its plain string form.
fn json_enum_str<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_value(value)
        .ok()
        .and_then(|v| v.as_str().map(ToString::to_string))
        .unwrap_or_default()
}
