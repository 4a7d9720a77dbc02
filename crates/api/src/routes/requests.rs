//! Request submission route.
//!
//! When the tenant has an active workflow definition for the (module,
//! action) pair, submission defers the action behind an approval chain.
//! When no definition exists the action is unguarded and executes
//! immediately; errors on this direct path surface as-is, including
//! duplicates.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::post,
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::{error, info};
use uuid::Uuid;

use crate::{AppState, middleware::AuthUser};
use atrium_core::workflow::{
    ActionKey, ExecutionContext, ExecutorError, WorkflowAction, WorkflowModule,
};
use atrium_db::repositories::DefinitionRepository;

use super::approvals::{app_error_response, workflow_error_response};

/// Creates the request submission routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/requests", post(submit))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for submitting a gated or direct action.
#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
    /// Business module, e.g. "inventory".
    pub module: String,
    /// Action within the module, e.g. "create".
    pub action: String,
    /// Action payload, validated by the matching handler.
    pub payload: Value,
}

/// Response when the action was deferred behind a workflow.
#[derive(Debug, Serialize)]
pub struct SubmittedResponse {
    /// The deferred request's ID.
    pub request_id: Uuid,
    /// The workflow instance created for it.
    pub workflow_id: Uuid,
    /// Number of approvals required.
    pub pending_steps: usize,
    /// Human-readable summary.
    pub message: String,
}

// ============================================================================
// Route Handlers
// ============================================================================

/// POST `/requests` - Submit an action for approval or direct execution.
async fn submit(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<SubmitRequest>,
) -> impl IntoResponse {
    let Some(module) = WorkflowModule::parse(&body.module) else {
        return invalid_field("module", &body.module);
    };
    let Some(action) = WorkflowAction::parse(&body.action) else {
        return invalid_field("action", &body.action);
    };
    let key = ActionKey::new(module, action);

    let definitions = DefinitionRepository::new((*state.db).clone());
    let definition = match definitions.find_active(auth.tenant_id(), key).await {
        Ok(definition) => definition,
        Err(e) => {
            error!(error = %e, key = %key, "Failed to resolve workflow definition");
            return workflow_error_response(&e);
        }
    };

    match definition {
        Some(definition) => {
            let repo = state.approval_repo();
            match repo
                .submit_request(&definition, body.payload, auth.user_id())
                .await
            {
                Ok(submitted) => {
                    info!(
                        request_id = %submitted.request.id,
                        workflow_id = %submitted.workflow_id,
                        key = %key,
                        "Request deferred behind workflow"
                    );
                    (
                        StatusCode::ACCEPTED,
                        Json(json!(SubmittedResponse {
                            request_id: submitted.request.id,
                            workflow_id: submitted.workflow_id,
                            pending_steps: submitted.pending_steps,
                            message: format!(
                                "Request submitted, awaiting {} approval(s)",
                                submitted.pending_steps
                            ),
                        })),
                    )
                        .into_response()
                }
                Err(e) => {
                    error!(error = %e, key = %key, "Failed to submit request");
                    workflow_error_response(&e)
                }
            }
        }
        None => execute_direct(&state, &auth, key, &body.payload).await,
    }
}

/// Runs an unguarded action immediately. No duplicate absorption here:
/// that safeguard only applies to workflow re-execution.
async fn execute_direct(
    state: &AppState,
    auth: &AuthUser,
    key: ActionKey,
    payload: &Value,
) -> axum::response::Response {
    let handler = match state.registry.handler(key) {
        Ok(handler) => handler,
        Err(e) => return workflow_error_response(&e),
    };

    if let Err(e) = handler.validate(payload) {
        return executor_error_response(&e);
    }

    let ctx = ExecutionContext::new(auth.tenant_id(), auth.user_id());
    match handler.execute(&ctx, payload).await {
        Ok(item) => {
            info!(key = %key, "Unguarded action executed");
            (
                StatusCode::OK,
                Json(json!({ "executed": true, "item": item })),
            )
                .into_response()
        }
        Err(e) => {
            error!(error = %e, key = %key, "Unguarded action failed");
            executor_error_response(&e)
        }
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn invalid_field(field: &str, value: &str) -> axum::response::Response {
    app_error_response(&atrium_shared::AppError::Validation(format!(
        "Unknown {field}: '{value}'"
    )))
}

fn executor_error_response(e: &ExecutorError) -> axum::response::Response {
    let status =
        StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (
        status,
        Json(json!({
            "error": e.kind(),
            "message": e.to_string(),
        })),
    )
        .into_response()
}
