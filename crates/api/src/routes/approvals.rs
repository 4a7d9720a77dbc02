//! Approval queue and decision routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::{error, info};
use uuid::Uuid;

use crate::{AppState, middleware::AuthUser};
use atrium_core::workflow::{DecisionOutcome, WorkflowError};
use atrium_db::entities::{approvals, sea_orm_active_enums, workflow_requests};
use atrium_db::repositories::PendingApproval;
use atrium_shared::types::{PageRequest, PageResponse};

/// Creates the approval routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/approvals", get(list_pending))
        .route("/approvals/my-requests", get(my_requests))
        .route("/approvals/{approval_id}/approve", post(approve))
        .route("/approvals/{approval_id}/reject", post(reject))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for approving.
#[derive(Debug, Default, Deserialize)]
pub struct ApproveRequest {
    /// Optional approver comment.
    pub comment: Option<String>,
}

/// Request body for rejecting.
#[derive(Debug, Default, Deserialize)]
pub struct RejectRequest {
    /// Optional rejection reason, surfaced to the requester.
    pub reason: Option<String>,
}

/// One pending approval in the queue.
#[derive(Debug, Serialize)]
pub struct ApprovalResponse {
    /// Approval ID.
    pub id: Uuid,
    /// Workflow instance this approval belongs to.
    pub workflow_id: Uuid,
    /// Position in the chain.
    pub step_order: i32,
    /// Permission a decider's role must satisfy.
    pub required_permission: String,
    /// Current status.
    pub status: sea_orm_active_enums::ApprovalStatus,
    /// Snapshot of the gated request.
    pub data: Value,
    /// Whether the calling user may decide this approval.
    pub can_approve: bool,
    /// Created at timestamp.
    pub created_at: String,
}

/// One workflow request owned by the caller.
#[derive(Debug, Serialize)]
pub struct RequestResponse {
    /// Request ID.
    pub id: Uuid,
    /// Workflow instance ID.
    pub workflow_id: Uuid,
    /// Business module.
    pub module: sea_orm_active_enums::WorkflowModule,
    /// Gated action.
    pub action: sea_orm_active_enums::WorkflowAction,
    /// Current status.
    pub status: sea_orm_active_enums::RequestStatus,
    /// Submitted payload.
    pub payload: Value,
    /// Warning attached on idempotent completion, if any.
    pub warning: Option<String>,
    /// Failure reason when execution failed, if any.
    pub failure_reason: Option<String>,
    /// Created at timestamp.
    pub created_at: String,
}

/// Response body for a decision.
#[derive(Debug, Serialize)]
pub struct DecisionResponse {
    /// Human-readable outcome.
    pub message: String,
    /// Whether this decision triggered action execution.
    pub executed: bool,
    /// The entity the action produced, when executed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<Value>,
    /// Warning attached on idempotent completion.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

impl From<DecisionOutcome> for DecisionResponse {
    fn from(outcome: DecisionOutcome) -> Self {
        Self {
            message: outcome.message,
            executed: outcome.executed,
            item: outcome.item,
            warning: outcome.warning,
        }
    }
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET `/approvals` - List pending approvals for the caller's tenant.
async fn list_pending(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(page): Query<PageRequest>,
) -> impl IntoResponse {
    let repo = state.approval_repo();

    match repo
        .pending_approvals(auth.tenant_id(), auth.role(), &page)
        .await
    {
        Ok((items, total)) => {
            let items: Vec<ApprovalResponse> =
                items.into_iter().map(pending_to_response).collect();
            (
                StatusCode::OK,
                Json(json!(PageResponse::new(
                    items,
                    page.page,
                    page.clamped_per_page(),
                    total
                ))),
            )
                .into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to list pending approvals");
            workflow_error_response(&e)
        }
    }
}

/// GET `/approvals/my-requests` - List the caller's workflow requests.
async fn my_requests(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(page): Query<PageRequest>,
) -> impl IntoResponse {
    let repo = state.approval_repo();

    match repo
        .my_requests(auth.tenant_id(), auth.user_id(), &page)
        .await
    {
        Ok((items, total)) => {
            let items: Vec<RequestResponse> =
                items.into_iter().map(request_to_response).collect();
            (
                StatusCode::OK,
                Json(json!(PageResponse::new(
                    items,
                    page.page,
                    page.clamped_per_page(),
                    total
                ))),
            )
                .into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to list workflow requests");
            workflow_error_response(&e)
        }
    }
}

/// POST `/approvals/{approval_id}/approve` - Approve one step.
async fn approve(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(approval_id): Path<Uuid>,
    payload: Option<Json<ApproveRequest>>,
) -> impl IntoResponse {
    let Json(payload) = payload.unwrap_or_default();
    let repo = state.approval_repo();

    match repo
        .approve(
            auth.tenant_id(),
            approval_id,
            auth.user_id(),
            auth.role(),
            payload.comment,
        )
        .await
    {
        Ok(outcome) => {
            info!(
                approval_id = %approval_id,
                executed = outcome.executed,
                "Approval processed"
            );
            (StatusCode::OK, Json(DecisionResponse::from(outcome))).into_response()
        }
        Err(e) => {
            error!(error = %e, approval_id = %approval_id, "Failed to approve");
            workflow_error_response(&e)
        }
    }
}

/// POST `/approvals/{approval_id}/reject` - Reject one step, vetoing the workflow.
async fn reject(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(approval_id): Path<Uuid>,
    payload: Option<Json<RejectRequest>>,
) -> impl IntoResponse {
    let Json(payload) = payload.unwrap_or_default();
    let repo = state.approval_repo();

    match repo
        .reject(
            auth.tenant_id(),
            approval_id,
            auth.user_id(),
            auth.role(),
            payload.reason,
        )
        .await
    {
        Ok(outcome) => {
            info!(approval_id = %approval_id, "Rejection processed");
            (StatusCode::OK, Json(DecisionResponse::from(outcome))).into_response()
        }
        Err(e) => {
            error!(error = %e, approval_id = %approval_id, "Failed to reject");
            workflow_error_response(&e)
        }
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn pending_to_response(pending: PendingApproval) -> ApprovalResponse {
    let approvals::Model {
        id,
        workflow_id,
        step_order,
        required_permission,
        status,
        data,
        created_at,
        ..
    } = pending.approval;
    ApprovalResponse {
        id,
        workflow_id,
        step_order,
        required_permission,
        status,
        data,
        can_approve: pending.can_approve,
        created_at: created_at.to_rfc3339(),
    }
}

pub(crate) fn request_to_response(request: workflow_requests::Model) -> RequestResponse {
    RequestResponse {
        id: request.id,
        workflow_id: request.workflow_id,
        module: request.module,
        action: request.action,
        status: request.status,
        payload: request.payload,
        warning: request.warning,
        failure_reason: request.failure_reason,
        created_at: request.created_at.to_rfc3339(),
    }
}

/// Maps a workflow error onto the HTTP surface.
pub(crate) fn workflow_error_response(e: &WorkflowError) -> axum::response::Response {
    let status =
        StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (
        status,
        Json(json!({
            "error": e.error_code(),
            "message": e.to_string(),
        })),
    )
        .into_response()
}

/// Maps an application error onto the HTTP surface.
pub(crate) fn app_error_response(e: &atrium_shared::AppError) -> axum::response::Response {
    let status =
        StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (
        status,
        Json(json!({
            "error": e.error_code(),
            "message": e.to_string(),
        })),
    )
        .into_response()
}
