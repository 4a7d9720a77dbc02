//! Notification routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde::Serialize;
use serde_json::json;
use tracing::error;
use uuid::Uuid;

use crate::{AppState, middleware::AuthUser};
use atrium_db::NotificationRepository;
use atrium_db::entities::notifications;
use atrium_shared::types::{PageRequest, PageResponse};

use super::approvals::workflow_error_response;

/// Creates the notification routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/notifications", get(list_notifications))
        .route("/notifications/{notification_id}/read", post(mark_read))
}

/// One notification for the caller.
#[derive(Debug, Serialize)]
pub struct NotificationResponse {
    /// Notification ID.
    pub id: Uuid,
    /// Machine-readable kind, e.g. "workflow.completed".
    pub notification_type: String,
    /// Short title.
    pub title: String,
    /// Full message.
    pub message: String,
    /// Whether the user has read it.
    pub is_read: bool,
    /// Created at timestamp.
    pub created_at: String,
}

/// GET `/notifications` - List the caller's notifications.
async fn list_notifications(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(page): Query<PageRequest>,
) -> impl IntoResponse {
    let repo = NotificationRepository::new((*state.db).clone());

    match repo
        .list_for_user(auth.tenant_id(), auth.user_id(), &page)
        .await
    {
        Ok((items, total)) => {
            let items: Vec<NotificationResponse> =
                items.into_iter().map(notification_to_response).collect();
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
            error!(error = %e, "Failed to list notifications");
            workflow_error_response(&e)
        }
    }
}

/// POST `/notifications/{notification_id}/read` - Mark one as read.
async fn mark_read(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(notification_id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = NotificationRepository::new((*state.db).clone());

    match repo
        .mark_read(auth.tenant_id(), auth.user_id(), notification_id)
        .await
    {
        Ok(()) => (StatusCode::OK, Json(json!({ "message": "Marked as read" }))).into_response(),
        Err(e) => {
            error!(error = %e, notification_id = %notification_id, "Failed to mark notification");
            workflow_error_response(&e)
        }
    }
}

fn notification_to_response(model: notifications::Model) -> NotificationResponse {
    NotificationResponse {
        id: model.id,
        notification_type: model.notification_type,
        title: model.title,
        message: model.message,
        is_read: model.is_read,
        created_at: model.created_at.to_rfc3339(),
    }
}
