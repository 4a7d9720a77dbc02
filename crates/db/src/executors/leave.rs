//! HR leave request executor.
//!
//! The leave request entity exists before the workflow starts; the payload
//! references it by id. Approval transitions it to approved and notifies
//! the employee; rejection (via `on_reject`) transitions it to rejected.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
};
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;
use uuid::Uuid;

use atrium_core::workflow::{ActionHandler, ExecutionContext, ExecutorError, Notifier};

use crate::entities::{leave_requests, sea_orm_active_enums::EntityStatus};

#[derive(Debug, Deserialize)]
struct LeavePayload {
    leave_request_id: Uuid,
}

/// Transitions a leave request through its approval lifecycle.
pub struct LeaveRequestHandler {
    db: DatabaseConnection,
    notifier: Arc<dyn Notifier>,
}

impl LeaveRequestHandler {
    /// Creates the handler.
    #[must_use]
    pub fn new(db: DatabaseConnection, notifier: Arc<dyn Notifier>) -> Self {
        Self { db, notifier }
    }

    async fn load(
        &self,
        tenant_id: Uuid,
        leave_request_id: Uuid,
    ) -> Result<leave_requests::Model, ExecutorError> {
        leave_requests::Entity::find_by_id(leave_request_id)
            .filter(leave_requests::Column::TenantId.eq(tenant_id))
            .one(&self.db)
            .await
            .map_err(|e| ExecutorError::Internal(e.to_string()))?
            .ok_or_else(|| {
                ExecutorError::NotFound(format!("Leave request {leave_request_id} not found"))
            })
    }
}

#[async_trait]
impl ActionHandler for LeaveRequestHandler {
    fn validate(&self, payload: &Value) -> Result<(), ExecutorError> {
        serde_json::from_value::<LeavePayload>(payload.clone())
            .map(|_| ())
            .map_err(|e| ExecutorError::Validation(e.to_string()))
    }

    async fn execute(
        &self,
        ctx: &ExecutionContext,
        payload: &Value,
    ) -> Result<Value, ExecutorError> {
        let parsed: LeavePayload = serde_json::from_value(payload.clone())
            .map_err(|e| ExecutorError::Validation(e.to_string()))?;

        let leave = self.load(ctx.tenant_id, parsed.leave_request_id).await?;

        match leave.status {
            // Re-execution after the transition already landed.
            EntityStatus::Approved => {
                return serde_json::to_value(&leave)
                    .map_err(|e| ExecutorError::Internal(e.to_string()));
            }
            EntityStatus::Rejected => {
                return Err(ExecutorError::Validation(format!(
                    "Leave request {} was already rejected",
                    leave.id
                )));
            }
            EntityStatus::Pending => {}
        }

        let employee_id = leave.employee_id;
        let mut active: leave_requests::ActiveModel = leave.into();
        active.status = Set(EntityStatus::Approved);
        active.updated_at = Set(Utc::now().into());
        let leave = active
            .update(&self.db)
            .await
            .map_err(|e| ExecutorError::Internal(e.to_string()))?;

        if let Err(e) = self
            .notifier
            .notify(
                ctx.tenant_id,
                employee_id,
                "leave.approved",
                "Leave request approved",
                "Your leave request has been approved",
            )
            .await
        {
            warn!(error = %e, leave_request_id = %leave.id, "Leave approval notification failed");
        }

        serde_json::to_value(&leave).map_err(|e| ExecutorError::Internal(e.to_string()))
    }

    async fn on_reject(
        &self,
        ctx: &ExecutionContext,
        payload: &Value,
        reason: &str,
    ) -> Result<(), ExecutorError> {
        let parsed: LeavePayload = serde_json::from_value(payload.clone())
            .map_err(|e| ExecutorError::Validation(e.to_string()))?;

        let leave = self.load(ctx.tenant_id, parsed.leave_request_id).await?;
        if leave.status != EntityStatus::Pending {
            return Ok(());
        }

        let employee_id = leave.employee_id;
        let mut active: leave_requests::ActiveModel = leave.into();
        active.status = Set(EntityStatus::Rejected);
        active.rejection_reason = Set(Some(reason.to_string()));
        active.updated_at = Set(Utc::now().into());
        let leave = active
            .update(&self.db)
            .await
            .map_err(|e| ExecutorError::Internal(e.to_string()))?;

        if let Err(e) = self
            .notifier
            .notify(
                ctx.tenant_id,
                employee_id,
                "leave.rejected",
                "Leave request rejected",
                &format!("Your leave request was rejected: {reason}"),
            )
            .await
        {
            warn!(error = %e, leave_request_id = %leave.id, "Leave rejection notification failed");
        }

        Ok(())
    }
}

impl std::fmt::Debug for LeaveRequestHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LeaveRequestHandler").finish_non_exhaustive()
    }
}
