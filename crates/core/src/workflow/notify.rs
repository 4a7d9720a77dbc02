//! Best-effort notification contract.
//!
//! Outbound signaling never affects the state machine's outcome: callers
//! catch and log every failure. The real-time push layer behind `broadcast`
//! is an external collaborator; delivery is at most once.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

/// Error raised by a notifier backend.
#[derive(Debug, Error)]
#[error("notification failed: {0}")]
pub struct NotifyError(pub String);

/// Fire-and-forget outbound signaling.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Records a notification for one employee.
    async fn notify(
        &self,
        tenant_id: Uuid,
        employee_id: Uuid,
        kind: &str,
        title: &str,
        message: &str,
    ) -> Result<(), NotifyError>;

    /// Broadcasts an event to the tenant's subscribers, if any.
    async fn broadcast(
        &self,
        event: &str,
        tenant_id: Uuid,
        payload: &Value,
    ) -> Result<(), NotifyError>;
}

/// Notifier that drops everything. Used in tests and as a safe default.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullNotifier;

#[async_trait]
impl Notifier for NullNotifier {
    async fn notify(
        &self,
        _tenant_id: Uuid,
        _employee_id: Uuid,
        _kind: &str,
        _title: &str,
        _message: &str,
    ) -> Result<(), NotifyError> {
        Ok(())
    }

    async fn broadcast(
        &self,
        _event: &str,
        _tenant_id: Uuid,
        _payload: &Value,
    ) -> Result<(), NotifyError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_null_notifier_accepts_everything() {
        let notifier = NullNotifier;
        notifier
            .notify(
                Uuid::new_v4(),
                Uuid::new_v4(),
                "workflow.rejected",
                "Leave request rejected",
                "insufficient balance",
            )
            .await
            .unwrap();
        notifier
            .broadcast("workflow.completed", Uuid::new_v4(), &json!({}))
            .await
            .unwrap();
    }
}
