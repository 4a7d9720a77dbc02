//! Finance expense claim executor.
//!
//! Mirrors the leave request lifecycle: the claim exists before the
//! workflow, approval transitions it and notifies the employee.

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

use crate::entities::{expense_claims, sea_orm_active_enums::EntityStatus};

#[derive(Debug, Deserialize)]
struct ExpensePayload {
    expense_claim_id: Uuid,
}

/// Transitions an expense claim through its approval lifecycle.
pub struct ExpenseClaimHandler {
    db: DatabaseConnection,
    notifier: Arc<dyn Notifier>,
}

impl ExpenseClaimHandler {
    /// Creates the handler.
    #[must_use]
    pub fn new(db: DatabaseConnection, notifier: Arc<dyn Notifier>) -> Self {
        Self { db, notifier }
    }

    async fn load(
        &self,
        tenant_id: Uuid,
        expense_claim_id: Uuid,
    ) -> Result<expense_claims::Model, ExecutorError> {
        expense_claims::Entity::find_by_id(expense_claim_id)
            .filter(expense_claims::Column::TenantId.eq(tenant_id))
            .one(&self.db)
            .await
            .map_err(|e| ExecutorError::Internal(e.to_string()))?
            .ok_or_else(|| {
                ExecutorError::NotFound(format!("Expense claim {expense_claim_id} not found"))
            })
    }
}

#[async_trait]
impl ActionHandler for ExpenseClaimHandler {
    fn validate(&self, payload: &Value) -> Result<(), ExecutorError> {
        serde_json::from_value::<ExpensePayload>(payload.clone())
            .map(|_| ())
            .map_err(|e| ExecutorError::Validation(e.to_string()))
    }

    async fn execute(
        &self,
        ctx: &ExecutionContext,
        payload: &Value,
    ) -> Result<Value, ExecutorError> {
        let parsed: ExpensePayload = serde_json::from_value(payload.clone())
            .map_err(|e| ExecutorError::Validation(e.to_string()))?;

        let claim = self.load(ctx.tenant_id, parsed.expense_claim_id).await?;

        match claim.status {
            EntityStatus::Approved => {
                return serde_json::to_value(&claim)
                    .map_err(|e| ExecutorError::Internal(e.to_string()));
            }
            EntityStatus::Rejected => {
                return Err(ExecutorError::Validation(format!(
                    "Expense claim {} was already rejected",
                    claim.id
                )));
            }
            EntityStatus::Pending => {}
        }

        let employee_id = claim.employee_id;
        let mut active: expense_claims::ActiveModel = claim.into();
        active.status = Set(EntityStatus::Approved);
        active.updated_at = Set(Utc::now().into());
        let claim = active
            .update(&self.db)
            .await
            .map_err(|e| ExecutorError::Internal(e.to_string()))?;

        if let Err(e) = self
            .notifier
            .notify(
                ctx.tenant_id,
                employee_id,
                "expense.approved",
                "Expense claim approved",
                &format!("Your expense claim for {} {} has been approved", claim.amount, claim.currency),
            )
            .await
        {
            warn!(error = %e, expense_claim_id = %claim.id, "Expense approval notification failed");
        }

        serde_json::to_value(&claim).map_err(|e| ExecutorError::Internal(e.to_string()))
    }

    async fn on_reject(
        &self,
        ctx: &ExecutionContext,
        payload: &Value,
        reason: &str,
    ) -> Result<(), ExecutorError> {
        let parsed: ExpensePayload = serde_json::from_value(payload.clone())
            .map_err(|e| ExecutorError::Validation(e.to_string()))?;

        let claim = self.load(ctx.tenant_id, parsed.expense_claim_id).await?;
        if claim.status != EntityStatus::Pending {
            return Ok(());
        }

        let employee_id = claim.employee_id;
        let mut active: expense_claims::ActiveModel = claim.into();
        active.status = Set(EntityStatus::Rejected);
        active.rejection_reason = Set(Some(reason.to_string()));
        active.updated_at = Set(Utc::now().into());
        let claim = active
            .update(&self.db)
            .await
            .map_err(|e| ExecutorError::Internal(e.to_string()))?;

        if let Err(e) = self
            .notifier
            .notify(
                ctx.tenant_id,
                employee_id,
                "expense.rejected",
                "Expense claim rejected",
                &format!("Your expense claim was rejected: {reason}"),
            )
            .await
        {
            warn!(error = %e, expense_claim_id = %claim.id, "Expense rejection notification failed");
        }

        Ok(())
    }
}

impl std::fmt::Debug for ExpenseClaimHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExpenseClaimHandler").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atrium_core::workflow::NullNotifier;
    use serde_json::json;

    #[test]
    fn test_payload_requires_expense_claim_id() {
        let handler =
            ExpenseClaimHandler::new(DatabaseConnection::default(), Arc::new(NullNotifier));
        assert!(matches!(
            handler.validate(&json!({})),
            Err(ExecutorError::Validation(_))
        ));
        assert!(
            handler
                .validate(&json!({"expense_claim_id": Uuid::new_v4()}))
                .is_ok()
        );
    }
}
