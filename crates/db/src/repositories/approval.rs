//! Approval repository: request creation and the decision processor.
//!
//! This is the persistence-backed half of the workflow engine. It creates
//! the workflow instance, step snapshot, approvals, and deferred request in
//! one transaction at submission time, and processes approve/reject
//! decisions with an exactly-once guarantee on action execution.

use std::sync::Arc;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use serde_json::{Value, json};
use tracing::{info, warn};
use uuid::Uuid;

use atrium_core::workflow::{
    ActionKey, ActionRegistry, AuthorizationPolicy, ChainService, DecisionOutcome,
    ExecutionContext, Notifier, WorkflowError,
};
use atrium_shared::types::PageRequest;

use crate::entities::{
    approvals, sea_orm_active_enums as db_enums, workflow_requests, workflow_steps, workflows,
};

use super::definition::DefinitionWithSteps;

/// A pending approval together with whether the caller may decide it.
#[derive(Debug, Clone)]
pub struct PendingApproval {
    /// Approval data.
    pub approval: approvals::Model,
    /// Whether the current user's role satisfies the step's permission.
    pub can_approve: bool,
}

/// Result of submitting a gated action.
#[derive(Debug, Clone)]
pub struct SubmittedRequest {
    /// The deferred request awaiting approval.
    pub request: workflow_requests::Model,
    /// The workflow instance created for it.
    pub workflow_id: Uuid,
    /// Number of approval steps that must clear.
    pub pending_steps: usize,
}

/// Approval repository: creates workflow requests and processes decisions.
#[derive(Clone)]
pub struct ApprovalRepository {
    db: DatabaseConnection,
    registry: Arc<ActionRegistry>,
    notifier: Arc<dyn Notifier>,
    policy: Arc<AuthorizationPolicy>,
}

impl ApprovalRepository {
    /// Creates a new approval repository.
    #[must_use]
    pub fn new(
        db: DatabaseConnection,
        registry: Arc<ActionRegistry>,
        notifier: Arc<dyn Notifier>,
        policy: Arc<AuthorizationPolicy>,
    ) -> Self {
        Self {
            db,
            registry,
            notifier,
            policy,
        }
    }

    // ========================================================================
    // Request creation
    // ========================================================================

    /// Submits a gated action against an active definition.
    ///
    /// Atomically creates the workflow instance (active), the step snapshot,
    /// one pending approval per step, and the deferred request.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No handler is registered for the definition's (module, action)
    /// - The payload fails the handler's validation
    /// - A database operation fails
    pub async fn submit_request(
        &self,
        definition: &DefinitionWithSteps,
        payload: Value,
        requested_by: Uuid,
    ) -> Result<SubmittedRequest, WorkflowError> {
        let tenant_id = definition.definition.tenant_id;
        let module = db_module_to_core(&definition.definition.module);
        let action = db_action_to_core(&definition.definition.action);
        let key = ActionKey::new(module, action);

        // Validate against the executor's contract before persisting anything.
        let handler = self.registry.handler(key)?;
        handler
            .validate(&payload)
            .map_err(|e| WorkflowError::Validation(e.to_string()))?;

        let now = Utc::now().into();
        let workflow_id = Uuid::new_v4();
        let request_id = Uuid::new_v4();

        let snapshot = json!({
            "module": module,
            "action": action,
            "payload": payload,
            "requested_by": requested_by,
        });

        let txn = self.db.begin().await.map_err(db_err)?;

        workflows::ActiveModel {
            id: Set(workflow_id),
            tenant_id: Set(tenant_id),
            module: Set(definition.definition.module.clone()),
            action: Set(definition.definition.action.clone()),
            status: Set(db_enums::WorkflowStatus::Active),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&txn)
        .await
        .map_err(db_err)?;

        for step in &definition.steps {
            let step_id = Uuid::new_v4();
            workflow_steps::ActiveModel {
                id: Set(step_id),
                workflow_id: Set(workflow_id),
                step_order: Set(step.step_order),
                required_permission: Set(step.required_permission.clone()),
                created_at: Set(now),
            }
            .insert(&txn)
            .await
            .map_err(db_err)?;

            approvals::ActiveModel {
                id: Set(Uuid::new_v4()),
                tenant_id: Set(tenant_id),
                workflow_id: Set(workflow_id),
                workflow_step_id: Set(step_id),
                step_order: Set(step.step_order),
                required_permission: Set(step.required_permission.clone()),
                status: Set(db_enums::ApprovalStatus::Pending),
                approved_by: Set(None),
                approved_at: Set(None),
                comment: Set(None),
                rejection_reason: Set(None),
                data: Set(snapshot.clone()),
                created_at: Set(now),
                updated_at: Set(now),
            }
            .insert(&txn)
            .await
            .map_err(db_err)?;
        }

        let request = workflow_requests::ActiveModel {
            id: Set(request_id),
            tenant_id: Set(tenant_id),
            workflow_id: Set(workflow_id),
            module: Set(definition.definition.module.clone()),
            action: Set(definition.definition.action.clone()),
            status: Set(db_enums::RequestStatus::Pending),
            created_by: Set(requested_by),
            payload: Set(payload),
            warning: Set(None),
            failure_reason: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&txn)
        .await
        .map_err(db_err)?;

        txn.commit().await.map_err(db_err)?;

        info!(
            tenant_id = %tenant_id,
            workflow_id = %workflow_id,
            key = %key,
            steps = definition.steps.len(),
            "Workflow request submitted"
        );

        self.broadcast_event("workflow.requested", tenant_id, &request.id)
            .await;

        Ok(SubmittedRequest {
            request,
            workflow_id,
            pending_steps: definition.steps.len(),
        })
    }

    // ========================================================================
    // Decision processing
    // ========================================================================

    /// Approves a single pending approval.
    ///
    /// When this is the final pending approval, the workflow transitions to
    /// completed under a conditional update (active → completed, checked via
    /// the affected-row count, in the same transaction as the pending count)
    /// and the deferred action executes exactly once.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The approval is not found in the caller's tenant
    /// - The approval has already been processed
    /// - The actor's role does not satisfy the step's permission
    /// - The deferred request is missing
    /// - Action execution fails with a non-duplicate error
    pub async fn approve(
        &self,
        tenant_id: Uuid,
        approval_id: Uuid,
        actor_id: Uuid,
        actor_role: &str,
        comment: Option<String>,
    ) -> Result<DecisionOutcome, WorkflowError> {
        let approval = self.load_approval(tenant_id, approval_id).await?;
        ChainService::ensure_pending(approval_id, db_approval_status_to_core(&approval.status))?;
        self.authorize(actor_role, &approval.required_permission)?;

        let workflow_id = approval.workflow_id;
        let now = Utc::now().into();

        let txn = self.db.begin().await.map_err(db_err)?;

        // Row lock serializes decisions per workflow: the pending count
        // below must observe committed sibling decisions, not stale
        // snapshots from in-flight transactions.
        let workflow = self.lock_workflow(&txn, workflow_id).await?;
        if workflow.status != db_enums::WorkflowStatus::Active {
            txn.rollback().await.map_err(db_err)?;
            return match workflow.status {
                db_enums::WorkflowStatus::Completed => Ok(DecisionOutcome::already_completed()),
                _ => Err(WorkflowError::Validation(format!(
                    "Workflow {workflow_id} is no longer active"
                ))),
            };
        }

        // Conditional update guards concurrent decisions on the same row.
        let updated = approvals::Entity::update_many()
            .set(approvals::ActiveModel {
                status: Set(db_enums::ApprovalStatus::Approved),
                approved_by: Set(Some(actor_id)),
                approved_at: Set(Some(now)),
                comment: Set(comment),
                updated_at: Set(now),
                ..Default::default()
            })
            .filter(approvals::Column::Id.eq(approval_id))
            .filter(approvals::Column::Status.eq(db_enums::ApprovalStatus::Pending))
            .exec(&txn)
            .await
            .map_err(db_err)?;

        if updated.rows_affected == 0 {
            txn.rollback().await.map_err(db_err)?;
            return Err(self.already_processed(tenant_id, approval_id).await);
        }

        let remaining = approvals::Entity::find()
            .filter(approvals::Column::WorkflowId.eq(workflow_id))
            .filter(approvals::Column::Status.eq(db_enums::ApprovalStatus::Pending))
            .count(&txn)
            .await
            .map_err(db_err)?;

        if remaining > 0 {
            txn.commit().await.map_err(db_err)?;
            info!(
                tenant_id = %tenant_id,
                approval_id = %approval_id,
                workflow_id = %workflow_id,
                remaining,
                "Approval recorded, workflow still active"
            );
            return Ok(DecisionOutcome::waiting(usize::try_from(remaining).unwrap_or(usize::MAX)));
        }

        // Zero pending: race for the completion transition. Only the caller
        // whose conditional update lands executes the action.
        let completed = workflows::Entity::update_many()
            .set(workflows::ActiveModel {
                status: Set(db_enums::WorkflowStatus::Completed),
                updated_at: Set(now),
                ..Default::default()
            })
            .filter(workflows::Column::Id.eq(workflow_id))
            .filter(workflows::Column::Status.eq(db_enums::WorkflowStatus::Active))
            .exec(&txn)
            .await
            .map_err(db_err)?;

        if completed.rows_affected == 0 {
            txn.commit().await.map_err(db_err)?;
            return Ok(DecisionOutcome::already_completed());
        }

        // Direct foreign-key match only; no heuristic fallback.
        let request = self.load_pending_request(&txn, tenant_id, workflow_id).await?;

        txn.commit().await.map_err(db_err)?;

        info!(
            tenant_id = %tenant_id,
            workflow_id = %workflow_id,
            request_id = %request.id,
            "Workflow completed, dispatching action"
        );

        self.execute_request(tenant_id, actor_id, request).await
    }

    /// Rejects a single pending approval.
    ///
    /// Any single rejection vetoes the whole workflow: the workflow and its
    /// still-pending request transition to rejected. Sibling pending
    /// approvals are left pending; the workflow's terminal status is
    /// authoritative. Entity-lifecycle transitions and owner notification
    /// are best-effort.
    ///
    /// # Errors
    ///
    /// Returns an error if the approval is not found, already processed, or
    /// the actor is not authorized.
    pub async fn reject(
        &self,
        tenant_id: Uuid,
        approval_id: Uuid,
        actor_id: Uuid,
        actor_role: &str,
        reason: Option<String>,
    ) -> Result<DecisionOutcome, WorkflowError> {
        let approval = self.load_approval(tenant_id, approval_id).await?;
        ChainService::ensure_pending(approval_id, db_approval_status_to_core(&approval.status))?;
        self.authorize(actor_role, &approval.required_permission)?;

        let workflow_id = approval.workflow_id;
        let now = Utc::now().into();

        let txn = self.db.begin().await.map_err(db_err)?;

        let workflow = self.lock_workflow(&txn, workflow_id).await?;
        if workflow.status != db_enums::WorkflowStatus::Active {
            txn.rollback().await.map_err(db_err)?;
            return match workflow.status {
                db_enums::WorkflowStatus::Completed => Err(WorkflowError::Validation(format!(
                    "Workflow {workflow_id} already completed"
                ))),
                _ => Ok(DecisionOutcome::rejected()),
            };
        }

        let updated = approvals::Entity::update_many()
            .set(approvals::ActiveModel {
                status: Set(db_enums::ApprovalStatus::Rejected),
                approved_by: Set(Some(actor_id)),
                approved_at: Set(Some(now)),
                rejection_reason: Set(reason.clone()),
                updated_at: Set(now),
                ..Default::default()
            })
            .filter(approvals::Column::Id.eq(approval_id))
            .filter(approvals::Column::Status.eq(db_enums::ApprovalStatus::Pending))
            .exec(&txn)
            .await
            .map_err(db_err)?;

        if updated.rows_affected == 0 {
            txn.rollback().await.map_err(db_err)?;
            return Err(self.already_processed(tenant_id, approval_id).await);
        }

        workflows::Entity::update_many()
            .set(workflows::ActiveModel {
                status: Set(db_enums::WorkflowStatus::Rejected),
                updated_at: Set(now),
                ..Default::default()
            })
            .filter(workflows::Column::Id.eq(workflow_id))
            .filter(workflows::Column::Status.eq(db_enums::WorkflowStatus::Active))
            .exec(&txn)
            .await
            .map_err(db_err)?;

        let request = workflow_requests::Entity::find()
            .filter(workflow_requests::Column::WorkflowId.eq(workflow_id))
            .filter(workflow_requests::Column::TenantId.eq(tenant_id))
            .filter(workflow_requests::Column::Status.eq(db_enums::RequestStatus::Pending))
            .one(&txn)
            .await
            .map_err(db_err)?;

        workflow_requests::Entity::update_many()
            .set(workflow_requests::ActiveModel {
                status: Set(db_enums::RequestStatus::Rejected),
                failure_reason: Set(reason.clone()),
                updated_at: Set(now),
                ..Default::default()
            })
            .filter(workflow_requests::Column::WorkflowId.eq(workflow_id))
            .filter(workflow_requests::Column::Status.eq(db_enums::RequestStatus::Pending))
            .exec(&txn)
            .await
            .map_err(db_err)?;

        txn.commit().await.map_err(db_err)?;

        info!(
            tenant_id = %tenant_id,
            approval_id = %approval_id,
            workflow_id = %workflow_id,
            "Workflow rejected"
        );

        // Secondary effects are best-effort: log, never propagate.
        if let Some(request) = request {
            let reason_text = reason.unwrap_or_else(|| "No reason provided".to_string());
            let key = ActionKey::new(
                db_module_to_core(&request.module),
                db_action_to_core(&request.action),
            );
            let ctx = ExecutionContext::new(tenant_id, actor_id);

            if let Ok(handler) = self.registry.handler(key)
                && let Err(e) = handler.on_reject(&ctx, &request.payload, &reason_text).await
            {
                warn!(
                    error = %e,
                    request_id = %request.id,
                    key = %key,
                    "Rejection side effect failed"
                );
            }

            if let Err(e) = self
                .notifier
                .notify(
                    tenant_id,
                    request.created_by,
                    "workflow.rejected",
                    "Request rejected",
                    &format!("Your {key} request was rejected: {reason_text}"),
                )
                .await
            {
                warn!(error = %e, request_id = %request.id, "Rejection notification failed");
            }

            self.broadcast_event("workflow.rejected", tenant_id, &request.id)
                .await;
        }

        Ok(DecisionOutcome::rejected())
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Lists pending approvals for a tenant, newest first, with a
    /// `can_approve` flag computed against the caller's role.
    ///
    /// Only approvals of still-active workflows are returned: a rejected
    /// workflow's undecided siblings stay pending in the audit trail but are
    /// no longer actionable.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn pending_approvals(
        &self,
        tenant_id: Uuid,
        actor_role: &str,
        page: &PageRequest,
    ) -> Result<(Vec<PendingApproval>, u64), WorkflowError> {
        let query = approvals::Entity::find()
            .filter(approvals::Column::TenantId.eq(tenant_id))
            .filter(approvals::Column::Status.eq(db_enums::ApprovalStatus::Pending))
            .inner_join(workflows::Entity)
            .filter(workflows::Column::Status.eq(db_enums::WorkflowStatus::Active));

        let total = query.clone().count(&self.db).await.map_err(db_err)?;

        let rows = query
            .order_by_desc(approvals::Column::CreatedAt)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await
            .map_err(db_err)?;

        let result = rows
            .into_iter()
            .map(|approval| {
                let can_approve = self
                    .policy
                    .can_approve(actor_role, &approval.required_permission);
                PendingApproval {
                    approval,
                    can_approve,
                }
            })
            .collect();

        Ok((result, total))
    }

    /// Lists the workflow requests created by a user, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn my_requests(
        &self,
        tenant_id: Uuid,
        user_id: Uuid,
        page: &PageRequest,
    ) -> Result<(Vec<workflow_requests::Model>, u64), WorkflowError> {
        let query = workflow_requests::Entity::find()
            .filter(workflow_requests::Column::TenantId.eq(tenant_id))
            .filter(workflow_requests::Column::CreatedBy.eq(user_id));

        let total = query.clone().count(&self.db).await.map_err(db_err)?;

        let rows = query
            .order_by_desc(workflow_requests::Column::CreatedAt)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok((rows, total))
    }

    // ========================================================================
    // Helper methods
    // ========================================================================

    async fn load_approval(
        &self,
        tenant_id: Uuid,
        approval_id: Uuid,
    ) -> Result<approvals::Model, WorkflowError> {
        approvals::Entity::find_by_id(approval_id)
            .filter(approvals::Column::TenantId.eq(tenant_id))
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or(WorkflowError::ApprovalNotFound(approval_id))
    }

    /// Acquires a `SELECT ... FOR UPDATE` lock on the workflow row,
    /// serializing concurrent decisions against the same workflow.
    async fn lock_workflow(
        &self,
        txn: &DatabaseTransaction,
        workflow_id: Uuid,
    ) -> Result<workflows::Model, WorkflowError> {
        workflows::Entity::find_by_id(workflow_id)
            .lock_exclusive()
            .one(txn)
            .await
            .map_err(db_err)?
            .ok_or(WorkflowError::WorkflowNotFound(workflow_id))
    }

    async fn load_pending_request(
        &self,
        txn: &DatabaseTransaction,
        tenant_id: Uuid,
        workflow_id: Uuid,
    ) -> Result<workflow_requests::Model, WorkflowError> {
        workflow_requests::Entity::find()
            .filter(workflow_requests::Column::WorkflowId.eq(workflow_id))
            .filter(workflow_requests::Column::TenantId.eq(tenant_id))
            .filter(workflow_requests::Column::Status.eq(db_enums::RequestStatus::Pending))
            .one(txn)
            .await
            .map_err(db_err)?
            .ok_or(WorkflowError::RequestNotFound { workflow_id })
    }

    fn authorize(&self, actor_role: &str, required_permission: &str) -> Result<(), WorkflowError> {
        if self.policy.can_approve(actor_role, required_permission) {
            Ok(())
        } else {
            Err(WorkflowError::Forbidden {
                role: actor_role.to_string(),
                required_permission: required_permission.to_string(),
            })
        }
    }

    /// Builds the AlreadyProcessed error after a lost conditional update.
    async fn already_processed(&self, tenant_id: Uuid, approval_id: Uuid) -> WorkflowError {
        match self.load_approval(tenant_id, approval_id).await {
            Ok(approval) => WorkflowError::AlreadyProcessed {
                approval_id,
                status: db_approval_status_to_core(&approval.status),
            },
            Err(e) => e,
        }
    }

    /// Dispatches the deferred action and settles the request's status.
    async fn execute_request(
        &self,
        tenant_id: Uuid,
        actor_id: Uuid,
        request: workflow_requests::Model,
    ) -> Result<DecisionOutcome, WorkflowError> {
        let action = db_action_to_core(&request.action);
        let key = ActionKey::new(db_module_to_core(&request.module), action);
        let ctx = ExecutionContext::new(tenant_id, actor_id);

        let handler = match self.registry.handler(key) {
            Ok(handler) => handler,
            Err(e) => {
                self.settle_request(&request, db_enums::RequestStatus::Failed, None, Some(e.to_string()))
                    .await?;
                return Err(e);
            }
        };

        match handler.execute(&ctx, &request.payload).await {
            Ok(item) => {
                self.settle_request(&request, db_enums::RequestStatus::Completed, None, None)
                    .await?;
                self.notify_completion(&request, None).await;
                Ok(DecisionOutcome::completed(item))
            }
            Err(e)
                if e.is_duplicate() && action == atrium_core::workflow::WorkflowAction::Create =>
            {
                // The desired side effect already exists; absorb as
                // idempotent success with a warning.
                let warning = e.to_string();
                warn!(
                    request_id = %request.id,
                    key = %key,
                    warning = %warning,
                    "Duplicate on create absorbed as idempotent success"
                );
                self.settle_request(
                    &request,
                    db_enums::RequestStatus::Completed,
                    Some(warning.clone()),
                    None,
                )
                .await?;
                self.notify_completion(&request, Some(&warning)).await;
                Ok(DecisionOutcome::completed_with_warning(warning))
            }
            Err(e) => {
                self.settle_request(
                    &request,
                    db_enums::RequestStatus::Failed,
                    None,
                    Some(e.to_string()),
                )
                .await?;
                Err(WorkflowError::Execution(e))
            }
        }
    }

    async fn settle_request(
        &self,
        request: &workflow_requests::Model,
        status: db_enums::RequestStatus,
        warning: Option<String>,
        failure_reason: Option<String>,
    ) -> Result<(), WorkflowError> {
        workflow_requests::Entity::update_many()
            .set(workflow_requests::ActiveModel {
                status: Set(status),
                warning: Set(warning),
                failure_reason: Set(failure_reason),
                updated_at: Set(Utc::now().into()),
                ..Default::default()
            })
            .filter(workflow_requests::Column::Id.eq(request.id))
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(())
    }

    async fn notify_completion(&self, request: &workflow_requests::Model, warning: Option<&str>) {
        let key = ActionKey::new(
            db_module_to_core(&request.module),
            db_action_to_core(&request.action),
        );
        let message = match warning {
            Some(w) => format!("Your {key} request was approved ({w})"),
            None => format!("Your {key} request was approved and executed"),
        };

        if let Err(e) = self
            .notifier
            .notify(
                request.tenant_id,
                request.created_by,
                "workflow.completed",
                "Request approved",
                &message,
            )
            .await
        {
            warn!(error = %e, request_id = %request.id, "Completion notification failed");
        }

        self.broadcast_event("workflow.completed", request.tenant_id, &request.id)
            .await;
    }

    async fn broadcast_event(&self, event: &str, tenant_id: Uuid, request_id: &Uuid) {
        if let Err(e) = self
            .notifier
            .broadcast(event, tenant_id, &json!({ "request_id": request_id }))
            .await
        {
            warn!(error = %e, event, "Broadcast failed");
        }
    }
}

impl std::fmt::Debug for ApprovalRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApprovalRepository")
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}

fn db_err(e: sea_orm::DbErr) -> WorkflowError {
    WorkflowError::Database(e.to_string())
}

// ============================================================================
// Conversion helpers
// ============================================================================

/// Converts database ApprovalStatus to core ApprovalStatus.
pub(crate) fn db_approval_status_to_core(
    status: &db_enums::ApprovalStatus,
) -> atrium_core::workflow::ApprovalStatus {
    match status {
        db_enums::ApprovalStatus::Pending => atrium_core::workflow::ApprovalStatus::Pending,
        db_enums::ApprovalStatus::Approved => atrium_core::workflow::ApprovalStatus::Approved,
        db_enums::ApprovalStatus::Rejected => atrium_core::workflow::ApprovalStatus::Rejected,
    }
}

/// Converts database WorkflowModule to core WorkflowModule.
pub(crate) fn db_module_to_core(
    module: &db_enums::WorkflowModule,
) -> atrium_core::workflow::WorkflowModule {
    match module {
        db_enums::WorkflowModule::Inventory => atrium_core::workflow::WorkflowModule::Inventory,
        db_enums::WorkflowModule::Hr => atrium_core::workflow::WorkflowModule::Hr,
        db_enums::WorkflowModule::Finance => atrium_core::workflow::WorkflowModule::Finance,
    }
}

/// Converts core WorkflowModule to database WorkflowModule.
pub(crate) fn core_module_to_db(
    module: atrium_core::workflow::WorkflowModule,
) -> db_enums::WorkflowModule {
    match module {
        atrium_core::workflow::WorkflowModule::Inventory => db_enums::WorkflowModule::Inventory,
        atrium_core::workflow::WorkflowModule::Hr => db_enums::WorkflowModule::Hr,
        atrium_core::workflow::WorkflowModule::Finance => db_enums::WorkflowModule::Finance,
    }
}

/// Converts database WorkflowAction to core WorkflowAction.
pub(crate) fn db_action_to_core(
    action: &db_enums::WorkflowAction,
) -> atrium_core::workflow::WorkflowAction {
    match action {
        db_enums::WorkflowAction::Create => atrium_core::workflow::WorkflowAction::Create,
        db_enums::WorkflowAction::Update => atrium_core::workflow::WorkflowAction::Update,
        db_enums::WorkflowAction::Delete => atrium_core::workflow::WorkflowAction::Delete,
        db_enums::WorkflowAction::LeaveRequest => {
            atrium_core::workflow::WorkflowAction::LeaveRequest
        }
        db_enums::WorkflowAction::ExpenseClaim => {
            atrium_core::workflow::WorkflowAction::ExpenseClaim
        }
    }
}

/// Converts core WorkflowAction to database WorkflowAction.
pub(crate) fn core_action_to_db(
    action: atrium_core::workflow::WorkflowAction,
) -> db_enums::WorkflowAction {
    match action {
        atrium_core::workflow::WorkflowAction::Create => db_enums::WorkflowAction::Create,
        atrium_core::workflow::WorkflowAction::Update => db_enums::WorkflowAction::Update,
        atrium_core::workflow::WorkflowAction::Delete => db_enums::WorkflowAction::Delete,
        atrium_core::workflow::WorkflowAction::LeaveRequest => {
            db_enums::WorkflowAction::LeaveRequest
        }
        atrium_core::workflow::WorkflowAction::ExpenseClaim => {
            db_enums::WorkflowAction::ExpenseClaim
        }
    }
}
