//! Integration tests for the approval repository.
//!
//! These run against a live migrated Postgres database. They skip (pass
//! trivially) when no database URL is configured so the suite stays green
//! in environments without Postgres. Each test uses a fresh tenant id, so
//! tests never observe each other's rows.

use std::env;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use sea_orm::{Database, DatabaseConnection};
use serde_json::{Value, json};
use uuid::Uuid;

use atrium_core::workflow::{
    ActionHandler, ActionKey, ActionRegistry, AuthorizationPolicy, DecisionOutcome,
    ExecutionContext, ExecutorError, NullNotifier, WorkflowAction, WorkflowError, WorkflowModule,
};
use atrium_db::entities::{
    leave_requests,
    sea_orm_active_enums::{EntityStatus, RequestStatus},
};
use atrium_db::executors::LeaveRequestHandler;
use atrium_db::repositories::{ApprovalRepository, DefinitionRepository, NewDefinitionStep};

async fn test_db() -> Option<DatabaseConnection> {
    let url = env::var("DATABASE_URL")
        .or_else(|_| env::var("ATRIUM__DATABASE__URL"))
        .ok()?;
    Some(
        Database::connect(&url)
            .await
            .expect("Failed to connect to database"),
    )
}

fn inventory_create() -> ActionKey {
    ActionKey::new(WorkflowModule::Inventory, WorkflowAction::Create)
}

/// Handler that records how many times `execute` ran.
struct CountingHandler {
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl ActionHandler for CountingHandler {
    fn validate(&self, _payload: &Value) -> Result<(), ExecutorError> {
        Ok(())
    }

    async fn execute(
        &self,
        _ctx: &ExecutionContext,
        payload: &Value,
    ) -> Result<Value, ExecutorError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(payload.clone())
    }
}

fn counting_repo(db: &DatabaseConnection) -> (ApprovalRepository, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let mut registry = ActionRegistry::new();
    registry.register(
        inventory_create(),
        Arc::new(CountingHandler {
            calls: calls.clone(),
        }),
    );
    let repo = ApprovalRepository::new(
        db.clone(),
        Arc::new(registry),
        Arc::new(NullNotifier),
        Arc::new(AuthorizationPolicy::default()),
    );
    (repo, calls)
}

fn one_step() -> Vec<NewDefinitionStep> {
    vec![NewDefinitionStep {
        step_order: 1,
        required_permission: "inventory.approve".to_string(),
    }]
}

fn two_steps() -> Vec<NewDefinitionStep> {
    vec![
        NewDefinitionStep {
            step_order: 1,
            required_permission: "inventory.approve".to_string(),
        },
        NewDefinitionStep {
            step_order: 2,
            required_permission: "inventory.approve".to_string(),
        },
    ]
}

fn widget_payload() -> Value {
    json!({"name": "Widget", "sku": "W-1", "price": "10", "quantity": 5})
}

// ============================================================================
// Test: Approve approval not found
// ============================================================================
#[tokio::test]
async fn test_approve_approval_not_found() {
    let Some(db) = test_db().await else { return };
    let (repo, _) = counting_repo(&db);

    let approval_id = Uuid::new_v4();
    let result = repo
        .approve(Uuid::new_v4(), approval_id, Uuid::new_v4(), "manager", None)
        .await;

    match result {
        Err(WorkflowError::ApprovalNotFound(id)) => assert_eq!(id, approval_id),
        other => panic!("Expected ApprovalNotFound, got {other:?}"),
    }
}

// ============================================================================
// Test: Reject approval not found
// ============================================================================
#[tokio::test]
async fn test_reject_approval_not_found() {
    let Some(db) = test_db().await else { return };
    let (repo, _) = counting_repo(&db);

    let approval_id = Uuid::new_v4();
    let result = repo
        .reject(
            Uuid::new_v4(),
            approval_id,
            Uuid::new_v4(),
            "manager",
            Some("nope".to_string()),
        )
        .await;

    match result {
        Err(WorkflowError::ApprovalNotFound(id)) => assert_eq!(id, approval_id),
        other => panic!("Expected ApprovalNotFound, got {other:?}"),
    }
}

// ============================================================================
// Test: Single-step workflow executes exactly once
// ============================================================================
#[tokio::test]
async fn test_single_step_approve_executes_once() {
    let Some(db) = test_db().await else { return };
    let (repo, calls) = counting_repo(&db);
    let definitions = DefinitionRepository::new(db.clone());

    let tenant_id = Uuid::new_v4();
    let requester = Uuid::new_v4();
    let manager = Uuid::new_v4();

    let definition = definitions
        .create(tenant_id, inventory_create(), &one_step())
        .await
        .unwrap();
    let submitted = repo
        .submit_request(&definition, widget_payload(), requester)
        .await
        .unwrap();
    assert_eq!(submitted.pending_steps, 1);

    let (pending, total) = repo
        .pending_approvals(tenant_id, "manager", &Default::default())
        .await
        .unwrap();
    assert_eq!(total, 1);
    assert!(pending[0].can_approve);

    let outcome = repo
        .approve(tenant_id, pending[0].approval.id, manager, "manager", None)
        .await
        .unwrap();
    assert!(outcome.executed);
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    // The decided approval is no longer listed.
    let (_, remaining) = repo
        .pending_approvals(tenant_id, "manager", &Default::default())
        .await
        .unwrap();
    assert_eq!(remaining, 0);

    let (requests, _) = repo
        .my_requests(tenant_id, requester, &Default::default())
        .await
        .unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].status, RequestStatus::Completed);
}

// ============================================================================
// Test: Second decision on the same approval fails AlreadyProcessed
// ============================================================================
#[tokio::test]
async fn test_double_approve_fails_already_processed() {
    let Some(db) = test_db().await else { return };
    let (repo, _) = counting_repo(&db);
    let definitions = DefinitionRepository::new(db.clone());

    let tenant_id = Uuid::new_v4();
    let definition = definitions
        .create(tenant_id, inventory_create(), &two_steps())
        .await
        .unwrap();
    repo.submit_request(&definition, widget_payload(), Uuid::new_v4())
        .await
        .unwrap();

    let (pending, _) = repo
        .pending_approvals(tenant_id, "manager", &Default::default())
        .await
        .unwrap();
    let approval_id = pending
        .iter()
        .map(|p| p.approval.clone())
        .find(|a| a.step_order == 1)
        .unwrap()
        .id;

    repo.approve(tenant_id, approval_id, Uuid::new_v4(), "manager", None)
        .await
        .unwrap();

    let result = repo
        .approve(tenant_id, approval_id, Uuid::new_v4(), "manager", None)
        .await;
    assert!(matches!(
        result,
        Err(WorkflowError::AlreadyProcessed { .. })
    ));
}

// ============================================================================
// Test: Multi-step waits until the final approval
// ============================================================================
#[tokio::test]
async fn test_multi_step_waits_then_completes() {
    let Some(db) = test_db().await else { return };
    let (repo, calls) = counting_repo(&db);
    let definitions = DefinitionRepository::new(db.clone());

    let tenant_id = Uuid::new_v4();
    let definition = definitions
        .create(tenant_id, inventory_create(), &two_steps())
        .await
        .unwrap();
    repo.submit_request(&definition, widget_payload(), Uuid::new_v4())
        .await
        .unwrap();

    let (pending, _) = repo
        .pending_approvals(tenant_id, "manager", &Default::default())
        .await
        .unwrap();
    let mut approvals: Vec<_> = pending.into_iter().map(|p| p.approval).collect();
    approvals.sort_by_key(|a| a.step_order);

    let first = repo
        .approve(tenant_id, approvals[0].id, Uuid::new_v4(), "manager", None)
        .await
        .unwrap();
    assert!(!first.executed);
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    let second = repo
        .approve(tenant_id, approvals[1].id, Uuid::new_v4(), "manager", None)
        .await
        .unwrap();
    assert!(second.executed);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

// ============================================================================
// Test: Concurrent final approvals execute exactly once
// ============================================================================
#[tokio::test]
async fn test_concurrent_final_approvals_execute_once() {
    let Some(db) = test_db().await else { return };
    let (repo, calls) = counting_repo(&db);
    let definitions = DefinitionRepository::new(db.clone());

    let tenant_id = Uuid::new_v4();
    let definition = definitions
        .create(tenant_id, inventory_create(), &two_steps())
        .await
        .unwrap();
    repo.submit_request(&definition, widget_payload(), Uuid::new_v4())
        .await
        .unwrap();

    let (pending, _) = repo
        .pending_approvals(tenant_id, "manager", &Default::default())
        .await
        .unwrap();
    let ids: Vec<Uuid> = pending.iter().map(|p| p.approval.id).collect();
    assert_eq!(ids.len(), 2);

    let repo_a = repo.clone();
    let repo_b = repo.clone();
    let (id_a, id_b) = (ids[0], ids[1]);
    let task_a = tokio::spawn(async move {
        repo_a
            .approve(tenant_id, id_a, Uuid::new_v4(), "manager", None)
            .await
    });
    let task_b = tokio::spawn(async move {
        repo_b
            .approve(tenant_id, id_b, Uuid::new_v4(), "manager", None)
            .await
    });

    let outcome_a = task_a.await.unwrap().unwrap();
    let outcome_b = task_b.await.unwrap().unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 1, "Action must run exactly once");
    let executed = [&outcome_a, &outcome_b]
        .iter()
        .filter(|o| o.executed)
        .count();
    assert_eq!(executed, 1, "Exactly one decision reports execution");
}

// ============================================================================
// Test: Rejection vetoes the workflow
// ============================================================================
#[tokio::test]
async fn test_reject_vetoes_workflow() {
    let Some(db) = test_db().await else { return };
    let (repo, calls) = counting_repo(&db);
    let definitions = DefinitionRepository::new(db.clone());

    let tenant_id = Uuid::new_v4();
    let requester = Uuid::new_v4();
    let definition = definitions
        .create(tenant_id, inventory_create(), &two_steps())
        .await
        .unwrap();
    repo.submit_request(&definition, widget_payload(), requester)
        .await
        .unwrap();

    let (pending, _) = repo
        .pending_approvals(tenant_id, "manager", &Default::default())
        .await
        .unwrap();

    let outcome = repo
        .reject(
            tenant_id,
            pending[0].approval.id,
            Uuid::new_v4(),
            "manager",
            Some("insufficient balance".to_string()),
        )
        .await
        .unwrap();
    assert!(!outcome.executed);
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    // Undecided siblings of a dead workflow are no longer actionable.
    let (_, actionable) = repo
        .pending_approvals(tenant_id, "manager", &Default::default())
        .await
        .unwrap();
    assert_eq!(actionable, 0);

    let (requests, _) = repo
        .my_requests(tenant_id, requester, &Default::default())
        .await
        .unwrap();
    assert_eq!(requests[0].status, RequestStatus::Rejected);
}

// ============================================================================
// Test: Role without the step permission is forbidden
// ============================================================================
#[tokio::test]
async fn test_employee_cannot_approve() {
    let Some(db) = test_db().await else { return };
    let (repo, _) = counting_repo(&db);
    let definitions = DefinitionRepository::new(db.clone());

    let tenant_id = Uuid::new_v4();
    let definition = definitions
        .create(tenant_id, inventory_create(), &one_step())
        .await
        .unwrap();
    repo.submit_request(&definition, widget_payload(), Uuid::new_v4())
        .await
        .unwrap();

    let (pending, _) = repo
        .pending_approvals(tenant_id, "employee", &Default::default())
        .await
        .unwrap();
    assert!(!pending[0].can_approve);

    let result = repo
        .approve(
            tenant_id,
            pending[0].approval.id,
            Uuid::new_v4(),
            "employee",
            None,
        )
        .await;
    assert!(matches!(result, Err(WorkflowError::Forbidden { .. })));
}

// ============================================================================
// Test: Approvals are invisible across tenants
// ============================================================================
#[tokio::test]
async fn test_tenant_isolation() {
    let Some(db) = test_db().await else { return };
    let (repo, _) = counting_repo(&db);
    let definitions = DefinitionRepository::new(db.clone());

    let tenant_a = Uuid::new_v4();
    let tenant_b = Uuid::new_v4();
    let definition = definitions
        .create(tenant_a, inventory_create(), &one_step())
        .await
        .unwrap();
    repo.submit_request(&definition, widget_payload(), Uuid::new_v4())
        .await
        .unwrap();

    let (pending_a, _) = repo
        .pending_approvals(tenant_a, "manager", &Default::default())
        .await
        .unwrap();
    let (_, total_b) = repo
        .pending_approvals(tenant_b, "manager", &Default::default())
        .await
        .unwrap();
    assert_eq!(total_b, 0);

    // Deciding across the tenant boundary reads as not found.
    let result = repo
        .approve(
            tenant_b,
            pending_a[0].approval.id,
            Uuid::new_v4(),
            "manager",
            None,
        )
        .await;
    assert!(matches!(result, Err(WorkflowError::ApprovalNotFound(_))));
}

// ============================================================================
// Test: Rejecting a leave workflow transitions the entity
// ============================================================================
#[tokio::test]
async fn test_leave_rejection_transitions_entity() {
    use chrono::{NaiveDate, Utc};
    use sea_orm::{ActiveModelTrait, EntityTrait, Set};

    let Some(db) = test_db().await else { return };

    let tenant_id = Uuid::new_v4();
    let employee_id = Uuid::new_v4();
    let leave_id = Uuid::new_v4();
    let now = Utc::now().into();

    leave_requests::ActiveModel {
        id: Set(leave_id),
        tenant_id: Set(tenant_id),
        employee_id: Set(employee_id),
        leave_type: Set("annual".to_string()),
        start_date: Set(NaiveDate::from_ymd_opt(2026, 9, 1).unwrap()),
        end_date: Set(NaiveDate::from_ymd_opt(2026, 9, 5).unwrap()),
        status: Set(EntityStatus::Pending),
        reason: Set(Some("family trip".to_string())),
        rejection_reason: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(&db)
    .await
    .unwrap();

    let leave_key = ActionKey::new(WorkflowModule::Hr, WorkflowAction::LeaveRequest);
    let mut registry = ActionRegistry::new();
    registry.register(
        leave_key,
        Arc::new(LeaveRequestHandler::new(db.clone(), Arc::new(NullNotifier))),
    );
    let repo = ApprovalRepository::new(
        db.clone(),
        Arc::new(registry),
        Arc::new(NullNotifier),
        Arc::new(AuthorizationPolicy::default()),
    );
    let definitions = DefinitionRepository::new(db.clone());

    let definition = definitions
        .create(
            tenant_id,
            leave_key,
            &[NewDefinitionStep {
                step_order: 1,
                required_permission: "hr.approve".to_string(),
            }],
        )
        .await
        .unwrap();
    repo.submit_request(
        &definition,
        json!({"leave_request_id": leave_id}),
        employee_id,
    )
    .await
    .unwrap();

    let (pending, _) = repo
        .pending_approvals(tenant_id, "manager", &Default::default())
        .await
        .unwrap();

    let outcome = repo
        .reject(
            tenant_id,
            pending[0].approval.id,
            Uuid::new_v4(),
            "manager",
            Some("insufficient balance".to_string()),
        )
        .await
        .unwrap();
    assert!(!outcome.executed);

    let leave = leave_requests::Entity::find_by_id(leave_id)
        .one(&db)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(leave.status, EntityStatus::Rejected);
    assert_eq!(
        leave.rejection_reason.as_deref(),
        Some("insufficient balance")
    );
}

// ============================================================================
// Test: Duplicate outcome on approve
// ============================================================================
#[tokio::test]
async fn test_duplicate_on_create_is_idempotent_success() {
    let Some(db) = test_db().await else { return };

    struct DuplicateHandler;

    #[async_trait]
    impl ActionHandler for DuplicateHandler {
        fn validate(&self, _payload: &Value) -> Result<(), ExecutorError> {
            Ok(())
        }

        async fn execute(
            &self,
            _ctx: &ExecutionContext,
            _payload: &Value,
        ) -> Result<Value, ExecutorError> {
            Err(ExecutorError::DuplicateKey(
                "Item with SKU 'W-1' already exists".to_string(),
            ))
        }
    }

    let mut registry = ActionRegistry::new();
    registry.register(inventory_create(), Arc::new(DuplicateHandler));
    let repo = ApprovalRepository::new(
        db.clone(),
        Arc::new(registry),
        Arc::new(NullNotifier),
        Arc::new(AuthorizationPolicy::default()),
    );
    let definitions = DefinitionRepository::new(db.clone());

    let tenant_id = Uuid::new_v4();
    let requester = Uuid::new_v4();
    let definition = definitions
        .create(tenant_id, inventory_create(), &one_step())
        .await
        .unwrap();
    repo.submit_request(&definition, widget_payload(), requester)
        .await
        .unwrap();

    let (pending, _) = repo
        .pending_approvals(tenant_id, "manager", &Default::default())
        .await
        .unwrap();

    let outcome: DecisionOutcome = repo
        .approve(tenant_id, pending[0].approval.id, Uuid::new_v4(), "manager", None)
        .await
        .unwrap();
    assert!(outcome.executed);
    assert_eq!(
        outcome.warning.as_deref(),
        Some("Item with SKU 'W-1' already exists")
    );

    // Completed, not failed.
    let (requests, _) = repo
        .my_requests(tenant_id, requester, &Default::default())
        .await
        .unwrap();
    assert_eq!(requests[0].status, RequestStatus::Completed);
}
