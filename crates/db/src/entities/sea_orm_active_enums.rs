//! `SeaORM` active enums mapped to Postgres enum types.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Status of a workflow instance.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "workflow_status")]
#[serde(rename_all = "lowercase")]
pub enum WorkflowStatus {
    /// At least one approval is still pending.
    #[sea_orm(string_value = "active")]
    Active,
    /// All approvals cleared.
    #[sea_orm(string_value = "completed")]
    Completed,
    /// At least one approval rejected.
    #[sea_orm(string_value = "rejected")]
    Rejected,
}

/// Status of a single approval slot.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "approval_status")]
#[serde(rename_all = "lowercase")]
pub enum ApprovalStatus {
    /// Awaiting a decision.
    #[sea_orm(string_value = "pending")]
    Pending,
    /// Step cleared.
    #[sea_orm(string_value = "approved")]
    Approved,
    /// Step vetoed.
    #[sea_orm(string_value = "rejected")]
    Rejected,
}

/// Status of a deferred workflow request.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "request_status")]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    /// Awaiting full approval.
    #[sea_orm(string_value = "pending")]
    Pending,
    /// Action executed.
    #[sea_orm(string_value = "completed")]
    Completed,
    /// Execution failed.
    #[sea_orm(string_value = "failed")]
    Failed,
    /// Workflow rejected.
    #[sea_orm(string_value = "rejected")]
    Rejected,
}

/// Business module owning a gated action.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "workflow_module")]
#[serde(rename_all = "lowercase")]
pub enum WorkflowModule {
    /// Inventory management.
    #[sea_orm(string_value = "inventory")]
    Inventory,
    /// Human resources.
    #[sea_orm(string_value = "hr")]
    Hr,
    /// Finance.
    #[sea_orm(string_value = "finance")]
    Finance,
}

/// Gated action within a module.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "workflow_action")]
#[serde(rename_all = "snake_case")]
pub enum WorkflowAction {
    /// Create an entity.
    #[sea_orm(string_value = "create")]
    Create,
    /// Update an entity.
    #[sea_orm(string_value = "update")]
    Update,
    /// Delete an entity.
    #[sea_orm(string_value = "delete")]
    Delete,
    /// Approve a leave request.
    #[sea_orm(string_value = "leave_request")]
    LeaveRequest,
    /// Approve an expense claim.
    #[sea_orm(string_value = "expense_claim")]
    ExpenseClaim,
}

/// Lifecycle status of a business entity gated behind a workflow
/// (leave request, expense claim).
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "entity_status")]
#[serde(rename_all = "lowercase")]
pub enum EntityStatus {
    /// Awaiting workflow outcome.
    #[sea_orm(string_value = "pending")]
    Pending,
    /// Approved.
    #[sea_orm(string_value = "approved")]
    Approved,
    /// Rejected.
    #[sea_orm(string_value = "rejected")]
    Rejected,
}
