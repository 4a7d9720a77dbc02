//! Workflow domain types for the approval engine.
//!
//! This module defines the statuses tracked per approval, per workflow
//! instance, and per deferred request, plus the `(module, action)` key
//! used to dispatch downstream executors.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Status of a single approval slot.
///
/// Transitions are one-way and terminal:
/// - Pending → Approved (approve)
/// - Pending → Rejected (reject)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApprovalStatus {
    /// Awaiting a decision.
    Pending,
    /// Step cleared by an approver.
    Approved,
    /// Step vetoed by an approver.
    Rejected,
}

impl ApprovalStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// Parses a status from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pending" => Some(Self::Pending),
            "approved" => Some(Self::Approved),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }

    /// Returns true if the approval has received a decision.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

impl fmt::Display for ApprovalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Status of a workflow instance.
///
/// A workflow reaches Completed only when every approval is approved,
/// and Rejected as soon as any single approval is rejected. The two
/// terminal states are mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkflowStatus {
    /// At least one approval is still pending.
    Active,
    /// All approvals cleared; the deferred action has been dispatched.
    Completed,
    /// At least one approval was rejected.
    Rejected,
}

impl WorkflowStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Rejected => "rejected",
        }
    }

    /// Parses a status from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "active" => Some(Self::Active),
            "completed" => Some(Self::Completed),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }

    /// Returns true if the workflow can no longer change state.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Active)
    }
}

impl fmt::Display for WorkflowStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Status of a deferred workflow request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    /// Awaiting full approval.
    Pending,
    /// Action executed (possibly with an idempotency warning).
    Completed,
    /// Action execution failed; manual re-submission required.
    Failed,
    /// Workflow was rejected before execution.
    Rejected,
}

impl RequestStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Rejected => "rejected",
        }
    }

    /// Parses a status from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pending" => Some(Self::Pending),
            "completed" => Some(Self::Completed),
            "failed" => Some(Self::Failed),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Business module owning a gated action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkflowModule {
    /// Inventory management.
    Inventory,
    /// Human resources.
    Hr,
    /// Finance.
    Finance,
}

impl WorkflowModule {
    /// Returns the string representation of the module.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Inventory => "inventory",
            Self::Hr => "hr",
            Self::Finance => "finance",
        }
    }

    /// Parses a module from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "inventory" => Some(Self::Inventory),
            "hr" => Some(Self::Hr),
            "finance" => Some(Self::Finance),
            _ => None,
        }
    }
}

impl fmt::Display for WorkflowModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Gated action within a module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowAction {
    /// Create an entity.
    Create,
    /// Update an entity.
    Update,
    /// Delete an entity.
    Delete,
    /// Approve a leave request.
    LeaveRequest,
    /// Approve an expense claim.
    ExpenseClaim,
}

impl WorkflowAction {
    /// Returns the string representation of the action.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::LeaveRequest => "leave_request",
            Self::ExpenseClaim => "expense_claim",
        }
    }

    /// Parses an action from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "create" => Some(Self::Create),
            "update" => Some(Self::Update),
            "delete" => Some(Self::Delete),
            "leave_request" => Some(Self::LeaveRequest),
            "expense_claim" => Some(Self::ExpenseClaim),
            _ => None,
        }
    }
}

impl fmt::Display for WorkflowAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Dispatch key for the action executor registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActionKey {
    /// Business module.
    pub module: WorkflowModule,
    /// Gated action.
    pub action: WorkflowAction,
}

impl ActionKey {
    /// Creates a new dispatch key.
    #[must_use]
    pub const fn new(module: WorkflowModule, action: WorkflowAction) -> Self {
        Self { module, action }
    }
}

impl fmt::Display for ActionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.module, self.action)
    }
}

/// Outcome of a single approve/reject decision.
#[derive(Debug, Clone, Serialize)]
pub struct DecisionOutcome {
    /// Whether the deferred action was executed as part of this decision.
    pub executed: bool,
    /// Human-readable summary.
    pub message: String,
    /// Result entity when the action executed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<Value>,
    /// Warning when execution was absorbed as an idempotent duplicate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

impl DecisionOutcome {
    /// Approval recorded but other steps are still pending.
    #[must_use]
    pub fn waiting(remaining: usize) -> Self {
        Self {
            executed: false,
            message: format!("Approval recorded, waiting for {remaining} more approval(s)"),
            item: None,
            warning: None,
        }
    }

    /// Approval recorded; a concurrent final approval already completed the
    /// workflow and executed the action.
    #[must_use]
    pub fn already_completed() -> Self {
        Self {
            executed: false,
            message: "Approval recorded, workflow already completed".to_string(),
            item: None,
            warning: None,
        }
    }

    /// All steps cleared and the action executed.
    #[must_use]
    pub fn completed(item: Value) -> Self {
        Self {
            executed: true,
            message: "All approvals received, action executed".to_string(),
            item: Some(item),
            warning: None,
        }
    }

    /// All steps cleared; the side effect already existed (benign duplicate).
    #[must_use]
    pub fn completed_with_warning(warning: String) -> Self {
        Self {
            executed: true,
            message: "All approvals received, action already applied".to_string(),
            item: None,
            warning: Some(warning),
        }
    }

    /// Workflow rejected; the action never executes.
    #[must_use]
    pub fn rejected() -> Self {
        Self {
            executed: false,
            message: "Request rejected".to_string(),
            item: None,
            warning: None,
        }
    }
}
