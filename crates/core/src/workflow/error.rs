//! Workflow error types for the approval engine.

use thiserror::Error;
use uuid::Uuid;

use crate::workflow::executor::ExecutorError;
use crate::workflow::types::ApprovalStatus;

/// Errors that can occur during workflow operations.
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// Approval record not found (or outside the caller's tenant).
    #[error("Approval {0} not found")]
    ApprovalNotFound(Uuid),

    /// Workflow instance not found.
    #[error("Workflow {0} not found")]
    WorkflowNotFound(Uuid),

    /// Workflow definition not found (or not active).
    #[error("Workflow definition {0} not found")]
    DefinitionNotFound(Uuid),

    /// No pending workflow request is linked to the workflow.
    #[error("No pending request found for workflow {workflow_id}")]
    RequestNotFound {
        /// The workflow whose request is missing.
        workflow_id: Uuid,
    },

    /// Approval has already received a decision.
    #[error("Approval {approval_id} already processed (status: {status})")]
    AlreadyProcessed {
        /// The approval that was targeted.
        approval_id: Uuid,
        /// Its current terminal status.
        status: ApprovalStatus,
    },

    /// Actor's role does not satisfy the step's required permission.
    #[error("Role {role} may not decide approvals requiring permission {required_permission}")]
    Forbidden {
        /// The actor's role.
        role: String,
        /// The permission the step requires.
        required_permission: String,
    },

    /// No handler is registered for the (module, action) pair.
    #[error("No action handler registered for {key}")]
    UnsupportedAction {
        /// The dispatch key that failed to resolve.
        key: String,
    },

    /// Malformed submission payload.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Downstream action execution failed.
    #[error("Action execution failed: {0}")]
    Execution(#[from] ExecutorError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),
}

impl WorkflowError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::ApprovalNotFound(_)
            | Self::WorkflowNotFound(_)
            | Self::DefinitionNotFound(_)
            | Self::RequestNotFound { .. } => 404,
            Self::AlreadyProcessed { .. } => 409,
            Self::Forbidden { .. } => 403,
            Self::UnsupportedAction { .. } => 422,
            Self::Validation(_) => 400,
            Self::Execution(e) => e.status_code(),
            Self::Database(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::ApprovalNotFound(_) => "APPROVAL_NOT_FOUND",
            Self::WorkflowNotFound(_) => "WORKFLOW_NOT_FOUND",
            Self::DefinitionNotFound(_) => "DEFINITION_NOT_FOUND",
            Self::RequestNotFound { .. } => "REQUEST_NOT_FOUND",
            Self::AlreadyProcessed { .. } => "ALREADY_PROCESSED",
            Self::Forbidden { .. } => "FORBIDDEN",
            Self::UnsupportedAction { .. } => "UNSUPPORTED_ACTION",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Execution(e) => e.kind(),
            Self::Database(_) => "DATABASE_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_errors() {
        let err = WorkflowError::ApprovalNotFound(Uuid::nil());
        assert_eq!(err.status_code(), 404);
        assert_eq!(err.error_code(), "APPROVAL_NOT_FOUND");

        let err = WorkflowError::RequestNotFound {
            workflow_id: Uuid::nil(),
        };
        assert_eq!(err.status_code(), 404);
        assert_eq!(err.error_code(), "REQUEST_NOT_FOUND");
    }

    #[test]
    fn test_already_processed_error() {
        let err = WorkflowError::AlreadyProcessed {
            approval_id: Uuid::nil(),
            status: ApprovalStatus::Approved,
        };
        assert_eq!(err.status_code(), 409);
        assert_eq!(err.error_code(), "ALREADY_PROCESSED");
        assert!(err.to_string().contains("approved"));
    }

    #[test]
    fn test_forbidden_error() {
        let err = WorkflowError::Forbidden {
            role: "employee".to_string(),
            required_permission: "inventory.approve".to_string(),
        };
        assert_eq!(err.status_code(), 403);
        assert_eq!(err.error_code(), "FORBIDDEN");
    }

    #[test]
    fn test_unsupported_action_error() {
        let err = WorkflowError::UnsupportedAction {
            key: "inventory/expense_claim".to_string(),
        };
        assert_eq!(err.status_code(), 422);
        assert_eq!(err.error_code(), "UNSUPPORTED_ACTION");
    }

    #[test]
    fn test_execution_error_keeps_kind() {
        let err = WorkflowError::from(ExecutorError::DuplicateKey(
            "Item with SKU 'W-1' already exists".to_string(),
        ));
        assert_eq!(err.status_code(), 409);
        assert_eq!(err.error_code(), "DUPLICATE_KEY");

        let err = WorkflowError::from(ExecutorError::Internal("boom".to_string()));
        assert_eq!(err.status_code(), 500);
        assert_eq!(err.error_code(), "INTERNAL");
    }
}
