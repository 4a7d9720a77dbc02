//! Stateless decision guards and chain evaluation.
//!
//! The persistence layer loads approval rows and delegates every state
//! question here, so the state machine stays testable without a database.

use uuid::Uuid;

use crate::workflow::error::WorkflowError;
use crate::workflow::types::{ApprovalStatus, WorkflowStatus};

/// Stateless service for approval chain decisions.
pub struct ChainService;

impl ChainService {
    /// Guards a decision against double-application.
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError::AlreadyProcessed` if the approval has already
    /// received a decision.
    pub fn ensure_pending(
        approval_id: Uuid,
        status: ApprovalStatus,
    ) -> Result<(), WorkflowError> {
        match status {
            ApprovalStatus::Pending => Ok(()),
            terminal => Err(WorkflowError::AlreadyProcessed {
                approval_id,
                status: terminal,
            }),
        }
    }

    /// Evaluates a workflow's status from its approval statuses.
    ///
    /// Rejection wins over everything: a single rejected approval makes the
    /// workflow Rejected regardless of the other steps. A non-empty chain
    /// with every approval approved is Completed; anything else is Active.
    #[must_use]
    pub fn evaluate_chain(statuses: &[ApprovalStatus]) -> WorkflowStatus {
        if statuses.iter().any(|s| *s == ApprovalStatus::Rejected) {
            return WorkflowStatus::Rejected;
        }
        if !statuses.is_empty() && statuses.iter().all(|s| *s == ApprovalStatus::Approved) {
            return WorkflowStatus::Completed;
        }
        WorkflowStatus::Active
    }

    /// Counts the approvals still awaiting a decision.
    #[must_use]
    pub fn remaining_pending(statuses: &[ApprovalStatus]) -> usize {
        statuses
            .iter()
            .filter(|s| **s == ApprovalStatus::Pending)
            .count()
    }

    /// Validates step ordering for a new chain definition.
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError::Validation` if the chain is empty or the step
    /// orders are not 1..=N contiguous ascending.
    pub fn validate_step_orders(step_orders: &[i32]) -> Result<(), WorkflowError> {
        if step_orders.is_empty() {
            return Err(WorkflowError::Validation(
                "a workflow definition requires at least one step".to_string(),
            ));
        }
        for (idx, order) in step_orders.iter().enumerate() {
            let expected = i32::try_from(idx + 1)
                .map_err(|_| WorkflowError::Validation("too many steps".to_string()))?;
            if *order != expected {
                return Err(WorkflowError::Validation(format!(
                    "step orders must be contiguous ascending from 1 (got {order} at position {expected})"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_pending_passes_for_pending() {
        let result = ChainService::ensure_pending(Uuid::new_v4(), ApprovalStatus::Pending);
        assert!(result.is_ok());
    }

    #[test]
    fn test_ensure_pending_rejects_terminal_statuses() {
        let id = Uuid::new_v4();
        for status in [ApprovalStatus::Approved, ApprovalStatus::Rejected] {
            let result = ChainService::ensure_pending(id, status);
            match result {
                Err(WorkflowError::AlreadyProcessed {
                    approval_id,
                    status: got,
                }) => {
                    assert_eq!(approval_id, id);
                    assert_eq!(got, status);
                }
                other => panic!("expected AlreadyProcessed, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_evaluate_chain_all_approved() {
        let statuses = [ApprovalStatus::Approved, ApprovalStatus::Approved];
        assert_eq!(
            ChainService::evaluate_chain(&statuses),
            WorkflowStatus::Completed
        );
    }

    #[test]
    fn test_evaluate_chain_any_rejected_vetoes() {
        // A rejection vetoes even when every other step already approved.
        let statuses = [
            ApprovalStatus::Approved,
            ApprovalStatus::Rejected,
            ApprovalStatus::Pending,
        ];
        assert_eq!(
            ChainService::evaluate_chain(&statuses),
            WorkflowStatus::Rejected
        );
    }

    #[test]
    fn test_evaluate_chain_pending_stays_active() {
        let statuses = [ApprovalStatus::Approved, ApprovalStatus::Pending];
        assert_eq!(
            ChainService::evaluate_chain(&statuses),
            WorkflowStatus::Active
        );
    }

    #[test]
    fn test_evaluate_chain_empty_is_active() {
        assert_eq!(ChainService::evaluate_chain(&[]), WorkflowStatus::Active);
    }

    #[test]
    fn test_remaining_pending() {
        let statuses = [
            ApprovalStatus::Approved,
            ApprovalStatus::Pending,
            ApprovalStatus::Pending,
        ];
        assert_eq!(ChainService::remaining_pending(&statuses), 2);
    }

    #[test]
    fn test_validate_step_orders() {
        assert!(ChainService::validate_step_orders(&[1, 2, 3]).is_ok());
        assert!(ChainService::validate_step_orders(&[1]).is_ok());
        assert!(ChainService::validate_step_orders(&[]).is_err());
        assert!(ChainService::validate_step_orders(&[0, 1]).is_err());
        assert!(ChainService::validate_step_orders(&[1, 3]).is_err());
        assert!(ChainService::validate_step_orders(&[2, 1]).is_err());
    }
}
