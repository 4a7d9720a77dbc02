//! Property-based tests for chain evaluation.
//!
//! These validate the terminal-state invariants of the approval chain:
//! the terminal states are mutually exclusive, rejection always vetoes,
//! and status counts always add up to the number of steps.

use proptest::prelude::*;
use uuid::Uuid;

use crate::workflow::error::WorkflowError;
use crate::workflow::service::ChainService;
use crate::workflow::types::{ApprovalStatus, WorkflowStatus};

/// Strategy for a random approval status.
fn arb_status() -> impl Strategy<Value = ApprovalStatus> {
    prop_oneof![
        Just(ApprovalStatus::Pending),
        Just(ApprovalStatus::Approved),
        Just(ApprovalStatus::Rejected),
    ]
}

/// Strategy for a non-empty approval chain.
fn arb_chain() -> impl Strategy<Value = Vec<ApprovalStatus>> {
    prop::collection::vec(arb_status(), 1..12)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Completed iff all approvals approved; Rejected iff any rejected;
    /// Active otherwise. The terminal states never overlap.
    #[test]
    fn prop_chain_terminal_states_exclusive(chain in arb_chain()) {
        let status = ChainService::evaluate_chain(&chain);

        let any_rejected = chain.iter().any(|s| *s == ApprovalStatus::Rejected);
        let all_approved = chain.iter().all(|s| *s == ApprovalStatus::Approved);

        match status {
            WorkflowStatus::Rejected => prop_assert!(any_rejected),
            WorkflowStatus::Completed => {
                prop_assert!(all_approved);
                prop_assert!(!any_rejected);
            }
            WorkflowStatus::Active => {
                prop_assert!(!any_rejected);
                prop_assert!(!all_approved);
            }
        }
    }

    /// Status counts partition the chain: pending + approved + rejected
    /// always equals the number of steps.
    #[test]
    fn prop_status_counts_partition(chain in arb_chain()) {
        let pending = ChainService::remaining_pending(&chain);
        let approved = chain.iter().filter(|s| **s == ApprovalStatus::Approved).count();
        let rejected = chain.iter().filter(|s| **s == ApprovalStatus::Rejected).count();

        prop_assert_eq!(pending + approved + rejected, chain.len());
    }

    /// Approving one more pending step never moves an Active chain to
    /// Rejected, and zero remaining pending on a rejection-free chain means
    /// Completed.
    #[test]
    fn prop_zero_pending_without_rejection_completes(chain in arb_chain()) {
        let no_rejection = !chain.iter().any(|s| *s == ApprovalStatus::Rejected);
        let none_pending = ChainService::remaining_pending(&chain) == 0;

        if no_rejection && none_pending {
            prop_assert_eq!(ChainService::evaluate_chain(&chain), WorkflowStatus::Completed);
        }
    }

    /// Any decision on a non-pending approval fails with AlreadyProcessed.
    #[test]
    fn prop_terminal_approval_guards(status in arb_status()) {
        let result = ChainService::ensure_pending(Uuid::new_v4(), status);
        if status == ApprovalStatus::Pending {
            prop_assert!(result.is_ok());
        } else {
            let already_processed = matches!(result, Err(WorkflowError::AlreadyProcessed { .. }));
            prop_assert!(already_processed);
        }
    }
}
