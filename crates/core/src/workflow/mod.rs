//! Multi-step approval workflow engine for Atrium.
//!
//! A gated business action is submitted as a workflow request; one approval
//! record per configured step must clear before the deferred action runs,
//! exactly once. Any single rejection vetoes the whole workflow.
//!
//! # Modules
//!
//! - `types` - Workflow domain types (statuses, module/action keys, outcomes)
//! - `error` - Workflow-specific error types
//! - `service` - Stateless decision guards and chain evaluation
//! - `policy` - Permission-to-role authorization table
//! - `executor` - Action handler contract and dispatch registry
//! - `notify` - Best-effort notification contract

pub mod error;
pub mod executor;
pub mod notify;
pub mod policy;
pub mod service;
pub mod types;

#[cfg(test)]
mod service_props;

pub use error::WorkflowError;
pub use executor::{ActionHandler, ActionRegistry, ExecutionContext, ExecutorError};
pub use notify::{Notifier, NotifyError, NullNotifier};
pub use policy::{AuthorizationPolicy, UserRole};
pub use service::ChainService;
pub use types::{
    ActionKey, ApprovalStatus, DecisionOutcome, RequestStatus, WorkflowAction, WorkflowModule,
    WorkflowStatus,
};
