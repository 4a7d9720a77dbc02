//! Action executor contract and dispatch registry.
//!
//! Each gated `(module, action)` pair maps to one handler implementing
//! [`ActionHandler`]. Handlers perform the real downstream mutation once a
//! workflow completes; they never touch workflow state themselves. New action
//! types register into the [`ActionRegistry`] without modifying the decision
//! processor.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

use crate::workflow::error::WorkflowError;
use crate::workflow::types::ActionKey;

/// Machine-readable failure kinds an action handler may report.
#[derive(Debug, Clone, Error)]
pub enum ExecutorError {
    /// A unique key (e.g. SKU) already exists. On CREATE the processor
    /// treats this as idempotent success.
    #[error("{0}")]
    DuplicateKey(String),

    /// The target entity does not exist.
    #[error("{0}")]
    NotFound(String),

    /// The payload is missing or malformed for this handler.
    #[error("{0}")]
    Validation(String),

    /// Any other downstream failure.
    #[error("{0}")]
    Internal(String),
}

impl ExecutorError {
    /// Returns the machine-readable kind tag.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::DuplicateKey(_) => "DUPLICATE_KEY",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION",
            Self::Internal(_) => "INTERNAL",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::DuplicateKey(_) => 409,
            Self::NotFound(_) => 404,
            Self::Validation(_) => 400,
            Self::Internal(_) => 500,
        }
    }

    /// Returns true for the benign-duplicate kind.
    #[must_use]
    pub const fn is_duplicate(&self) -> bool {
        matches!(self, Self::DuplicateKey(_))
    }
}

/// Tenant and actor context passed to every handler invocation.
#[derive(Debug, Clone, Copy)]
pub struct ExecutionContext {
    /// Tenant scoping every read and write the handler performs.
    pub tenant_id: Uuid,
    /// The user on whose behalf the action runs.
    pub actor_id: Uuid,
}

impl ExecutionContext {
    /// Creates a new execution context.
    #[must_use]
    pub const fn new(tenant_id: Uuid, actor_id: Uuid) -> Self {
        Self {
            tenant_id,
            actor_id,
        }
    }
}

/// Contract every downstream action executor implements.
///
/// `validate` runs at submission time so malformed payloads are rejected
/// before any workflow state is persisted. `execute` runs exactly once when
/// the workflow completes. `on_reject` lets handlers whose target entity has
/// its own lifecycle (leave requests, expense claims) transition it and
/// notify the owner; the default is a no-op.
#[async_trait]
pub trait ActionHandler: Send + Sync {
    /// Checks that the payload carries everything `execute` will need.
    fn validate(&self, payload: &Value) -> Result<(), ExecutorError>;

    /// Performs the downstream mutation and returns the resulting entity.
    async fn execute(&self, ctx: &ExecutionContext, payload: &Value)
    -> Result<Value, ExecutorError>;

    /// Hook invoked when the workflow is rejected. Best-effort: the caller
    /// logs failures and never lets them affect the rejection outcome.
    async fn on_reject(
        &self,
        _ctx: &ExecutionContext,
        _payload: &Value,
        _reason: &str,
    ) -> Result<(), ExecutorError> {
        Ok(())
    }
}

/// Strategy registry mapping `(module, action)` keys to handlers.
#[derive(Default)]
pub struct ActionRegistry {
    handlers: HashMap<ActionKey, Arc<dyn ActionHandler>>,
}

impl ActionRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a handler for a dispatch key, replacing any previous one.
    pub fn register(&mut self, key: ActionKey, handler: Arc<dyn ActionHandler>) {
        self.handlers.insert(key, handler);
    }

    /// Resolves the handler for a dispatch key.
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError::UnsupportedAction` if no handler is registered.
    pub fn handler(&self, key: ActionKey) -> Result<Arc<dyn ActionHandler>, WorkflowError> {
        self.handlers
            .get(&key)
            .cloned()
            .ok_or_else(|| WorkflowError::UnsupportedAction {
                key: key.to_string(),
            })
    }

    /// Returns true if a handler is registered for the key.
    #[must_use]
    pub fn supports(&self, key: ActionKey) -> bool {
        self.handlers.contains_key(&key)
    }

    /// Number of registered handlers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Returns true when no handlers are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl std::fmt::Debug for ActionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionRegistry")
            .field("keys", &self.handlers.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::types::{WorkflowAction, WorkflowModule};
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingHandler {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl ActionHandler for CountingHandler {
        fn validate(&self, payload: &Value) -> Result<(), ExecutorError> {
            if payload.get("name").is_some() {
                Ok(())
            } else {
                Err(ExecutorError::Validation("name is required".to_string()))
            }
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

    fn inventory_create() -> ActionKey {
        ActionKey::new(WorkflowModule::Inventory, WorkflowAction::Create)
    }

    #[test]
    fn test_unregistered_key_fails() {
        let registry = ActionRegistry::new();
        let result = registry.handler(inventory_create());
        assert!(matches!(
            result,
            Err(WorkflowError::UnsupportedAction { .. })
        ));
    }

    #[tokio::test]
    async fn test_registered_handler_dispatches() {
        let mut registry = ActionRegistry::new();
        let handler = Arc::new(CountingHandler {
            calls: AtomicUsize::new(0),
        });
        registry.register(inventory_create(), handler.clone());

        assert!(registry.supports(inventory_create()));

        let resolved = registry.handler(inventory_create()).unwrap();
        let ctx = ExecutionContext::new(Uuid::new_v4(), Uuid::new_v4());
        let result = resolved
            .execute(&ctx, &json!({"name": "Widget"}))
            .await
            .unwrap();

        assert_eq!(result["name"], "Widget");
        assert_eq!(handler.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_registry_len_tracks_registrations() {
        let mut registry = ActionRegistry::new();
        assert!(registry.is_empty());
        registry.register(
            inventory_create(),
            Arc::new(CountingHandler {
                calls: AtomicUsize::new(0),
            }),
        );
        assert_eq!(registry.len(), 1);
        assert!(!registry.is_empty());
    }

    #[test]
    fn test_handler_validation() {
        let handler = CountingHandler {
            calls: AtomicUsize::new(0),
        };
        assert!(handler.validate(&json!({"name": "Widget"})).is_ok());
        assert!(matches!(
            handler.validate(&json!({})),
            Err(ExecutorError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_default_on_reject_is_noop() {
        let handler = CountingHandler {
            calls: AtomicUsize::new(0),
        };
        let ctx = ExecutionContext::new(Uuid::new_v4(), Uuid::new_v4());
        handler
            .on_reject(&ctx, &json!({}), "insufficient balance")
            .await
            .unwrap();
        assert_eq!(handler.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_executor_error_kinds() {
        assert_eq!(
            ExecutorError::DuplicateKey(String::new()).kind(),
            "DUPLICATE_KEY"
        );
        assert_eq!(ExecutorError::NotFound(String::new()).kind(), "NOT_FOUND");
        assert_eq!(
            ExecutorError::Validation(String::new()).kind(),
            "VALIDATION"
        );
        assert_eq!(ExecutorError::Internal(String::new()).kind(), "INTERNAL");
        assert!(ExecutorError::DuplicateKey(String::new()).is_duplicate());
        assert!(!ExecutorError::NotFound(String::new()).is_duplicate());
    }
}
