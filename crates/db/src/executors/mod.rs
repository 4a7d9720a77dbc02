//! Action executor implementations.
//!
//! Each handler implements the core [`ActionHandler`] contract for one
//! gated `(module, action)` pair. `register_default_handlers` wires the
//! full set into a registry at server startup.
//!
//! [`ActionHandler`]: atrium_core::workflow::ActionHandler

mod expense;
mod inventory;
mod leave;

pub use expense::ExpenseClaimHandler;
pub use inventory::{InventoryCreateHandler, InventoryDeleteHandler, InventoryUpdateHandler};
pub use leave::LeaveRequestHandler;

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use atrium_core::workflow::{
    ActionKey, ActionRegistry, Notifier, WorkflowAction, WorkflowModule,
};

/// Registers every built-in action handler.
pub fn register_default_handlers(
    registry: &mut ActionRegistry,
    db: DatabaseConnection,
    notifier: Arc<dyn Notifier>,
) {
    registry.register(
        ActionKey::new(WorkflowModule::Inventory, WorkflowAction::Create),
        Arc::new(InventoryCreateHandler::new(db.clone())),
    );
    registry.register(
        ActionKey::new(WorkflowModule::Inventory, WorkflowAction::Update),
        Arc::new(InventoryUpdateHandler::new(db.clone())),
    );
    registry.register(
        ActionKey::new(WorkflowModule::Inventory, WorkflowAction::Delete),
        Arc::new(InventoryDeleteHandler::new(db.clone())),
    );
    registry.register(
        ActionKey::new(WorkflowModule::Hr, WorkflowAction::LeaveRequest),
        Arc::new(LeaveRequestHandler::new(db.clone(), notifier.clone())),
    );
    registry.register(
        ActionKey::new(WorkflowModule::Finance, WorkflowAction::ExpenseClaim),
        Arc::new(ExpenseClaimHandler::new(db, notifier)),
    );
}
