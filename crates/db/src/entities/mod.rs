//! `SeaORM` entity definitions.

pub mod approvals;
pub mod expense_claims;
pub mod inventory_items;
pub mod leave_requests;
pub mod notifications;
pub mod sea_orm_active_enums;
pub mod workflow_definition_steps;
pub mod workflow_definitions;
pub mod workflow_requests;
pub mod workflow_steps;
pub mod workflows;
