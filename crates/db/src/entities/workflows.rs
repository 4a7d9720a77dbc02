//! `SeaORM` Entity for the workflows table.
//!
//! One row per submitted gated action: a fresh instance of the
//! definition's approval chain. Append-only; rows reach a terminal
//! status and are never deleted.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::{WorkflowAction, WorkflowModule, WorkflowStatus};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "workflows")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub module: WorkflowModule,
    pub action: WorkflowAction,
    pub status: WorkflowStatus,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::workflow_steps::Entity")]
    WorkflowSteps,
    #[sea_orm(has_many = "super::approvals::Entity")]
    Approvals,
    #[sea_orm(has_one = "super::workflow_requests::Entity")]
    WorkflowRequests,
}

impl Related<super::workflow_steps::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::WorkflowSteps.def()
    }
}

impl Related<super::approvals::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Approvals.def()
    }
}

impl Related<super::workflow_requests::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::WorkflowRequests.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
