//! `SeaORM` Entity for the workflow_definitions table.
//!
//! A definition is the approval chain template for one
//! (tenant, module, action) triple; submissions instantiate it.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::{WorkflowAction, WorkflowModule};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "workflow_definitions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub module: WorkflowModule,
    pub action: WorkflowAction,
    pub is_active: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::workflow_definition_steps::Entity")]
    WorkflowDefinitionSteps,
}

impl Related<super::workflow_definition_steps::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::WorkflowDefinitionSteps.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
