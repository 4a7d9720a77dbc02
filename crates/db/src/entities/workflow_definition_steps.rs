//! `SeaORM` Entity for the workflow_definition_steps table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "workflow_definition_steps")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub definition_id: Uuid,
    pub step_order: i32,
    pub required_permission: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::workflow_definitions::Entity",
        from = "Column::DefinitionId",
        to = "super::workflow_definitions::Column::Id"
    )]
    WorkflowDefinitions,
}

impl Related<super::workflow_definitions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::WorkflowDefinitions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
