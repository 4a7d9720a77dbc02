//! `SeaORM` Entity for the workflow_requests table.
//!
//! The deferred business mutation awaiting full approval. `workflow_id`
//! is a mandatory UNIQUE foreign key; the request is always located by a
//! direct join, never by heuristic lookup.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::{RequestStatus, WorkflowAction, WorkflowModule};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "workflow_requests")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub tenant_id: Uuid,
    #[sea_orm(unique)]
    pub workflow_id: Uuid,
    pub module: WorkflowModule,
    pub action: WorkflowAction,
    pub status: RequestStatus,
    pub created_by: Uuid,
    /// The exact input the action executor needs.
    pub payload: Json,
    pub warning: Option<String>,
    pub failure_reason: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::workflows::Entity",
        from = "Column::WorkflowId",
        to = "super::workflows::Column::Id"
    )]
    Workflows,
}

impl Related<super::workflows::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Workflows.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
