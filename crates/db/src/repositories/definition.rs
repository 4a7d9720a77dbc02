//! Workflow definition repository.
//!
//! Definitions are per-tenant chain templates keyed by (module, action).
//! At most one active definition exists per key; submitting a request
//! snapshots the active definition's steps into a workflow instance.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use tracing::info;
use uuid::Uuid;

use atrium_core::workflow::{ActionKey, ChainService, WorkflowError};

use crate::entities::{workflow_definition_steps, workflow_definitions};

use super::approval::{core_action_to_db, core_module_to_db};

/// A chain definition together with its ordered steps.
#[derive(Debug, Clone)]
pub struct DefinitionWithSteps {
    /// The definition row.
    pub definition: workflow_definitions::Model,
    /// Steps ordered by `step_order` ascending.
    pub steps: Vec<workflow_definition_steps::Model>,
}

/// Input for one step of a new definition.
#[derive(Debug, Clone)]
pub struct NewDefinitionStep {
    /// Position in the chain, starting at 1.
    pub step_order: i32,
    /// Permission string a decider's role must satisfy.
    pub required_permission: String,
}

/// Repository for workflow chain definitions.
#[derive(Debug, Clone)]
pub struct DefinitionRepository {
    db: DatabaseConnection,
}

impl DefinitionRepository {
    /// Creates a new definition repository.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds the active definition for a (tenant, module, action) triple.
    ///
    /// Returns `None` when the action is unguarded for this tenant.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_active(
        &self,
        tenant_id: Uuid,
        key: ActionKey,
    ) -> Result<Option<DefinitionWithSteps>, WorkflowError> {
        let definition = workflow_definitions::Entity::find()
            .filter(workflow_definitions::Column::TenantId.eq(tenant_id))
            .filter(workflow_definitions::Column::Module.eq(core_module_to_db(key.module)))
            .filter(workflow_definitions::Column::Action.eq(core_action_to_db(key.action)))
            .filter(workflow_definitions::Column::IsActive.eq(true))
            .one(&self.db)
            .await
            .map_err(db_err)?;

        let Some(definition) = definition else {
            return Ok(None);
        };

        let steps = self.load_steps(definition.id).await?;
        Ok(Some(DefinitionWithSteps { definition, steps }))
    }

    /// Creates a new active definition with the given steps, deactivating
    /// any previous definition for the same key.
    ///
    /// # Errors
    ///
    /// Returns an error if the step orders are not contiguous from 1 or if
    /// a database operation fails.
    pub async fn create(
        &self,
        tenant_id: Uuid,
        key: ActionKey,
        steps: &[NewDefinitionStep],
    ) -> Result<DefinitionWithSteps, WorkflowError> {
        let orders: Vec<i32> = steps.iter().map(|s| s.step_order).collect();
        ChainService::validate_step_orders(&orders)?;

        let now = Utc::now().into();
        let definition_id = Uuid::new_v4();

        let txn = self.db.begin().await.map_err(db_err)?;

        // Retire the previous template; its already-created workflow
        // instances are unaffected since they carry their own snapshot.
        workflow_definitions::Entity::update_many()
            .set(workflow_definitions::ActiveModel {
                is_active: Set(false),
                updated_at: Set(now),
                ..Default::default()
            })
            .filter(workflow_definitions::Column::TenantId.eq(tenant_id))
            .filter(workflow_definitions::Column::Module.eq(core_module_to_db(key.module)))
            .filter(workflow_definitions::Column::Action.eq(core_action_to_db(key.action)))
            .filter(workflow_definitions::Column::IsActive.eq(true))
            .exec(&txn)
            .await
            .map_err(db_err)?;

        let definition = workflow_definitions::ActiveModel {
            id: Set(definition_id),
            tenant_id: Set(tenant_id),
            module: Set(core_module_to_db(key.module)),
            action: Set(core_action_to_db(key.action)),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&txn)
        .await
        .map_err(db_err)?;

        let mut created_steps = Vec::with_capacity(steps.len());
        for step in steps {
            let model = workflow_definition_steps::ActiveModel {
                id: Set(Uuid::new_v4()),
                definition_id: Set(definition_id),
                step_order: Set(step.step_order),
                required_permission: Set(step.required_permission.clone()),
                created_at: Set(now),
            }
            .insert(&txn)
            .await
            .map_err(db_err)?;
            created_steps.push(model);
        }

        txn.commit().await.map_err(db_err)?;

        info!(
            tenant_id = %tenant_id,
            definition_id = %definition_id,
            key = %key,
            steps = created_steps.len(),
            "Workflow definition created"
        );

        Ok(DefinitionWithSteps {
            definition,
            steps: created_steps,
        })
    }

    /// Deactivates a definition, making its (module, action) unguarded.
    ///
    /// # Errors
    ///
    /// Returns an error if the definition is not found in the tenant.
    pub async fn deactivate(
        &self,
        tenant_id: Uuid,
        definition_id: Uuid,
    ) -> Result<(), WorkflowError> {
        let updated = workflow_definitions::Entity::update_many()
            .set(workflow_definitions::ActiveModel {
                is_active: Set(false),
                updated_at: Set(Utc::now().into()),
                ..Default::default()
            })
            .filter(workflow_definitions::Column::Id.eq(definition_id))
            .filter(workflow_definitions::Column::TenantId.eq(tenant_id))
            .filter(workflow_definitions::Column::IsActive.eq(true))
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        if updated.rows_affected == 0 {
            return Err(WorkflowError::DefinitionNotFound(definition_id));
        }

        info!(
            tenant_id = %tenant_id,
            definition_id = %definition_id,
            "Workflow definition deactivated"
        );
        Ok(())
    }

    /// Lists all definitions for a tenant with their steps, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self, tenant_id: Uuid) -> Result<Vec<DefinitionWithSteps>, WorkflowError> {
        let definitions = workflow_definitions::Entity::find()
            .filter(workflow_definitions::Column::TenantId.eq(tenant_id))
            .order_by_desc(workflow_definitions::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        let mut result = Vec::with_capacity(definitions.len());
        for definition in definitions {
            let steps = self.load_steps(definition.id).await?;
            result.push(DefinitionWithSteps { definition, steps });
        }
        Ok(result)
    }

    async fn load_steps(
        &self,
        definition_id: Uuid,
    ) -> Result<Vec<workflow_definition_steps::Model>, WorkflowError> {
        workflow_definition_steps::Entity::find()
            .filter(workflow_definition_steps::Column::DefinitionId.eq(definition_id))
            .order_by_asc(workflow_definition_steps::Column::StepOrder)
            .all(&self.db)
            .await
            .map_err(db_err)
    }
}

fn db_err(e: sea_orm::DbErr) -> WorkflowError {
    WorkflowError::Database(e.to_string())
}
