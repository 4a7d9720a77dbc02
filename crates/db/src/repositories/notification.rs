//! Notification repository.
//!
//! Persists per-user notifications and implements the core [`Notifier`]
//! trait so the decision processor can emit them without knowing about the
//! database. Broadcast events are emitted as structured log records.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use atrium_core::workflow::{Notifier, NotifyError, WorkflowError};
use atrium_shared::types::PageRequest;

use crate::entities::notifications;

/// Repository for user notifications.
#[derive(Debug, Clone)]
pub struct NotificationRepository {
    db: DatabaseConnection,
}

impl NotificationRepository {
    /// Creates a new notification repository.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists a user's notifications, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_for_user(
        &self,
        tenant_id: Uuid,
        employee_id: Uuid,
        page: &PageRequest,
    ) -> Result<(Vec<notifications::Model>, u64), WorkflowError> {
        let query = notifications::Entity::find()
            .filter(notifications::Column::TenantId.eq(tenant_id))
            .filter(notifications::Column::EmployeeId.eq(employee_id));

        let total = query
            .clone()
            .count(&self.db)
            .await
            .map_err(|e| WorkflowError::Database(e.to_string()))?;

        let rows = query
            .order_by_desc(notifications::Column::CreatedAt)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await
            .map_err(|e| WorkflowError::Database(e.to_string()))?;

        Ok((rows, total))
    }

    /// Marks a notification as read.
    ///
    /// # Errors
    ///
    /// Returns an error if the notification is not found for the user.
    pub async fn mark_read(
        &self,
        tenant_id: Uuid,
        employee_id: Uuid,
        notification_id: Uuid,
    ) -> Result<(), WorkflowError> {
        let updated = notifications::Entity::update_many()
            .set(notifications::ActiveModel {
                is_read: Set(true),
                ..Default::default()
            })
            .filter(notifications::Column::Id.eq(notification_id))
            .filter(notifications::Column::TenantId.eq(tenant_id))
            .filter(notifications::Column::EmployeeId.eq(employee_id))
            .exec(&self.db)
            .await
            .map_err(|e| WorkflowError::Database(e.to_string()))?;

        if updated.rows_affected == 0 {
            return Err(WorkflowError::Database(format!(
                "Notification {notification_id} not found"
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl Notifier for NotificationRepository {
    async fn notify(
        &self,
        tenant_id: Uuid,
        employee_id: Uuid,
        kind: &str,
        title: &str,
        message: &str,
    ) -> Result<(), NotifyError> {
        notifications::ActiveModel {
            id: Set(Uuid::new_v4()),
            tenant_id: Set(tenant_id),
            employee_id: Set(employee_id),
            notification_type: Set(kind.to_string()),
            title: Set(title.to_string()),
            message: Set(message.to_string()),
            is_read: Set(false),
            created_at: Set(Utc::now().into()),
        }
        .insert(&self.db)
        .await
        .map_err(|e| NotifyError(e.to_string()))?;
        Ok(())
    }

    async fn broadcast(
        &self,
        event: &str,
        tenant_id: Uuid,
        payload: &Value,
    ) -> Result<(), NotifyError> {
        // Tenant-scoped fan-out channel (websocket/SSE) is out of scope;
        // the event stream surfaces through structured logs instead.
        info!(event, tenant_id = %tenant_id, payload = %payload, "Broadcast event");
        Ok(())
    }
}
