//! Inventory item executors: create, update, delete.
//!
//! The create handler surfaces an existing SKU as `DuplicateKey` so the
//! decision processor can absorb re-execution as idempotent success.

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter, Set,
};
use serde::Deserialize;
use serde_json::{Value, json};
use uuid::Uuid;

use atrium_core::workflow::{ActionHandler, ExecutionContext, ExecutorError};

use crate::entities::inventory_items;

#[derive(Debug, Deserialize)]
struct CreateItemPayload {
    sku: String,
    name: String,
    price: Decimal,
    quantity: u32,
}

#[derive(Debug, Deserialize)]
struct UpdateItemPayload {
    sku: String,
    name: Option<String>,
    price: Option<Decimal>,
    quantity: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct DeleteItemPayload {
    sku: String,
}

fn parse_payload<T: for<'de> Deserialize<'de>>(payload: &Value) -> Result<T, ExecutorError> {
    serde_json::from_value(payload.clone()).map_err(|e| ExecutorError::Validation(e.to_string()))
}

fn db_err(e: sea_orm::DbErr) -> ExecutorError {
    ExecutorError::Internal(e.to_string())
}

async fn find_by_sku(
    db: &DatabaseConnection,
    tenant_id: Uuid,
    sku: &str,
) -> Result<Option<inventory_items::Model>, ExecutorError> {
    inventory_items::Entity::find()
        .filter(inventory_items::Column::TenantId.eq(tenant_id))
        .filter(inventory_items::Column::Sku.eq(sku))
        .one(db)
        .await
        .map_err(db_err)
}

fn item_json(item: &inventory_items::Model) -> Value {
    json!({
        "id": item.id,
        "sku": item.sku,
        "name": item.name,
        "price": item.price,
        "quantity": item.quantity,
    })
}

/// Creates an inventory item. An existing SKU is a `DuplicateKey` error.
#[derive(Debug, Clone)]
pub struct InventoryCreateHandler {
    db: DatabaseConnection,
}

impl InventoryCreateHandler {
    /// Creates the handler.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ActionHandler for InventoryCreateHandler {
    fn validate(&self, payload: &Value) -> Result<(), ExecutorError> {
        let parsed: CreateItemPayload = parse_payload(payload)?;
        if parsed.sku.trim().is_empty() {
            return Err(ExecutorError::Validation("sku must not be empty".to_string()));
        }
        if parsed.name.trim().is_empty() {
            return Err(ExecutorError::Validation(
                "name must not be empty".to_string(),
            ));
        }
        if parsed.price < Decimal::ZERO {
            return Err(ExecutorError::Validation(
                "price must not be negative".to_string(),
            ));
        }
        Ok(())
    }

    async fn execute(
        &self,
        ctx: &ExecutionContext,
        payload: &Value,
    ) -> Result<Value, ExecutorError> {
        let parsed: CreateItemPayload = parse_payload(payload)?;

        if find_by_sku(&self.db, ctx.tenant_id, &parsed.sku)
            .await?
            .is_some()
        {
            return Err(ExecutorError::DuplicateKey(format!(
                "Item with SKU '{}' already exists",
                parsed.sku
            )));
        }

        let now = Utc::now().into();
        let quantity = i32::try_from(parsed.quantity)
            .map_err(|_| ExecutorError::Validation("quantity out of range".to_string()))?;
        let item = inventory_items::ActiveModel {
            id: Set(Uuid::new_v4()),
            tenant_id: Set(ctx.tenant_id),
            sku: Set(parsed.sku),
            name: Set(parsed.name),
            price: Set(parsed.price),
            quantity: Set(quantity),
            created_by: Set(ctx.actor_id),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await
        .map_err(|e| {
            // The unique (tenant_id, sku) index can still fire between the
            // pre-check and the insert.
            let message = e.to_string();
            if message.contains("duplicate key") {
                ExecutorError::DuplicateKey(format!("Item with SKU conflict: {message}"))
            } else {
                ExecutorError::Internal(message)
            }
        })?;

        Ok(item_json(&item))
    }
}

/// Updates an existing inventory item, located by SKU.
#[derive(Debug, Clone)]
pub struct InventoryUpdateHandler {
    db: DatabaseConnection,
}

impl InventoryUpdateHandler {
    /// Creates the handler.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ActionHandler for InventoryUpdateHandler {
    fn validate(&self, payload: &Value) -> Result<(), ExecutorError> {
        let parsed: UpdateItemPayload = parse_payload(payload)?;
        if parsed.sku.trim().is_empty() {
            return Err(ExecutorError::Validation("sku must not be empty".to_string()));
        }
        if parsed.name.is_none() && parsed.price.is_none() && parsed.quantity.is_none() {
            return Err(ExecutorError::Validation(
                "at least one of name, price, quantity is required".to_string(),
            ));
        }
        Ok(())
    }

    async fn execute(
        &self,
        ctx: &ExecutionContext,
        payload: &Value,
    ) -> Result<Value, ExecutorError> {
        let parsed: UpdateItemPayload = parse_payload(payload)?;

        let item = find_by_sku(&self.db, ctx.tenant_id, &parsed.sku)
            .await?
            .ok_or_else(|| {
                ExecutorError::NotFound(format!("Item with SKU '{}' not found", parsed.sku))
            })?;

        let mut active: inventory_items::ActiveModel = item.into();
        if let Some(name) = parsed.name {
            active.name = Set(name);
        }
        if let Some(price) = parsed.price {
            active.price = Set(price);
        }
        if let Some(quantity) = parsed.quantity {
            let quantity = i32::try_from(quantity)
                .map_err(|_| ExecutorError::Validation("quantity out of range".to_string()))?;
            active.quantity = Set(quantity);
        }
        active.updated_at = Set(Utc::now().into());

        let item = active.update(&self.db).await.map_err(db_err)?;
        Ok(item_json(&item))
    }
}

/// Deletes an inventory item, located by SKU.
#[derive(Debug, Clone)]
pub struct InventoryDeleteHandler {
    db: DatabaseConnection,
}

impl InventoryDeleteHandler {
    /// Creates the handler.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ActionHandler for InventoryDeleteHandler {
    fn validate(&self, payload: &Value) -> Result<(), ExecutorError> {
        let parsed: DeleteItemPayload = parse_payload(payload)?;
        if parsed.sku.trim().is_empty() {
            return Err(ExecutorError::Validation("sku must not be empty".to_string()));
        }
        Ok(())
    }

    async fn execute(
        &self,
        ctx: &ExecutionContext,
        payload: &Value,
    ) -> Result<Value, ExecutorError> {
        let parsed: DeleteItemPayload = parse_payload(payload)?;

        let item = find_by_sku(&self.db, ctx.tenant_id, &parsed.sku)
            .await?
            .ok_or_else(|| {
                ExecutorError::NotFound(format!("Item with SKU '{}' not found", parsed.sku))
            })?;

        let snapshot = item_json(&item);
        item.delete(&self.db).await.map_err(db_err)?;
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use sea_orm::DatabaseConnection;
    use serde_json::json;

    fn create_handler() -> InventoryCreateHandler {
        InventoryCreateHandler::new(DatabaseConnection::default())
    }

    #[test]
    fn test_create_payload_validation() {
        let handler = create_handler();
        assert!(
            handler
                .validate(&json!({
                    "sku": "W-1",
                    "name": "Widget",
                    "price": "10.00",
                    "quantity": 5
                }))
                .is_ok()
        );
    }

    #[test]
    fn test_create_rejects_missing_fields() {
        let handler = create_handler();
        let result = handler.validate(&json!({"name": "Widget"}));
        assert!(matches!(result, Err(ExecutorError::Validation(_))));
    }

    #[test]
    fn test_create_rejects_blank_sku() {
        let handler = create_handler();
        let result = handler.validate(&json!({
            "sku": "  ",
            "name": "Widget",
            "price": "10.00",
            "quantity": 5
        }));
        assert!(matches!(result, Err(ExecutorError::Validation(_))));
    }

    #[test]
    fn test_update_requires_a_change() {
        let handler = InventoryUpdateHandler::new(DatabaseConnection::default());
        let result = handler.validate(&json!({"sku": "W-1"}));
        assert!(matches!(result, Err(ExecutorError::Validation(_))));
        assert!(
            handler
                .validate(&json!({"sku": "W-1", "quantity": 9}))
                .is_ok()
        );
    }

    #[test]
    fn test_decimal_price_parses() {
        let parsed: CreateItemPayload = parse_payload(&json!({
            "sku": "W-1",
            "name": "Widget",
            "price": "19.99",
            "quantity": 2
        }))
        .unwrap();
        assert_eq!(parsed.price, dec!(19.99));
    }
}
