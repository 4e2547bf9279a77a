//! Warehouse inventory entity (join of warehouse_inventory and items).

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use domain::models::InventoryEntry;

/// A stock row joined with the item's catalog columns.
#[derive(Debug, Clone, FromRow)]
pub struct InventoryEntity {
    pub warehouse_id: i64,
    pub item_id: i64,
    pub sku: String,
    pub item_name: String,
    pub unit: String,
    pub quantity: i32,
    pub last_updated: DateTime<Utc>,
}

impl From<InventoryEntity> for InventoryEntry {
    fn from(entity: InventoryEntity) -> Self {
        Self {
            warehouse_id: entity.warehouse_id,
            item_id: entity.item_id,
            sku: entity.sku,
            item_name: entity.item_name,
            unit: entity.unit,
            quantity: entity.quantity,
            last_updated: entity.last_updated,
        }
    }
}
