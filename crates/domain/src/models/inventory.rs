//! Warehouse stock levels.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Quantity of one item held by one warehouse, with the item's catalog details.
#[derive(Debug, Clone, Serialize)]
pub struct InventoryEntry {
    pub warehouse_id: i64,
    pub item_id: i64,
    pub sku: String,
    pub item_name: String,
    pub unit: String,
    pub quantity: i32,
    pub last_updated: DateTime<Utc>,
}

/// Request payload for setting a stock level.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SetStockRequest {
    #[validate(range(min = 0, message = "Quantity must be non-negative"))]
    pub quantity: i32,
}

/// Response for a warehouse's stock listing.
#[derive(Debug, Clone, Serialize)]
pub struct WarehouseInventoryResponse {
    pub warehouse_id: i64,
    pub items: Vec<InventoryEntry>,
    pub total: usize,
}

impl WarehouseInventoryResponse {
    pub fn new(warehouse_id: i64, items: Vec<InventoryEntry>) -> Self {
        let total = items.len();
        Self {
            warehouse_id,
            items,
            total,
        }
    }
}
