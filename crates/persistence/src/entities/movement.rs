//! Inventory movement entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use domain::models::{Movement, MovementType};

/// Database row mapping for the inventory_movements table.
#[derive(Debug, Clone, FromRow)]
pub struct MovementEntity {
    pub id: i64,
    pub item_id: i64,
    pub quantity: i32,
    pub from_warehouse_id: Option<i64>,
    pub to_warehouse_id: Option<i64>,
    pub movement_type: String,
    pub performed_by: Option<i64>,
    pub note: Option<String>,
    pub data: Option<serde_json::Value>,
    pub timestamp: DateTime<Utc>,
}

impl From<MovementEntity> for Movement {
    fn from(entity: MovementEntity) -> Self {
        Self {
            id: entity.id,
            item_id: entity.item_id,
            quantity: entity.quantity,
            from_warehouse_id: entity.from_warehouse_id,
            to_warehouse_id: entity.to_warehouse_id,
            movement_type: MovementType::from_str(&entity.movement_type)
                .unwrap_or(MovementType::Transfer), // CHECK constraint limits the column
            performed_by: entity.performed_by,
            note: entity.note,
            data: entity.data,
            timestamp: entity.timestamp,
        }
    }
}
