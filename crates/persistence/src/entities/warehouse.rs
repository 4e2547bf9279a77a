//! Warehouse entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use domain::models::{GeometryValue, Warehouse};

/// Database row mapping for the warehouses table.
///
/// `location` holds `ST_AsGeoJSON(location)` text, or `NULL` when the store
/// has no spatial support.
#[derive(Debug, Clone, FromRow)]
pub struct WarehouseEntity {
    pub id: i64,
    pub name: String,
    pub location: Option<String>,
    pub address: Option<String>,
    pub capacity: Option<i32>,
    pub status: String,
    pub data: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<WarehouseEntity> for Warehouse {
    fn from(entity: WarehouseEntity) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            location: entity.location.map(GeometryValue::Text),
            address: entity.address,
            capacity: entity.capacity,
            status: entity.status,
            data: entity.data,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
