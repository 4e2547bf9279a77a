//! Safe zone entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use domain::models::{GeometryValue, SafeZone};

/// Database row mapping for the safe_zones table.
#[derive(Debug, Clone, FromRow)]
pub struct SafeZoneEntity {
    pub id: i64,
    pub name: String,
    pub geometry: Option<String>,
    pub capacity: Option<i32>,
    pub capacity_type: String,
    pub status: String,
    pub data: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<SafeZoneEntity> for SafeZone {
    fn from(entity: SafeZoneEntity) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            geometry: entity.geometry.map(GeometryValue::Text),
            capacity: entity.capacity,
            capacity_type: entity.capacity_type,
            status: entity.status,
            data: entity.data,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
