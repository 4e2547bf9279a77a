//! Item entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use domain::models::Item;

/// Database row mapping for the items table.
#[derive(Debug, Clone, FromRow)]
pub struct ItemEntity {
    pub id: i64,
    pub sku: String,
    pub name: String,
    pub description: Option<String>,
    pub unit: String,
    pub category: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<ItemEntity> for Item {
    fn from(entity: ItemEntity) -> Self {
        Self {
            id: entity.id,
            sku: entity.sku,
            name: entity.name,
            description: entity.description,
            unit: entity.unit,
            category: entity.category,
            created_at: entity.created_at,
        }
    }
}
