//! Inventory movement repository for database operations.

use serde_json::{Map, Value};
use sqlx::PgPool;

use domain::models::MovementType;

use crate::entities::MovementEntity;
use crate::metrics::QueryTimer;

/// Default and maximum number of movements returned by a listing.
pub const DEFAULT_MOVEMENT_LIMIT: i64 = 100;
pub const MAX_MOVEMENT_LIMIT: i64 = 1000;

/// Fields for a new movement row.
#[derive(Debug, Clone)]
pub struct NewMovement<'a> {
    pub item_id: i64,
    pub quantity: i32,
    pub from_warehouse_id: Option<i64>,
    pub to_warehouse_id: Option<i64>,
    pub movement_type: MovementType,
    pub performed_by: Option<i64>,
    pub note: Option<&'a str>,
    pub data: Option<Map<String, Value>>,
}

/// Repository for the movement audit log.
#[derive(Clone)]
pub struct MovementRepository {
    pool: PgPool,
}

impl MovementRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Append a movement record. Stock levels are not touched.
    pub async fn record(&self, new: NewMovement<'_>) -> Result<MovementEntity, sqlx::Error> {
        let timer = QueryTimer::new("record_movement");
        let result = sqlx::query_as::<_, MovementEntity>(
            r#"
            INSERT INTO inventory_movements (item_id, quantity, from_warehouse_id, to_warehouse_id,
                                             movement_type, performed_by, note, data)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(new.item_id)
        .bind(new.quantity)
        .bind(new.from_warehouse_id)
        .bind(new.to_warehouse_id)
        .bind(new.movement_type.as_str())
        .bind(new.performed_by)
        .bind(new.note)
        .bind(new.data.map(Value::Object))
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List movements newest first, optionally only those touching a warehouse.
    pub async fn list(
        &self,
        warehouse_id: Option<i64>,
        limit: i64,
    ) -> Result<Vec<MovementEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_movements");
        let result = sqlx::query_as::<_, MovementEntity>(
            r#"
            SELECT * FROM inventory_movements
            WHERE $1::BIGINT IS NULL OR from_warehouse_id = $1 OR to_warehouse_id = $1
            ORDER BY timestamp DESC, id DESC
            LIMIT $2
            "#,
        )
        .bind(warehouse_id)
        .bind(limit.clamp(1, MAX_MOVEMENT_LIMIT))
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }
}
