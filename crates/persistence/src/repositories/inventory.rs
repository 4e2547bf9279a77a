//! Warehouse inventory repository for database operations.

use sqlx::PgPool;

use crate::entities::InventoryEntity;
use crate::metrics::QueryTimer;

/// Repository for warehouse stock levels.
#[derive(Clone)]
pub struct InventoryRepository {
    pool: PgPool,
}

impl InventoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List stock for a warehouse, ordered by item id.
    pub async fn list_for_warehouse(
        &self,
        warehouse_id: i64,
    ) -> Result<Vec<InventoryEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_warehouse_inventory");
        let result = sqlx::query_as::<_, InventoryEntity>(
            r#"
            SELECT wi.warehouse_id, wi.item_id, i.sku, i.name AS item_name, i.unit,
                   wi.quantity, wi.last_updated
            FROM warehouse_inventory wi
            JOIN items i ON i.id = wi.item_id
            WHERE wi.warehouse_id = $1
            ORDER BY wi.item_id
            "#,
        )
        .bind(warehouse_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Set the stock of an item in a warehouse, creating the link if needed.
    pub async fn set_quantity(
        &self,
        warehouse_id: i64,
        item_id: i64,
        quantity: i32,
    ) -> Result<InventoryEntity, sqlx::Error> {
        let timer = QueryTimer::new("set_inventory_quantity");
        let result = sqlx::query_as::<_, InventoryEntity>(
            r#"
            WITH upserted AS (
                INSERT INTO warehouse_inventory (warehouse_id, item_id, quantity, last_updated)
                VALUES ($1, $2, $3, NOW())
                ON CONFLICT (warehouse_id, item_id)
                DO UPDATE SET quantity = EXCLUDED.quantity, last_updated = NOW()
                RETURNING warehouse_id, item_id, quantity, last_updated
            )
            SELECT u.warehouse_id, u.item_id, i.sku, i.name AS item_name, i.unit,
                   u.quantity, u.last_updated
            FROM upserted u
            JOIN items i ON i.id = u.item_id
            "#,
        )
        .bind(warehouse_id)
        .bind(item_id)
        .bind(quantity)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Insert a stock link unless one already exists. Returns whether a row
    /// was inserted.
    pub async fn insert_if_absent(
        &self,
        warehouse_id: i64,
        item_id: i64,
        quantity: i32,
    ) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("insert_inventory_if_absent");
        let result = sqlx::query(
            r#"
            INSERT INTO warehouse_inventory (warehouse_id, item_id, quantity)
            VALUES ($1, $2, $3)
            ON CONFLICT (warehouse_id, item_id) DO NOTHING
            "#,
        )
        .bind(warehouse_id)
        .bind(item_id)
        .bind(quantity)
        .execute(&self.pool)
        .await;
        timer.record();
        Ok(result?.rows_affected() == 1)
    }
}
