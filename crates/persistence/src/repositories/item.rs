//! Item repository for database operations.

use sqlx::PgPool;

use crate::entities::ItemEntity;
use crate::metrics::QueryTimer;

/// Repository for the item catalog.
#[derive(Clone)]
pub struct ItemRepository {
    pool: PgPool,
}

impl ItemRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new item.
    pub async fn create(
        &self,
        sku: &str,
        name: &str,
        description: Option<&str>,
        unit: &str,
        category: Option<&str>,
    ) -> Result<ItemEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_item");
        let result = sqlx::query_as::<_, ItemEntity>(
            r#"
            INSERT INTO items (sku, name, description, unit, category)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(sku)
        .bind(name)
        .bind(description)
        .bind(unit)
        .bind(category)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List all items ordered by id.
    pub async fn list(&self) -> Result<Vec<ItemEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_items");
        let result = sqlx::query_as::<_, ItemEntity>("SELECT * FROM items ORDER BY id")
            .fetch_all(&self.pool)
            .await;
        timer.record();
        result
    }

    /// Find item by id.
    pub async fn find_by_id(&self, id: i64) -> Result<Option<ItemEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_item_by_id");
        let result = sqlx::query_as::<_, ItemEntity>("SELECT * FROM items WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await;
        timer.record();
        result
    }

    /// Find item by SKU.
    pub async fn find_by_sku(&self, sku: &str) -> Result<Option<ItemEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_item_by_sku");
        let result = sqlx::query_as::<_, ItemEntity>("SELECT * FROM items WHERE sku = $1")
            .bind(sku)
            .fetch_optional(&self.pool)
            .await;
        timer.record();
        result
    }
}
