//! Warehouse repository for database operations.

use geo::{Geometry, Point};
use serde_json::{Map, Value};
use sqlx::PgPool;

use domain::models::geometry::{geometry_to_geojson, SRID_WGS84};
use domain::services::geometry_resolution::embed_location;

use crate::db::{Database, SpatialSupport};
use crate::entities::WarehouseEntity;
use crate::metrics::QueryTimer;

const NATIVE_COLUMNS: &str = "id, name, ST_AsGeoJSON(location) AS location, address, capacity, \
                              status, data, created_at, updated_at";
const METADATA_COLUMNS: &str = "id, name, NULL::text AS location, address, capacity, \
                                status, data, created_at, updated_at";

/// Fields for a new warehouse row.
#[derive(Debug, Clone)]
pub struct NewWarehouse<'a> {
    pub name: &'a str,
    pub location: Point<f64>,
    pub address: Option<&'a str>,
    pub capacity: Option<i32>,
    pub status: &'a str,
    pub data: Option<Map<String, Value>>,
}

/// Repository for warehouse-related database operations.
#[derive(Clone)]
pub struct WarehouseRepository {
    pool: PgPool,
    spatial: SpatialSupport,
}

impl WarehouseRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            pool: db.pool().clone(),
            spatial: db.spatial(),
        }
    }

    fn columns(&self) -> &'static str {
        match self.spatial {
            SpatialSupport::Native => NATIVE_COLUMNS,
            SpatialSupport::MetadataOnly => METADATA_COLUMNS,
        }
    }

    /// List all warehouses ordered by id.
    pub async fn list(&self) -> Result<Vec<WarehouseEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_warehouses");
        let sql = format!("SELECT {} FROM warehouses ORDER BY id", self.columns());
        let result = sqlx::query_as::<_, WarehouseEntity>(&sql)
            .fetch_all(&self.pool)
            .await;
        timer.record();
        result
    }

    /// Find warehouse by id.
    pub async fn find_by_id(&self, id: i64) -> Result<Option<WarehouseEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_warehouse_by_id");
        let sql = format!("SELECT {} FROM warehouses WHERE id = $1", self.columns());
        let result = sqlx::query_as::<_, WarehouseEntity>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await;
        timer.record();
        result
    }

    /// Find warehouse by its unique name.
    pub async fn find_by_name(&self, name: &str) -> Result<Option<WarehouseEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_warehouse_by_name");
        let sql = format!("SELECT {} FROM warehouses WHERE name = $1", self.columns());
        let result = sqlx::query_as::<_, WarehouseEntity>(&sql)
            .bind(name)
            .fetch_optional(&self.pool)
            .await;
        timer.record();
        result
    }

    /// Check whether a warehouse exists.
    pub async fn exists(&self, id: i64) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("warehouse_exists");
        let result: Result<(bool,), _> =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM warehouses WHERE id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await;
        timer.record();
        result.map(|(exists,)| exists)
    }

    /// Create a new warehouse.
    ///
    /// Without spatial support the point is kept in `data.location`.
    pub async fn create(&self, new: NewWarehouse<'_>) -> Result<WarehouseEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_warehouse");
        let result = match self.spatial {
            SpatialSupport::Native => {
                let geojson = geometry_to_geojson(&Geometry::Point(new.location)).to_string();
                let sql = format!(
                    r#"
                    INSERT INTO warehouses (name, location, address, capacity, status, data)
                    VALUES ($1, ST_SetSRID(ST_GeomFromGeoJSON($2), $7), $3, $4, $5, $6)
                    RETURNING {}
                    "#,
                    NATIVE_COLUMNS
                );
                sqlx::query_as::<_, WarehouseEntity>(&sql)
                    .bind(new.name)
                    .bind(geojson)
                    .bind(new.address)
                    .bind(new.capacity)
                    .bind(new.status)
                    .bind(new.data.map(Value::Object))
                    .bind(SRID_WGS84)
                    .fetch_one(&self.pool)
                    .await
            }
            SpatialSupport::MetadataOnly => {
                let data = embed_location(new.data, new.location);
                let sql = format!(
                    r#"
                    INSERT INTO warehouses (name, address, capacity, status, data)
                    VALUES ($1, $2, $3, $4, $5)
                    RETURNING {}
                    "#,
                    METADATA_COLUMNS
                );
                sqlx::query_as::<_, WarehouseEntity>(&sql)
                    .bind(new.name)
                    .bind(new.address)
                    .bind(new.capacity)
                    .bind(new.status)
                    .bind(Value::Object(data))
                    .fetch_one(&self.pool)
                    .await
            }
        };
        timer.record();
        result
    }
}
