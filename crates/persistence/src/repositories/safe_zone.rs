//! Safe zone repository for database operations.

use geo::{Geometry, Polygon};
use serde_json::{Map, Value};
use sqlx::PgPool;

use domain::models::geometry::{geometry_to_geojson, Bounds, SRID_WGS84};
use domain::services::geometry_resolution::embed_bounds;

use crate::db::{Database, SpatialSupport};
use crate::entities::SafeZoneEntity;
use crate::metrics::QueryTimer;

const NATIVE_COLUMNS: &str = "id, name, ST_AsGeoJSON(geometry) AS geometry, capacity, \
                              capacity_type, status, data, created_at, updated_at";
const METADATA_COLUMNS: &str = "id, name, NULL::text AS geometry, capacity, \
                                capacity_type, status, data, created_at, updated_at";

/// Fields for a new safe zone row.
#[derive(Debug, Clone)]
pub struct NewSafeZone<'a> {
    pub name: &'a str,
    pub geometry: Polygon<f64>,
    pub capacity: Option<i32>,
    pub capacity_type: &'a str,
    pub status: &'a str,
    pub data: Option<Map<String, Value>>,
}

/// Repository for safe-zone-related database operations.
#[derive(Clone)]
pub struct SafeZoneRepository {
    pool: PgPool,
    spatial: SpatialSupport,
}

impl SafeZoneRepository {
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

    /// List all safe zones ordered by id.
    pub async fn list(&self) -> Result<Vec<SafeZoneEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_safe_zones");
        let sql = format!("SELECT {} FROM safe_zones ORDER BY id", self.columns());
        let result = sqlx::query_as::<_, SafeZoneEntity>(&sql)
            .fetch_all(&self.pool)
            .await;
        timer.record();
        result
    }

    /// Find safe zone by id.
    pub async fn find_by_id(&self, id: i64) -> Result<Option<SafeZoneEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_safe_zone_by_id");
        let sql = format!("SELECT {} FROM safe_zones WHERE id = $1", self.columns());
        let result = sqlx::query_as::<_, SafeZoneEntity>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await;
        timer.record();
        result
    }

    /// Find safe zone by its unique name.
    pub async fn find_by_name(&self, name: &str) -> Result<Option<SafeZoneEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_safe_zone_by_name");
        let sql = format!("SELECT {} FROM safe_zones WHERE name = $1", self.columns());
        let result = sqlx::query_as::<_, SafeZoneEntity>(&sql)
            .bind(name)
            .fetch_optional(&self.pool)
            .await;
        timer.record();
        result
    }

    /// Create a new safe zone.
    ///
    /// Without spatial support only the polygon's bounding box is kept, in
    /// `data.bounds`.
    pub async fn create(&self, new: NewSafeZone<'_>) -> Result<SafeZoneEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_safe_zone");
        let result = match self.spatial {
            SpatialSupport::Native => {
                let geojson = geometry_to_geojson(&Geometry::Polygon(new.geometry)).to_string();
                let sql = format!(
                    r#"
                    INSERT INTO safe_zones (name, geometry, capacity, capacity_type, status, data)
                    VALUES ($1, ST_SetSRID(ST_GeomFromGeoJSON($2), $7), $3, $4, $5, $6)
                    RETURNING {}
                    "#,
                    NATIVE_COLUMNS
                );
                sqlx::query_as::<_, SafeZoneEntity>(&sql)
                    .bind(new.name)
                    .bind(geojson)
                    .bind(new.capacity)
                    .bind(new.capacity_type)
                    .bind(new.status)
                    .bind(new.data.map(Value::Object))
                    .bind(SRID_WGS84)
                    .fetch_one(&self.pool)
                    .await
            }
            SpatialSupport::MetadataOnly => {
                let data = match Bounds::from_polygon(&new.geometry) {
                    Some(bounds) => embed_bounds(new.data, bounds),
                    None => new.data.unwrap_or_default(),
                };
                let sql = format!(
                    r#"
                    INSERT INTO safe_zones (name, capacity, capacity_type, status, data)
                    VALUES ($1, $2, $3, $4, $5)
                    RETURNING {}
                    "#,
                    METADATA_COLUMNS
                );
                sqlx::query_as::<_, SafeZoneEntity>(&sql)
                    .bind(new.name)
                    .bind(new.capacity)
                    .bind(new.capacity_type)
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
