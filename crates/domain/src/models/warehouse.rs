//! Warehouse domain model.

use chrono::{DateTime, Utc};
use geo::Point;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::Validate;

use crate::models::geometry::{parse_point, GeometryError, GeometryValue, ResolvedGeometry};
use crate::services::geometry_resolution::resolve_point_geometry;

/// A supply warehouse.
///
/// `location` is the native point geometry when the store has spatial
/// support; otherwise it is `None` and the point lives in `data.location`.
#[derive(Debug, Clone)]
pub struct Warehouse {
    pub id: i64,
    pub name: String,
    pub location: Option<GeometryValue>,
    pub address: Option<String>,
    pub capacity: Option<i32>,
    pub status: String,
    pub data: Option<Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Warehouse {
    /// Native location, falling back to `data.location`.
    pub fn resolved_location(&self) -> ResolvedGeometry {
        resolve_point_geometry(self.location.clone(), self.data.as_ref())
    }
}

pub(crate) fn default_status() -> String {
    "active".to_string()
}

/// Request payload for creating a warehouse.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateWarehouseRequest {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,

    /// GeoJSON `Point` in `[longitude, latitude]` order.
    pub location: Value,

    #[validate(length(max = 500, message = "Address must be at most 500 characters"))]
    pub address: Option<String>,

    #[validate(custom(function = "shared::validation::validate_capacity"))]
    pub capacity: Option<i32>,

    #[serde(default = "default_status")]
    #[validate(custom(function = "shared::validation::validate_status_label"))]
    pub status: String,

    pub data: Option<Map<String, Value>>,
}

impl CreateWarehouseRequest {
    pub fn point(&self) -> Result<Point<f64>, GeometryError> {
        parse_point(&self.location)
    }
}

/// Wire envelope for a warehouse.
#[derive(Debug, Clone, Serialize)]
pub struct WarehouseResponse {
    pub id: i64,
    pub name: String,
    pub location: Value,
    pub address: Option<String>,
    pub capacity: Option<i32>,
    pub status: String,
    pub data: Option<Value>,
    pub created_at: DateTime<Utc>,
}

impl From<Warehouse> for WarehouseResponse {
    fn from(w: Warehouse) -> Self {
        let location = w.resolved_location().to_geojson();
        Self {
            id: w.id,
            name: w.name,
            location,
            address: w.address,
            capacity: w.capacity,
            status: w.status,
            data: w.data,
            created_at: w.created_at,
        }
    }
}
