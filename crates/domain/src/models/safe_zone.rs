//! Safe zone domain model.

use chrono::{DateTime, Utc};
use geo::Polygon;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::Validate;

use crate::models::geometry::{parse_polygon, GeometryError, GeometryValue, ResolvedGeometry};
use crate::models::warehouse::default_status;
use crate::services::geometry_resolution::resolve_polygon_geometry;

/// An evacuation / gathering area.
#[derive(Debug, Clone)]
pub struct SafeZone {
    pub id: i64,
    pub name: String,
    pub geometry: Option<GeometryValue>,
    pub capacity: Option<i32>,
    pub capacity_type: String,
    pub status: String,
    pub data: Option<Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SafeZone {
    /// Native boundary, falling back to the rectangle in `data.bounds`.
    pub fn resolved_geometry(&self) -> ResolvedGeometry {
        resolve_polygon_geometry(self.geometry.clone(), self.data.as_ref())
    }
}

fn default_capacity_type() -> String {
    "persons".to_string()
}

/// Request payload for creating a safe zone.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateSafeZoneRequest {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,

    /// GeoJSON `Polygon`; the first ring is the boundary.
    pub geometry: Value,

    #[validate(custom(function = "shared::validation::validate_capacity"))]
    pub capacity: Option<i32>,

    #[serde(default = "default_capacity_type")]
    #[validate(length(min = 1, max = 50, message = "Capacity type must be 1-50 characters"))]
    pub capacity_type: String,

    #[serde(default = "default_status")]
    #[validate(custom(function = "shared::validation::validate_status_label"))]
    pub status: String,

    pub data: Option<Map<String, Value>>,
}

impl CreateSafeZoneRequest {
    pub fn polygon(&self) -> Result<Polygon<f64>, GeometryError> {
        parse_polygon(&self.geometry)
    }
}

/// Wire envelope for a safe zone.
#[derive(Debug, Clone, Serialize)]
pub struct SafeZoneResponse {
    pub id: i64,
    pub name: String,
    pub geometry: Value,
    pub capacity: Option<i32>,
    pub capacity_type: String,
    pub status: String,
    pub data: Option<Value>,
    pub created_at: DateTime<Utc>,
}

impl From<SafeZone> for SafeZoneResponse {
    fn from(z: SafeZone) -> Self {
        let geometry = z.resolved_geometry().to_geojson();
        Self {
            id: z.id,
            name: z.name,
            geometry,
            capacity: z.capacity,
            capacity_type: z.capacity_type,
            status: z.status,
            data: z.data,
            created_at: z.created_at,
        }
    }
}
