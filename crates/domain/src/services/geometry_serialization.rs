//! Rendering of geometry values into the JSON sent to API clients.
//!
//! Serialization is total: malformed input is passed through as a tagged
//! `raw`/`unknown` object instead of failing the response.

use serde_json::{json, Value};

use crate::models::geometry::{geometry_to_geojson, GeometryValue, ResolvedGeometry};

/// Converts a geometry value into a JSON-safe GeoJSON structure.
///
/// Text that decodes as JSON is emitted as the decoded value. Text that is
/// not JSON becomes `{"type": "raw", "value": <text>}`.
pub fn serialize_geometry(value: Option<&GeometryValue>) -> Value {
    match value {
        None => Value::Null,
        Some(GeometryValue::GeoJson(map)) => Value::Object(map.clone()),
        Some(GeometryValue::Text(text)) => match serde_json::from_str::<Value>(text) {
            Ok(decoded) => decoded,
            Err(_) => json!({ "type": "raw", "value": text }),
        },
        Some(GeometryValue::Native(geometry)) => geometry_to_geojson(geometry),
        Some(GeometryValue::Other(other)) => json!({
            "type": "unknown",
            "value": other.to_string(),
        }),
    }
}

impl ResolvedGeometry {
    /// The wire form of a resolved geometry; `null` when absent.
    pub fn to_geojson(&self) -> Value {
        match self {
            ResolvedGeometry::Native(value) => serialize_geometry(Some(value)),
            ResolvedGeometry::Derived(geometry) => geometry_to_geojson(geometry),
            ResolvedGeometry::Absent => Value::Null,
        }
    }
}
