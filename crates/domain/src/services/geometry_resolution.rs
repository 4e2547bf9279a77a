//! Effective geometry resolution for records that may lack a native geometry.
//!
//! Precedence is always: the record's native geometry if present, else a
//! geometry rebuilt from metadata coordinates, else absent. Problems with the
//! metadata never surface as errors; they only make the fallback unavailable.

use std::borrow::Cow;

use geo::{Geometry, Point};
use serde_json::{json, Map, Value};
use thiserror::Error;
use tracing::debug;

use crate::models::geometry::{Bounds, GeometryValue, LonLat, ResolvedGeometry};

/// Metadata key holding a warehouse's `{lon, lat}` pair.
pub const LOCATION_KEY: &str = "location";

/// Metadata key holding a safe zone's `{minLon, maxLon, minLat, maxLat}` box.
pub const BOUNDS_KEY: &str = "bounds";

/// Why a metadata fallback could not be derived.
#[derive(Debug, Error)]
enum FallbackError {
    #[error("metadata is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("`{0}` is not an object")]
    NotAnObject(&'static str),

    #[error("`{0}` is not numeric")]
    NotNumeric(&'static str),
}

/// Resolves a warehouse-style point geometry.
pub fn resolve_point_geometry(
    native: Option<GeometryValue>,
    metadata: Option<&Value>,
) -> ResolvedGeometry {
    if let Some(value) = native {
        return ResolvedGeometry::Native(value);
    }

    match point_from_metadata(metadata) {
        Ok(Some(point)) => ResolvedGeometry::Derived(Geometry::Point(point)),
        Ok(None) => ResolvedGeometry::Absent,
        Err(reason) => {
            debug!(%reason, "Metadata location ignored");
            ResolvedGeometry::Absent
        }
    }
}

/// Resolves a safe-zone-style polygon geometry.
///
/// Only the bounding box survives in metadata, so the derived polygon is the
/// axis-aligned rectangle of that box.
pub fn resolve_polygon_geometry(
    native: Option<GeometryValue>,
    metadata: Option<&Value>,
) -> ResolvedGeometry {
    if let Some(value) = native {
        return ResolvedGeometry::Native(value);
    }

    match bounds_from_metadata(metadata) {
        Ok(Some(bounds)) => ResolvedGeometry::Derived(Geometry::Polygon(bounds.to_polygon())),
        Ok(None) => ResolvedGeometry::Absent,
        Err(reason) => {
            debug!(%reason, "Metadata bounds ignored");
            ResolvedGeometry::Absent
        }
    }
}

/// Records a point under `location` for stores without spatial support.
pub fn embed_location(data: Option<Map<String, Value>>, point: Point<f64>) -> Map<String, Value> {
    let mut data = data.unwrap_or_default();
    data.insert(LOCATION_KEY.to_string(), json!(LonLat::from(point)));
    data
}

/// Records a bounding box under `bounds` for stores without spatial support.
pub fn embed_bounds(data: Option<Map<String, Value>>, bounds: Bounds) -> Map<String, Value> {
    let mut data = data.unwrap_or_default();
    data.insert(BOUNDS_KEY.to_string(), json!(bounds));
    data
}

fn metadata_object(
    metadata: Option<&Value>,
) -> Result<Option<Cow<'_, Map<String, Value>>>, FallbackError> {
    match metadata {
        Some(Value::Object(map)) => Ok(Some(Cow::Borrowed(map))),
        Some(Value::String(text)) => match serde_json::from_str::<Value>(text)? {
            Value::Object(map) => Ok(Some(Cow::Owned(map))),
            _ => Ok(None),
        },
        _ => Ok(None),
    }
}

fn point_from_metadata(metadata: Option<&Value>) -> Result<Option<Point<f64>>, FallbackError> {
    let Some(meta) = metadata_object(metadata)? else {
        return Ok(None);
    };
    let Some(location) = fallback_entry(&meta, LOCATION_KEY)? else {
        return Ok(None);
    };

    let lon = coordinate(location, "lon")?;
    let lat = coordinate(location, "lat")?;
    Ok(Some(Point::new(lon, lat)))
}

fn bounds_from_metadata(metadata: Option<&Value>) -> Result<Option<Bounds>, FallbackError> {
    let Some(meta) = metadata_object(metadata)? else {
        return Ok(None);
    };
    let Some(bounds) = fallback_entry(&meta, BOUNDS_KEY)? else {
        return Ok(None);
    };

    Ok(Some(Bounds {
        min_lon: coordinate(bounds, "minLon")?,
        max_lon: coordinate(bounds, "maxLon")?,
        min_lat: coordinate(bounds, "minLat")?,
        max_lat: coordinate(bounds, "maxLat")?,
    }))
}

/// Looks up a fallback entry. Missing, `null` and empty entries count as absent.
fn fallback_entry<'a>(
    meta: &'a Map<String, Value>,
    key: &'static str,
) -> Result<Option<&'a Map<String, Value>>, FallbackError> {
    match meta.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Object(entry)) if entry.is_empty() => Ok(None),
        Some(Value::Object(entry)) => Ok(Some(entry)),
        Some(_) => Err(FallbackError::NotAnObject(key)),
    }
}

/// Reads a coordinate component; a missing component defaults to `0`.
fn coordinate(entry: &Map<String, Value>, key: &'static str) -> Result<f64, FallbackError> {
    match entry.get(key) {
        None => Ok(0.0),
        Some(value) => value.as_f64().ok_or(FallbackError::NotNumeric(key)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{point, polygon};

    fn derived_point(resolved: ResolvedGeometry) -> Point<f64> {
        match resolved {
            ResolvedGeometry::Derived(Geometry::Point(p)) => p,
            other => panic!("expected derived point, got {:?}", other),
        }
    }

    fn derived_ring(resolved: ResolvedGeometry) -> Vec<(f64, f64)> {
        match resolved {
            ResolvedGeometry::Derived(Geometry::Polygon(p)) => {
                p.exterior().coords().map(|c| (c.x, c.y)).collect()
            }
            other => panic!("expected derived polygon, got {:?}", other),
        }
    }

    #[test]
    fn test_native_point_wins_over_metadata() {
        let native = GeometryValue::Text(r#"{"type":"Point","coordinates":[1,2]}"#.into());
        let meta = json!({"location": {"lon": 29.023, "lat": 40.991}});
        let resolved = resolve_point_geometry(Some(native.clone()), Some(&meta));
        assert_eq!(resolved, ResolvedGeometry::Native(native));
    }

    #[test]
    fn test_native_value_returned_unchanged_even_if_malformed() {
        let native = GeometryValue::Text("not geojson".into());
        let resolved = resolve_polygon_geometry(Some(native.clone()), None);
        assert_eq!(resolved, ResolvedGeometry::Native(native));
    }

    #[test]
    fn test_point_from_metadata_location() {
        let meta = json!({"manager": "Ahmet Yılmaz", "location": {"lon": 29.023, "lat": 40.991}});
        let point = derived_point(resolve_point_geometry(None, Some(&meta)));
        assert_eq!(point, point!(x: 29.023, y: 40.991));
    }

    #[test]
    fn test_point_from_metadata_encoded_as_string() {
        let meta = Value::String(r#"{"location": {"lon": 29.001, "lat": 41.043}}"#.to_string());
        let point = derived_point(resolve_point_geometry(None, Some(&meta)));
        assert_eq!(point, point!(x: 29.001, y: 41.043));
    }

    #[test]
    fn test_point_missing_component_defaults_to_zero() {
        let meta = json!({"location": {"lat": 40.991}});
        let point = derived_point(resolve_point_geometry(None, Some(&meta)));
        assert_eq!(point, point!(x: 0.0, y: 40.991));
    }

    #[test]
    fn test_point_integer_components_accepted() {
        let meta = json!({"location": {"lon": 29, "lat": 41}});
        let point = derived_point(resolve_point_geometry(None, Some(&meta)));
        assert_eq!(point, point!(x: 29.0, y: 41.0));
    }

    #[test]
    fn test_point_absent_without_metadata() {
        assert!(resolve_point_geometry(None, None).is_absent());
        assert!(resolve_point_geometry(None, Some(&json!({}))).is_absent());
        assert!(resolve_point_geometry(None, Some(&Value::Null)).is_absent());
    }

    #[test]
    fn test_point_absent_for_empty_or_null_location() {
        assert!(resolve_point_geometry(None, Some(&json!({"location": {}}))).is_absent());
        assert!(resolve_point_geometry(None, Some(&json!({"location": null}))).is_absent());
    }

    #[test]
    fn test_point_absent_for_malformed_metadata() {
        let cases = [
            Value::String("{not json".to_string()),
            Value::String("[1, 2]".to_string()),
            json!([{"location": {"lon": 1.0, "lat": 2.0}}]),
            json!({"location": "29.0,41.0"}),
            json!({"location": {"lon": "29.0", "lat": 41.0}}),
            json!({"location": {"lon": null, "lat": 41.0}}),
            json!(42),
        ];
        for meta in cases {
            assert!(
                resolve_point_geometry(None, Some(&meta)).is_absent(),
                "expected absence for {}",
                meta
            );
        }
    }

    #[test]
    fn test_polygon_from_metadata_bounds() {
        let meta = json!({
            "type": "public_park",
            "bounds": {"minLon": 29.0150, "maxLon": 29.0350, "minLat": 40.9800, "maxLat": 41.0000}
        });
        let ring = derived_ring(resolve_polygon_geometry(None, Some(&meta)));
        assert_eq!(
            ring,
            vec![
                (29.0150, 40.9800),
                (29.0350, 40.9800),
                (29.0350, 41.0000),
                (29.0150, 41.0000),
                (29.0150, 40.9800),
            ]
        );
    }

    #[test]
    fn test_polygon_bounds_defaults_to_zero() {
        let meta = json!({"bounds": {"maxLon": 1.5}});
        let ring = derived_ring(resolve_polygon_geometry(None, Some(&meta)));
        assert_eq!(
            ring,
            vec![(0.0, 0.0), (1.5, 0.0), (1.5, 0.0), (0.0, 0.0), (0.0, 0.0)]
        );
    }

    #[test]
    fn test_polygon_bounds_all_unrelated_keys_is_degenerate_ring() {
        let meta = json!({"bounds": {"note": "unsurveyed"}});
        let ring = derived_ring(resolve_polygon_geometry(None, Some(&meta)));
        assert_eq!(ring.len(), 5);
        assert!(ring.iter().all(|&c| c == (0.0, 0.0)));
    }

    #[test]
    fn test_polygon_absent_without_bounds() {
        assert!(resolve_polygon_geometry(None, None).is_absent());
        assert!(resolve_polygon_geometry(None, Some(&json!({"location": {"lon": 1}}))).is_absent());
        assert!(resolve_polygon_geometry(None, Some(&json!({"bounds": {}}))).is_absent());
    }

    #[test]
    fn test_polygon_absent_for_malformed_metadata() {
        let cases = [
            Value::String("bounds: 29,41".to_string()),
            json!({"bounds": [29.0, 29.1, 41.0, 41.1]}),
            json!({"bounds": {"minLon": "west"}}),
        ];
        for meta in cases {
            assert!(resolve_polygon_geometry(None, Some(&meta)).is_absent());
        }
    }

    #[test]
    fn test_embedded_location_resolves_back() {
        let mut data = Map::new();
        data.insert("manager".to_string(), json!("Mehmet Kaya"));
        let data = embed_location(Some(data), point!(x: 29.0010, y: 41.0430));

        assert_eq!(data["manager"], json!("Mehmet Kaya"));
        let meta = Value::Object(data);
        let point = derived_point(resolve_point_geometry(None, Some(&meta)));
        assert_eq!(point, point!(x: 29.0010, y: 41.0430));
    }

    #[test]
    fn test_embedded_metadata_uses_stored_key_names() {
        let data = embed_location(None, point!(x: 29.032, y: 40.985));
        assert_eq!(data[LOCATION_KEY], json!({"lon": 29.032, "lat": 40.985}));
        let stored: LonLat = serde_json::from_value(data[LOCATION_KEY].clone()).unwrap();
        assert_eq!(stored, LonLat { lon: 29.032, lat: 40.985 });

        let bounds = Bounds {
            min_lon: 29.02,
            max_lon: 29.055,
            min_lat: 40.97,
            max_lat: 40.995,
        };
        let data = embed_bounds(None, bounds);
        assert_eq!(
            data[BOUNDS_KEY],
            json!({"minLon": 29.02, "maxLon": 29.055, "minLat": 40.97, "maxLat": 40.995})
        );
    }

    #[test]
    fn test_embedded_bounds_resolve_to_bounding_rectangle() {
        let triangle = polygon![
            (x: 28.99, y: 41.035),
            (x: 29.02, y: 41.035),
            (x: 29.00, y: 41.06),
            (x: 28.99, y: 41.035)
        ];
        let bounds = Bounds::from_polygon(&triangle).unwrap();
        let meta = Value::Object(embed_bounds(None, bounds));

        let ring = derived_ring(resolve_polygon_geometry(None, Some(&meta)));
        assert_eq!(
            ring,
            vec![
                (28.99, 41.035),
                (29.02, 41.035),
                (29.02, 41.06),
                (28.99, 41.06),
                (28.99, 41.035),
            ]
        );
    }
}
