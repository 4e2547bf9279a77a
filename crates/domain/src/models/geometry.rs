//! Geometry values carried by warehouse and safe zone records.
//!
//! A record's geometry can come from a native spatial column (read as
//! GeoJSON text), from an in-process `geo` value, or be derived from
//! coordinates kept in the record's JSON metadata. All of them end up as a
//! GeoJSON `Value` with positions in `[longitude, latitude]` order.

use geo::{BoundingRect, Coord, Geometry, LineString, Point, Polygon};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use thiserror::Error;

/// Spatial reference identifier for WGS84 longitude/latitude.
pub const SRID_WGS84: i32 = 4326;

/// Minimum number of positions in a closed polygon ring.
pub const MIN_RING_POSITIONS: usize = 4;

/// A geometry as found on a persisted record.
#[derive(Debug, Clone, PartialEq)]
pub enum GeometryValue {
    /// Structured mapping, assumed to already be GeoJSON.
    GeoJson(Map<String, Value>),
    /// Textual geometry: GeoJSON text from `ST_AsGeoJSON`, or WKT-like text.
    Text(String),
    /// Native geometry object.
    Native(Geometry<f64>),
    /// Any other opaque value.
    Other(Value),
}

impl GeometryValue {
    /// Classifies a JSON value. JSON `null` means "no geometry".
    pub fn from_json(value: Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::Object(map) => Some(Self::GeoJson(map)),
            Value::String(text) => Some(Self::Text(text)),
            other => Some(Self::Other(other)),
        }
    }
}

impl From<Point<f64>> for GeometryValue {
    fn from(point: Point<f64>) -> Self {
        Self::Native(Geometry::Point(point))
    }
}

impl From<Polygon<f64>> for GeometryValue {
    fn from(polygon: Polygon<f64>) -> Self {
        Self::Native(Geometry::Polygon(polygon))
    }
}

/// The effective geometry of a record at the API boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedGeometry {
    /// The record's own geometry value, rendered by the serializer.
    Native(GeometryValue),
    /// Geometry rebuilt from metadata coordinates.
    Derived(Geometry<f64>),
    Absent,
}

impl ResolvedGeometry {
    pub fn is_absent(&self) -> bool {
        matches!(self, ResolvedGeometry::Absent)
    }
}

/// A `{lon, lat}` pair as stored under `location` in warehouse metadata.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LonLat {
    pub lon: f64,
    pub lat: f64,
}

impl From<Point<f64>> for LonLat {
    fn from(point: Point<f64>) -> Self {
        Self {
            lon: point.x(),
            lat: point.y(),
        }
    }
}

/// Axis-aligned bounding box as stored under `bounds` in safe zone metadata.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bounds {
    pub min_lon: f64,
    pub max_lon: f64,
    pub min_lat: f64,
    pub max_lat: f64,
}

impl Bounds {
    /// Bounding box of a polygon's exterior ring.
    pub fn from_polygon(polygon: &Polygon<f64>) -> Option<Self> {
        polygon.bounding_rect().map(|rect| Self {
            min_lon: rect.min().x,
            max_lon: rect.max().x,
            min_lat: rect.min().y,
            max_lat: rect.max().y,
        })
    }

    /// Closed five-vertex ring: SW, SE, NE, NW, SW.
    pub fn ring(&self) -> LineString<f64> {
        LineString::from(vec![
            (self.min_lon, self.min_lat),
            (self.max_lon, self.min_lat),
            (self.max_lon, self.max_lat),
            (self.min_lon, self.max_lat),
            (self.min_lon, self.min_lat),
        ])
    }

    pub fn to_polygon(&self) -> Polygon<f64> {
        Polygon::new(self.ring(), vec![])
    }
}

/// Errors raised while parsing GeoJSON supplied by a client.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("Geometry must be a GeoJSON object")]
    NotAnObject,

    #[error("Expected geometry type {expected}, found {found}")]
    WrongType {
        expected: &'static str,
        found: String,
    },

    #[error("Geometry is missing coordinates")]
    MissingCoordinates,

    #[error("Invalid position: {0}")]
    InvalidPosition(String),

    #[error("{0}")]
    OutOfRange(String),

    #[error("Polygon must have at least one ring")]
    NoRings,

    #[error("Polygon ring must have at least 4 positions, found {0}")]
    RingTooShort(usize),

    #[error("Polygon ring must start and end at the same position")]
    RingNotClosed,
}

/// Converts a native geometry to a GeoJSON geometry object.
pub fn geometry_to_geojson(geometry: &Geometry<f64>) -> Value {
    match geometry {
        Geometry::Point(point) => json!({
            "type": "Point",
            "coordinates": position(point.0),
        }),
        Geometry::Line(line) => json!({
            "type": "LineString",
            "coordinates": [position(line.start), position(line.end)],
        }),
        Geometry::LineString(line_string) => json!({
            "type": "LineString",
            "coordinates": positions(line_string),
        }),
        Geometry::Polygon(polygon) => json!({
            "type": "Polygon",
            "coordinates": rings(polygon),
        }),
        Geometry::MultiPoint(points) => json!({
            "type": "MultiPoint",
            "coordinates": points.0.iter().map(|p| position(p.0)).collect::<Vec<_>>(),
        }),
        Geometry::MultiLineString(lines) => json!({
            "type": "MultiLineString",
            "coordinates": lines.0.iter().map(positions).collect::<Vec<_>>(),
        }),
        Geometry::MultiPolygon(polygons) => json!({
            "type": "MultiPolygon",
            "coordinates": polygons.0.iter().map(rings).collect::<Vec<_>>(),
        }),
        Geometry::GeometryCollection(collection) => json!({
            "type": "GeometryCollection",
            "geometries": collection.0.iter().map(geometry_to_geojson).collect::<Vec<_>>(),
        }),
        Geometry::Rect(rect) => geometry_to_geojson(&Geometry::Polygon(rect.to_polygon())),
        Geometry::Triangle(triangle) => {
            geometry_to_geojson(&Geometry::Polygon(triangle.to_polygon()))
        }
    }
}

fn position(coord: Coord<f64>) -> Value {
    json!([coord.x, coord.y])
}

fn positions(line_string: &LineString<f64>) -> Vec<Value> {
    line_string.coords().map(|c| position(*c)).collect()
}

fn rings(polygon: &Polygon<f64>) -> Vec<Vec<Value>> {
    std::iter::once(polygon.exterior())
        .chain(polygon.interiors())
        .map(positions)
        .collect()
}

/// Parses a GeoJSON `Point` object.
pub fn parse_point(value: &Value) -> Result<Point<f64>, GeometryError> {
    let coordinates = typed_coordinates(value, "Point")?;
    Ok(Point(parse_position(coordinates)?))
}

/// Parses a GeoJSON `Polygon` object. The first ring is the exterior.
pub fn parse_polygon(value: &Value) -> Result<Polygon<f64>, GeometryError> {
    let coordinates = typed_coordinates(value, "Polygon")?;
    let ring_values = coordinates
        .as_array()
        .ok_or_else(|| GeometryError::InvalidPosition("rings must be an array".into()))?;

    let mut rings = ring_values
        .iter()
        .map(parse_ring)
        .collect::<Result<Vec<_>, _>>()?
        .into_iter();

    let exterior = rings.next().ok_or(GeometryError::NoRings)?;
    Ok(Polygon::new(exterior, rings.collect()))
}

fn typed_coordinates<'a>(
    value: &'a Value,
    expected: &'static str,
) -> Result<&'a Value, GeometryError> {
    let object = value.as_object().ok_or(GeometryError::NotAnObject)?;
    let found = object.get("type").and_then(Value::as_str).unwrap_or("none");
    if found != expected {
        return Err(GeometryError::WrongType {
            expected,
            found: found.to_string(),
        });
    }
    object
        .get("coordinates")
        .ok_or(GeometryError::MissingCoordinates)
}

fn parse_ring(value: &Value) -> Result<LineString<f64>, GeometryError> {
    let positions = value
        .as_array()
        .ok_or_else(|| GeometryError::InvalidPosition("ring must be an array".into()))?;

    if positions.len() < MIN_RING_POSITIONS {
        return Err(GeometryError::RingTooShort(positions.len()));
    }

    let coords = positions
        .iter()
        .map(parse_position)
        .collect::<Result<Vec<_>, _>>()?;

    if coords.first() != coords.last() {
        return Err(GeometryError::RingNotClosed);
    }

    Ok(LineString::new(coords))
}

fn parse_position(value: &Value) -> Result<Coord<f64>, GeometryError> {
    let invalid = || GeometryError::InvalidPosition(value.to_string());
    let pair = value.as_array().filter(|p| p.len() >= 2).ok_or_else(invalid)?;
    let lon = pair[0].as_f64().ok_or_else(invalid)?;
    let lat = pair[1].as_f64().ok_or_else(invalid)?;

    shared::validation::validate_longitude(lon).map_err(out_of_range)?;
    shared::validation::validate_latitude(lat).map_err(out_of_range)?;

    Ok(Coord { x: lon, y: lat })
}

fn out_of_range(err: validator::ValidationError) -> GeometryError {
    GeometryError::OutOfRange(
        err.message
            .map(|m| m.to_string())
            .unwrap_or_else(|| err.code.to_string()),
    )
}
