//! Domain services for GeoSafe.
//!
//! Geometry resolution and serialization used when building API responses.

pub mod geometry_resolution;
pub mod geometry_serialization;

pub use geometry_resolution::{resolve_point_geometry, resolve_polygon_geometry};
pub use geometry_serialization::serialize_geometry;
