//! Domain layer for the GeoSafe backend.
//!
//! This crate contains:
//! - Domain models (Warehouse, SafeZone, Item, inventory, movements, users)
//! - Geometry values with metadata fallback resolution
//! - Response serialization of geometries

pub mod models;
pub mod services;
