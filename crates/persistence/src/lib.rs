//! Persistence layer for the GeoSafe backend.
//!
//! This crate contains:
//! - Database connection management and spatial capability detection
//! - Entity definitions (database row mappings)
//! - Repository implementations
//! - SQL migrations

pub mod db;
pub mod entities;
pub mod metrics;
pub mod repositories;
