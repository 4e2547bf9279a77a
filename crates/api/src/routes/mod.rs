//! HTTP route handlers.

pub mod auth;
pub mod health;
pub mod inventory;
pub mod items;
pub mod movements;
pub mod root;
pub mod safe_zones;
pub mod warehouses;
