//! Domain models for GeoSafe.

pub mod geometry;
pub mod inventory;
pub mod item;
pub mod movement;
pub mod safe_zone;
pub mod user;
pub mod warehouse;

pub use geometry::{GeometryValue, ResolvedGeometry};
pub use inventory::InventoryEntry;
pub use item::Item;
pub use movement::{Movement, MovementType};
pub use safe_zone::SafeZone;
pub use user::User;
pub use warehouse::Warehouse;
