//! Database entity definitions.
//!
//! Entities are direct mappings to database rows.

pub mod inventory;
pub mod item;
pub mod movement;
pub mod safe_zone;
pub mod user;
pub mod warehouse;

pub use inventory::InventoryEntity;
pub use item::ItemEntity;
pub use movement::MovementEntity;
pub use safe_zone::SafeZoneEntity;
pub use user::UserEntity;
pub use warehouse::WarehouseEntity;
