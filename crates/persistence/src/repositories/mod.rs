//! Repository implementations for database operations.

pub mod inventory;
pub mod item;
pub mod movement;
pub mod safe_zone;
pub mod user;
pub mod warehouse;

pub use inventory::InventoryRepository;
pub use item::ItemRepository;
pub use movement::{MovementRepository, NewMovement, DEFAULT_MOVEMENT_LIMIT};
pub use safe_zone::{NewSafeZone, SafeZoneRepository};
pub use user::UserRepository;
pub use warehouse::{NewWarehouse, WarehouseRepository};
