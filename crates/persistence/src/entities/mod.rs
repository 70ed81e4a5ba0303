//! Database entity definitions.
//!
//! Entities are direct mappings to database rows.

pub mod booking;
pub mod room;
pub mod user;

pub use booking::{BookingDetailsEntity, BookingEntity};
pub use room::RoomEntity;
pub use user::UserEntity;

/// Tables owned by the entity set, in foreign-key dependency order.
pub const ENTITY_TABLES: &[&str] = &["users", "rooms", "bookings"];
