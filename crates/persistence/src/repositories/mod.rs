//! Repository implementations for database operations.

pub mod booking;
pub mod room;
pub mod user;

pub use booking::{BookingListFilter, BookingRepository};
pub use room::RoomRepository;
pub use user::UserRepository;
