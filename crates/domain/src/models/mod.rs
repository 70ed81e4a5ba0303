//! Domain models for hotel bookings.

pub mod booking;
pub mod room;
pub mod user;

pub use booking::{Booking, BookingDetails};
pub use room::Room;
pub use user::User;
