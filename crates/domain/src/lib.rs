//! Domain layer for the hotel booking backend.
//!
//! This crate contains:
//! - Domain models (User, Room, Booking)
//! - Request and response payloads with their validation rules

pub mod models;
