//! Shared utilities and common types for the hotel booking backend.
//!
//! This crate provides common functionality used across the other crates:
//! - Request validation helpers (stay ranges, monetary amounts)
//! - Cursor-based pagination

pub mod pagination;
pub mod validation;
