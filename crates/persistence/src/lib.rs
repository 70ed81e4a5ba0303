//! Persistence layer for the hotel booking backend.
//!
//! This crate contains:
//! - Data source configuration, pool creation and schema synchronization
//! - Entity definitions (database row mappings)
//! - Repository implementations
//! - Query metrics

pub mod db;
pub mod entities;
pub mod metrics;
pub mod repositories;
