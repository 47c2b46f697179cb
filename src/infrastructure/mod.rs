//! Infrastructure layer for external integrations.
//!
//! Implements the contracts defined by the domain layer.
//!
//! # Modules
//!
//! - [`cache`] - Resolution cache (Redis and no-op implementations)
//! - [`counter`] - Shared counter (Redis)
//! - [`persistence`] - PostgreSQL record store
//! - [`memory`] - In-process implementations of all three

pub mod cache;
pub mod counter;
pub mod memory;
pub mod persistence;
