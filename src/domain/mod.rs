//! Domain layer containing business entities and data access contracts.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Store trait definitions
//!
//! The domain layer has no dependencies on infrastructure or presentation
//! layers. Allocation and resolution logic lives in
//! [`crate::application::services`].

pub mod entities;
pub mod repositories;
