//! Repository trait definitions for the domain layer.
//!
//! These traits abstract the three shared coordination points of the fleet.
//! Concrete implementations live in `crate::infrastructure`.
//!
//! - [`UrlRepository`] - Authoritative record store
//! - [`CounterStore`] - Shared monotonic counter
//!
//! The resolution cache trait lives with its implementations in
//! [`crate::infrastructure::cache`].

pub mod counter_store;
pub mod url_repository;

pub use counter_store::CounterStore;
pub use url_repository::UrlRepository;

#[cfg(test)]
pub use counter_store::MockCounterStore;
#[cfg(test)]
pub use url_repository::MockUrlRepository;
