//! In-process implementations of the store, counter, and cache traits.
//!
//! These share state only within one process and therefore cannot coordinate
//! a fleet. They back the HTTP tests and single-process local runs.

mod cache;
mod counter;
mod repository;

pub use cache::InMemoryCache;
pub use counter::InMemoryCounter;
pub use repository::InMemoryUrlRepository;
