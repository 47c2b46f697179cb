//! Business logic services for the application layer.

pub mod allocator;
pub mod resolve_service;
pub mod shorten_service;

pub use allocator::Allocator;
pub use resolve_service::{DEFAULT_CACHE_TTL, ResolveService};
pub use shorten_service::ShortenService;
