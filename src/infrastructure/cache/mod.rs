//! Resolution cache for fast redirect lookups.
//!
//! Provides a [`CacheService`] trait with two backend implementations:
//! - [`RedisCache`] - Production Redis-backed cache
//! - [`NullCache`] - No-op implementation for disabled caching

mod null_cache;
mod redis_cache;
mod service;

pub use null_cache::NullCache;
pub use redis_cache::{CACHE_KEY_PREFIX, RedisCache};
pub use service::{CacheError, CacheResult, CacheService};

#[cfg(test)]
pub use service::MockCacheService;
