//! Cache service trait and error types.

use crate::error::AppError;
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur during cache operations.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Cache operation error: {0}")]
    OperationError(String),
    #[error("Cache operation timed out after {0:?}")]
    Timeout(Duration),
}

impl From<CacheError> for AppError {
    fn from(e: CacheError) -> Self {
        AppError::cache_unavailable(e.to_string())
    }
}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Ephemeral, TTL-bounded mapping of short code to original URL.
///
/// The cache is never authoritative: a miss says nothing about whether the
/// code exists, and a hit may be stale for up to one TTL.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisCache`] - Redis-backed cache with TTL support
/// - [`crate::infrastructure::cache::NullCache`] - No-op implementation for disabled caching
/// - [`crate::infrastructure::memory::InMemoryCache`] - in-process implementation
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CacheService: Send + Sync {
    /// Retrieves the original URL for a short code.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(url))` on cache hit
    /// - `Ok(None)` on cache miss
    ///
    /// # Errors
    ///
    /// Returns a [`CacheError`] when the backend is unreachable. Callers are
    /// expected to treat this as a miss.
    async fn get_url(&self, short_code: &str) -> CacheResult<Option<String>>;

    /// Stores a URL mapping, overwriting any existing entry (last writer wins).
    ///
    /// Best-effort: failures are logged by the implementation and never
    /// reported to the caller.
    async fn set_url(&self, short_code: &str, original_url: &str, ttl: Duration);

    /// Checks if the cache backend is healthy.
    async fn health_check(&self) -> bool;
}
