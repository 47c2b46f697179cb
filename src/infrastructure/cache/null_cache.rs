//! No-op cache implementation for disabled caching.

use super::service::{CacheResult, CacheService};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// A cache implementation that does nothing.
///
/// Every lookup is a miss and every write is dropped, so the read path always
/// falls through to the record store.
///
/// # Use Cases
///
/// - Fallback when Redis is unreachable at read-service startup
/// - Testing scenarios where caching should be bypassed
pub struct NullCache;

impl NullCache {
    /// Creates a new NullCache instance.
    pub fn new() -> Self {
        debug!("Using NullCache (caching disabled)");
        Self
    }
}

impl Default for NullCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheService for NullCache {
    async fn get_url(&self, _short_code: &str) -> CacheResult<Option<String>> {
        Ok(None)
    }

    async fn set_url(&self, _short_code: &str, _original_url: &str, _ttl: Duration) {}

    async fn health_check(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_null_cache_always_misses() {
        let cache = NullCache::new();
        cache
            .set_url("0000G8a", "https://example.com", Duration::from_secs(60))
            .await;

        assert!(cache.get_url("0000G8a").await.unwrap().is_none());
        assert!(cache.health_check().await);
    }
}
