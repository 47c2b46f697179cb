//! Redis-backed cache implementation.

use super::service::{CacheError, CacheResult, CacheService};
use async_trait::async_trait;
use redis::{AsyncCommands, aio::ConnectionManager};
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, warn};

/// Key namespace for cached short codes.
pub const CACHE_KEY_PREFIX: &str = "url:";

/// Redis cache for fast short code lookups.
///
/// Shares the [`ConnectionManager`] used by the counter store; one key per
/// short code (`url:{code}`), written with `SET EX`.
pub struct RedisCache {
    conn: ConnectionManager,
    op_timeout: Duration,
}

impl RedisCache {
    /// Wraps an established connection.
    ///
    /// `op_timeout` bounds every round trip; an elapsed timeout is reported as
    /// [`CacheError::Timeout`].
    pub fn new(conn: ConnectionManager, op_timeout: Duration) -> Self {
        Self { conn, op_timeout }
    }

    fn build_key(short_code: &str) -> String {
        format!("{}{}", CACHE_KEY_PREFIX, short_code)
    }
}

#[async_trait]
impl CacheService for RedisCache {
    async fn get_url(&self, short_code: &str) -> CacheResult<Option<String>> {
        let key = Self::build_key(short_code);
        let mut conn = self.conn.clone();

        let value = timeout(self.op_timeout, conn.get::<_, Option<String>>(&key))
            .await
            .map_err(|_| CacheError::Timeout(self.op_timeout))?
            .map_err(|e| CacheError::OperationError(e.to_string()))?;

        match &value {
            Some(url) => debug!("Cache HIT: {} -> {}", short_code, url),
            None => debug!("Cache MISS: {}", short_code),
        }

        Ok(value)
    }

    async fn set_url(&self, short_code: &str, original_url: &str, ttl: Duration) {
        let key = Self::build_key(short_code);
        let mut conn = self.conn.clone();
        let ttl_seconds = ttl.as_secs().max(1);

        match timeout(
            self.op_timeout,
            conn.set_ex::<_, _, ()>(&key, original_url, ttl_seconds),
        )
        .await
        {
            Ok(Ok(())) => debug!(
                "Cache SET: {} -> {} (TTL: {}s)",
                short_code, original_url, ttl_seconds
            ),
            Ok(Err(e)) => warn!("Redis SET error for {}: {}", short_code, e),
            Err(_) => warn!(
                "Redis SET for {} timed out after {:?}",
                short_code, self.op_timeout
            ),
        }
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.conn.clone();
        matches!(
            timeout(self.op_timeout, conn.ping::<()>()).await,
            Ok(Ok(_))
        )
    }
}
