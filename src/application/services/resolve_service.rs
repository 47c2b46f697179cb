//! Short code resolution (read path).

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::domain::entities::UrlRecord;
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;
use crate::infrastructure::cache::CacheService;

/// Default time-to-live of cached mappings.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(30 * 60);

/// Cache-aside lookup of short codes.
///
/// # Cache Strategy
///
/// - **Cache hit**: returned immediately, the store is not consulted
/// - **Cache miss**: store lookup, then the mapping is written back
/// - **Cache error**: logged and treated as a miss
pub struct ResolveService {
    url_repository: Arc<dyn UrlRepository>,
    cache: Arc<dyn CacheService>,
    cache_ttl: Duration,
}

impl ResolveService {
    pub fn new(
        url_repository: Arc<dyn UrlRepository>,
        cache: Arc<dyn CacheService>,
        cache_ttl: Duration,
    ) -> Self {
        Self {
            url_repository,
            cache,
            cache_ttl,
        }
    }

    /// Resolves a short code to its original URL.
    ///
    /// # Errors
    ///
    /// - [`AppError::Validation`] if `short_code` is empty
    /// - [`AppError::NotFound`] if the store has no record
    /// - [`AppError::StoreUnavailable`] if the store could not be queried
    pub async fn resolve(&self, short_code: &str) -> Result<String, AppError> {
        ensure_code_present(short_code)?;

        match self.cache.get_url(short_code).await {
            Ok(Some(url)) => {
                debug!("Cache HIT for {}", short_code);
                metrics::counter!("shortener_cache_hits_total").increment(1);
                return Ok(url);
            }
            Ok(None) => {
                debug!("Cache MISS for {}", short_code);
                metrics::counter!("shortener_cache_misses_total").increment(1);
            }
            Err(e) => {
                warn!("Cache error for {}, falling back to store: {}", short_code, e);
                metrics::counter!("shortener_cache_errors_total").increment(1);
            }
        }

        let record = self.url_repository.get_by_short_code(short_code).await?;
        self.cache
            .set_url(short_code, &record.original_url, self.cache_ttl)
            .await;

        Ok(record.original_url)
    }

    /// Fetches the full record for a short code from the store.
    ///
    /// Always reads the store, since the cache holds only the URL, and
    /// refreshes the cached mapping on success.
    ///
    /// # Errors
    ///
    /// Same as [`resolve`](Self::resolve).
    pub async fn get_record(&self, short_code: &str) -> Result<UrlRecord, AppError> {
        ensure_code_present(short_code)?;

        let record = self.url_repository.get_by_short_code(short_code).await?;
        self.cache
            .set_url(short_code, &record.original_url, self.cache_ttl)
            .await;

        Ok(record)
    }
}

fn ensure_code_present(short_code: &str) -> Result<(), AppError> {
    if short_code.trim().is_empty() {
        return Err(AppError::bad_request(
            "Short code is required",
            serde_json::json!({}),
        ));
    }
    Ok(())
}
