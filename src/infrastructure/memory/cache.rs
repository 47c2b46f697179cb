//! In-process TTL cache.

use async_trait::async_trait;
use dashmap::DashMap;
use std::time::{Duration, Instant};

use crate::infrastructure::cache::{CacheResult, CacheService};

#[derive(Debug, Clone)]
struct Entry {
    original_url: String,
    expires_at: Instant,
}

/// Cache backed by a [`DashMap`] with per-entry expiry checked on read.
#[derive(Debug, Default)]
pub struct InMemoryCache {
    entries: DashMap<String, Entry>,
}

impl InMemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries, including expired ones not yet read.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl CacheService for InMemoryCache {
    async fn get_url(&self, short_code: &str) -> CacheResult<Option<String>> {
        let now = Instant::now();

        if let Some(entry) = self.entries.get(short_code)
            && entry.expires_at > now
        {
            return Ok(Some(entry.original_url.clone()));
        }

        self.entries.remove_if(short_code, |_, e| e.expires_at <= now);
        Ok(None)
    }

    async fn set_url(&self, short_code: &str, original_url: &str, ttl: Duration) {
        self.entries.insert(
            short_code.to_string(),
            Entry {
                original_url: original_url.to_string(),
                expires_at: Instant::now() + ttl,
            },
        );
    }

    async fn health_check(&self) -> bool {
        true
    }
}
