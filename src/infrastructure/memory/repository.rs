//! In-process record store.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use serde_json::json;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};

use crate::domain::entities::UrlRecord;
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;

/// Record store backed by a [`DashMap`].
///
/// Enforces short code uniqueness like the PostgreSQL constraint and counts
/// lookups so callers can observe how often the store was consulted.
#[derive(Debug)]
pub struct InMemoryUrlRepository {
    records: DashMap<String, UrlRecord>,
    next_id: AtomicI64,
    lookups: AtomicUsize,
    available: AtomicBool,
}

impl InMemoryUrlRepository {
    pub fn new() -> Self {
        Self {
            records: DashMap::new(),
            next_id: AtomicI64::new(1),
            lookups: AtomicUsize::new(0),
            available: AtomicBool::new(true),
        }
    }

    /// Number of `get_by_short_code` calls served so far.
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Simulates losing (or regaining) the connection to the store.
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), AppError> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(AppError::store_unavailable("in-memory store offline"))
        }
    }
}

impl Default for InMemoryUrlRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UrlRepository for InMemoryUrlRepository {
    async fn save(&self, original_url: &str, short_code: &str) -> Result<UrlRecord, AppError> {
        self.check_available()?;

        match self.records.entry(short_code.to_string()) {
            Entry::Occupied(_) => Err(AppError::DuplicateShortCode {
                code: short_code.to_string(),
            }),
            Entry::Vacant(slot) => {
                let now = Utc::now();
                let record = UrlRecord::new(
                    self.next_id.fetch_add(1, Ordering::SeqCst),
                    original_url.to_string(),
                    short_code.to_string(),
                    now,
                    now,
                );
                slot.insert(record.clone());
                Ok(record)
            }
        }
    }

    async fn get_by_short_code(&self, short_code: &str) -> Result<UrlRecord, AppError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;

        self.records
            .get(short_code)
            .map(|r| r.value().clone())
            .ok_or_else(|| {
                AppError::not_found("Short code not found", json!({ "short_code": short_code }))
            })
    }

    async fn health_check(&self) -> bool {
        self.available.load(Ordering::SeqCst)
    }
}
