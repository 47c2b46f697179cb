//! Short code creation (write path).

use std::sync::Arc;

use serde_json::json;
use tracing::info;

use crate::application::services::Allocator;
use crate::domain::entities::UrlRecord;
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;
use crate::utils::code_generator::{Salt, encode};
use crate::utils::url_validator::validate_url;

/// Orchestrates allocation, encoding, and persistence of new short codes.
///
/// Does not retry: a [`AppError::DuplicateShortCode`] from the store is
/// surfaced as-is. Newly created codes are not written to the cache; they stay
/// cold until first read.
pub struct ShortenService {
    allocator: Arc<Allocator>,
    url_repository: Arc<dyn UrlRepository>,
    salt_source: fn() -> Salt,
}

impl ShortenService {
    pub fn new(allocator: Arc<Allocator>, url_repository: Arc<dyn UrlRepository>) -> Self {
        Self {
            allocator,
            url_repository,
            salt_source: Salt::random,
        }
    }

    /// Replaces the random salt source, e.g. with a fixed salt.
    pub fn with_salt_source(mut self, salt_source: fn() -> Salt) -> Self {
        self.salt_source = salt_source;
        self
    }

    /// Creates a short code for `original_url` and persists the mapping.
    ///
    /// The URL is checked for syntax only and stored exactly as given.
    ///
    /// # Errors
    ///
    /// - [`AppError::Validation`] if the URL does not parse
    /// - [`AppError::AllocatorUnavailable`] if no id could be allocated
    /// - [`AppError::StoreUnavailable`] or [`AppError::DuplicateShortCode`] if
    ///   the record could not be saved
    pub async fn create_short_url(&self, original_url: &str) -> Result<UrlRecord, AppError> {
        validate_url(original_url).map_err(|e| {
            AppError::bad_request("Invalid URL", json!({ "reason": e.to_string() }))
        })?;

        let id = self.allocator.next_id().await?;
        let salt = (self.salt_source)();
        let short_code = encode(id, salt);

        let record = self
            .url_repository
            .save(original_url, &short_code)
            .await?;

        metrics::counter!("shortener_urls_created_total").increment(1);
        info!(
            allocated_id = id,
            salt = salt.value(),
            short_code = %record.short_code,
            record_id = record.id,
            "Created short code"
        );

        Ok(record)
    }
}
