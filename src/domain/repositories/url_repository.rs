//! Repository trait for the authoritative record store.

use crate::domain::entities::UrlRecord;
use crate::error::AppError;
use async_trait::async_trait;

/// Durable mapping of short codes to URL records.
///
/// Records are created once and never updated or deleted through this trait.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUrlRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::memory::InMemoryUrlRepository`] - in-process implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlRepository: Send + Sync {
    /// Inserts a new record and returns it with the store-assigned id and timestamps.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::DuplicateShortCode`] if `short_code` is already taken.
    /// Returns [`AppError::StoreUnavailable`] on connectivity failure or timeout.
    async fn save(&self, original_url: &str, short_code: &str) -> Result<UrlRecord, AppError>;

    /// Looks up a record by its short code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no record matches.
    /// Returns [`AppError::StoreUnavailable`] on connectivity failure or timeout.
    async fn get_by_short_code(&self, short_code: &str) -> Result<UrlRecord, AppError>;

    /// Checks store reachability.
    async fn health_check(&self) -> bool;
}
