//! Trait for the shared, fleet-wide counter.

use crate::error::AppError;
use async_trait::async_trait;

/// A single named integer shared by every replica.
///
/// `increment` must be linearizable: no two calls anywhere may observe the
/// same returned value.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CounterStore: Send + Sync {
    /// Returns the stored value, or `None` when the counter has never been set.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::AllocatorUnavailable`] when the store cannot be reached.
    async fn current(&self) -> Result<Option<i64>, AppError>;

    /// Atomically increments the counter by one and returns the new value.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::AllocatorUnavailable`] when the store cannot be
    /// reached or the increment cannot be confirmed.
    async fn increment(&self) -> Result<i64, AppError>;

    /// Atomically sets the counter to `floor - 1` if it is absent or below `floor`.
    ///
    /// Returns `true` when the counter was reset. Leaves any value at or
    /// above `floor` untouched, so concurrent callers cannot clobber ids that
    /// have already been issued.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::AllocatorUnavailable`] when the store cannot be reached.
    async fn ensure_floor(&self, floor: i64) -> Result<bool, AppError>;
}
