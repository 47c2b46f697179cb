//! Unique id allocation over the shared counter.

use std::sync::Arc;

use tracing::info;

use crate::domain::repositories::CounterStore;
use crate::error::AppError;

/// Issues fleet-wide unique, strictly increasing ids.
///
/// Every id comes from a single atomic increment of the shared counter; the
/// allocator never caches or pre-allocates ranges, and never retries.
pub struct Allocator {
    counter: Arc<dyn CounterStore>,
    floor: i64,
}

impl Allocator {
    pub fn new(counter: Arc<dyn CounterStore>, floor: i64) -> Self {
        Self { counter, floor }
    }

    /// Raises the counter to the configured floor if needed.
    ///
    /// Run once per replica at startup. After a reset the next
    /// [`next_id`](Self::next_id) returns exactly `floor`. A counter already at
    /// or above the floor is left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::AllocatorUnavailable`] if the counter store is unreachable.
    pub async fn initialize(&self) -> Result<(), AppError> {
        if self.counter.ensure_floor(self.floor).await? {
            info!("Initialized counter to start from {}", self.floor);
        } else {
            let current = self.counter.current().await?;
            info!("Counter already initialized with value: {:?}", current);
        }

        Ok(())
    }

    /// Atomically allocates the next id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::AllocatorUnavailable`] if the counter store cannot be
    /// reached, the increment is not confirmed, or the counter holds a
    /// non-positive value.
    pub async fn next_id(&self) -> Result<u64, AppError> {
        let value = self.counter.increment().await?;
        metrics::counter!("shortener_allocations_total").increment(1);

        u64::try_from(value)
            .ok()
            .filter(|v| *v > 0)
            .ok_or_else(|| {
                AppError::allocator_unavailable(format!("counter returned invalid value {}", value))
            })
    }
}
