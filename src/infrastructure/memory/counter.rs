//! In-process counter.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};

use crate::domain::repositories::CounterStore;
use crate::error::AppError;

/// Marks a counter that has never been set.
const UNSET: i64 = i64::MIN;

/// Lock-free counter with the same semantics as Redis `INCR`.
///
/// Only shared between tasks of one process; it cannot coordinate replicas.
#[derive(Debug)]
pub struct InMemoryCounter {
    value: AtomicI64,
    available: AtomicBool,
}

impl InMemoryCounter {
    pub fn new() -> Self {
        Self {
            value: AtomicI64::new(UNSET),
            available: AtomicBool::new(true),
        }
    }

    /// Creates a counter that already holds `value`.
    pub fn starting_at(value: i64) -> Self {
        let counter = Self::new();
        counter.value.store(value, Ordering::SeqCst);
        counter
    }

    /// Simulates losing (or regaining) the connection to the counter store.
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), AppError> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(AppError::allocator_unavailable("in-memory counter offline"))
        }
    }
}

impl Default for InMemoryCounter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CounterStore for InMemoryCounter {
    async fn current(&self) -> Result<Option<i64>, AppError> {
        self.check_available()?;
        let value = self.value.load(Ordering::SeqCst);
        Ok((value != UNSET).then_some(value))
    }

    async fn increment(&self) -> Result<i64, AppError> {
        self.check_available()?;
        let previous = self
            .value
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |v| {
                if v == UNSET { Some(1) } else { v.checked_add(1) }
            })
            .map_err(|_| AppError::allocator_unavailable("counter overflow"))?;

        Ok(if previous == UNSET { 1 } else { previous + 1 })
    }

    async fn ensure_floor(&self, floor: i64) -> Result<bool, AppError> {
        self.check_available()?;
        let reset = self
            .value
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |v| {
                (v == UNSET || v < floor).then_some(floor - 1)
            })
            .is_ok();

        Ok(reset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_increment_on_unset_counter_starts_at_one() {
        let counter = InMemoryCounter::new();
        assert_eq!(counter.current().await.unwrap(), None);
        assert_eq!(counter.increment().await.unwrap(), 1);
        assert_eq!(counter.increment().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_ensure_floor_resets_only_below_floor() {
        let counter = InMemoryCounter::starting_at(5);
        assert!(counter.ensure_floor(100).await.unwrap());
        assert_eq!(counter.current().await.unwrap(), Some(99));

        // Idempotent while nothing has been issued.
        assert!(counter.ensure_floor(100).await.unwrap());
        assert_eq!(counter.increment().await.unwrap(), 100);

        assert!(!counter.ensure_floor(100).await.unwrap());
        assert_eq!(counter.current().await.unwrap(), Some(100));
    }

    #[tokio::test]
    async fn test_offline_counter_reports_unavailable() {
        let counter = InMemoryCounter::new();
        counter.set_available(false);

        let err = counter.increment().await.unwrap_err();
        assert!(matches!(err, AppError::AllocatorUnavailable(_)));
    }
}
