//! Shared counter backends.
//!
//! - [`RedisCounter`] - Redis `INCR` counter shared by every replica

mod redis_counter;

pub use redis_counter::{DEFAULT_COUNTER_KEY, RedisCounter};
