//! Redis implementation of the shared counter.

use async_trait::async_trait;
use redis::{AsyncCommands, Script, aio::ConnectionManager};
use std::future::Future;
use std::time::Duration;
use tokio::time::timeout;

use crate::domain::repositories::CounterStore;
use crate::error::AppError;

/// Default Redis key holding the counter.
pub const DEFAULT_COUNTER_KEY: &str = "url_counter";

/// Sets `KEYS[1]` to `ARGV[2]` (`floor - 1`) when it is missing or below
/// `ARGV[1]` (`floor`).
///
/// Runs atomically on the server, so two replicas starting together cannot
/// interleave a read and a reset around an increment. Values are compared as
/// decimal strings: Lua numbers are doubles and lose precision above 2^53.
const ENSURE_FLOOR_SCRIPT: &str = r#"
local function below(value, floor)
    if string.sub(value, 1, 1) == '-' then
        return true
    end
    if #value ~= #floor then
        return #value < #floor
    end
    return value < floor
end

local current = redis.call('GET', KEYS[1])
if current and not string.match(current, '^%-?%d+$') then
    return redis.error_reply('counter value is not an integer')
end
if not current or below(current, ARGV[1]) then
    redis.call('SET', KEYS[1], ARGV[2])
    return 1
end
return 0
"#;

/// Counter backed by Redis `INCR`.
pub struct RedisCounter {
    conn: ConnectionManager,
    key: String,
    op_timeout: Duration,
    ensure_floor: Script,
}

impl RedisCounter {
    /// Creates a counter stored under `key`.
    pub fn new(conn: ConnectionManager, key: impl Into<String>, op_timeout: Duration) -> Self {
        Self {
            conn,
            key: key.into(),
            op_timeout,
            ensure_floor: Script::new(ENSURE_FLOOR_SCRIPT),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    async fn bounded<T, F>(&self, op: &str, fut: F) -> Result<T, AppError>
    where
        F: Future<Output = redis::RedisResult<T>>,
    {
        timeout(self.op_timeout, fut)
            .await
            .map_err(|_| {
                AppError::allocator_unavailable(format!(
                    "counter {} timed out after {:?}",
                    op, self.op_timeout
                ))
            })?
            .map_err(|e| AppError::allocator_unavailable(format!("counter {} failed: {}", op, e)))
    }
}

#[async_trait]
impl CounterStore for RedisCounter {
    async fn current(&self) -> Result<Option<i64>, AppError> {
        let mut conn = self.conn.clone();
        self.bounded("GET", conn.get::<_, Option<i64>>(&self.key))
            .await
    }

    async fn increment(&self) -> Result<i64, AppError> {
        let mut conn = self.conn.clone();
        self.bounded("INCR", conn.incr::<_, _, i64>(&self.key, 1_i64))
            .await
    }

    async fn ensure_floor(&self, floor: i64) -> Result<bool, AppError> {
        if floor < 1 {
            return Err(AppError::allocator_unavailable(format!(
                "counter floor must be at least 1, got {}",
                floor
            )));
        }

        let mut conn = self.conn.clone();
        let mut invocation = self.ensure_floor.prepare_invoke();
        invocation
            .key(&self.key)
            .arg(floor.to_string())
            .arg((floor - 1).to_string());

        let reset: i64 = self
            .bounded("floor check", invocation.invoke_async(&mut conn))
            .await?;

        Ok(reset == 1)
    }
}
