//! PostgreSQL implementation of the record store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::{FromRow, PgPool};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

use crate::domain::entities::UrlRecord;
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;
use crate::utils::db_error::map_sqlx_error;

#[derive(FromRow)]
struct UrlRow {
    id: i64,
    original_url: String,
    short_code: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<UrlRow> for UrlRecord {
    fn from(r: UrlRow) -> Self {
        UrlRecord::new(r.id, r.original_url, r.short_code, r.created_at, r.updated_at)
    }
}

/// PostgreSQL repository for URL records.
///
/// Uniqueness of `short_code` is enforced by the `urls_short_code_key`
/// constraint, not by a prior lookup.
pub struct PgUrlRepository {
    pool: Arc<PgPool>,
    query_timeout: Duration,
}

impl PgUrlRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>, query_timeout: Duration) -> Self {
        Self {
            pool,
            query_timeout,
        }
    }

    async fn bounded<T, F>(&self, fut: F) -> Result<T, sqlx::Error>
    where
        F: Future<Output = Result<T, sqlx::Error>>,
    {
        timeout(self.query_timeout, fut)
            .await
            .unwrap_or(Err(sqlx::Error::PoolTimedOut))
    }
}

#[async_trait]
impl UrlRepository for PgUrlRepository {
    async fn save(&self, original_url: &str, short_code: &str) -> Result<UrlRecord, AppError> {
        let row = self
            .bounded(
                sqlx::query_as::<_, UrlRow>(
                    r#"
                    INSERT INTO urls (original_url, short_code)
                    VALUES ($1, $2)
                    RETURNING id, original_url, short_code, created_at, updated_at
                    "#,
                )
                .bind(original_url)
                .bind(short_code)
                .fetch_one(self.pool.as_ref()),
            )
            .await
            .map_err(|e| map_sqlx_error(e, short_code))?;

        Ok(row.into())
    }

    async fn get_by_short_code(&self, short_code: &str) -> Result<UrlRecord, AppError> {
        let row = self
            .bounded(
                sqlx::query_as::<_, UrlRow>(
                    r#"
                    SELECT id, original_url, short_code, created_at, updated_at
                    FROM urls
                    WHERE short_code = $1
                    "#,
                )
                .bind(short_code)
                .fetch_optional(self.pool.as_ref()),
            )
            .await
            .map_err(|e| map_sqlx_error(e, short_code))?;

        row.map(UrlRecord::from).ok_or_else(|| {
            AppError::not_found("Short code not found", json!({ "short_code": short_code }))
        })
    }

    async fn health_check(&self) -> bool {
        self.bounded(sqlx::query_scalar::<_, i32>("SELECT 1").fetch_one(self.pool.as_ref()))
            .await
            .is_ok()
    }
}
