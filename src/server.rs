//! Service startup and runtime.
//!
//! Handles backend connections, migrations, counter initialization, and the
//! Axum server lifecycle for both services.

use crate::application::services::{Allocator, ResolveService, ShortenService};
use crate::config::Config;
use crate::infrastructure::cache::{CacheService, NullCache, RedisCache};
use crate::infrastructure::counter::RedisCounter;
use crate::infrastructure::persistence::PgUrlRepository;
use crate::routes::{convert_router, redirect_router, with_normalized_path};
use crate::state::{ConvertState, RedirectState};

use anyhow::{Context, Result};
use axum::extract::Request;
use axum::{Router, ServiceExt};
use redis::aio::ConnectionManager;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio_retry::Retry;
use tokio_retry::strategy::{ExponentialBackoff, jitter};

/// Connection attempts made before startup gives up on a backend.
const CONNECT_ATTEMPTS: usize = 5;

/// Runs the write-side service.
///
/// Initializes:
/// - PostgreSQL connection pool
/// - Migrations (unless `RUN_MIGRATIONS=false`)
/// - Redis counter, raised to the configured floor
/// - Axum HTTP server
///
/// # Errors
///
/// Returns an error if:
/// - PostgreSQL or Redis cannot be reached after retries
/// - Migrations fail
/// - Counter initialization fails
/// - Server bind fails
pub async fn run_convert(config: Config) -> Result<()> {
    let pool = connect_postgres(&config).await?;

    if config.run_migrations.unwrap_or(true) {
        run_migrations(&pool).await?;
    }

    let redis = connect_redis(&config.redis_url)
        .await
        .context("Redis is required by the convert service")?;

    let counter = Arc::new(RedisCounter::new(
        redis,
        config.counter_key.clone(),
        config.backend_timeout(),
    ));
    let allocator = Arc::new(Allocator::new(counter, config.counter_floor));
    allocator
        .initialize()
        .await
        .context("Failed to initialize counter")?;

    let url_repository = Arc::new(PgUrlRepository::new(
        Arc::new(pool.clone()),
        config.backend_timeout(),
    ));
    let shorten_service = Arc::new(ShortenService::new(allocator, url_repository));
    let state = ConvertState::new(shorten_service, config.base_url.clone());

    serve(convert_router(state), &config.listen_addr).await?;

    pool.close().await;
    tracing::info!("Convert service stopped");

    Ok(())
}

/// Runs the read-side service.
///
/// Initializes:
/// - PostgreSQL connection pool
/// - Migrations (only with `RUN_MIGRATIONS=true`)
/// - Redis cache, or [`NullCache`] when Redis is unreachable
/// - Axum HTTP server
///
/// # Errors
///
/// Returns an error if PostgreSQL cannot be reached, migrations fail, or the
/// server cannot bind.
pub async fn run_redirect(config: Config) -> Result<()> {
    let pool = connect_postgres(&config).await?;

    if config.run_migrations.unwrap_or(false) {
        run_migrations(&pool).await?;
    }

    let cache: Arc<dyn CacheService> = match connect_redis(&config.redis_url).await {
        Ok(redis) => {
            tracing::info!("Cache enabled (Redis)");
            Arc::new(RedisCache::new(redis, config.backend_timeout()))
        }
        Err(e) => {
            tracing::warn!("Failed to connect to Redis: {:#}. Using NullCache.", e);
            Arc::new(NullCache::new())
        }
    };

    let url_repository = Arc::new(PgUrlRepository::new(
        Arc::new(pool.clone()),
        config.backend_timeout(),
    ));
    let resolve_service = Arc::new(ResolveService::new(
        url_repository,
        cache,
        config.cache_ttl(),
    ));
    let state = RedirectState::new(resolve_service);

    serve(redirect_router(state), &config.listen_addr).await?;

    pool.close().await;
    tracing::info!("Redirect service stopped");

    Ok(())
}

async fn serve(router: Router, listen_addr: &str) -> Result<()> {
    let app = with_normalized_path(router);

    let addr: SocketAddr = listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address: {}", listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn retry_strategy() -> impl Iterator<Item = Duration> {
    // 200ms, 400ms, 800ms, ... capped at 5s
    ExponentialBackoff::from_millis(2)
        .factor(100)
        .max_delay(Duration::from_secs(5))
        .map(jitter)
        .take(CONNECT_ATTEMPTS - 1)
}

/// Opens the PostgreSQL pool, retrying with backoff.
pub async fn connect_postgres(config: &Config) -> Result<PgPool> {
    let options = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime));

    let pool = Retry::start(retry_strategy(), || {
        let options = options.clone();
        async move {
            options.connect(&config.database_url).await.inspect_err(|e| {
                tracing::warn!("Database connection attempt failed: {}", e);
            })
        }
    })
    .await
    .context("Failed to connect to database")?;

    tracing::info!("Connected to database");
    Ok(pool)
}

/// Opens a Redis connection manager, retrying with backoff.
pub async fn connect_redis(redis_url: &str) -> Result<ConnectionManager> {
    let client = redis::Client::open(redis_url).context("Invalid Redis URL")?;

    let manager = Retry::start(retry_strategy(), || {
        let client = client.clone();
        async move {
            ConnectionManager::new(client).await.inspect_err(|e| {
                tracing::warn!("Redis connection attempt failed: {}", e);
            })
        }
    })
    .await
    .context("Failed to connect to Redis")?;

    tracing::info!("Connected to Redis");
    Ok(manager)
}

async fn run_migrations(pool: &PgPool) -> Result<()> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Migrations applied");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, draining connections");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retry_strategy_is_bounded() {
        let delays: Vec<Duration> = retry_strategy().collect();
        assert_eq!(delays.len(), CONNECT_ATTEMPTS - 1);
        assert!(delays.iter().all(|d| *d <= Duration::from_secs(5)));
    }
}
