#![allow(dead_code)]

use axum_test::TestServer;
use redis::aio::ConnectionManager;
use std::sync::Arc;
use url_shortener_core::application::services::{
    Allocator, DEFAULT_CACHE_TTL, ResolveService, ShortenService,
};
use url_shortener_core::config::DEFAULT_REDIS_URL;
use url_shortener_core::infrastructure::memory::{
    InMemoryCache, InMemoryCounter, InMemoryUrlRepository,
};
use url_shortener_core::routes::{convert_router, redirect_router};
use url_shortener_core::state::{ConvertState, RedirectState};
use url_shortener_core::utils::code_generator::Salt;

pub const TEST_BASE_URL: &str = "http://sho.rt";

/// In-memory backends shared between a convert and a redirect server.
#[derive(Clone)]
pub struct Backends {
    pub counter: Arc<InMemoryCounter>,
    pub repository: Arc<InMemoryUrlRepository>,
    pub cache: Arc<InMemoryCache>,
}

impl Backends {
    pub fn new() -> Self {
        Self {
            counter: Arc::new(InMemoryCounter::new()),
            repository: Arc::new(InMemoryUrlRepository::new()),
            cache: Arc::new(InMemoryCache::new()),
        }
    }
}

pub fn zero_salt() -> Salt {
    Salt::new(0).unwrap()
}

/// Builds the convert state with the counter raised to `floor`.
pub async fn convert_state(backends: &Backends, floor: i64) -> ConvertState {
    let allocator = Arc::new(Allocator::new(backends.counter.clone(), floor));
    allocator.initialize().await.unwrap();

    let service = ShortenService::new(allocator, backends.repository.clone())
        .with_salt_source(zero_salt);

    ConvertState::new(Arc::new(service), TEST_BASE_URL)
}

pub fn redirect_state(backends: &Backends) -> RedirectState {
    let service = ResolveService::new(
        backends.repository.clone(),
        backends.cache.clone(),
        DEFAULT_CACHE_TTL,
    );

    RedirectState::new(Arc::new(service))
}

pub async fn convert_server(backends: &Backends, floor: i64) -> TestServer {
    TestServer::new(convert_router(convert_state(backends, floor).await)).unwrap()
}

pub fn redirect_server(backends: &Backends) -> TestServer {
    TestServer::new(redirect_router(redirect_state(backends))).unwrap()
}

/// Connects to `REDIS_URL` (default: local Redis).
pub async fn redis_connection() -> ConnectionManager {
    let url = std::env::var("REDIS_URL").unwrap_or_else(|_| DEFAULT_REDIS_URL.to_string());
    url_shortener_core::server::connect_redis(&url).await.unwrap()
}

/// Key or code unique to one test run, so tests can share a Redis instance.
pub fn unique(prefix: &str) -> String {
    format!("{}{:016x}", prefix, rand::random::<u64>())
}
