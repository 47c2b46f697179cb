//! Shared handler state for the two services.

use std::sync::Arc;

use crate::application::services::{ResolveService, ShortenService};

/// State of the write-side service.
#[derive(Clone)]
pub struct ConvertState {
    pub shorten_service: Arc<ShortenService>,
    /// Prefix of returned short URLs, without trailing slash.
    pub base_url: String,
}

impl ConvertState {
    pub fn new(shorten_service: Arc<ShortenService>, base_url: impl Into<String>) -> Self {
        Self {
            shorten_service,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

/// State of the read-side service.
#[derive(Clone)]
pub struct RedirectState {
    pub resolve_service: Arc<ResolveService>,
}

impl RedirectState {
    pub fn new(resolve_service: Arc<ResolveService>) -> Self {
        Self { resolve_service }
    }
}
