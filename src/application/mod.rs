//! Application layer services implementing the write and read paths.
//!
//! Services consume the domain traits and provide a clean API for HTTP
//! handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::allocator::Allocator`] - Unique id allocation over the shared counter
//! - [`services::shorten_service::ShortenService`] - Short code creation
//! - [`services::resolve_service::ResolveService`] - Cache-aside resolution

pub mod services;
