//! HTTP request handlers for API endpoints.

pub mod health;
pub mod redirect;
pub mod shorten;
pub mod urls;

pub use health::{health_handler, ping_handler};
pub use redirect::{missing_code_handler, redirect_handler};
pub use shorten::create_url_handler;
pub use urls::get_url_handler;
