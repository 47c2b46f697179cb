//! Tracing subscriber setup shared by the binaries.

use tracing_subscriber::EnvFilter;

use crate::config::Config;

/// Installs the global subscriber.
///
/// `log_level` accepts any `EnvFilter` directive (e.g. `info`,
/// `url_shortener_core=debug,tower_http=info`). Invalid directives fall back to `info`.
/// `log_format = "json"` switches to one JSON object per line.
pub fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    if config.log_format.eq_ignore_ascii_case("json") {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
