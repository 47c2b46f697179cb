//! Redirect service: resolves short codes and redirects.
//!
//! Reads configuration from the environment (and `.env` if present), then
//! serves until Ctrl+C or SIGTERM.

use url_shortener_core::{config, server, telemetry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = config::load_from_env()?;
    telemetry::init_tracing(&config);
    config.print_summary();

    server::run_redirect(config).await
}
