//! CLI administration tool for the URL shortener.
//!
//! Inspects and initializes the shared counter, checks the record store, and
//! decodes short codes without going through the HTTP services.
//!
//! # Usage
//!
//! ```bash
//! # Show the counter value and the next id it will issue
//! cargo run --bin admin -- counter show
//!
//! # Raise the counter to a floor (default: COUNTER_FLOOR)
//! cargo run --bin admin -- counter init --floor 100
//!
//! # Allocate one id by hand
//! cargo run --bin admin -- counter next
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//!
//! # Check cache connection
//! cargo run --bin admin -- cache check
//!
//! # Decode a short code and show its record
//! cargo run --bin admin -- lookup 0000G8a
//! ```
//!
//! # Environment Variables
//!
//! Same as the services; see `url_shortener_core::config`.

use url_shortener_core::application::services::Allocator;
use url_shortener_core::config::{self, Config};
use url_shortener_core::domain::repositories::{CounterStore, UrlRepository};
use url_shortener_core::error::AppError;
use url_shortener_core::infrastructure::cache::{CacheService, RedisCache};
use url_shortener_core::infrastructure::counter::RedisCounter;
use url_shortener_core::infrastructure::persistence::PgUrlRepository;
use url_shortener_core::server::{connect_postgres, connect_redis};
use url_shortener_core::utils::code_generator::decode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing the URL shortener.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Shared counter operations
    Counter {
        #[command(subcommand)]
        action: CounterAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },

    /// Cache operations
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },

    /// Decode a short code and show its record
    Lookup {
        /// Short code to inspect
        code: String,
    },
}

/// Counter subcommands.
#[derive(Subcommand)]
enum CounterAction {
    /// Show the current counter value
    Show,

    /// Raise the counter to a floor if it is missing or below it
    Init {
        /// Floor to apply (default: COUNTER_FLOOR)
        #[arg(short, long)]
        floor: Option<i64>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Allocate one id
    Next {
        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Cache operation subcommands.
#[derive(Subcommand)]
enum CacheAction {
    /// Check cache connection
    Check,
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show record counts
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = config::load_from_env()?;

    match cli.command {
        Commands::Counter { action } => handle_counter_action(action, &config).await?,
        Commands::Db { action } => handle_db_action(action, &config).await?,
        Commands::Cache { action } => handle_cache_action(action, &config).await?,
        Commands::Lookup { code } => lookup(&code, &config).await?,
    }

    Ok(())
}

async fn redis_counter(config: &Config) -> Result<Arc<RedisCounter>> {
    let conn = connect_redis(&config.redis_url).await?;
    Ok(Arc::new(RedisCounter::new(
        conn,
        config.counter_key.clone(),
        config.backend_timeout(),
    )))
}

fn app_err(e: AppError) -> anyhow::Error {
    anyhow::anyhow!("{}", e)
}

/// Dispatches counter commands.
async fn handle_counter_action(action: CounterAction, config: &Config) -> Result<()> {
    let counter = redis_counter(config).await?;

    match action {
        CounterAction::Show => show_counter(counter, config).await?,
        CounterAction::Init { floor, yes } => {
            init_counter(counter, floor.unwrap_or(config.counter_floor), yes).await?
        }
        CounterAction::Next { yes } => next_id(counter, config, yes).await?,
    }

    Ok(())
}

/// Prints the counter value and the id the next allocation will return.
///
/// # Output Format
///
/// ```text
/// 🔢 Counter
///
///   Key:     url_counter
///   Value:   56800235600
///   Next id: 56800235601
///   Floor:   56800235584
/// ```
async fn show_counter(counter: Arc<RedisCounter>, config: &Config) -> Result<()> {
    println!("{}", "🔢 Counter".bright_blue().bold());
    println!();

    let current = counter.current().await.map_err(app_err)?;

    println!("  Key:     {}", counter.key().cyan());
    match current {
        Some(value) => {
            println!("  Value:   {}", value.to_string().bright_white().bold());
            println!("  Next id: {}", (value + 1).to_string().green());
        }
        None => {
            println!("  Value:   {}", "unset".yellow());
            println!(
                "  Next id: {} (after initialization)",
                config.counter_floor.to_string().green()
            );
        }
    }
    println!("  Floor:   {}", config.counter_floor.to_string().bright_black());
    println!();

    Ok(())
}

/// Applies a floor to the counter with confirmation.
///
/// # Safety
///
/// - A counter already at or above the floor is never lowered
/// - Requires confirmation unless `--yes`
async fn init_counter(counter: Arc<RedisCounter>, floor: i64, skip_confirm: bool) -> Result<()> {
    println!("{}", "🔧 Initialize Counter".bright_blue().bold());
    println!();

    if floor < 1 {
        anyhow::bail!("Floor must be at least 1, got {}", floor);
    }

    println!("  Key:   {}", counter.key().cyan());
    println!("  Floor: {}", floor.to_string().bright_white().bold());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Apply this floor?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let raised = counter.ensure_floor(floor).await.map_err(app_err)?;

    if raised {
        println!(
            "{}",
            format!("✅ Counter reset, next id is {}", floor)
                .green()
                .bold()
        );
    } else {
        let current = counter.current().await.map_err(app_err)?;
        println!(
            "{}",
            format!(
                "⚠️  Counter already at {}, left untouched",
                current.unwrap_or_default()
            )
            .yellow()
        );
    }
    println!();

    Ok(())
}

/// Allocates one id through the same path the convert service uses.
async fn next_id(counter: Arc<RedisCounter>, config: &Config, skip_confirm: bool) -> Result<()> {
    println!("{}", "➕ Allocate Id".bright_blue().bold());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("The id will be consumed. Continue?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let allocator = Allocator::new(counter, config.counter_floor);
    let id = allocator.next_id().await.map_err(app_err)?;

    println!("  Id: {}", id.to_string().bright_white().bold());
    println!();

    Ok(())
}

/// Dispatches database commands.
async fn handle_db_action(action: DbAction, config: &Config) -> Result<()> {
    let pool = connect_postgres(config).await?;

    match action {
        DbAction::Check => check_database(&pool, config).await?,
        DbAction::Info => database_info(&pool).await?,
    }

    pool.close().await;
    Ok(())
}

/// Runs the same probe the record store exposes, then counts records.
async fn check_database(pool: &PgPool, config: &Config) -> Result<()> {
    println!("{}", "🔍 Checking database connection...".bright_blue());

    let repository = PgUrlRepository::new(Arc::new(pool.clone()), config.backend_timeout());
    if !repository.health_check().await {
        println!("{}", "❌ Database did not answer".red().bold());
        anyhow::bail!("Database health check failed");
    }

    let records: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM urls")
        .fetch_one(pool)
        .await?;

    println!("{}", "✅ Database connection OK".green().bold());
    println!("  Records: {}", records.to_string().bright_white());
    println!();

    Ok(())
}

async fn database_info(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Database Info".bright_blue().bold());
    println!();

    let records: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM urls")
        .fetch_one(pool)
        .await?;
    let latest: Option<i64> = sqlx::query_scalar("SELECT MAX(id) FROM urls")
        .fetch_one(pool)
        .await?;

    println!("  Records:   {}", records.to_string().bright_white().bold());
    println!(
        "  Latest id: {}",
        latest
            .map(|id| id.to_string())
            .unwrap_or_else(|| "-".to_string())
            .cyan()
    );
    println!();

    Ok(())
}

/// Dispatches cache commands.
async fn handle_cache_action(action: CacheAction, config: &Config) -> Result<()> {
    let conn = connect_redis(&config.redis_url).await?;
    let cache = RedisCache::new(conn, config.backend_timeout());

    match action {
        CacheAction::Check => check_cache(&cache).await?,
    }

    Ok(())
}

async fn check_cache(cache: &RedisCache) -> Result<()> {
    println!("{}", "🔍 Checking cache connection...".bright_blue());

    if !cache.health_check().await {
        println!("{}", "❌ Cache did not answer PING".red().bold());
        anyhow::bail!("Cache health check failed");
    }

    println!("{}", "✅ Cache connection OK".green().bold());
    println!();

    Ok(())
}

/// Decodes `code` into `(id, salt)` and prints the stored record and the
/// cached mapping, if any.
async fn lookup(code: &str, config: &Config) -> Result<()> {
    println!("{}", "🔎 Lookup".bright_blue().bold());
    println!();

    let Some((id, salt)) = decode(code) else {
        println!("{}", "❌ Not a base-62 short code".red());
        return Ok(());
    };

    println!("  Code:      {}", code.cyan());
    println!("  Id:        {}", id.to_string().bright_white().bold());
    println!("  Salt:      {}", salt.to_string().bright_black());

    let pool = connect_postgres(config).await?;
    let repository = PgUrlRepository::new(Arc::new(pool.clone()), config.backend_timeout());

    match repository.get_by_short_code(code).await {
        Ok(record) => {
            println!("  URL:       {}", record.original_url.green());
            println!(
                "  Created:   {}",
                record
                    .created_at
                    .format("%Y-%m-%d %H:%M:%S")
                    .to_string()
                    .bright_black()
            );
        }
        Err(AppError::NotFound { .. }) => {
            println!("  URL:       {}", "no record".yellow());
        }
        Err(e) => return Err(app_err(e)),
    }

    let conn = connect_redis(&config.redis_url).await?;
    let cache = RedisCache::new(conn, config.backend_timeout());
    match cache.get_url(code).await.map_err(AppError::from) {
        Ok(Some(url)) => println!("  Cached:    {}", url.green()),
        Ok(None) => println!("  Cached:    {}", "no".bright_black()),
        Err(e) => println!("  Cached:    {}", e.to_string().yellow()),
    }
    println!();

    pool.close().await;
    Ok(())
}
