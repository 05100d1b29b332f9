//! Potion shop server binary.
//!
//! Loads configuration, initializes logging, connects to `PostgreSQL`,
//! runs migrations, and serves the shop API until `Ctrl-C`.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `potionshop-config.yaml` (defaults if absent)
//! 2. Initialize structured logging (tracing)
//! 3. Connect to `PostgreSQL` and run migrations
//! 4. Build shared state and serve HTTP
//! 5. Close the pool on shutdown

mod config;

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use potionshop_api::{AppState, start_server};
use potionshop_db::{PostgresPool, Shop};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::{CONFIG_FILE, LogFormat, LoggingSection, ShopConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Load configuration.
    let (config, from_file) = load_config().context("failed to load configuration")?;

    // 2. Initialize structured logging.
    init_tracing(&config.logging);
    info!("potionshop-server starting");
    if from_file {
        info!(path = CONFIG_FILE, "Configuration loaded");
    } else {
        info!(path = CONFIG_FILE, "Config file not found, using defaults");
    }
    config.validate()?;

    // 3. Connect and migrate.
    let pool = PostgresPool::connect(&config.database.postgres_config())
        .await
        .context("failed to connect to PostgreSQL")?;
    pool.run_migrations()
        .await
        .context("failed to run migrations")?;

    // 4. Serve.
    info!(
        host = %config.server.host,
        port = config.server.port,
        target_policy = ?config.planner.target_policy,
        "Starting shop API"
    );
    let state = Arc::new(AppState::new(
        Shop::new(pool.clone()),
        config.auth.api_key.clone(),
        config.planner.target_policy,
    ));
    start_server(&config.server.server_config(), state)
        .await
        .context("shop API failed")?;

    // 5. Shut down.
    pool.close().await;
    info!("potionshop-server stopped");
    Ok(())
}

/// Load `potionshop-config.yaml` if present, otherwise defaults with
/// environment overrides. The flag reports whether the file was found.
fn load_config() -> Result<(ShopConfig, bool), config::ConfigError> {
    let path = Path::new(CONFIG_FILE);
    if path.exists() {
        Ok((ShopConfig::from_file(path)?, true))
    } else {
        let mut config = ShopConfig::default();
        config.apply_env_overrides()?;
        Ok((config, false))
    }
}

fn init_tracing(logging: &LoggingSection) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    match logging.format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .init(),
        LogFormat::Text => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .init(),
    }
}
