pub mod cli;
pub mod core;
pub mod funds;
pub mod providers;
pub mod store;

use std::io::BufRead;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tracing::{debug, info};

use crate::core::config::AppConfig;
use crate::funds::FundService;
use crate::providers::SmartQuoteProvider;

pub async fn run(config_path: Option<&str>) -> Result<()> {
    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    run_console(&config, &mut input).await
}

/// Wires the store and the quote client from the given config and enters
/// the menu loop on the given input.
pub async fn run_console(config: &AppConfig, input: &mut impl BufRead) -> Result<()> {
    info!("Fund manager console starting...");

    let db_path = config.db_path()?;
    store::init(&db_path)?;
    let pool = store::create_pool(&db_path)?;
    store::run_migrations(&pool)?;

    let provider = SmartQuoteProvider::new(
        &config.quotes.base_url,
        Duration::from_secs(config.quotes.timeout_secs),
    )?;
    let service = FundService::new(pool, Arc::new(provider));

    cli::menu::run(&service, input).await
}
