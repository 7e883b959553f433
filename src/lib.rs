pub mod cli;
pub mod core;
pub mod crypto;
pub mod providers;
pub mod store;

use crate::cli::{AssetAction, VaultAction};
use crate::core::config::AppConfig;
use crate::core::ledger::Ledger;
use crate::crypto::PriceService;
use crate::providers::CoinGeckoProvider;
use crate::store::DiskRecordStore;
use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub enum AppCommand {
    Vault(VaultAction),
    Asset(AssetAction),
    Summary,
    Price { symbol: String, info: bool },
    Prices { symbols: Vec<String> },
    Search { query: String, limit: Option<usize> },
    Refresh { vault_id: String },
}

fn open_ledger(config: &AppConfig) -> Result<Ledger> {
    let data_path = config.data_path()?;
    debug!("Opening records at {}", data_path.display());
    let store = DiskRecordStore::open(&data_path)?;
    Ok(Ledger::new(Arc::new(store)))
}

fn price_service(config: &AppConfig) -> Result<PriceService> {
    let provider = CoinGeckoProvider::new(config.coingecko_base_url())?;
    Ok(PriceService::new(
        Arc::new(provider),
        &config.currency,
        &config.pricing,
    ))
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("vaultkeep starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");
    let currency = config.currency.as_str();

    match command {
        AppCommand::Vault(action) => {
            cli::vaults::run_vault(action, &open_ledger(&config)?, currency).await
        }
        AppCommand::Asset(action) => {
            cli::vaults::run_asset(action, &open_ledger(&config)?, currency).await
        }
        AppCommand::Summary => cli::vaults::summary(&open_ledger(&config)?, currency).await,
        AppCommand::Price { symbol, info } => {
            cli::prices::price(&price_service(&config)?, &symbol, info, currency).await
        }
        AppCommand::Prices { symbols } => {
            cli::prices::prices(&price_service(&config)?, &symbols, currency).await
        }
        AppCommand::Search { query, limit } => {
            let limit = limit.unwrap_or(config.pricing.search_limit);
            cli::prices::search(&price_service(&config)?, &query, limit).await
        }
        AppCommand::Refresh { vault_id } => {
            let ledger = open_ledger(&config)?;
            cli::prices::refresh(&ledger, &price_service(&config)?, &vault_id, currency).await
        }
    }
}
