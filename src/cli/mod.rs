//! Command-line front end

pub mod prices;
pub mod setup;
pub mod ui;
pub mod vaults;

use crate::core::vault::VaultType;
use clap::Subcommand;

#[derive(Debug, Clone, Subcommand)]
pub enum VaultAction {
    /// Create a vault
    Add {
        name: String,
        /// One of crypto, investment, cash
        #[arg(short = 't', long = "type")]
        vault_type: VaultType,
        #[arg(short, long, default_value = "#6366f1")]
        color: String,
    },
    /// List vaults with their totals
    List,
    /// Show a vault and its assets
    Show { id: String },
    /// Rename a vault
    Rename { id: String, name: String },
    /// Delete a vault and all of its assets
    Remove { id: String },
}

#[derive(Debug, Clone, Subcommand)]
pub enum AssetAction {
    /// Add an asset to a vault
    Add {
        vault_id: String,
        /// Name, e.g. "Bitcoin (BTC)" so the price refresh can find the ticker
        name: String,
        #[arg(short, long)]
        amount: f64,
        #[arg(short, long, default_value_t = 0.0)]
        value: f64,
    },
    /// List assets, optionally of one vault
    List {
        #[arg(long)]
        vault: Option<String>,
    },
    /// Change name, amount or value of an asset
    Set {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(short, long)]
        amount: Option<f64>,
        #[arg(short, long)]
        value: Option<f64>,
    },
    /// Delete an asset
    Remove { id: String },
}
