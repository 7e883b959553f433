use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use vaultkeep::cli::{AssetAction, VaultAction};
use vaultkeep::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for vaultkeep::AppCommand {
    fn from(cmd: Commands) -> vaultkeep::AppCommand {
        match cmd {
            Commands::Vault { action } => vaultkeep::AppCommand::Vault(action),
            Commands::Asset { action } => vaultkeep::AppCommand::Asset(action),
            Commands::Summary => vaultkeep::AppCommand::Summary,
            Commands::Price { symbol, info } => vaultkeep::AppCommand::Price { symbol, info },
            Commands::Prices { symbols } => vaultkeep::AppCommand::Prices { symbols },
            Commands::Search { query, limit } => vaultkeep::AppCommand::Search { query, limit },
            Commands::Refresh { vault_id } => vaultkeep::AppCommand::Refresh { vault_id },
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Manage vaults
    Vault {
        #[command(subcommand)]
        action: VaultAction,
    },
    /// Manage assets inside vaults
    Asset {
        #[command(subcommand)]
        action: AssetAction,
    },
    /// Display the value of every vault
    Summary,
    /// Look up the price of one crypto ticker
    Price {
        symbol: String,
        /// Also show the coin name
        #[arg(long)]
        info: bool,
    },
    /// Look up several crypto tickers at once
    Prices {
        #[arg(required = true)]
        symbols: Vec<String>,
    },
    /// Search coins by name or ticker
    Search {
        query: String,
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Re-value the crypto assets of a vault from live prices
    Refresh { vault_id: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => vaultkeep::cli::setup::setup(),
        Some(cmd) => vaultkeep::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
