use super::ui;
use super::{AssetAction, VaultAction};
use crate::core::ledger::{AssetUpdate, Ledger, NewAsset, NewVault, VaultSummary, VaultUpdate};
use crate::core::vault::Asset;
use anyhow::Result;
use comfy_table::Cell;

pub fn vaults_table(summaries: &[VaultSummary], currency: &str) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Vault"),
        ui::header_cell("Type"),
        ui::header_cell("Assets"),
        ui::header_cell(&format!("Value ({currency})")),
        ui::header_cell("Id"),
    ]);

    for summary in summaries {
        table.add_row(vec![
            Cell::new(&summary.vault.name),
            Cell::new(summary.vault.vault_type),
            Cell::new(summary.asset_count),
            ui::money_cell(summary.total_value),
            Cell::new(ui::style_text(&summary.vault.id, ui::StyleType::Subtle)),
        ]);
    }
    table.to_string()
}

pub fn assets_table(assets: &[Asset], currency: &str) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Asset"),
        ui::header_cell("Amount"),
        ui::header_cell(&format!("Value ({currency})")),
        ui::header_cell("Updated"),
        ui::header_cell("Id"),
    ]);

    for asset in assets {
        table.add_row(vec![
            Cell::new(&asset.name),
            ui::amount_cell(asset.amount),
            ui::money_cell(asset.value_in_eur),
            Cell::new(asset.updated_at.format("%Y-%m-%d %H:%M")),
            Cell::new(ui::style_text(&asset.id, ui::StyleType::Subtle)),
        ]);
    }
    table.to_string()
}

fn total_line(label: &str, currency: &str, total: f64) -> String {
    format!(
        "{} ({}): {}",
        label,
        ui::style_text(currency, ui::StyleType::TotalLabel),
        ui::style_text(&ui::format_money(total), ui::StyleType::TotalValue)
    )
}

/// Per-vault totals followed by the grand total.
pub async fn summary(ledger: &Ledger, currency: &str) -> Result<()> {
    let summaries = ledger.summaries().await?;
    if summaries.is_empty() {
        println!("No vaults yet. Create one with `vaultkeep vault add`.");
        return Ok(());
    }

    let total: f64 = summaries.iter().map(|s| s.total_value).sum();
    println!("{}\n", ui::style_text("Vaults", ui::StyleType::Title));
    println!("{}", vaults_table(&summaries, currency));
    println!("\n{}", total_line("Total Value", currency, total));
    Ok(())
}

pub async fn run_vault(action: VaultAction, ledger: &Ledger, currency: &str) -> Result<()> {
    match action {
        VaultAction::Add {
            name,
            vault_type,
            color,
        } => {
            let vault = ledger
                .create_vault(NewVault {
                    name,
                    vault_type,
                    color,
                })
                .await?;
            println!("Created vault {} ({})", vault.name, vault.id);
        }
        VaultAction::List => summary(ledger, currency).await?,
        VaultAction::Show { id } => {
            let Some(vault) = ledger.vault(&id).await? else {
                anyhow::bail!("Vault not found: {}", id);
            };
            let assets = ledger.assets(Some(&vault.id)).await?;
            let total: f64 = assets.iter().map(|a| a.value_in_eur).sum();

            println!(
                "Vault: {} [{}]\n",
                ui::style_text(&vault.name, ui::StyleType::Title),
                vault.vault_type
            );
            if assets.is_empty() {
                println!("{}", ui::style_text("No assets", ui::StyleType::Subtle));
            } else {
                println!("{}", assets_table(&assets, currency));
            }
            println!("\n{}", total_line("Total Value", currency, total));
        }
        VaultAction::Rename { id, name } => {
            let update = VaultUpdate {
                name: Some(name),
                ..Default::default()
            };
            match ledger.update_vault(&id, update).await? {
                Some(vault) => println!("Renamed vault to {}", vault.name),
                None => anyhow::bail!("Vault not found: {}", id),
            }
        }
        VaultAction::Remove { id } => {
            if !ledger.delete_vault(&id).await? {
                anyhow::bail!("Vault not found: {}", id);
            }
            println!("Deleted vault {id}");
        }
    }
    Ok(())
}

pub async fn run_asset(action: AssetAction, ledger: &Ledger, currency: &str) -> Result<()> {
    match action {
        AssetAction::Add {
            vault_id,
            name,
            amount,
            value,
        } => {
            let asset = ledger
                .create_asset(NewAsset {
                    vault_id,
                    name,
                    amount,
                    value_in_eur: value,
                })
                .await?;
            println!("Created asset {} ({})", asset.name, asset.id);
        }
        AssetAction::List { vault } => {
            let assets = ledger.assets(vault.as_deref()).await?;
            println!("{}", assets_table(&assets, currency));
        }
        AssetAction::Set {
            id,
            name,
            amount,
            value,
        } => {
            let update = AssetUpdate {
                name,
                amount,
                value_in_eur: value,
            };
            match ledger.update_asset(&id, update).await? {
                Some(asset) => println!(
                    "Updated {}: amount {}, value {}",
                    asset.name,
                    asset.amount,
                    ui::format_money(asset.value_in_eur)
                ),
                None => anyhow::bail!("Asset not found: {}", id),
            }
        }
        AssetAction::Remove { id } => {
            if !ledger.delete_asset(&id).await? {
                anyhow::bail!("Asset not found: {}", id);
            }
            println!("Deleted asset {id}");
        }
    }
    Ok(())
}
