//! Vault and asset bookkeeping on top of a [`RecordStore`]

use super::vault::{Asset, RecordStore, Vault, VaultType};
use crate::crypto::{PriceService, symbol_from_asset_name};
use anyhow::{Result, bail};
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct NewVault {
    pub name: String,
    pub vault_type: VaultType,
    pub color: String,
}

#[derive(Debug, Clone, Default)]
pub struct VaultUpdate {
    pub name: Option<String>,
    pub vault_type: Option<VaultType>,
    pub color: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewAsset {
    pub vault_id: String,
    pub name: String,
    pub amount: f64,
    pub value_in_eur: f64,
}

#[derive(Debug, Clone, Default)]
pub struct AssetUpdate {
    pub name: Option<String>,
    pub amount: Option<f64>,
    pub value_in_eur: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VaultSummary {
    pub vault: Vault,
    pub total_value: f64,
    pub asset_count: usize,
}

/// Outcome of re-pricing the crypto assets of a vault.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RefreshReport {
    pub updated: Vec<Asset>,
    /// Names of assets left untouched, either because no ticker could be read
    /// from the name or because the ticker has no price.
    pub skipped: Vec<String>,
}

pub struct Ledger {
    store: Arc<dyn RecordStore>,
}

impl Ledger {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    pub async fn create_vault(&self, new: NewVault) -> Result<Vault> {
        if new.name.trim().is_empty() || new.color.trim().is_empty() {
            bail!("Missing required fields: name, color");
        }

        let mut vaults = self.store.load_vaults().await?;
        let vault = Vault {
            id: Uuid::new_v4().to_string(),
            name: new.name.trim().to_string(),
            vault_type: new.vault_type,
            color: new.color.trim().to_string(),
            created_at: Utc::now(),
        };
        vaults.push(vault.clone());
        self.store.save_vaults(&vaults).await?;
        info!(id = %vault.id, name = %vault.name, "Created vault");
        Ok(vault)
    }

    pub async fn vaults(&self) -> Result<Vec<Vault>> {
        self.store.load_vaults().await
    }

    pub async fn vault(&self, id: &str) -> Result<Option<Vault>> {
        let vaults = self.store.load_vaults().await?;
        Ok(vaults.into_iter().find(|v| v.id == id))
    }

    pub async fn update_vault(&self, id: &str, update: VaultUpdate) -> Result<Option<Vault>> {
        let mut vaults = self.store.load_vaults().await?;
        let Some(vault) = vaults.iter_mut().find(|v| v.id == id) else {
            return Ok(None);
        };

        if let Some(name) = update.name {
            vault.name = name;
        }
        if let Some(vault_type) = update.vault_type {
            vault.vault_type = vault_type;
        }
        if let Some(color) = update.color {
            vault.color = color;
        }
        let updated = vault.clone();
        self.store.save_vaults(&vaults).await?;
        Ok(Some(updated))
    }

    /// Removes a vault together with every asset it holds. Assets are
    /// written first so a failed save never leaves orphaned assets behind.
    pub async fn delete_vault(&self, id: &str) -> Result<bool> {
        let mut vaults = self.store.load_vaults().await?;
        let before = vaults.len();
        vaults.retain(|v| v.id != id);
        if vaults.len() == before {
            return Ok(false);
        }

        let mut assets = self.store.load_assets().await?;
        let assets_before = assets.len();
        assets.retain(|a| a.vault_id != id);
        if assets.len() != assets_before {
            self.store.save_assets(&assets).await?;
        }
        self.store.save_vaults(&vaults).await?;
        info!(
            id,
            removed_assets = assets_before - assets.len(),
            "Deleted vault"
        );
        Ok(true)
    }

    pub async fn create_asset(&self, new: NewAsset) -> Result<Asset> {
        if new.name.trim().is_empty() {
            bail!("Missing required field: name");
        }
        if !new.amount.is_finite() || !new.value_in_eur.is_finite() {
            bail!("Amount and value must be finite numbers");
        }
        if self.vault(&new.vault_id).await?.is_none() {
            bail!("Vault not found: {}", new.vault_id);
        }

        let mut assets = self.store.load_assets().await?;
        let asset = Asset {
            id: Uuid::new_v4().to_string(),
            vault_id: new.vault_id,
            name: new.name.trim().to_string(),
            amount: new.amount,
            value_in_eur: new.value_in_eur,
            updated_at: Utc::now(),
        };
        assets.push(asset.clone());
        self.store.save_assets(&assets).await?;
        debug!(id = %asset.id, vault_id = %asset.vault_id, "Created asset");
        Ok(asset)
    }

    /// All assets, or only those of `vault_id` when given.
    pub async fn assets(&self, vault_id: Option<&str>) -> Result<Vec<Asset>> {
        let assets = self.store.load_assets().await?;
        Ok(match vault_id {
            Some(vault_id) => assets.into_iter().filter(|a| a.vault_id == vault_id).collect(),
            None => assets,
        })
    }

    pub async fn asset(&self, id: &str) -> Result<Option<Asset>> {
        let assets = self.store.load_assets().await?;
        Ok(assets.into_iter().find(|a| a.id == id))
    }

    pub async fn update_asset(&self, id: &str, update: AssetUpdate) -> Result<Option<Asset>> {
        if update.amount.is_some_and(|v| !v.is_finite())
            || update.value_in_eur.is_some_and(|v| !v.is_finite())
        {
            bail!("Amount and value must be finite numbers");
        }

        let mut assets = self.store.load_assets().await?;
        let Some(asset) = assets.iter_mut().find(|a| a.id == id) else {
            return Ok(None);
        };

        if let Some(name) = update.name {
            asset.name = name;
        }
        if let Some(amount) = update.amount {
            asset.amount = amount;
        }
        if let Some(value) = update.value_in_eur {
            asset.value_in_eur = value;
        }
        asset.updated_at = Utc::now();
        let updated = asset.clone();
        self.store.save_assets(&assets).await?;
        Ok(Some(updated))
    }

    pub async fn delete_asset(&self, id: &str) -> Result<bool> {
        let mut assets = self.store.load_assets().await?;
        let before = assets.len();
        assets.retain(|a| a.id != id);
        if assets.len() == before {
            return Ok(false);
        }
        self.store.save_assets(&assets).await?;
        Ok(true)
    }

    pub async fn total_value(&self) -> Result<f64> {
        let assets = self.store.load_assets().await?;
        Ok(assets.iter().map(|a| a.value_in_eur).sum())
    }

    pub async fn total_value_by_vault(&self, vault_id: &str) -> Result<f64> {
        let assets = self.assets(Some(vault_id)).await?;
        Ok(assets.iter().map(|a| a.value_in_eur).sum())
    }

    /// One row per vault, in creation order.
    pub async fn summaries(&self) -> Result<Vec<VaultSummary>> {
        let vaults = self.store.load_vaults().await?;
        let assets = self.store.load_assets().await?;

        let mut totals: HashMap<&str, (f64, usize)> = HashMap::new();
        for asset in &assets {
            let entry = totals.entry(asset.vault_id.as_str()).or_default();
            entry.0 += asset.value_in_eur;
            entry.1 += 1;
        }

        Ok(vaults
            .into_iter()
            .map(|vault| {
                let (total_value, asset_count) =
                    totals.get(vault.id.as_str()).copied().unwrap_or_default();
                VaultSummary {
                    vault,
                    total_value,
                    asset_count,
                }
            })
            .collect())
    }

    /// Re-values the assets of a vault from live crypto prices.
    ///
    /// Tickers are read from asset names, priced with a single batch lookup,
    /// and each priced asset becomes worth `amount * price`.
    pub async fn refresh_crypto_prices(
        &self,
        vault_id: &str,
        prices: &PriceService,
    ) -> Result<RefreshReport> {
        if self.vault(vault_id).await?.is_none() {
            bail!("Vault not found: {}", vault_id);
        }

        let mut assets = self.store.load_assets().await?;
        let symbols: HashMap<String, String> = assets
            .iter()
            .filter(|a| a.vault_id == vault_id)
            .filter_map(|a| symbol_from_asset_name(&a.name).map(|s| (a.id.clone(), s)))
            .collect();

        let mut report = RefreshReport::default();
        let quotes = if symbols.is_empty() {
            HashMap::new()
        } else {
            let wanted: Vec<&String> = symbols.values().collect();
            prices.get_multiple(&wanted).await
        };

        let now = Utc::now();
        for asset in assets.iter_mut().filter(|a| a.vault_id == vault_id) {
            let price = symbols.get(&asset.id).and_then(|s| quotes.get(s));
            match price {
                Some(price) => {
                    asset.value_in_eur = asset.amount * price;
                    asset.updated_at = now;
                    report.updated.push(asset.clone());
                }
                None => report.skipped.push(asset.name.clone()),
            }
        }

        if !report.updated.is_empty() {
            self.store.save_assets(&assets).await?;
        }
        info!(
            vault_id,
            updated = report.updated.len(),
            skipped = report.skipped.len(),
            "Refreshed crypto prices"
        );
        Ok(report)
    }
}
