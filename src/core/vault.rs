//! Vault and asset records plus the storage seam they are loaded through

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VaultType {
    Crypto,
    Investment,
    Cash,
}

impl Display for VaultType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                VaultType::Crypto => "crypto",
                VaultType::Investment => "investment",
                VaultType::Cash => "cash",
            }
        )
    }
}

impl FromStr for VaultType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "crypto" => Ok(VaultType::Crypto),
            "investment" => Ok(VaultType::Investment),
            "cash" => Ok(VaultType::Cash),
            _ => Err(anyhow::anyhow!("Invalid vault type: {}", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vault {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub vault_type: VaultType,
    pub color: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub id: String,
    pub vault_id: String,
    pub name: String,
    pub amount: f64,
    pub value_in_eur: f64,
    pub updated_at: DateTime<Utc>,
}

/// Whole-collection persistence for vaults and assets.
///
/// A collection that was never saved loads as empty.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn load_vaults(&self) -> Result<Vec<Vault>>;
    async fn save_vaults(&self, vaults: &[Vault]) -> Result<()>;
    async fn load_assets(&self) -> Result<Vec<Asset>>;
    async fn save_assets(&self, assets: &[Asset]) -> Result<()>;
}
