use crate::core::vault::{Asset, RecordStore, Vault};
use anyhow::{Context, Result};
use async_trait::async_trait;
use fjall::{Config, Keyspace, PartitionCreateOptions, PartitionHandle, PersistMode};
use serde::{Serialize, de::DeserializeOwned};
use std::path::Path;
use tracing::debug;

const RECORDS_PARTITION: &str = "records";
const VAULTS_KEY: &str = "vaults";
const ASSETS_KEY: &str = "assets";

/// Record store persisted in a fjall keyspace. Each collection is kept as a
/// single JSON document under its own key.
pub struct DiskRecordStore {
    keyspace: Keyspace,
    records: PartitionHandle,
}

impl DiskRecordStore {
    pub fn open(path: &Path) -> Result<Self> {
        std::fs::create_dir_all(path)
            .with_context(|| format!("Failed to create data directory: {}", path.display()))?;

        let keyspace = Config::new(path.join("records"))
            .open()
            .with_context(|| format!("Failed to open record store at {}", path.display()))?;
        let records = keyspace
            .open_partition(RECORDS_PARTITION, PartitionCreateOptions::default())
            .context("Failed to open records partition")?;

        debug!("Opened record store at {}", path.display());
        Ok(Self { keyspace, records })
    }

    fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>> {
        match self
            .records
            .get(key)
            .with_context(|| format!("Failed to read {key}"))?
        {
            Some(bytes) => serde_json::from_slice(&bytes)
                .with_context(|| format!("Failed to parse stored {key}")),
            None => {
                debug!("No stored {}, starting empty", key);
                Ok(Vec::new())
            }
        }
    }

    fn save<T: Serialize>(&self, key: &str, items: &[T]) -> Result<()> {
        let bytes = serde_json::to_vec(items)?;
        self.records
            .insert(key, bytes)
            .with_context(|| format!("Failed to write {key}"))?;
        self.keyspace
            .persist(PersistMode::SyncAll)
            .with_context(|| format!("Failed to persist {key}"))?;
        debug!(count = items.len(), "Saved {}", key);
        Ok(())
    }
}

#[async_trait]
impl RecordStore for DiskRecordStore {
    async fn load_vaults(&self) -> Result<Vec<Vault>> {
        self.load(VAULTS_KEY)
    }

    async fn save_vaults(&self, vaults: &[Vault]) -> Result<()> {
        self.save(VAULTS_KEY, vaults)
    }

    async fn load_assets(&self) -> Result<Vec<Asset>> {
        self.load(ASSETS_KEY)
    }

    async fn save_assets(&self, assets: &[Asset]) -> Result<()> {
        self.save(ASSETS_KEY, assets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use tempfile::TempDir;

    fn asset(id: &str, vault_id: &str) -> Asset {
        Asset {
            id: id.to_string(),
            vault_id: vault_id.to_string(),
            name: "Bitcoin (BTC)".to_string(),
            amount: 0.5,
            value_in_eur: 25000.0,
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_missing_collections_load_empty() {
        let temp_dir = TempDir::new().unwrap();
        let store = DiskRecordStore::open(temp_dir.path()).unwrap();

        assert!(store.load_vaults().await.unwrap().is_empty());
        assert!(store.load_assets().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_records_survive_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let assets = vec![asset("a1", "v1"), asset("a2", "v1")];

        {
            let store = DiskRecordStore::open(temp_dir.path()).unwrap();
            store.save_assets(&assets).await.unwrap();
        }

        let store = DiskRecordStore::open(temp_dir.path()).unwrap();
        assert_eq!(store.load_assets().await.unwrap(), assets);
        assert!(store.load_vaults().await.unwrap().is_empty());
    }
}
