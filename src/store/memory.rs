use crate::core::vault::{Asset, RecordStore, Vault};
use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

/// In-memory record store, used by tests and throwaway sessions.
#[derive(Default)]
pub struct MemoryRecordStore {
    vaults: RwLock<Vec<Vault>>,
    assets: RwLock<Vec<Asset>>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn load_vaults(&self) -> Result<Vec<Vault>> {
        Ok(self.vaults.read().await.clone())
    }

    async fn save_vaults(&self, vaults: &[Vault]) -> Result<()> {
        debug!(count = vaults.len(), "Saving vaults in memory");
        *self.vaults.write().await = vaults.to_vec();
        Ok(())
    }

    async fn load_assets(&self) -> Result<Vec<Asset>> {
        Ok(self.assets.read().await.clone())
    }

    async fn save_assets(&self, assets: &[Asset]) -> Result<()> {
        debug!(count = assets.len(), "Saving assets in memory");
        *self.assets.write().await = assets.to_vec();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::vault::VaultType;
    use chrono::Utc;

    #[tokio::test]
    async fn test_memory_store_starts_empty_and_replaces_wholesale() {
        let store = MemoryRecordStore::new();
        assert!(store.load_vaults().await.unwrap().is_empty());

        let vault = Vault {
            id: "v1".to_string(),
            name: "Savings".to_string(),
            vault_type: VaultType::Cash,
            color: "green".to_string(),
            created_at: Utc::now(),
        };
        store.save_vaults(&[vault.clone()]).await.unwrap();
        assert_eq!(store.load_vaults().await.unwrap(), vec![vault]);

        store.save_vaults(&[]).await.unwrap();
        assert!(store.load_vaults().await.unwrap().is_empty());
    }
}
