use crate::core::cache::Cache;
use crate::core::clock::Clock;
use crate::core::coin::{CoinMarketApi, CoinRecord};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

const CATALOG_KEY: &str = "coins/list";

/// Long-lived cache of the upstream coin catalog.
///
/// A generation is only stored when upstream returned at least one record,
/// so a failed or empty fetch is retried on the very next call instead of
/// being remembered for the whole TTL.
pub struct CoinDirectory {
    api: Arc<dyn CoinMarketApi>,
    cache: Cache<&'static str, Arc<Vec<CoinRecord>>>,
}

impl CoinDirectory {
    pub fn new(api: Arc<dyn CoinMarketApi>, ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            api,
            cache: Cache::new(ttl, clock),
        }
    }

    /// Returns the current catalog, fetching it when the cached generation is
    /// missing or stale. Yields an empty list when upstream is unavailable.
    pub async fn records(&self) -> Arc<Vec<CoinRecord>> {
        if let Some(entry) = self.cache.get(&CATALOG_KEY) {
            return entry.value;
        }

        match self.api.coin_list().await {
            Ok(records) if !records.is_empty() => {
                debug!(count = records.len(), "Refreshed coin directory");
                let records = Arc::new(records);
                self.cache.put(CATALOG_KEY, Arc::clone(&records));
                records
            }
            Ok(_) => {
                warn!("Coin catalog response was empty, not caching it");
                Arc::default()
            }
            Err(e) => {
                warn!(error = %e, "Failed to fetch coin catalog");
                Arc::default()
            }
        }
    }
}
