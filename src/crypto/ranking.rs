use crate::core::coin::CoinMarketApi;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Fetches the market-cap ranking snapshot used to break ticker collisions.
///
/// There is deliberately no cache here: rankings are only requested while a
/// colliding ticker is being resolved.
pub struct RankingFetcher {
    api: Arc<dyn CoinMarketApi>,
    vs_currency: String,
    page_size: u32,
}

impl RankingFetcher {
    pub fn new(api: Arc<dyn CoinMarketApi>, vs_currency: &str, page_size: u32) -> Self {
        Self {
            api,
            vs_currency: vs_currency.to_lowercase(),
            page_size,
        }
    }

    /// Coin id to market-cap rank, restricted to positively ranked coins.
    /// `None` means the ranking is unavailable, which is not the same as an
    /// empty ranking.
    pub async fn rankings(&self) -> Option<HashMap<String, u32>> {
        match self
            .api
            .market_ranks(&self.vs_currency, self.page_size)
            .await
        {
            Ok(entries) => {
                let ranks: HashMap<String, u32> = entries
                    .into_iter()
                    .filter_map(|entry| match entry.rank {
                        Some(rank) if rank > 0 => Some((entry.id, rank)),
                        _ => None,
                    })
                    .collect();
                debug!(ranked = ranks.len(), "Fetched market-cap ranking");
                Some(ranks)
            }
            Err(e) => {
                warn!(error = %e, "Market-cap ranking unavailable");
                None
            }
        }
    }
}
