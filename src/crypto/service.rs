//! Public entry point for crypto prices.
//!
//! Every lookup ends either priced or "not found". An unknown ticker and a
//! known ticker whose quote could not be fetched look the same to callers,
//! because both call for the same fallback: skip the entry and carry on.

use super::directory::CoinDirectory;
use super::price_cache::{PriceCache, is_valid_price};
use super::ranking::RankingFetcher;
use super::resolver::SymbolResolver;
use super::search::search_coins;
use crate::core::clock::{Clock, SystemClock};
use crate::core::coin::{CoinMarketApi, CryptoInfo, ResolvedAsset, SearchHit};
use crate::core::config::PricingConfig;
use anyhow::Result;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

pub struct PriceService {
    api: Arc<dyn CoinMarketApi>,
    resolver: SymbolResolver,
    prices: PriceCache,
    vs_currency: String,
}

impl PriceService {
    pub fn new(api: Arc<dyn CoinMarketApi>, currency: &str, settings: &PricingConfig) -> Self {
        Self::with_clock(api, currency, settings, Arc::new(SystemClock))
    }

    pub fn with_clock(
        api: Arc<dyn CoinMarketApi>,
        currency: &str,
        settings: &PricingConfig,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let directory =
            CoinDirectory::new(Arc::clone(&api), settings.directory_ttl(), Arc::clone(&clock));
        let ranking = RankingFetcher::new(Arc::clone(&api), currency, settings.ranking_page_size);
        Self {
            resolver: SymbolResolver::new(directory, ranking),
            prices: PriceCache::new(settings.price_ttl(), clock),
            vs_currency: currency.to_lowercase(),
            api,
        }
    }

    pub async fn resolve(&self, symbol: &str) -> Option<ResolvedAsset> {
        self.resolver.resolve(symbol).await
    }

    pub async fn get_price(&self, symbol: &str) -> Option<f64> {
        self.get_info(symbol).await.map(|info| info.price)
    }

    /// Like [`get_price`](Self::get_price), also carrying the coin's display
    /// name.
    #[instrument(name = "CryptoInfo", skip(self))]
    pub async fn get_info(&self, symbol: &str) -> Option<CryptoInfo> {
        let asset = self.resolver.resolve(symbol).await?;
        let price = self.price_of(&asset).await?;
        Some(CryptoInfo {
            symbol: asset.symbol,
            name: asset.name,
            price,
        })
    }

    /// Prices a batch of tickers with exactly one upstream quote request.
    ///
    /// Keys of the result are canonical tickers. Tickers that do not resolve,
    /// or whose coin has no positive quote, are simply missing from the map.
    /// The batch always quotes every resolved coin, so a failed request leaves
    /// the whole map empty even when some prices are still cached.
    #[instrument(name = "CryptoPrices", skip_all, fields(count = symbols.len()))]
    pub async fn get_multiple<S: AsRef<str>>(&self, symbols: &[S]) -> HashMap<String, f64> {
        let resolved = self.resolver.resolve_all(symbols).await;
        if resolved.is_empty() {
            return HashMap::new();
        }

        let mut ids: Vec<String> = resolved.iter().map(|asset| asset.id.clone()).collect();
        ids.sort();
        ids.dedup();

        let quotes = match self.api.simple_price(&ids, &self.vs_currency).await {
            Ok(quotes) => quotes,
            Err(e) => {
                warn!(error = %e, ids = ids.len(), "Batch price fetch failed");
                return HashMap::new();
            }
        };

        let mut result = HashMap::new();
        for asset in resolved {
            match quotes.get(&asset.id).copied() {
                Some(price) if is_valid_price(price) => {
                    self.prices.put(&asset.symbol, price);
                    result.insert(asset.symbol, price);
                }
                _ => debug!(symbol = %asset.symbol, id = %asset.id, "No usable quote"),
            }
        }
        result
    }

    /// Interactive coin lookup. Results keep the upstream relevance order.
    pub async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchHit>> {
        search_coins(self.api.as_ref(), query, limit).await
    }

    async fn price_of(&self, asset: &ResolvedAsset) -> Option<f64> {
        if let Some(entry) = self.prices.get(&asset.symbol) {
            return Some(entry.value);
        }

        let ids = [asset.id.clone()];
        let quotes = match self.api.simple_price(&ids, &self.vs_currency).await {
            Ok(quotes) => quotes,
            Err(e) => {
                warn!(error = %e, symbol = %asset.symbol, "Price fetch failed");
                return None;
            }
        };

        match quotes.get(&asset.id).copied() {
            Some(price) if is_valid_price(price) => {
                self.prices.put(&asset.symbol, price);
                Some(price)
            }
            _ => {
                debug!(symbol = %asset.symbol, id = %asset.id, "No usable quote");
                None
            }
        }
    }
}
