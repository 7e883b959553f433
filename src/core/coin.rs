//! Coin market abstractions and core types

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One entry of the upstream coin catalog. Tickers are not unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoinRecord {
    pub id: String,
    pub symbol: String,
    pub name: String,
}

/// Market-cap position of a coin; `None` when upstream has no rank for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingEntry {
    pub id: String,
    pub rank: Option<u32>,
}

/// A ticker pinned to one concrete coin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedAsset {
    pub symbol: String,
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CryptoInfo {
    pub symbol: String,
    pub name: String,
    pub price: f64,
}

/// Candidate returned by the interactive coin search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    pub id: String,
    pub symbol: String,
    pub name: String,
}

/// Read-only access to a public coin market data API.
#[async_trait]
pub trait CoinMarketApi: Send + Sync {
    /// Full catalog of tradable coins.
    async fn coin_list(&self) -> Result<Vec<CoinRecord>>;

    /// Top `per_page` coins ordered by market capitalisation.
    async fn market_ranks(&self, vs_currency: &str, per_page: u32) -> Result<Vec<RankingEntry>>;

    /// Spot prices keyed by coin id. Ids without a quote in `vs_currency`
    /// are left out of the map.
    async fn simple_price(&self, ids: &[String], vs_currency: &str)
    -> Result<HashMap<String, f64>>;

    /// Free-text search, in the relevance order chosen by upstream.
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>>;
}

/// Trims and uppercases a ticker into its canonical cache key form.
pub fn normalize_symbol(symbol: &str) -> String {
    symbol.trim().to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_symbol() {
        assert_eq!(normalize_symbol(" btc "), "BTC");
        assert_eq!(normalize_symbol("Eth"), "ETH");
        assert_eq!(normalize_symbol(""), "");
    }
}
