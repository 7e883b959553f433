//! Counting in-process stand-in for the coin market API.

use crate::core::coin::{CoinMarketApi, CoinRecord, RankingEntry, SearchHit};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

pub(crate) fn coin(id: &str, symbol: &str, name: &str) -> CoinRecord {
    CoinRecord {
        id: id.to_string(),
        symbol: symbol.to_string(),
        name: name.to_string(),
    }
}

pub(crate) fn rank(id: &str, rank: u32) -> RankingEntry {
    RankingEntry {
        id: id.to_string(),
        rank: Some(rank),
    }
}

#[derive(Default)]
pub(crate) struct MockApi {
    coins: Mutex<Vec<CoinRecord>>,
    ranks: Mutex<Vec<RankingEntry>>,
    prices: Mutex<HashMap<String, f64>>,
    hits: Mutex<Vec<SearchHit>>,
    coin_list_failing: AtomicBool,
    ranks_failing: AtomicBool,
    prices_failing: AtomicBool,
    coin_list_calls: AtomicUsize,
    rank_calls: AtomicUsize,
    search_calls: AtomicUsize,
    last_rank_request: Mutex<Option<(String, u32)>>,
    price_requests: Mutex<Vec<(Vec<String>, String)>>,
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_coins(self, coins: Vec<CoinRecord>) -> Self {
        self.set_coins(coins);
        self
    }

    pub fn with_ranks(self, ranks: Vec<RankingEntry>) -> Self {
        *self.ranks.lock().unwrap() = ranks;
        self
    }

    pub fn with_price(self, id: &str, price: f64) -> Self {
        self.set_price(id, price);
        self
    }

    pub fn with_hits(self, hits: Vec<SearchHit>) -> Self {
        *self.hits.lock().unwrap() = hits;
        self
    }

    pub fn failing_coin_list(self) -> Self {
        self.set_coin_list_failing(true);
        self
    }

    pub fn failing_ranks(self) -> Self {
        self.ranks_failing.store(true, Ordering::SeqCst);
        self
    }

    pub fn failing_prices(self) -> Self {
        self.set_prices_failing(true);
        self
    }

    pub fn set_coins(&self, coins: Vec<CoinRecord>) {
        *self.coins.lock().unwrap() = coins;
    }

    pub fn set_price(&self, id: &str, price: f64) {
        self.prices.lock().unwrap().insert(id.to_string(), price);
    }

    pub fn set_coin_list_failing(&self, failing: bool) {
        self.coin_list_failing.store(failing, Ordering::SeqCst);
    }

    pub fn set_prices_failing(&self, failing: bool) {
        self.prices_failing.store(failing, Ordering::SeqCst);
    }

    pub fn coin_list_calls(&self) -> usize {
        self.coin_list_calls.load(Ordering::SeqCst)
    }

    pub fn rank_calls(&self) -> usize {
        self.rank_calls.load(Ordering::SeqCst)
    }

    pub fn search_calls(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }

    pub fn last_rank_request(&self) -> Option<(String, u32)> {
        self.last_rank_request.lock().unwrap().clone()
    }

    /// Ids (sorted) and currency of every quote request made so far.
    pub fn price_requests(&self) -> Vec<(Vec<String>, String)> {
        self.price_requests.lock().unwrap().clone()
    }

    pub fn price_calls(&self) -> usize {
        self.price_requests.lock().unwrap().len()
    }
}

#[async_trait]
impl CoinMarketApi for MockApi {
    async fn coin_list(&self) -> Result<Vec<CoinRecord>> {
        self.coin_list_calls.fetch_add(1, Ordering::SeqCst);
        if self.coin_list_failing.load(Ordering::SeqCst) {
            return Err(anyhow!("coin list unavailable"));
        }
        Ok(self.coins.lock().unwrap().clone())
    }

    async fn market_ranks(&self, vs_currency: &str, per_page: u32) -> Result<Vec<RankingEntry>> {
        self.rank_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_rank_request.lock().unwrap() = Some((vs_currency.to_string(), per_page));
        if self.ranks_failing.load(Ordering::SeqCst) {
            return Err(anyhow!("markets unavailable"));
        }
        Ok(self.ranks.lock().unwrap().clone())
    }

    async fn simple_price(
        &self,
        ids: &[String],
        vs_currency: &str,
    ) -> Result<HashMap<String, f64>> {
        let mut requested = ids.to_vec();
        requested.sort();
        self.price_requests
            .lock()
            .unwrap()
            .push((requested, vs_currency.to_string()));
        if self.prices_failing.load(Ordering::SeqCst) {
            return Err(anyhow!("quotes unavailable"));
        }
        let prices = self.prices.lock().unwrap();
        Ok(ids
            .iter()
            .filter_map(|id| prices.get(id).map(|p| (id.clone(), *p)))
            .collect())
    }

    async fn search(&self, _query: &str) -> Result<Vec<SearchHit>> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.hits.lock().unwrap().clone())
    }
}
