use crate::core::cache::{Cache, Stamped};
use crate::core::clock::Clock;
use crate::core::coin::normalize_symbol;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// A cached price and the instant it was captured.
pub type PriceCacheEntry = Stamped<f64>;

/// Only finite, strictly positive prices are ever cached or reported.
pub fn is_valid_price(price: f64) -> bool {
    price.is_finite() && price > 0.0
}

/// Short-lived prices keyed by canonical ticker.
pub struct PriceCache {
    inner: Cache<String, f64>,
}

impl PriceCache {
    pub fn new(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            inner: Cache::new(ttl, clock),
        }
    }

    pub fn get(&self, symbol: &str) -> Option<PriceCacheEntry> {
        self.inner.get(&normalize_symbol(symbol))
    }

    /// Replaces whatever is stored for `symbol`. Non-positive prices are
    /// ignored so that a bad quote never shadows a later good one.
    pub fn put(&self, symbol: &str, price: f64) {
        if !is_valid_price(price) {
            debug!(symbol, price, "Refusing to cache non-positive price");
            return;
        }
        self.inner.put(normalize_symbol(symbol), price);
    }
}
