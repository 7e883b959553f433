use super::clock::Clock;
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::{Duration, Instant};
use tracing::debug;

/// A value together with the instant it was stored.
#[derive(Debug, Clone, PartialEq)]
pub struct Stamped<V> {
    pub value: V,
    pub captured_at: Instant,
}

/// Keyed cache whose entries read as absent once they are `ttl` old.
///
/// Expired entries are not evicted, a later `put` for the same key simply
/// replaces them. `get` and `put` never suspend, so a read or a replace is
/// never observed half done by another task.
pub struct Cache<K, V>
where
    K: Eq + Hash + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    inner: RwLock<HashMap<K, Stamped<V>>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl<K, V> Cache<K, V>
where
    K: Eq + Hash + Send + Sync + std::fmt::Debug,
    V: Clone + Send + Sync,
{
    pub fn new(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
            ttl,
            clock,
        }
    }

    pub fn get(&self, key: &K) -> Option<Stamped<V>> {
        let cache = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        match cache.get(key) {
            Some(entry) if self.clock.now().duration_since(entry.captured_at) < self.ttl => {
                debug!("Cache HIT for key: {:?}", key);
                Some(entry.clone())
            }
            Some(_) => {
                debug!("Cache entry expired for key: {:?}", key);
                None
            }
            None => {
                debug!("Cache MISS for key: {:?}", key);
                None
            }
        }
    }

    pub fn put(&self, key: K, value: V) {
        let entry = Stamped {
            value,
            captured_at: self.clock.now(),
        };
        let mut cache = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        debug!("Cache PUT for key: {:?}", key);
        cache.insert(key, entry);
    }
}
