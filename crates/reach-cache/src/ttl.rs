use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;

use crate::{CacheConfig, Clock, SystemClock};

struct CacheEntry<V> {
    value: V,
    inserted_at: Instant,
}

impl<V> CacheEntry<V> {
    fn is_live(&self, now: Instant, ttl: Duration) -> bool {
        now.saturating_duration_since(self.inserted_at) < ttl
    }
}

/// In-memory string-keyed cache where every entry expires a fixed TTL after it was written.
///
/// TTL is the only eviction mechanism; there is no size bound. A read of an entry past
/// its expiry is a miss even if the sweeper has not removed it yet.
pub struct TtlCache<V> {
    store: RwLock<HashMap<String, CacheEntry<V>>>,
    config: CacheConfig,
    clock: Arc<dyn Clock>,
}

impl<V: Clone + Send + Sync> TtlCache<V> {
    /// Create a cache driven by the system clock.
    pub fn new(config: CacheConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Create a cache that reads time from `clock`.
    pub fn with_clock(config: CacheConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            store: RwLock::new(HashMap::new()),
            config,
            clock,
        }
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Look up a live entry.
    pub async fn get(&self, key: &str) -> Option<V> {
        let now = self.clock.now();
        let store = self.store.read().await;
        match store.get(key) {
            Some(entry) if entry.is_live(now, self.config.ttl) => Some(entry.value.clone()),
            _ => None,
        }
    }

    /// Store `value` under `key`, replacing any previous entry and restarting its TTL.
    pub async fn set(&self, key: impl Into<String>, value: V) {
        let entry = CacheEntry {
            value,
            inserted_at: self.clock.now(),
        };
        let mut store = self.store.write().await;
        store.insert(key.into(), entry);
    }

    /// Remove every expired entry and return how many were dropped.
    pub async fn purge_expired(&self) -> usize {
        let now = self.clock.now();
        let mut store = self.store.write().await;
        let before = store.len();
        let ttl = self.config.ttl;
        store.retain(|_, entry| entry.is_live(now, ttl));
        before - store.len()
    }

    /// Number of stored entries, including expired ones the sweeper has not reached yet.
    pub async fn len(&self) -> usize {
        self.store.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.store.read().await.is_empty()
    }

    pub async fn clear(&self) {
        self.store.write().await.clear();
    }
}
