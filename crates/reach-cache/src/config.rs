use std::time::Duration;

/// TTL and sweep cadence for one cache role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// How long an entry stays readable after its last write.
    pub ttl: Duration,
    /// How often the background sweeper removes expired entries.
    pub sweep_interval: Duration,
}

impl CacheConfig {
    pub fn new(ttl: Duration, sweep_interval: Duration) -> Self {
        Self {
            ttl,
            sweep_interval,
        }
    }

    pub fn from_secs(ttl_secs: u64, sweep_interval_secs: u64) -> Self {
        Self::new(
            Duration::from_secs(ttl_secs),
            Duration::from_secs(sweep_interval_secs),
        )
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn with_sweep_interval(mut self, interval: Duration) -> Self {
        self.sweep_interval = interval;
        self
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self::from_secs(3600, 600)
    }
}
