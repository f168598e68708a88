use std::sync::{Arc, Weak};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::TtlCache;

/// Handle to a running sweeper task. Dropping it stops the sweeper.
pub struct SweeperHandle {
    handle: JoinHandle<()>,
}

impl SweeperHandle {
    pub fn stop(self) {
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for SweeperHandle {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Longest sweep period honoured; larger intervals are clamped to it.
pub const MAX_SWEEP_INTERVAL: Duration = Duration::from_secs(365 * 24 * 60 * 60);

/// Start a background task that purges expired entries every `sweep_interval`.
///
/// The task holds only a weak reference and exits once the cache is dropped.
/// A zero interval disables sweeping; expired entries are then only hidden from reads.
pub fn spawn_sweeper<V>(cache: &Arc<TtlCache<V>>) -> SweeperHandle
where
    V: Clone + Send + Sync + 'static,
{
    let period = cache.config().sweep_interval.min(MAX_SWEEP_INTERVAL);
    if period.is_zero() {
        warn!("cache sweep interval is zero, sweeper disabled");
        return SweeperHandle {
            handle: tokio::spawn(async {}),
        };
    }
    let weak: Weak<TtlCache<V>> = Arc::downgrade(cache);
    info!(interval = ?period, "starting cache sweeper");

    let handle = tokio::spawn(async move {
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            let Some(cache) = weak.upgrade() else {
                debug!("cache dropped, sweeper exiting");
                break;
            };
            let removed = cache.purge_expired().await;
            if removed > 0 {
                debug!(removed, "swept expired cache entries");
            }
        }
    });

    SweeperHandle { handle }
}
