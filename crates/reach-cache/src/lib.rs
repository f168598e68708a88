mod clock;
mod config;
mod sweeper;
mod ttl;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::CacheConfig;
pub use sweeper::{spawn_sweeper, SweeperHandle, MAX_SWEEP_INTERVAL};
pub use ttl::TtlCache;
