pub use crate::builder::{Cache, CacheBuilder, CacheConfig, CachePolicy};
pub use crate::entry::Entry;
pub use crate::error::CacheError;
pub use crate::observer::{CacheObserver, Operation, TracingObserver};
pub use crate::policy::adaptive::{AdaptiveConfig, Expert};
pub use crate::policy::calecar::CalecarCache;
pub use crate::policy::fifo::FifoCache;
pub use crate::policy::lcr::LcrCache;
pub use crate::policy::lecar::LecarCache;
pub use crate::policy::lfu::LfuCache;
pub use crate::policy::lru::LruCache;
pub use crate::policy::noop::NoOpCache;
pub use crate::traits::{CoreCache, EvictionOrder};

#[cfg(feature = "concurrency")]
pub use crate::concurrent::{ShardedCache, SyncCache};
