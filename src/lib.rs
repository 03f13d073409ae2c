//! evictkit: pluggable cache-eviction policies behind one lookup/insert
//! contract.
//!
//! Pick a policy by name, get a [`Cache`](builder::Cache), and memoize
//! expensive values under a fixed capacity:
//!
//! ```
//! use evictkit::prelude::*;
//!
//! let mut cache = CacheBuilder::new(2).build_named::<&str, u32>("LCR").unwrap();
//! cache.set("cheap", Entry::with_cost(1, 5));
//! cache.set("pricey", Entry::with_cost(2, 500));
//! cache.set("medium", Entry::with_cost(3, 50));
//!
//! assert!(!cache.present(&"cheap"));
//! assert_eq!(cache.get(&"pricey").map(Entry::value), Ok(&2));
//! ```
//!
//! Policies live in [`policy`]; the list/arena structures they share live in
//! [`ds`].

pub mod builder;
pub mod ds;
pub mod entry;
pub mod error;
pub mod observer;
pub mod policy;

#[cfg(feature = "concurrency")]
pub mod concurrent;

#[cfg(feature = "metrics")]
pub mod metrics;

pub mod prelude;
pub mod traits;

pub use crate::builder::{Cache, CacheBuilder, CacheConfig, CachePolicy};
pub use crate::ds::{GhostList, IntrusiveList, OrderedIndex, SlotArena, SlotId};

#[cfg(feature = "concurrency")]
pub use crate::ds::ShardSelector;
#[cfg(feature = "metrics")]
pub use crate::metrics::snapshot::CacheMetricsSnapshot;
pub use crate::entry::Entry;
pub use crate::error::CacheError;
pub use crate::policy::fifo::FifoCache;
pub use crate::policy::lru::LruCache;
