//! Debug hook for watching a cache's internal order change.
//!
//! When a [`Cache`](crate::builder::Cache) is built with `debug(true)`, it
//! hands the rendered eviction order (see
//! [`EvictionOrder::describe`](crate::traits::EvictionOrder::describe)) to a
//! [`CacheObserver`] after every `set` and every `get` hit. Without a custom
//! observer the dump goes to [`TracingObserver`], which emits a `tracing`
//! debug event. Misses leave the order untouched and are not reported.
//!
//! ```text
//!   caller ──► Cache::set / Cache::get (hit)
//!                   │
//!                   ├── policy mutates its order
//!                   │
//!                   └── debug enabled? ──► observer.on_change(policy, op, "->k1:0->k2:0")
//! ```

use std::fmt;

use tracing::debug;

use crate::builder::CachePolicy;

/// What caused an observer notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// A `get` found its key.
    Hit,
    /// A `set` linked in a new key, possibly after an eviction.
    Insert,
    /// A `set` replaced the entry of a resident key.
    Update,
}

impl Operation {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hit => "hit",
            Self::Insert => "insert",
            Self::Update => "update",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Receives a dump of the eviction order after each change.
///
/// Observers are shared (`Arc`) and must be thread-safe so a debugged cache
/// can still sit behind the concurrent wrappers.
///
/// # Example
///
/// ```
/// use std::sync::{Arc, Mutex};
///
/// use evictkit::builder::{CacheBuilder, CachePolicy};
/// use evictkit::entry::Entry;
/// use evictkit::observer::{CacheObserver, Operation};
/// use evictkit::traits::CoreCache;
///
/// #[derive(Default)]
/// struct Collect(Mutex<Vec<String>>);
///
/// impl CacheObserver for Collect {
///     fn on_change(&self, _policy: CachePolicy, _op: Operation, state: &str) {
///         self.0.lock().unwrap().push(state.to_string());
///     }
/// }
///
/// let seen = Arc::new(Collect::default());
/// let mut cache = CacheBuilder::new(2)
///     .debug(true)
///     .observer(seen.clone())
///     .build::<&str, u32>(CachePolicy::Fifo)
///     .unwrap();
/// cache.set("a", Entry::new(1));
/// cache.set("b", Entry::new(2));
///
/// assert_eq!(seen.0.lock().unwrap().last().unwrap(), "->\"a\":0->\"b\":0");
/// ```
pub trait CacheObserver: Send + Sync {
    fn on_change(&self, policy: CachePolicy, op: Operation, state: &str);
}

/// Emits each dump as a `tracing` debug event under the `evictkit` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl CacheObserver for TracingObserver {
    fn on_change(&self, policy: CachePolicy, op: Operation, state: &str) {
        debug!(
            target: "evictkit",
            policy = policy.as_str(),
            op = op.as_str(),
            state,
            "cache order changed"
        );
    }
}
