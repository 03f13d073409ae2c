//! # Cache Trait Hierarchy
//!
//! Every eviction policy in this crate implements the same small contract, so
//! callers can pick a policy by name and never depend on a concrete type.
//!
//! ## Architecture
//!
//! ```text
//!   ┌─────────────────────────────────────────┐
//!   │            CoreCache<K, V>              │
//!   │                                         │
//!   │  present(&, &K) → bool                  │
//!   │  peek(&, &K) → Option<&Entry<V>>        │
//!   │  get(&mut, &K) → Result<&Entry<V>>      │
//!   │  set(&mut, K, Entry<V>) → Option<Entry> │
//!   │  len / is_empty / capacity / clear      │
//!   └──────────────────┬──────────────────────┘
//!                      │
//!                      ▼
//!   ┌─────────────────────────────────────────┐
//!   │          EvictionOrder<K>               │
//!   │                                         │
//!   │  peek_victim(&) → Option<&K>            │
//!   │  describe(&) → String                   │
//!   └─────────────────────────────────────────┘
//! ```
//!
//! `CoreCache` is what callers use. `EvictionOrder` exposes the policy's
//! internal order for diagnostics: the observer hook feeds `describe()` to a
//! [`CacheObserver`](crate::observer::CacheObserver) after each mutation.
//!
//! ## Policy Comparison
//!
//! | Policy  | Order metric        | `get` reorders | Victim                       |
//! |---------|---------------------|----------------|------------------------------|
//! | NONE    | -                   | -              | nothing is stored            |
//! | FIFO    | insertion order     | no             | oldest insert                |
//! | LRU     | last access         | yes            | least recently used          |
//! | LFU     | access count        | yes            | fewest accesses              |
//! | LCR     | recomputation cost  | no             | cheapest to recompute        |
//! | LECAR   | learned LRU/LFU mix | yes            | sampled from weighted expert |
//! | CALECAR | learned LRU/LFU/LCR | yes            | sampled from weighted expert |
//!
//! ## Thread Safety
//!
//! Implementations are single-threaded. With the `concurrency` feature,
//! `concurrent::SyncCache` and `concurrent::ShardedCache` wrap a
//! [`Cache`](crate::builder::Cache) for shared access.

use crate::entry::Entry;
use crate::error::CacheError;

/// Lookup/insert contract shared by every eviction policy.
///
/// # Example
///
/// ```
/// use evictkit::entry::Entry;
/// use evictkit::policy::lru::LruCache;
/// use evictkit::traits::CoreCache;
///
/// fn warm<C: CoreCache<String, u32>>(cache: &mut C, rows: &[(&str, u32)]) {
///     for (key, value) in rows {
///         cache.set(key.to_string(), Entry::new(*value));
///     }
/// }
///
/// let mut cache = LruCache::try_new(8).unwrap();
/// warm(&mut cache, &[("a", 1), ("b", 2)]);
/// assert!(cache.present(&"a".to_string()));
/// assert_eq!(cache.get(&"b".to_string()).unwrap().value(), &2);
/// ```
pub trait CoreCache<K, V> {
    /// Returns `true` if `key` has a live entry. Never reorders.
    fn present(&self, key: &K) -> bool;

    /// Reads the entry under `key` without touching policy state.
    fn peek(&self, key: &K) -> Option<&Entry<V>>;

    /// Returns the entry stored under `key`.
    ///
    /// May promote the entry according to the policy's access rule.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::NotFound`] if `key` is absent.
    fn get(&mut self, key: &K) -> Result<&Entry<V>, CacheError>;

    /// Inserts or updates `key`, returning the previous entry on update.
    ///
    /// At capacity, exactly one resident is evicted before a new key is
    /// linked in. `len()` never exceeds `capacity()`.
    fn set(&mut self, key: K, entry: Entry<V>) -> Option<Entry<V>>;

    /// Returns the number of live entries.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the maximum number of entries.
    fn capacity(&self) -> usize;

    /// Drops every entry. Adaptive policies also forget their history.
    fn clear(&mut self);
}

/// Read-only view of a policy's eviction order.
pub trait EvictionOrder<K> {
    /// Returns the key that the next eviction would remove.
    fn peek_victim(&self) -> Option<&K>;

    /// Renders the internal order from next victim to most favoured.
    fn describe(&self) -> String;
}
