//! # LeCaR (Learning Cache Replacement)
//!
//! Two experts, recency and frequency, compete for the eviction decision.
//! Each eviction samples one expert by weight; when a key an expert evicted
//! comes back while still remembered in that expert's history, the other
//! expert gains weight. See [`adaptive`](crate::policy::adaptive) for the
//! shared engine and the exact weighting rule.
//!
//! ```text
//!   resident keys ──► Recency order   (LRU head)     w_r
//!                └──► Frequency order (LFU head)     w_f      w_r + w_f = 1
//!
//!   evict: u ~ U[0,1); u < w_r ? LRU head : LFU head
//! ```

use std::fmt::Debug;
use std::hash::Hash;

use crate::entry::Entry;
use crate::error::CacheError;
use crate::policy::adaptive::{AdaptiveConfig, AdaptiveCore, Expert};
use crate::traits::{CoreCache, EvictionOrder};

const EXPERTS: &[Expert] = &[Expert::Recency, Expert::Frequency];

/// Adaptive recency/frequency cache.
///
/// # Example
///
/// ```
/// use evictkit::entry::Entry;
/// use evictkit::policy::adaptive::{AdaptiveConfig, Expert};
/// use evictkit::policy::lecar::LecarCache;
/// use evictkit::traits::CoreCache;
///
/// let config = AdaptiveConfig { seed: Some(1), ..Default::default() };
/// let mut cache = LecarCache::with_config(2, &config).unwrap();
/// cache.set(1, Entry::new("one"));
/// cache.set(2, Entry::new("two"));
/// cache.set(3, Entry::new("three"));
///
/// assert_eq!(cache.len(), 2);
/// assert_eq!(cache.weight(Expert::Recency), Some(0.5));
/// ```
#[derive(Debug)]
pub struct LecarCache<K, V> {
    core: AdaptiveCore<K, V>,
}

impl<K, V> LecarCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates a cache with default tuning and an entropy-seeded sampler.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::InvalidCapacity`] if `capacity` is zero.
    pub fn try_new(capacity: usize) -> Result<Self, CacheError> {
        Self::with_config(capacity, &AdaptiveConfig::default())
    }

    /// Creates a cache with explicit tuning.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::InvalidCapacity`] for zero capacity and
    /// [`CacheError::InvalidParameter`] for out-of-range tuning.
    pub fn with_config(capacity: usize, config: &AdaptiveConfig) -> Result<Self, CacheError> {
        Ok(Self {
            core: AdaptiveCore::try_new(capacity, EXPERTS, false, config)?,
        })
    }

    /// Current weight of `expert`; `None` for [`Expert::Cost`].
    pub fn weight(&self, expert: Expert) -> Option<f64> {
        self.core.weight(expert)
    }

    /// Returns `true` if `expert` evicted `key` and still remembers it.
    pub fn in_history(&self, expert: Expert, key: &K) -> bool {
        self.core.in_history(expert, key)
    }

    /// The key `expert` would evict next.
    pub fn expert_victim(&self, expert: Expert) -> Option<&K> {
        self.core.expert_victim(expert)
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        self.core.debug_validate_invariants();
    }
}

impl<K, V> CoreCache<K, V> for LecarCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn present(&self, key: &K) -> bool {
        self.core.present(key)
    }

    fn peek(&self, key: &K) -> Option<&Entry<V>> {
        self.core.peek(key)
    }

    fn get(&mut self, key: &K) -> Result<&Entry<V>, CacheError> {
        self.core.get(key)
    }

    fn set(&mut self, key: K, entry: Entry<V>) -> Option<Entry<V>> {
        self.core.set(key, entry)
    }

    fn len(&self) -> usize {
        self.core.len()
    }

    fn capacity(&self) -> usize {
        self.core.capacity()
    }

    fn clear(&mut self) {
        self.core.clear();
    }
}

impl<K, V> EvictionOrder<K> for LecarCache<K, V>
where
    K: Eq + Hash + Clone + Debug,
{
    fn peek_victim(&self) -> Option<&K> {
        self.core.peek_victim()
    }

    fn describe(&self) -> String {
        self.core.describe()
    }
}
