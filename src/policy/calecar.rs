//! # CaLeCaR (Cost-Aware Learning Cache Replacement)
//!
//! LeCaR with a third expert that evicts the cheapest entry, and with regret
//! rewards scaled by how expensive the returning key is relative to the most
//! expensive cost seen so far. Losing a costly entry teaches the engine more
//! than losing a cheap one.
//!
//! ```text
//!   reward = d^t · (1 + cost(q)) / (1 + max_cost_seen)
//! ```

use std::fmt::Debug;
use std::hash::Hash;

use crate::entry::Entry;
use crate::error::CacheError;
use crate::policy::adaptive::{AdaptiveConfig, AdaptiveCore, Expert};
use crate::traits::{CoreCache, EvictionOrder};

const EXPERTS: &[Expert] = &[Expert::Recency, Expert::Frequency, Expert::Cost];

/// Adaptive recency/frequency/cost cache.
///
/// # Example
///
/// ```
/// use evictkit::entry::Entry;
/// use evictkit::policy::adaptive::{AdaptiveConfig, Expert};
/// use evictkit::policy::calecar::CalecarCache;
/// use evictkit::traits::CoreCache;
///
/// let config = AdaptiveConfig { seed: Some(5), ..Default::default() };
/// let mut cache = CalecarCache::with_config(2, &config).unwrap();
/// cache.set("render", Entry::with_cost(vec![0u8; 16], 900));
/// cache.set("lookup", Entry::with_cost(vec![1u8; 4], 3));
///
/// assert_eq!(cache.expert_victim(Expert::Cost), Some(&"lookup"));
/// ```
#[derive(Debug)]
pub struct CalecarCache<K, V> {
    core: AdaptiveCore<K, V>,
}

impl<K, V> CalecarCache<K, V>
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
            core: AdaptiveCore::try_new(capacity, EXPERTS, true, config)?,
        })
    }

    pub fn weight(&self, expert: Expert) -> Option<f64> {
        self.core.weight(expert)
    }

    pub fn in_history(&self, expert: Expert, key: &K) -> bool {
        self.core.in_history(expert, key)
    }

    pub fn expert_victim(&self, expert: Expert) -> Option<&K> {
        self.core.expert_victim(expert)
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        self.core.debug_validate_invariants();
    }
}

impl<K, V> CoreCache<K, V> for CalecarCache<K, V>
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

impl<K, V> EvictionOrder<K> for CalecarCache<K, V>
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
