//! # FIFO (First In, First Out) Cache
//!
//! Evicts the oldest inserted key. Reads never change the order, which makes
//! FIFO the cheapest policy here: every operation is O(1) with no metric
//! comparisons.
//!
//! ## Architecture
//!
//! ```text
//!   set(D) at capacity 3:
//!
//!     before:  head ─► [A] ◄──► [B] ◄──► [C] ◄── tail
//!     evict A, append D
//!     after:   head ─► [B] ◄──► [C] ◄──► [D] ◄── tail
//! ```
//!
//! ## Operations
//!
//! | Method    | Complexity | Notes                                        |
//! |-----------|------------|----------------------------------------------|
//! | `present` | O(1)       | index lookup                                 |
//! | `get`     | O(1)       | index lookup, no reorder                     |
//! | `set`     | O(1)       | evict head when full, append at tail         |
//!
//! Updating a resident key replaces its entry and keeps its queue position.

use std::fmt::Debug;
use std::hash::Hash;

use tracing::trace;

use crate::ds::OrderedIndex;
use crate::entry::Entry;
use crate::error::CacheError;
use crate::traits::{CoreCache, EvictionOrder};

/// First-in, first-out cache.
///
/// # Example
///
/// ```
/// use evictkit::entry::Entry;
/// use evictkit::policy::fifo::FifoCache;
/// use evictkit::traits::CoreCache;
///
/// let mut cache = FifoCache::try_new(2).unwrap();
/// cache.set("a", Entry::new(1));
/// cache.set("b", Entry::new(2));
/// cache.get(&"a").unwrap();
/// cache.set("c", Entry::new(3));
///
/// // "a" was inserted first; reading it did not save it
/// assert!(!cache.present(&"a"));
/// ```
#[derive(Debug)]
pub struct FifoCache<K, V> {
    index: OrderedIndex<K, Entry<V>>,
}

impl<K, V> FifoCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates a FIFO cache holding at most `capacity` entries.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::InvalidCapacity`] if `capacity` is zero.
    pub fn try_new(capacity: usize) -> Result<Self, CacheError> {
        Ok(Self {
            index: OrderedIndex::try_new(capacity)?,
        })
    }

    /// Keys from oldest to newest.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.index.keys()
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        self.index.debug_validate_invariants();
    }
}

impl<K, V> CoreCache<K, V> for FifoCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn present(&self, key: &K) -> bool {
        self.index.contains(key)
    }

    fn peek(&self, key: &K) -> Option<&Entry<V>> {
        self.index.payload(key)
    }

    fn get(&mut self, key: &K) -> Result<&Entry<V>, CacheError> {
        self.index.payload(key).ok_or(CacheError::NotFound)
    }

    fn set(&mut self, key: K, entry: Entry<V>) -> Option<Entry<V>> {
        if let Some(id) = self.index.slot(&key) {
            return self
                .index
                .payload_at_mut(id)
                .map(|slot| std::mem::replace(slot, entry));
        }

        if self.index.is_full() && self.index.pop_front().is_some() {
            trace!(policy = "fifo", len = self.index.len(), "evicted oldest entry");
        }
        self.index.push_back(key, entry, 0);
        None
    }

    fn len(&self) -> usize {
        self.index.len()
    }

    fn capacity(&self) -> usize {
        self.index.capacity()
    }

    fn clear(&mut self) {
        self.index.clear();
    }
}

impl<K, V> EvictionOrder<K> for FifoCache<K, V>
where
    K: Eq + Hash + Clone + Debug,
{
    fn peek_victim(&self) -> Option<&K> {
        self.index.front_key()
    }

    fn describe(&self) -> String {
        self.index.render()
    }
}
