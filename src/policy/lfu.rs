//! # LFU (Least Frequently Used) Cache
//!
//! Evicts the key with the fewest accesses. The order list is kept sorted by
//! access count, ascending from head to tail, so the victim is always the
//! head.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────┐
//!   │                         LfuCache<K, V>                           │
//!   │                                                                  │
//!   │   OrderedIndex<K, Entry<V>>   rank = access count                │
//!   │                                                                  │
//!   │   head ──► [C:1] ◄──► [D:1] ◄──► [B:2] ◄──► [A:5] ◄── tail       │
//!   │            victim                           hottest              │
//!   └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Maintenance
//!
//! ```text
//!   set(E) at capacity:
//!     1. pop head [C:1]
//!     2. link [E:1] at head:      [E:1] [D:1] [B:2] [A:5]
//!     3. bubble while count >= successor's count:
//!                                 [D:1] [E:1] [B:2] [A:5]
//!
//!   get(D):
//!     1. count 1 → 2:             [D:2] [E:1] [B:2] [A:5]
//!     2. bubble from D's position, not from the head:
//!                                 [E:1] [B:2] [D:2] [A:5]
//! ```
//!
//! An increment can only break ordering against the node's successor, so one
//! forward bubble pass from the node's current position restores the sort.
//! Equal counts are passed over: a newcomer settles to the right of every
//! resident with count 1, which makes the oldest count-1 resident the victim.
//!
//! A `set` on a resident key replaces the entry and keeps its count and
//! position.

use std::fmt::Debug;
use std::hash::Hash;

use tracing::trace;

use crate::ds::OrderedIndex;
use crate::entry::Entry;
use crate::error::CacheError;
use crate::traits::{CoreCache, EvictionOrder};

/// Least-frequently-used cache.
///
/// # Example
///
/// ```
/// use evictkit::entry::Entry;
/// use evictkit::policy::lfu::LfuCache;
/// use evictkit::traits::CoreCache;
///
/// let mut cache = LfuCache::try_new(2).unwrap();
/// cache.set("hot", Entry::new(1));
/// cache.set("cold", Entry::new(2));
/// cache.get(&"hot").unwrap();
///
/// cache.set("new", Entry::new(3));
/// assert!(cache.present(&"hot"));
/// assert!(!cache.present(&"cold"));
/// assert_eq!(cache.frequency(&"hot"), Some(2));
/// ```
#[derive(Debug)]
pub struct LfuCache<K, V> {
    index: OrderedIndex<K, Entry<V>>,
}

impl<K, V> LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates an LFU cache holding at most `capacity` entries.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::InvalidCapacity`] if `capacity` is zero.
    pub fn try_new(capacity: usize) -> Result<Self, CacheError> {
        Ok(Self {
            index: OrderedIndex::try_new(capacity)?,
        })
    }

    /// Returns the access count of `key`; a fresh insert counts as 1.
    pub fn frequency(&self, key: &K) -> Option<u64> {
        let id = self.index.slot(key)?;
        self.index.rank_at(id)
    }

    /// Keys from least to most frequently used.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.index.keys()
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        self.index.debug_validate_invariants();
        self.index.debug_validate_sorted();
    }
}

impl<K, V> CoreCache<K, V> for LfuCache<K, V>
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
        let id = self.index.slot(key).ok_or(CacheError::NotFound)?;
        let count = self.index.rank_at(id).unwrap_or(0).saturating_add(1);
        self.index.set_rank_at(id, count);
        self.index.bubble_toward_back(id);
        self.index.payload_at(id).ok_or(CacheError::NotFound)
    }

    fn set(&mut self, key: K, entry: Entry<V>) -> Option<Entry<V>> {
        if let Some(id) = self.index.slot(&key) {
            return self
                .index
                .payload_at_mut(id)
                .map(|slot| std::mem::replace(slot, entry));
        }

        if self.index.is_full() && self.index.pop_front().is_some() {
            trace!(
                policy = "lfu",
                len = self.index.len(),
                "evicted least frequently used entry"
            );
        }
        let id = self.index.push_front(key, entry, 1);
        self.index.bubble_toward_back(id);
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

impl<K, V> EvictionOrder<K> for LfuCache<K, V>
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
