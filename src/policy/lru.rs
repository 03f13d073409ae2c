//! # Least Recently Used (LRU) Cache
//!
//! Evicts the key that has gone longest without being read or written.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────┐
//!   │                         LruCache<K, V>                           │
//!   │                                                                  │
//!   │   OrderedIndex<K, Entry<V>>                                      │
//!   │     index: FxHashMap<K, SlotId>                                  │
//!   │     list:  head ──► [A] ◄──► [B] ◄──► [C] ◄── tail               │
//!   │                     LRU                MRU                       │
//!   │                 (next victim)                                    │
//!   └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## LRU Operations Flow
//!
//! ```text
//!   ACCESS existing item
//!   ═══════════════════════════════════════════════════════════════════
//!
//!   get(C): already tail, nothing to do
//!
//!   get(A): A is head
//!     head ──► [B] ◄──► [C] ◄──► [A] ◄── tail
//!     B becomes head, A spliced in at tail
//!
//!   get(C): C is interior
//!     head ──► [B] ◄──► [A] ◄──► [C] ◄── tail
//!     B and A stitched together, C appended
//!
//!   ═══════════════════════════════════════════════════════════════════
//!
//!   INSERT new item (cache full)
//!   ═══════════════════════════════════════════════════════════════════
//!
//!     head ──► [B] ◄──► [A] ◄──► [C] ◄── tail    (capacity = 3)
//!   set(D):
//!     1. pop head [B]
//!     2. append [D] at tail
//!     head ──► [A] ◄──► [C] ◄──► [D] ◄── tail
//! ```
//!
//! Every splice is a constant number of link updates; nothing scans the list.
//!
//! A `set` on a resident key replaces the entry and counts as a use: the node
//! moves to the tail.

use std::fmt::Debug;
use std::hash::Hash;

use tracing::trace;

use crate::ds::OrderedIndex;
use crate::entry::Entry;
use crate::error::CacheError;
use crate::traits::{CoreCache, EvictionOrder};

/// Least-recently-used cache.
///
/// # Example
///
/// ```
/// use evictkit::entry::Entry;
/// use evictkit::policy::lru::LruCache;
/// use evictkit::traits::CoreCache;
///
/// let mut cache = LruCache::try_new(3).unwrap();
/// cache.set("a", Entry::new(1));
/// cache.set("b", Entry::new(2));
/// cache.set("c", Entry::new(3));
///
/// cache.get(&"a").unwrap();
/// cache.set("d", Entry::new(4));
///
/// assert!(cache.present(&"a"));
/// assert!(!cache.present(&"b"));
/// ```
#[derive(Debug)]
pub struct LruCache<K, V> {
    index: OrderedIndex<K, Entry<V>>,
}

impl<K, V> LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates an LRU cache holding at most `capacity` entries.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::InvalidCapacity`] if `capacity` is zero.
    pub fn try_new(capacity: usize) -> Result<Self, CacheError> {
        Ok(Self {
            index: OrderedIndex::try_new(capacity)?,
        })
    }

    /// Keys from least to most recently used.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.index.keys()
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        self.index.debug_validate_invariants();
    }
}

impl<K, V> CoreCache<K, V> for LruCache<K, V>
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
        self.index.move_to_back(id);
        self.index.payload_at(id).ok_or(CacheError::NotFound)
    }

    fn set(&mut self, key: K, entry: Entry<V>) -> Option<Entry<V>> {
        if let Some(id) = self.index.slot(&key) {
            self.index.move_to_back(id);
            return self
                .index
                .payload_at_mut(id)
                .map(|slot| std::mem::replace(slot, entry));
        }

        if self.index.is_full() && self.index.pop_front().is_some() {
            trace!(
                policy = "lru",
                len = self.index.len(),
                "evicted least recently used entry"
            );
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

impl<K, V> EvictionOrder<K> for LruCache<K, V>
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
