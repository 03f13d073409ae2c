//! # LCR (Lowest Cost to Recompute) Cache
//!
//! Evicts the entry that is cheapest to regenerate, so expensive results stay
//! resident. Structurally identical to [`LfuCache`](crate::policy::lfu::LfuCache)
//! except that the order metric is [`Entry::cost`], fixed when the entry is
//! stored, and reads never move anything.
//!
//! ```text
//!   rank = entry.cost
//!
//!   head ──► [q:2] ◄──► [r:2] ◄──► [s:40] ◄──► [t:900] ◄── tail
//!            cheapest                           priciest
//!
//!   set(u, cost 3) at capacity:
//!     pop [q:2], link [u:3] at head, bubble right while 3 >= successor
//!            [r:2] [u:3] [s:40] [t:900]
//! ```
//!
//! A newcomer always gets in, even when it is cheaper than the resident it
//! displaces.
//!
//! A `set` on a resident key replaces the entry and its cost. The node then
//! bubbles toward the tail if the cost rose or toward the head if it fell,
//! so the list stays sorted.

use std::cmp::Ordering;
use std::fmt::Debug;
use std::hash::Hash;

use tracing::trace;

use crate::ds::OrderedIndex;
use crate::entry::Entry;
use crate::error::CacheError;
use crate::traits::{CoreCache, EvictionOrder};

/// Cost-aware cache that evicts the cheapest entry first.
///
/// # Example
///
/// ```
/// use evictkit::entry::Entry;
/// use evictkit::policy::lcr::LcrCache;
/// use evictkit::traits::CoreCache;
///
/// let mut cache = LcrCache::try_new(2).unwrap();
/// cache.set("report", Entry::with_cost("...", 500));
/// cache.set("thumbnail", Entry::with_cost("...", 5));
/// cache.set("page", Entry::with_cost("...", 50));
///
/// assert!(!cache.present(&"thumbnail"));
/// assert!(cache.present(&"report"));
/// ```
#[derive(Debug)]
pub struct LcrCache<K, V> {
    index: OrderedIndex<K, Entry<V>>,
}

impl<K, V> LcrCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates an LCR cache holding at most `capacity` entries.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::InvalidCapacity`] if `capacity` is zero.
    pub fn try_new(capacity: usize) -> Result<Self, CacheError> {
        Ok(Self {
            index: OrderedIndex::try_new(capacity)?,
        })
    }

    /// Returns the recomputation cost recorded for `key`.
    pub fn cost(&self, key: &K) -> Option<u64> {
        let id = self.index.slot(key)?;
        self.index.rank_at(id)
    }

    /// Keys from cheapest to most expensive.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.index.keys()
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        self.index.debug_validate_invariants();
        self.index.debug_validate_sorted();
    }
}

impl<K, V> CoreCache<K, V> for LcrCache<K, V>
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
        let cost = entry.cost();

        if let Some(id) = self.index.slot(&key) {
            let old_cost = self.index.rank_at(id).unwrap_or(cost);
            let previous = self
                .index
                .payload_at_mut(id)
                .map(|slot| std::mem::replace(slot, entry));
            self.index.set_rank_at(id, cost);
            match cost.cmp(&old_cost) {
                Ordering::Greater => {
                    self.index.bubble_toward_back(id);
                },
                Ordering::Less => {
                    self.index.bubble_toward_front(id);
                },
                Ordering::Equal => {},
            }
            return previous;
        }

        if self.index.is_full() && self.index.pop_front().is_some() {
            trace!(
                policy = "lcr",
                len = self.index.len(),
                "evicted cheapest entry"
            );
        }
        let id = self.index.push_front(key, entry, cost);
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

impl<K, V> EvictionOrder<K> for LcrCache<K, V>
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
