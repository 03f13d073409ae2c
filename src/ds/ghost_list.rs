//! Bounded history of evicted keys.
//!
//! Used by the adaptive policies to remember which keys each expert evicted
//! and when, without keeping their values. Implemented as an `IntrusiveList`
//! plus an index; the oldest ghost falls off the back once the history is
//! full.
//!
//! ## Architecture
//!
//! ```text
//!   index: FxHashMap<K, SlotId>      list: IntrusiveList<(K, evicted_at)>
//!   ┌─────────┬─────────┐            head ─► [C@9] ◄──► [B@7] ◄──► [A@2] ◄── tail
//!   │  key A  │  id_1   │                    newest                oldest
//!   │  key B  │  id_2   │
//!   └─────────┴─────────┘
//! ```
//!
//! ## Behavior
//! - `record(k, t)`: stores `k` as newest with stamp `t`, dropping the oldest
//!   ghost if at capacity; re-recording a key refreshes its stamp
//! - `take(k)`: removes `k` and returns its stamp
//!
//! ## Performance
//! - `record` / `take` / `contains`: O(1) average
use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::ds::intrusive_list::IntrusiveList;
use crate::ds::slot_arena::SlotId;

/// Bounded recency list of evicted keys and their eviction time.
#[derive(Debug)]
pub struct GhostList<K> {
    list: IntrusiveList<(K, u64)>,
    index: FxHashMap<K, SlotId>,
    capacity: usize,
}

impl<K> GhostList<K>
where
    K: Eq + Hash + Clone,
{
    /// Creates a new ghost list with a maximum of `capacity` keys.
    pub fn new(capacity: usize) -> Self {
        Self {
            list: IntrusiveList::with_capacity(capacity),
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    /// Records `key` as evicted at `stamp`, dropping the oldest ghost if needed.
    pub fn record(&mut self, key: K, stamp: u64) {
        if self.capacity == 0 {
            return;
        }

        if let Some(id) = self.index.remove(&key) {
            self.list.remove(id);
        }

        if self.list.len() >= self.capacity
            && let Some(oldest) = self.list.back_id()
            && let Some((old_key, _)) = self.list.remove(oldest)
        {
            self.index.remove(&old_key);
        }

        let id = self.list.push_front((key.clone(), stamp));
        self.index.insert(key, id);
    }

    /// Removes `key` and returns the stamp it was recorded with.
    pub fn take(&mut self, key: &K) -> Option<u64> {
        let id = self.index.remove(key)?;
        self.list.remove(id).map(|(_, stamp)| stamp)
    }

    pub fn clear(&mut self) {
        self.list.clear();
        self.index.clear();
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        self.list.debug_validate_invariants();
        assert_eq!(self.list.len(), self.index.len());
        assert!(self.list.len() <= self.capacity);
        for &id in self.index.values() {
            assert!(self.list.contains(id));
        }
    }
}
