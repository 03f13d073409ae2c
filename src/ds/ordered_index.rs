//! Hash index paired with an eviction-ordered list.
//!
//! `OrderedIndex` is the structure every policy is built on: an
//! `FxHashMap<K, SlotId>` for O(1) membership plus an [`IntrusiveList`] of
//! residents whose head is always the next victim. Policies differ only in
//! where they link new residents and how they move them afterwards.
//!
//! ## Architecture
//!
//! ```text
//!   index: FxHashMap<K, SlotId>         list: IntrusiveList<Resident<K, T>>
//!   ┌─────────┬─────────┐
//!   │  key A  │  id_1   │   head ─► [A r=1] ◄──► [C r=1] ◄──► [B r=4] ◄── tail
//!   │  key B  │  id_2   │           next victim                most favoured
//!   │  key C  │  id_3   │
//!   └─────────┴─────────┘
//! ```
//!
//! Each resident carries a `rank`, the policy's order metric. FIFO and LRU
//! leave it at zero and order purely by position. LFU stores the access count
//! and LCR the recomputation cost; for those the list is kept sorted by rank,
//! ascending from head to tail.
//!
//! ## Bubble step
//!
//! [`bubble_toward_back`](OrderedIndex::bubble_toward_back) swaps a node with
//! its successor while `rank >= successor.rank`. It restores sorted order
//! after a single node's rank grew, provided the rest of the list was sorted.
//! Equal ranks are passed over, so a freshly inserted node lands to the right
//! of every resident with the same rank.
//!
//! [`bubble_toward_front`](OrderedIndex::bubble_toward_front) is the mirror
//! image for a rank that shrank. It stops at equal ranks so the two
//! directions agree on where ties settle.
//!
//! ## Invariants
//! - `index.len() == list.len() <= capacity`
//! - every indexed `SlotId` is live in the list and vice versa
//! - each key appears at most once
//!
//! `debug_validate_invariants()` checks all of them in debug/test builds.

use std::fmt::{Debug, Write};
use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::ds::intrusive_list::IntrusiveList;
use crate::ds::slot_arena::SlotId;
use crate::error::CacheError;

#[derive(Debug)]
struct Resident<K, T> {
    key: K,
    payload: T,
    rank: u64,
}

/// Key index plus eviction-ordered resident list.
#[derive(Debug)]
pub struct OrderedIndex<K, T> {
    list: IntrusiveList<Resident<K, T>>,
    index: FxHashMap<K, SlotId>,
    capacity: usize,
}

impl<K, T> OrderedIndex<K, T>
where
    K: Eq + Hash + Clone,
{
    /// Creates an empty index holding at most `capacity` residents.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::InvalidCapacity`] if `capacity` is zero.
    pub fn try_new(capacity: usize) -> Result<Self, CacheError> {
        let capacity = CacheError::check_capacity(capacity)?;
        Ok(Self {
            list: IntrusiveList::with_capacity(capacity),
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            capacity,
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.len() >= self.capacity
    }

    #[inline]
    pub fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    /// Returns the slot holding `key`.
    #[inline]
    pub fn slot(&self, key: &K) -> Option<SlotId> {
        self.index.get(key).copied()
    }

    /// Returns the payload stored under `key`.
    pub fn payload(&self, key: &K) -> Option<&T> {
        let id = self.slot(key)?;
        self.list.get(id).map(|resident| &resident.payload)
    }

    pub fn payload_at(&self, id: SlotId) -> Option<&T> {
        self.list.get(id).map(|resident| &resident.payload)
    }

    pub fn payload_at_mut(&mut self, id: SlotId) -> Option<&mut T> {
        self.list.get_mut(id).map(|resident| &mut resident.payload)
    }

    pub fn rank_at(&self, id: SlotId) -> Option<u64> {
        self.list.get(id).map(|resident| resident.rank)
    }

    pub fn set_rank_at(&mut self, id: SlotId, rank: u64) {
        if let Some(resident) = self.list.get_mut(id) {
            resident.rank = rank;
        }
    }

    /// Returns the key at the head: the next resident to evict.
    pub fn front_key(&self) -> Option<&K> {
        let id = self.list.front_id()?;
        self.list.get(id).map(|resident| &resident.key)
    }

    /// Returns the key at the tail: the most favoured resident.
    pub fn back_key(&self) -> Option<&K> {
        let id = self.list.back_id()?;
        self.list.get(id).map(|resident| &resident.key)
    }

    /// Links a new resident at the tail.
    ///
    /// The caller must have made room and checked that `key` is absent.
    pub fn push_back(&mut self, key: K, payload: T, rank: u64) -> SlotId {
        debug_assert!(!self.is_full(), "push_back on a full ordered index");
        debug_assert!(!self.contains(&key), "push_back of a resident key");
        let id = self.list.push_back(Resident {
            key: key.clone(),
            payload,
            rank,
        });
        self.index.insert(key, id);
        id
    }

    /// Links a new resident at the head.
    ///
    /// The caller must have made room and checked that `key` is absent.
    pub fn push_front(&mut self, key: K, payload: T, rank: u64) -> SlotId {
        debug_assert!(!self.is_full(), "push_front on a full ordered index");
        debug_assert!(!self.contains(&key), "push_front of a resident key");
        let id = self.list.push_front(Resident {
            key: key.clone(),
            payload,
            rank,
        });
        self.index.insert(key, id);
        id
    }

    /// Unlinks the head and drops it from the index.
    pub fn pop_front(&mut self) -> Option<(K, T)> {
        let resident = self.list.pop_front()?;
        self.index.remove(&resident.key);
        Some((resident.key, resident.payload))
    }

    /// Unlinks the resident stored under `key`.
    pub fn remove(&mut self, key: &K) -> Option<T> {
        let id = self.index.remove(key)?;
        self.list.remove(id).map(|resident| resident.payload)
    }

    /// Splices `id` to the tail.
    pub fn move_to_back(&mut self, id: SlotId) -> bool {
        self.list.move_to_back(id)
    }

    /// Moves `id` toward the tail while its rank is at least its successor's.
    ///
    /// Returns the number of adjacent swaps performed.
    pub fn bubble_toward_back(&mut self, id: SlotId) -> usize {
        let mut swaps = 0;
        while let Some(next) = self.list.next_id(id) {
            let (Some(mine), Some(theirs)) = (self.rank_at(id), self.rank_at(next)) else {
                break;
            };
            if mine < theirs {
                break;
            }
            self.list.move_after(id, next);
            swaps += 1;
        }
        swaps
    }

    /// Moves `id` toward the head while its predecessor's rank is strictly greater.
    ///
    /// Returns the number of adjacent swaps performed.
    pub fn bubble_toward_front(&mut self, id: SlotId) -> usize {
        let mut swaps = 0;
        while let Some(prev) = self.list.prev_id(id) {
            let (Some(mine), Some(theirs)) = (self.rank_at(id), self.rank_at(prev)) else {
                break;
            };
            if theirs <= mine {
                break;
            }
            self.list.move_before(id, prev);
            swaps += 1;
        }
        swaps
    }

    /// Iterates `(key, payload, rank)` from head (next victim) to tail.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &T, u64)> {
        self.list
            .iter()
            .map(|(_, resident)| (&resident.key, &resident.payload, resident.rank))
    }

    /// Keys from head to tail.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.iter().map(|(key, _, _)| key)
    }

    pub fn clear(&mut self) {
        self.list.clear();
        self.index.clear();
    }

    /// Renders the list as `->key:rank` pairs from head to tail.
    pub fn render(&self) -> String
    where
        K: Debug,
    {
        let mut out = String::new();
        for (key, _, rank) in self.iter() {
            let _ = write!(out, "->{key:?}:{rank}");
        }
        out
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        self.list.debug_validate_invariants();
        assert_eq!(self.list.len(), self.index.len());
        assert!(self.index.len() <= self.capacity);
        for (key, &id) in &self.index {
            let resident = self.list.get(id).expect("indexed slot missing from list");
            assert!(resident.key == *key, "index points at another key's node");
        }
    }

    /// Asserts ranks are non-decreasing from head to tail.
    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_sorted(&self) {
        let ranks: Vec<u64> = self.iter().map(|(_, _, rank)| rank).collect();
        assert!(
            ranks.windows(2).all(|pair| pair[0] <= pair[1]),
            "ranks out of order: {ranks:?}"
        );
    }
}
