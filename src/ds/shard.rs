//! Key-to-shard mapping for [`ShardedCache`](crate::concurrent::ShardedCache).
//!
//! ```text
//!   key ──► FxHasher(seed, key) ──► hash % shards ──► shard index
//!
//!   ┌─────────┬─────────┬─────────┬─────────┐
//!   │ Shard 0 │ Shard 1 │ Shard 2 │ Shard 3 │
//!   │  A, E   │  B, F   │  C, G   │  D, H   │
//!   └─────────┴─────────┴─────────┴─────────┘
//! ```
//!
//! The same `(key, seed, shards)` always yields the same shard, so a key is
//! only ever resident in one shard.

use std::hash::{Hash, Hasher};

use rustc_hash::FxHasher;

/// Deterministic shard selector using a seeded hash.
///
/// # Example
///
/// ```
/// use evictkit::ds::ShardSelector;
///
/// let selector = ShardSelector::new(4, 0);
/// let shard = selector.shard_for_key(&"user:alice");
/// assert!(shard < 4);
/// assert_eq!(selector.shard_for_key(&"user:alice"), shard);
///
/// // Zero shards is clamped to 1
/// assert_eq!(ShardSelector::new(0, 0).shard_count(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShardSelector {
    shards: usize,
    seed: u64,
}

impl ShardSelector {
    /// Creates a selector for `shards` shards; the count is clamped to at least 1.
    pub fn new(shards: usize, seed: u64) -> Self {
        Self {
            shards: shards.max(1),
            seed,
        }
    }

    pub fn shard_count(&self) -> usize {
        self.shards
    }

    /// Maps a key to a shard index in `[0, shards)`.
    pub fn shard_for_key<K: Hash + ?Sized>(&self, key: &K) -> usize {
        let mut hasher = FxHasher::default();
        self.seed.hash(&mut hasher);
        key.hash(&mut hasher);
        (hasher.finish() % self.shards as u64) as usize
    }
}

impl Default for ShardSelector {
    fn default() -> Self {
        Self::new(1, 0)
    }
}
