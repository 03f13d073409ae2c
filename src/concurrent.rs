//! Thread-safe wrappers around [`Cache`].
//!
//! Enabled with the `concurrency` feature. Every policy mutates its order on
//! lookup, so `get` always takes a write lock; only `present`, `len` and the
//! cloning `peek` run under a read lock.
//!
//! ```text
//!   SyncCache                        ShardedCache (4 shards)
//!   ┌──────────────────────┐         ┌──────────┬──────────┬──────────┬──────────┐
//!   │ Arc<RwLock<Cache>>   │         │ RwLock   │ RwLock   │ RwLock   │ RwLock   │
//!   │   one global order   │         │ Cache/4  │ Cache/4  │ Cache/4  │ Cache/4  │
//!   └──────────────────────┘         └──────────┴──────────┴──────────┴──────────┘
//!                                     key ──► ShardSelector ──► one shard
//! ```
//!
//! `ShardedCache` trades a global eviction order for lower contention: each
//! shard evicts by its own order. Shard capacities add up to exactly the
//! requested capacity; the first `capacity % shards` shards hold one extra
//! entry.

use std::fmt::{self, Debug};
use std::hash::Hash;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::builder::{Cache, CacheBuilder, CachePolicy};
use crate::ds::ShardSelector;
use crate::entry::Entry;
use crate::error::CacheError;
use crate::traits::CoreCache;

/// Shared handle to a single cache behind one lock.
///
/// Cloning the handle shares the cache.
///
/// # Example
///
/// ```
/// use std::thread;
///
/// use evictkit::builder::{CacheBuilder, CachePolicy};
/// use evictkit::concurrent::SyncCache;
/// use evictkit::entry::Entry;
///
/// let cache = SyncCache::new(
///     CacheBuilder::new(64).build::<u32, String>(CachePolicy::Lru).unwrap(),
/// );
/// let writer = cache.clone();
/// thread::spawn(move || {
///     writer.set(1, Entry::new("one".to_string()));
/// })
/// .join()
/// .unwrap();
///
/// assert_eq!(cache.get(&1).unwrap().into_value(), "one");
/// ```
pub struct SyncCache<K, V> {
    inner: Arc<RwLock<Cache<K, V>>>,
}

impl<K, V> Clone for SyncCache<K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K, V> SyncCache<K, V>
where
    K: Eq + Hash + Clone + Debug,
{
    pub fn new(cache: Cache<K, V>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(cache)),
        }
    }

    pub fn present(&self, key: &K) -> bool {
        self.inner.read().present(key)
    }

    /// Looks up `key` and returns a copy of its entry.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::NotFound`] if `key` is absent.
    pub fn get(&self, key: &K) -> Result<Entry<V>, CacheError>
    where
        V: Clone,
    {
        self.inner.write().get(key).cloned()
    }

    /// Copies the entry without touching policy state.
    pub fn peek(&self, key: &K) -> Option<Entry<V>>
    where
        V: Clone,
    {
        self.inner.read().peek(key).cloned()
    }

    pub fn set(&self, key: K, entry: Entry<V>) -> Option<Entry<V>> {
        self.inner.write().set(key, entry)
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.inner.read().capacity()
    }

    pub fn policy(&self) -> CachePolicy {
        self.inner.read().policy()
    }

    pub fn clear(&self) {
        self.inner.write().clear();
    }

    /// Runs `f` with exclusive access, for multi-step operations that must
    /// not interleave with other callers.
    pub fn with_lock<R>(&self, f: impl FnOnce(&mut Cache<K, V>) -> R) -> R {
        f(&mut self.inner.write())
    }
}

impl<K, V> Debug for SyncCache<K, V>
where
    K: Eq + Hash + Clone + Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cache = self.inner.read();
        f.debug_struct("SyncCache")
            .field("policy", &cache.policy())
            .field("len", &cache.len())
            .field("capacity", &cache.capacity())
            .finish_non_exhaustive()
    }
}

/// Cache split into independently locked shards.
///
/// # Example
///
/// ```
/// use evictkit::builder::{CacheBuilder, CachePolicy};
/// use evictkit::concurrent::ShardedCache;
/// use evictkit::entry::Entry;
///
/// let cache = ShardedCache::<u64, u64>::new(CacheBuilder::new(1000), CachePolicy::Lfu, 8)
///     .unwrap();
/// cache.set(42, Entry::new(7));
/// assert_eq!(cache.get(&42).unwrap().into_value(), 7);
/// assert_eq!(cache.capacity(), 1000);
/// ```
pub struct ShardedCache<K, V> {
    shards: Arc<[RwLock<Cache<K, V>>]>,
    selector: ShardSelector,
}

impl<K, V> Clone for ShardedCache<K, V> {
    fn clone(&self) -> Self {
        Self {
            shards: Arc::clone(&self.shards),
            selector: self.selector,
        }
    }
}

impl<K, V> ShardedCache<K, V>
where
    K: Eq + Hash + Clone + Debug,
{
    /// Splits the builder's capacity across `shards` caches of `policy`.
    ///
    /// The shard count is clamped to `1..=capacity` so that no shard is
    /// empty. Shard capacities differ by at most one and sum to `capacity`.
    ///
    /// # Errors
    ///
    /// Same as [`CacheBuilder::build`].
    pub fn new(builder: CacheBuilder, policy: CachePolicy, shards: usize) -> Result<Self, CacheError> {
        let capacity = CacheError::check_capacity(builder.capacity)?;
        let count = shards.clamp(1, capacity);
        let (base, extra) = (capacity / count, capacity % count);
        let base_seed = builder.adaptive.seed;

        let shards = (0..count)
            .map(|index| {
                let mut shard = builder.clone();
                shard.capacity = base + usize::from(index < extra);
                shard.adaptive.seed = base_seed.map(|seed| seed.wrapping_add(index as u64));
                shard.build::<K, V>(policy).map(RwLock::new)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            shards: shards.into(),
            selector: ShardSelector::new(count, base_seed.unwrap_or(0)),
        })
    }

    fn shard(&self, key: &K) -> &RwLock<Cache<K, V>> {
        &self.shards[self.selector.shard_for_key(key)]
    }

    pub fn shard_count(&self) -> usize {
        self.shards.len()
    }

    pub fn present(&self, key: &K) -> bool {
        self.shard(key).read().present(key)
    }

    /// Looks up `key` in its shard and returns a copy of its entry.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::NotFound`] if `key` is absent.
    pub fn get(&self, key: &K) -> Result<Entry<V>, CacheError>
    where
        V: Clone,
    {
        self.shard(key).write().get(key).cloned()
    }

    pub fn peek(&self, key: &K) -> Option<Entry<V>>
    where
        V: Clone,
    {
        self.shard(key).read().peek(key).cloned()
    }

    pub fn set(&self, key: K, entry: Entry<V>) -> Option<Entry<V>> {
        self.shard(&key).write().set(key, entry)
    }

    /// Sum of shard lengths. Not atomic across shards.
    pub fn len(&self) -> usize {
        self.shards.iter().map(|shard| shard.read().len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.shards.iter().all(|shard| shard.read().is_empty())
    }

    /// Sum of shard capacities, equal to the requested capacity.
    pub fn capacity(&self) -> usize {
        self.shards.iter().map(|shard| shard.read().capacity()).sum()
    }

    pub fn clear(&self) {
        for shard in self.shards.iter() {
            shard.write().clear();
        }
    }
}

impl<K, V> Debug for ShardedCache<K, V>
where
    K: Eq + Hash + Clone + Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShardedCache")
            .field("shards", &self.shard_count())
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .finish_non_exhaustive()
    }
}
