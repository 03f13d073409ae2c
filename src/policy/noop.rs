//! Disabled cache.
//!
//! [`NoOpCache`] accepts every `set` and stores nothing, so every lookup
//! misses. It is the `NONE` policy: a baseline for measuring what caching
//! buys, or a way to switch caching off without changing call sites. It is
//! zero-sized and never allocates.

use std::marker::PhantomData;

use crate::entry::Entry;
use crate::error::CacheError;
use crate::traits::{CoreCache, EvictionOrder};

/// Cache that never holds anything.
///
/// # Example
///
/// ```
/// use evictkit::entry::Entry;
/// use evictkit::policy::noop::NoOpCache;
/// use evictkit::traits::CoreCache;
///
/// let mut cache = NoOpCache::<&str, u32>::new();
/// cache.set("k", Entry::new(1));
/// assert!(!cache.present(&"k"));
/// assert!(cache.get(&"k").is_err());
/// ```
#[derive(Debug)]
pub struct NoOpCache<K, V> {
    _marker: PhantomData<fn(K, V)>,
}

impl<K, V> NoOpCache<K, V> {
    pub const fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<K, V> Default for NoOpCache<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Clone for NoOpCache<K, V> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<K, V> CoreCache<K, V> for NoOpCache<K, V> {
    #[inline]
    fn present(&self, _key: &K) -> bool {
        false
    }

    #[inline]
    fn peek(&self, _key: &K) -> Option<&Entry<V>> {
        None
    }

    #[inline]
    fn get(&mut self, _key: &K) -> Result<&Entry<V>, CacheError> {
        Err(CacheError::NotFound)
    }

    #[inline]
    fn set(&mut self, _key: K, _entry: Entry<V>) -> Option<Entry<V>> {
        None
    }

    #[inline]
    fn len(&self) -> usize {
        0
    }

    #[inline]
    fn capacity(&self) -> usize {
        0
    }

    fn clear(&mut self) {}
}

impl<K, V> EvictionOrder<K> for NoOpCache<K, V> {
    fn peek_victim(&self) -> Option<&K> {
        None
    }

    fn describe(&self) -> String {
        String::new()
    }
}
