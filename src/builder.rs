//! Unified cache builder for all eviction policies.
//!
//! Callers pick a policy by [`CachePolicy`] value or by name and get back a
//! [`Cache`] that dispatches to the concrete policy internally. The facade is
//! also where cross-cutting concerns live: the debug observer and, with the
//! `metrics` feature, hit/miss/eviction counters. Policies themselves stay
//! free of both.
//!
//! ## Example
//!
//! ```rust
//! use evictkit::builder::{CacheBuilder, CachePolicy};
//! use evictkit::entry::Entry;
//! use evictkit::traits::CoreCache;
//!
//! let mut cache = CacheBuilder::new(100)
//!     .build::<u64, String>(CachePolicy::Lru)
//!     .unwrap();
//! cache.set(1, Entry::new("hello".to_string()));
//! assert_eq!(cache.get(&1).unwrap().value(), "hello");
//!
//! let by_name = CacheBuilder::new(100).build_named::<u64, String>("lfu").unwrap();
//! assert_eq!(by_name.policy(), CachePolicy::Lfu);
//! ```

use std::fmt::{self, Debug};
use std::hash::Hash;
use std::str::FromStr;
use std::sync::Arc;

use tracing::debug;

use crate::entry::Entry;
use crate::error::CacheError;
#[cfg(feature = "metrics")]
use crate::metrics::{
    CacheMetrics, CacheMetricsSnapshot, CoreMetricsRecorder, MetricsReset,
    MetricsSnapshotProvider,
};
use crate::observer::{CacheObserver, Operation, TracingObserver};
use crate::policy::adaptive::AdaptiveConfig;
use crate::policy::calecar::CalecarCache;
use crate::policy::fifo::FifoCache;
use crate::policy::lcr::LcrCache;
use crate::policy::lecar::LecarCache;
use crate::policy::lfu::LfuCache;
use crate::policy::lru::LruCache;
use crate::policy::noop::NoOpCache;
use crate::traits::{CoreCache, EvictionOrder};

/// Available cache eviction policies.
///
/// Parsed from `NONE`, `FIFO`, `LRU`, `LFU`, `LCR`, `LECAR` and `CALECAR`,
/// ignoring ASCII case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "UPPERCASE"))]
pub enum CachePolicy {
    /// Store nothing; every lookup misses.
    None,
    /// First In, First Out eviction.
    Fifo,
    /// Least Recently Used eviction.
    Lru,
    /// Least Frequently Used eviction.
    Lfu,
    /// Lowest Cost to Recompute eviction.
    Lcr,
    /// Learned mix of LRU and LFU.
    Lecar,
    /// Learned mix of LRU, LFU and LCR with cost-scaled regret.
    Calecar,
}

impl CachePolicy {
    pub const ALL: [CachePolicy; 7] = [
        Self::None,
        Self::Fifo,
        Self::Lru,
        Self::Lfu,
        Self::Lcr,
        Self::Lecar,
        Self::Calecar,
    ];

    /// Canonical upper-case name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "NONE",
            Self::Fifo => "FIFO",
            Self::Lru => "LRU",
            Self::Lfu => "LFU",
            Self::Lcr => "LCR",
            Self::Lecar => "LECAR",
            Self::Calecar => "CALECAR",
        }
    }

    /// Whether the policy uses [`AdaptiveConfig`] tuning.
    pub fn is_adaptive(self) -> bool {
        matches!(self, Self::Lecar | Self::Calecar)
    }
}

impl fmt::Display for CachePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CachePolicy {
    type Err = CacheError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|policy| policy.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| CacheError::UnknownPolicy(name.to_string()))
    }
}

/// Plain-data form of the builder settings.
///
/// # Example
///
/// ```
/// use evictkit::builder::{Cache, CacheConfig, CachePolicy};
/// use evictkit::traits::CoreCache;
///
/// let config = CacheConfig {
///     policy: CachePolicy::Lcr,
///     capacity: 64,
///     ..Default::default()
/// };
/// let cache: Cache<String, Vec<u8>> = Cache::from_config(&config).unwrap();
/// assert_eq!(cache.capacity(), 64);
/// assert_eq!(CacheConfig::default().capacity, 1000);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CacheConfig {
    /// Eviction policy.
    pub policy: CachePolicy,

    /// Maximum number of entries. Must be greater than zero.
    pub capacity: usize,

    /// Report every change to the eviction order through [`TracingObserver`].
    pub debug: bool,

    /// Tuning for [`CachePolicy::Lecar`] and [`CachePolicy::Calecar`].
    pub adaptive: AdaptiveConfig,
}

impl Default for CacheConfig {
    /// Defaults:
    /// - `policy`: LRU
    /// - `capacity`: 1000
    /// - `debug`: false
    /// - `adaptive`: [`AdaptiveConfig::default`]
    fn default() -> Self {
        Self {
            policy: CachePolicy::Lru,
            capacity: 1000,
            debug: false,
            adaptive: AdaptiveConfig::default(),
        }
    }
}

/// Unified cache wrapper that provides a consistent API regardless of policy.
pub struct Cache<K, V> {
    inner: CacheInner<K, V>,
    policy: CachePolicy,
    observer: Option<Arc<dyn CacheObserver>>,
    #[cfg(feature = "metrics")]
    metrics: CacheMetrics,
}

enum CacheInner<K, V> {
    None(NoOpCache<K, V>),
    Fifo(FifoCache<K, V>),
    Lru(LruCache<K, V>),
    Lfu(LfuCache<K, V>),
    Lcr(LcrCache<K, V>),
    Lecar(LecarCache<K, V>),
    Calecar(CalecarCache<K, V>),
}

impl<K, V> Cache<K, V>
where
    K: Eq + Hash + Clone + Debug,
{
    /// Builds a cache from a [`CacheConfig`].
    ///
    /// # Errors
    ///
    /// Same as [`CacheBuilder::build`].
    pub fn from_config(config: &CacheConfig) -> Result<Self, CacheError> {
        CacheBuilder::from(config.clone()).build(config.policy)
    }

    /// The policy this cache was built with.
    pub fn policy(&self) -> CachePolicy {
        self.policy
    }

    /// Whether changes are being reported to an observer.
    pub fn is_debug(&self) -> bool {
        self.observer.is_some()
    }

    fn core(&self) -> &dyn CoreCache<K, V> {
        match &self.inner {
            CacheInner::None(cache) => cache,
            CacheInner::Fifo(cache) => cache,
            CacheInner::Lru(cache) => cache,
            CacheInner::Lfu(cache) => cache,
            CacheInner::Lcr(cache) => cache,
            CacheInner::Lecar(cache) => cache,
            CacheInner::Calecar(cache) => cache,
        }
    }

    fn core_mut(&mut self) -> &mut dyn CoreCache<K, V> {
        match &mut self.inner {
            CacheInner::None(cache) => cache,
            CacheInner::Fifo(cache) => cache,
            CacheInner::Lru(cache) => cache,
            CacheInner::Lfu(cache) => cache,
            CacheInner::Lcr(cache) => cache,
            CacheInner::Lecar(cache) => cache,
            CacheInner::Calecar(cache) => cache,
        }
    }

    fn order(&self) -> &dyn EvictionOrder<K> {
        match &self.inner {
            CacheInner::None(cache) => cache,
            CacheInner::Fifo(cache) => cache,
            CacheInner::Lru(cache) => cache,
            CacheInner::Lfu(cache) => cache,
            CacheInner::Lcr(cache) => cache,
            CacheInner::Lecar(cache) => cache,
            CacheInner::Calecar(cache) => cache,
        }
    }

    fn notify(&self, op: Operation) {
        if let Some(observer) = &self.observer {
            let state = self.order().describe();
            observer.on_change(self.policy, op, &state);
        }
    }
}

impl<K, V> CoreCache<K, V> for Cache<K, V>
where
    K: Eq + Hash + Clone + Debug,
{
    fn present(&self, key: &K) -> bool {
        self.core().present(key)
    }

    fn peek(&self, key: &K) -> Option<&Entry<V>> {
        self.core().peek(key)
    }

    fn get(&mut self, key: &K) -> Result<&Entry<V>, CacheError> {
        let hit = self.core_mut().get(key).is_ok();

        #[cfg(feature = "metrics")]
        {
            if hit {
                self.metrics.record_get_hit();
            } else {
                self.metrics.record_get_miss();
            }
        }

        if !hit {
            return Err(CacheError::NotFound);
        }
        self.notify(Operation::Hit);
        self.core().peek(key).ok_or(CacheError::NotFound)
    }

    fn set(&mut self, key: K, entry: Entry<V>) -> Option<Entry<V>> {
        #[cfg(feature = "metrics")]
        let evicts =
            self.capacity() > 0 && self.len() >= self.capacity() && !self.present(&key);

        let previous = self.core_mut().set(key, entry);

        #[cfg(feature = "metrics")]
        {
            self.metrics.record_insert_call();
            if previous.is_some() {
                self.metrics.record_insert_update();
            } else {
                self.metrics.record_insert_new();
                if evicts {
                    self.metrics.record_evicted_entry();
                }
            }
        }

        if self.policy != CachePolicy::None {
            let op = if previous.is_some() {
                Operation::Update
            } else {
                Operation::Insert
            };
            self.notify(op);
        }
        previous
    }

    fn len(&self) -> usize {
        self.core().len()
    }

    fn capacity(&self) -> usize {
        self.core().capacity()
    }

    fn clear(&mut self) {
        self.core_mut().clear();
        #[cfg(feature = "metrics")]
        self.metrics.record_clear();
    }
}

impl<K, V> EvictionOrder<K> for Cache<K, V>
where
    K: Eq + Hash + Clone + Debug,
{
    fn peek_victim(&self) -> Option<&K> {
        self.order().peek_victim()
    }

    fn describe(&self) -> String {
        self.order().describe()
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MetricsSnapshotProvider<CacheMetricsSnapshot> for Cache<K, V>
where
    K: Eq + Hash + Clone + Debug,
{
    fn snapshot(&self) -> CacheMetricsSnapshot {
        self.metrics.snapshot(self.len(), self.capacity())
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MetricsReset for Cache<K, V> {
    fn reset_metrics(&mut self) {
        self.metrics.reset();
    }
}

impl<K, V> Debug for Cache<K, V>
where
    K: Eq + Hash + Clone + Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cache")
            .field("policy", &self.policy)
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .field("debug", &self.is_debug())
            .finish()
    }
}

/// Builder for creating cache instances.
#[derive(Clone)]
pub struct CacheBuilder {
    pub(crate) capacity: usize,
    pub(crate) debug: bool,
    pub(crate) observer: Option<Arc<dyn CacheObserver>>,
    pub(crate) adaptive: AdaptiveConfig,
}

impl CacheBuilder {
    /// Create a new cache builder with the specified capacity.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            debug: false,
            observer: None,
            adaptive: AdaptiveConfig::default(),
        }
    }

    /// Report every change to the eviction order.
    ///
    /// Uses [`TracingObserver`] unless [`observer`](Self::observer) is set.
    pub fn debug(mut self, enabled: bool) -> Self {
        self.debug = enabled;
        self
    }

    /// Replaces the observer used when debug is enabled.
    pub fn observer(mut self, observer: Arc<dyn CacheObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn learning_rate(mut self, learning_rate: f64) -> Self {
        self.adaptive.learning_rate = learning_rate;
        self
    }

    pub fn discount_base(mut self, discount_base: f64) -> Self {
        self.adaptive.discount_base = discount_base;
        self
    }

    /// Makes adaptive expert sampling reproducible.
    pub fn seed(mut self, seed: u64) -> Self {
        self.adaptive.seed = Some(seed);
        self
    }

    /// Build a cache with the specified policy.
    ///
    /// # Errors
    ///
    /// - [`CacheError::InvalidCapacity`] if the capacity is zero, for every
    ///   policy including `None`.
    /// - [`CacheError::InvalidParameter`] if the adaptive tuning is out of
    ///   range, whether or not the policy is adaptive.
    ///
    /// # Example
    ///
    /// ```rust
    /// use evictkit::builder::{CacheBuilder, CachePolicy};
    ///
    /// // LRU cache
    /// let cache = CacheBuilder::new(100).build::<u64, String>(CachePolicy::Lru);
    /// assert!(cache.is_ok());
    ///
    /// // LeCaR with reproducible sampling
    /// let cache = CacheBuilder::new(100)
    ///     .seed(7)
    ///     .learning_rate(0.3)
    ///     .build::<u64, String>(CachePolicy::Lecar);
    /// assert!(cache.is_ok());
    /// ```
    pub fn build<K, V>(self, policy: CachePolicy) -> Result<Cache<K, V>, CacheError>
    where
        K: Eq + Hash + Clone + Debug,
    {
        let capacity = CacheError::check_capacity(self.capacity)?;
        self.adaptive.validate()?;

        let inner = match policy {
            CachePolicy::None => CacheInner::None(NoOpCache::new()),
            CachePolicy::Fifo => CacheInner::Fifo(FifoCache::try_new(capacity)?),
            CachePolicy::Lru => CacheInner::Lru(LruCache::try_new(capacity)?),
            CachePolicy::Lfu => CacheInner::Lfu(LfuCache::try_new(capacity)?),
            CachePolicy::Lcr => CacheInner::Lcr(LcrCache::try_new(capacity)?),
            CachePolicy::Lecar => {
                CacheInner::Lecar(LecarCache::with_config(capacity, &self.adaptive)?)
            },
            CachePolicy::Calecar => {
                CacheInner::Calecar(CalecarCache::with_config(capacity, &self.adaptive)?)
            },
        };

        let observer = if self.debug {
            Some(
                self.observer
                    .unwrap_or_else(|| Arc::new(TracingObserver) as Arc<dyn CacheObserver>),
            )
        } else {
            None
        };
        debug!(
            policy = policy.as_str(),
            capacity,
            debug = self.debug,
            "built cache"
        );

        Ok(Cache {
            inner,
            policy,
            observer,
            #[cfg(feature = "metrics")]
            metrics: CacheMetrics::new(),
        })
    }

    /// Build a cache for a policy given by name, ignoring ASCII case.
    ///
    /// # Errors
    ///
    /// [`CacheError::UnknownPolicy`] for an unrecognised name, otherwise as
    /// [`build`](Self::build).
    pub fn build_named<K, V>(self, name: &str) -> Result<Cache<K, V>, CacheError>
    where
        K: Eq + Hash + Clone + Debug,
    {
        let policy = name.parse()?;
        self.build(policy)
    }
}

impl From<CacheConfig> for CacheBuilder {
    fn from(config: CacheConfig) -> Self {
        Self {
            capacity: config.capacity,
            debug: config.debug,
            observer: None,
            adaptive: config.adaptive,
        }
    }
}

impl Debug for CacheBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheBuilder")
            .field("capacity", &self.capacity)
            .field("debug", &self.debug)
            .field("custom_observer", &self.observer.is_some())
            .field("adaptive", &self.adaptive)
            .finish()
    }
}
