//! Cached payload wrapper.
//!
//! An [`Entry`] is what every policy stores against a key: an opaque value
//! plus the cost of recomputing it. Only the cost-aware policies
//! ([`LcrCache`](crate::policy::lcr::LcrCache) and
//! [`CalecarCache`](crate::policy::calecar::CalecarCache)) read the cost;
//! everything else ignores it.
//!
//! ## Example
//!
//! ```
//! use evictkit::entry::Entry;
//!
//! let cheap = Entry::new("rendered page");
//! assert_eq!(cheap.cost(), 0);
//!
//! let pricey = Entry::with_cost("rendered report", 250);
//! assert_eq!(pricey.value(), &"rendered report");
//! assert_eq!(pricey.cost(), 250);
//! ```

/// A cached value and its recomputation cost.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Entry<V> {
    value: V,
    cost: u64,
}

impl<V> Entry<V> {
    /// Creates an entry with zero recomputation cost.
    #[inline]
    pub fn new(value: V) -> Self {
        Self { value, cost: 0 }
    }

    /// Creates an entry with an explicit recomputation cost.
    #[inline]
    pub fn with_cost(value: V, cost: u64) -> Self {
        Self { value, cost }
    }

    /// Returns the stored value.
    #[inline]
    pub fn value(&self) -> &V {
        &self.value
    }

    /// Returns the recomputation cost.
    #[inline]
    pub fn cost(&self) -> u64 {
        self.cost
    }

    /// Consumes the entry, returning the value.
    #[inline]
    pub fn into_value(self) -> V {
        self.value
    }
}

impl<V> From<V> for Entry<V> {
    fn from(value: V) -> Self {
        Self::new(value)
    }
}
