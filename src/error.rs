//! Error types for the evictkit library.
//!
//! ## Key Components
//!
//! - [`CacheError::NotFound`]: a lookup missed. This is an expected outcome
//!   and is always returned, never raised.
//! - [`CacheError::InvalidCapacity`]: a cache was constructed with zero
//!   capacity.
//! - [`CacheError::UnknownPolicy`]: a policy name did not match any known
//!   policy. Callers should treat this as fatal to cache setup.
//! - [`CacheError::InvalidParameter`]: an adaptive tuning parameter was out
//!   of range.
//!
//! Internal invariant violations (hash index and order list disagreeing) are
//! defects, not errors. They are caught by the `debug_validate_invariants`
//! assertions in debug and test builds.
//!
//! ## Example Usage
//!
//! ```
//! use evictkit::builder::CacheBuilder;
//! use evictkit::error::CacheError;
//!
//! let err = CacheBuilder::new(16)
//!     .build_named::<String, u32>("MRU")
//!     .unwrap_err();
//! assert_eq!(err, CacheError::UnknownPolicy("MRU".to_string()));
//!
//! let err = CacheBuilder::new(0)
//!     .build_named::<String, u32>("LRU")
//!     .unwrap_err();
//! assert!(err.to_string().contains("capacity"));
//! ```

use thiserror::Error;

/// Errors returned by cache construction and lookup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CacheError {
    /// The requested key has no live entry.
    #[error("key not present in cache")]
    NotFound,

    /// A cache was constructed with a capacity of zero.
    #[error("cache capacity must be greater than zero, got {capacity}")]
    InvalidCapacity {
        /// The rejected capacity.
        capacity: usize,
    },

    /// A policy name did not match any known policy.
    #[error("no cache policy named '{0}'")]
    UnknownPolicy(String),

    /// A tuning parameter was outside its valid range.
    #[error("invalid value for {name}: {reason}")]
    InvalidParameter {
        /// Parameter name as it appears on the builder.
        name: &'static str,
        /// Human-readable description of the accepted range.
        reason: String,
    },
}

impl CacheError {
    /// Returns `true` for [`CacheError::NotFound`].
    #[inline]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }

    pub(crate) fn check_capacity(capacity: usize) -> Result<usize, Self> {
        if capacity == 0 {
            return Err(Self::InvalidCapacity { capacity });
        }
        Ok(capacity)
    }
}
