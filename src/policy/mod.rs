//! Eviction policies.
//!
//! Each policy is a standalone type implementing
//! [`CoreCache`](crate::traits::CoreCache) and
//! [`EvictionOrder`](crate::traits::EvictionOrder). The list-backed policies
//! share [`OrderedIndex`](crate::ds::OrderedIndex) and differ only in how they
//! rank and reorder residents; the adaptive pair shares
//! [`AdaptiveCore`](adaptive::AdaptiveCore).

pub mod adaptive;
pub mod calecar;
pub mod fifo;
pub mod lcr;
pub mod lecar;
pub mod lfu;
pub mod lru;
pub mod noop;
