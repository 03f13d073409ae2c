// ==============================================
// CROSS-POLICY INVARIANT TESTS (integration)
// ==============================================
//
// Tests that verify library-wide behavioral consistency across all cache
// policies. These span multiple modules and belong here rather than in any
// single source file.

use std::collections::VecDeque;

use evictkit::prelude::*;
use proptest::prelude::*;

fn build(policy: CachePolicy, capacity: usize) -> Cache<u32, u32> {
    CacheBuilder::new(capacity)
        .seed(17)
        .build(policy)
        .unwrap()
}

fn storing_policies() -> impl Iterator<Item = CachePolicy> {
    CachePolicy::ALL
        .into_iter()
        .filter(|policy| *policy != CachePolicy::None)
}

#[derive(Debug, Clone)]
enum Op {
    Get(u32),
    Set(u32, u32, u64),
}

fn op_strategy(keys: u32) -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..keys).prop_map(Op::Get),
        (0..keys, any::<u32>(), 0u64..1000).prop_map(|(k, v, c)| Op::Set(k, v, c)),
    ]
}

// ==============================================
// Construction
// ==============================================

mod construction {
    use super::*;

    #[test]
    fn capacity_zero_is_rejected_everywhere() {
        for policy in CachePolicy::ALL {
            let err = CacheBuilder::new(0).build::<u32, u32>(policy).unwrap_err();
            assert_eq!(err, CacheError::InvalidCapacity { capacity: 0 }, "{policy}");
        }
        assert!(FifoCache::<u32, u32>::try_new(0).is_err());
        assert!(LruCache::<u32, u32>::try_new(0).is_err());
        assert!(LfuCache::<u32, u32>::try_new(0).is_err());
        assert!(LcrCache::<u32, u32>::try_new(0).is_err());
        assert!(LecarCache::<u32, u32>::try_new(0).is_err());
        assert!(CalecarCache::<u32, u32>::try_new(0).is_err());
    }

    #[test]
    fn unknown_policy_name_is_an_error() {
        for name in ["", "ARC", "lru2", "Random"] {
            assert_eq!(
                CacheBuilder::new(8).build_named::<u32, u32>(name).unwrap_err(),
                CacheError::UnknownPolicy(name.to_string())
            );
        }
    }

    #[test]
    fn every_name_builds_its_policy() {
        for (name, policy) in [
            ("none", CachePolicy::None),
            ("Fifo", CachePolicy::Fifo),
            ("LRU", CachePolicy::Lru),
            ("lfu", CachePolicy::Lfu),
            ("LCR", CachePolicy::Lcr),
            ("lecar", CachePolicy::Lecar),
            ("CALECAR", CachePolicy::Calecar),
        ] {
            let cache = CacheBuilder::new(4).build_named::<u32, u32>(name).unwrap();
            assert_eq!(cache.policy(), policy);
        }
    }
}

// ==============================================
// Shared Contract
// ==============================================

mod contract {
    use super::*;

    #[test]
    fn round_trip_below_capacity() {
        for policy in storing_policies() {
            let mut cache = build(policy, 8);
            for key in 0..8 {
                cache.set(key, Entry::with_cost(key * 10, u64::from(key)));
            }
            for key in 0..8 {
                assert_eq!(cache.get(&key).map(Entry::value), Ok(&(key * 10)), "{policy}");
            }
        }
    }

    #[test]
    fn update_keeps_len_and_returns_previous() {
        for policy in storing_policies() {
            let mut cache = build(policy, 3);
            cache.set(1, Entry::new(1));
            cache.set(2, Entry::new(2));
            cache.set(3, Entry::new(3));
            for round in 0..5 {
                let previous = cache.set(2, Entry::with_cost(100 + round, u64::from(round)));
                assert!(previous.is_some(), "{policy}");
                assert_eq!(cache.len(), 3, "{policy}");
            }
            assert_eq!(cache.get(&2).map(Entry::value), Ok(&104), "{policy}");
        }
    }

    #[test]
    fn miss_is_not_found_and_changes_nothing() {
        for policy in storing_policies() {
            let mut cache = build(policy, 2);
            cache.set(1, Entry::new(1));
            let before = cache.describe();
            assert_eq!(cache.get(&99), Err(CacheError::NotFound));
            assert_eq!(cache.describe(), before, "{policy}");
        }
    }

    #[test]
    fn none_policy_never_stores() {
        let mut cache = build(CachePolicy::None, 4);
        for key in 0..10 {
            assert_eq!(cache.set(key, Entry::new(key)), None);
            assert!(!cache.present(&key));
            assert_eq!(cache.get(&key), Err(CacheError::NotFound));
        }
        assert!(cache.is_empty());
    }

    #[test]
    fn clear_empties_every_policy() {
        for policy in storing_policies() {
            let mut cache = build(policy, 4);
            for key in 0..6 {
                cache.set(key, Entry::new(key));
            }
            cache.clear();
            assert!(cache.is_empty(), "{policy}");
            assert_eq!(cache.peek_victim(), None, "{policy}");
            cache.set(1, Entry::new(1));
            assert!(cache.present(&1), "{policy}");
        }
    }
}

// ==============================================
// Eviction Order
// ==============================================

mod eviction {
    use super::*;

    #[test]
    fn fifo_evicts_first_inserted_despite_reads() {
        let mut cache = build(CachePolicy::Fifo, 3);
        for key in 1..=3 {
            cache.set(key, Entry::new(key));
        }
        cache.get(&1).unwrap();
        cache.set(4, Entry::new(4));
        assert!(!cache.present(&1));
    }

    #[test]
    fn lru_promotion_saves_key() {
        let mut cache = build(CachePolicy::Lru, 3);
        for key in 1..=3 {
            cache.set(key, Entry::new(key));
        }
        cache.get(&1).unwrap();
        cache.set(4, Entry::new(4));
        assert!(cache.present(&1));
        assert!(!cache.present(&2));
    }

    #[test]
    fn lfu_evicts_least_accessed() {
        let mut cache = build(CachePolicy::Lfu, 3);
        for key in 1..=3 {
            cache.set(key, Entry::new(key));
        }
        cache.get(&1).unwrap();
        cache.get(&1).unwrap();
        cache.get(&3).unwrap();
        cache.set(4, Entry::new(4));
        assert!(!cache.present(&2));
        assert!(cache.present(&1));
        assert!(cache.present(&3));
    }

    #[test]
    fn lcr_evicts_cheapest() {
        let mut cache = build(CachePolicy::Lcr, 3);
        cache.set(1, Entry::with_cost(1, 30));
        cache.set(2, Entry::with_cost(2, 10));
        cache.set(3, Entry::with_cost(3, 20));
        cache.set(4, Entry::with_cost(4, 25));
        assert!(!cache.present(&2));
        assert_eq!(cache.describe(), "->3:20->4:25->1:30");
    }
}

// ==============================================
// Property Tests
// ==============================================

proptest! {
    /// len() never exceeds capacity, for every policy.
    #[cfg_attr(miri, ignore)]
    #[test]
    fn prop_len_within_capacity(
        capacity in 1usize..16,
        ops in prop::collection::vec(op_strategy(40), 0..200)
    ) {
        for policy in CachePolicy::ALL {
            let mut cache = build(policy, capacity);
            for op in &ops {
                match *op {
                    Op::Get(key) => { let _ = cache.get(&key); },
                    Op::Set(key, value, cost) => { cache.set(key, Entry::with_cost(value, cost)); },
                }
                prop_assert!(cache.len() <= capacity);
            }
        }
    }

    /// A key just set is readable with the value just written.
    #[cfg_attr(miri, ignore)]
    #[test]
    fn prop_set_then_get(
        capacity in 1usize..16,
        ops in prop::collection::vec(op_strategy(40), 0..100),
        key in 0u32..40,
        value in any::<u32>()
    ) {
        for policy in storing_policies() {
            let mut cache = build(policy, capacity);
            for op in &ops {
                if let Op::Set(k, v, c) = *op {
                    cache.set(k, Entry::with_cost(v, c));
                }
            }
            cache.set(key, Entry::new(value));
            prop_assert_eq!(cache.get(&key).map(Entry::value), Ok(&value));
        }
    }

    /// FIFO matches a queue model exactly.
    #[cfg_attr(miri, ignore)]
    #[test]
    fn prop_fifo_matches_queue_model(
        capacity in 1usize..10,
        ops in prop::collection::vec(op_strategy(20), 0..150)
    ) {
        let mut cache = FifoCache::try_new(capacity).unwrap();
        let mut model: VecDeque<u32> = VecDeque::new();
        for op in ops {
            match op {
                Op::Get(key) => {
                    prop_assert_eq!(cache.get(&key).is_ok(), model.contains(&key));
                },
                Op::Set(key, value, _) => {
                    cache.set(key, Entry::new(value));
                    if !model.contains(&key) {
                        if model.len() == capacity {
                            model.pop_front();
                        }
                        model.push_back(key);
                    }
                },
            }
            prop_assert_eq!(cache.keys().copied().collect::<Vec<_>>(), Vec::from(model.clone()));
        }
    }

    /// LRU matches a recency-list model exactly.
    #[cfg_attr(miri, ignore)]
    #[test]
    fn prop_lru_matches_recency_model(
        capacity in 1usize..10,
        ops in prop::collection::vec(op_strategy(20), 0..150)
    ) {
        let mut cache = LruCache::try_new(capacity).unwrap();
        let mut model: Vec<u32> = Vec::new();
        for op in ops {
            let key = match op {
                Op::Get(key) => {
                    prop_assert_eq!(cache.get(&key).is_ok(), model.contains(&key));
                    key
                },
                Op::Set(key, value, _) => {
                    cache.set(key, Entry::new(value));
                    if !model.contains(&key) && model.len() == capacity {
                        model.remove(0);
                    }
                    key
                },
            };
            if let Some(pos) = model.iter().position(|k| *k == key) {
                model.remove(pos);
                model.push(key);
            } else if matches!(op, Op::Set(..)) {
                model.push(key);
            }
            prop_assert_eq!(cache.keys().copied().collect::<Vec<_>>(), model.clone());
        }
    }

    /// LFU only ever evicts a resident with the minimum access count.
    #[cfg_attr(miri, ignore)]
    #[test]
    fn prop_lfu_evicts_a_minimum(
        capacity in 1usize..10,
        ops in prop::collection::vec(op_strategy(25), 0..200)
    ) {
        let mut cache = LfuCache::try_new(capacity).unwrap();
        for op in ops {
            match op {
                Op::Get(key) => { let _ = cache.get(&key); },
                Op::Set(key, value, _) => {
                    let before: Vec<(u32, u64)> = cache
                        .keys()
                        .map(|k| (*k, cache.frequency(k).unwrap()))
                        .collect();
                    cache.set(key, Entry::new(value));
                    let min = before.iter().map(|(_, f)| *f).min();
                    for (k, f) in &before {
                        if !cache.present(k) {
                            prop_assert_eq!(Some(*f), min);
                        }
                    }
                },
            }
            cache.debug_validate_invariants();
        }
    }

    /// LCR only ever evicts a resident with the minimum cost and stays sorted.
    #[cfg_attr(miri, ignore)]
    #[test]
    fn prop_lcr_evicts_a_minimum(
        capacity in 1usize..10,
        ops in prop::collection::vec(op_strategy(25), 0..200)
    ) {
        let mut cache = LcrCache::try_new(capacity).unwrap();
        for op in ops {
            match op {
                Op::Get(key) => { let _ = cache.get(&key); },
                Op::Set(key, value, cost) => {
                    let before: Vec<(u32, u64)> = cache
                        .keys()
                        .map(|k| (*k, cache.cost(k).unwrap()))
                        .collect();
                    cache.set(key, Entry::with_cost(value, cost));
                    let min = before.iter().map(|(_, c)| *c).min();
                    for (k, c) in &before {
                        if !cache.present(k) {
                            prop_assert_eq!(Some(*c), min);
                        }
                    }
                },
            }
            cache.debug_validate_invariants();
        }
    }

    /// Adaptive weights stay a probability distribution.
    #[cfg_attr(miri, ignore)]
    #[test]
    fn prop_adaptive_weights_sum_to_one(
        capacity in 1usize..8,
        seed in any::<u64>(),
        ops in prop::collection::vec(op_strategy(30), 0..200)
    ) {
        let config = AdaptiveConfig { seed: Some(seed), ..Default::default() };
        let mut lecar = LecarCache::with_config(capacity, &config).unwrap();
        let mut calecar = CalecarCache::with_config(capacity, &config).unwrap();
        for op in ops {
            match op {
                Op::Get(key) => {
                    let _ = lecar.get(&key);
                    let _ = calecar.get(&key);
                },
                Op::Set(key, value, cost) => {
                    lecar.set(key, Entry::with_cost(value, cost));
                    calecar.set(key, Entry::with_cost(value, cost));
                },
            }
        }
        lecar.debug_validate_invariants();
        calecar.debug_validate_invariants();
        let total: f64 = [Expert::Recency, Expert::Frequency, Expert::Cost]
            .into_iter()
            .filter_map(|e| calecar.weight(e))
            .sum();
        prop_assert!((total - 1.0).abs() < 1e-9);
    }
}
