// ==============================================
// CACHE INVARIANT TESTS (integration)
// ==============================================
//
// End-to-end checks of the index/ledger pairing through the public API:
// size bounds, read-your-write, eviction order, and construction
// validation. These exercise sequences spanning every public operation and
// belong here rather than in any single source file.

use lrukit::error::ConfigError;
use lrukit::policy::lru::{LruCache, DEFAULT_CAPACITY_LIMIT};
use lrukit::traits::{LruCacheTrait, MutableCache};

// ==============================================
// Size bound
// ==============================================

mod size_bound {
    use super::*;

    #[test]
    fn size_never_exceeds_capacity_for_any_sequence() {
        for capacity in 1..=8usize {
            let mut cache: LruCache<u64, u64> = LruCache::try_new(capacity).unwrap();
            // Deterministic mixed workload with key churn well beyond capacity.
            for step in 0..500u64 {
                let key = (step * 7 + step / 3) % 32;
                match step % 4 {
                    0 | 1 => {
                        cache.insert(key, step);
                    }
                    2 => {
                        cache.get(&key);
                    }
                    _ => {
                        cache.remove(&key);
                    }
                }
                assert!(
                    cache.len() <= capacity,
                    "len {} exceeded capacity {} at step {}",
                    cache.len(),
                    capacity,
                    step
                );
                cache.check_invariants().unwrap();
            }
        }
    }
}

// ==============================================
// Read-your-write
// ==============================================

mod read_your_write {
    use super::*;

    #[test]
    fn get_immediately_after_insert_returns_value() {
        let mut cache: LruCache<u64, String> = LruCache::try_new(3).unwrap();
        for key in 0..50u64 {
            cache.insert(key, format!("v{key}"));
            assert_eq!(cache.get(&key), Some(&format!("v{key}")));
        }
    }

    #[test]
    fn update_in_place_keeps_size_and_promotes() {
        let mut cache: LruCache<u64, u64> = LruCache::try_new(4).unwrap();
        cache.insert(1, 1);
        cache.insert(2, 2);
        cache.insert(3, 3);

        let before = cache.len();
        assert_eq!(cache.insert(1, 100), Some(1));
        assert_eq!(cache.len(), before);
        assert_eq!(cache.recency_rank(&1), Some(0));
    }
}

// ==============================================
// Eviction order
// ==============================================

mod eviction_order {
    use super::*;

    #[test]
    fn victim_is_always_the_least_recently_touched() {
        let mut cache: LruCache<u64, u64> = LruCache::try_new(3).unwrap();
        cache.insert(1, 1);
        cache.insert(2, 2);
        cache.insert(3, 3);

        // Touch order now: 3 (MRU), 2, 1 (LRU). Refresh 1 and 2 via get and
        // touch; 3 becomes the victim.
        cache.get(&1);
        cache.touch(&2);
        cache.insert(4, 4);

        assert!(!cache.contains(&3));
        assert!(cache.contains(&1));
        assert!(cache.contains(&2));
        assert!(cache.contains(&4));
    }

    #[test]
    fn untouched_keys_drain_in_insertion_order() {
        let mut cache: LruCache<u64, u64> = LruCache::try_new(4).unwrap();
        for key in 1..=4 {
            cache.insert(key, key);
        }
        for expected in 1..=4 {
            assert_eq!(cache.pop_lru(), Some((expected, expected)));
        }
    }

    #[test]
    fn full_turnover_replaces_every_entry() {
        let mut cache: LruCache<u64, u64> = LruCache::try_new(3).unwrap();
        for key in 0..3 {
            cache.insert(key, key);
        }
        for key in 10..13 {
            cache.insert(key, key);
        }

        for key in 0..3 {
            assert!(!cache.contains(&key));
        }
        for key in 10..13 {
            assert!(cache.contains(&key));
        }
        assert_eq!(cache.stats().evictions(), 3);
        cache.check_invariants().unwrap();
    }
}

// ==============================================
// Worked scenarios
// ==============================================

mod worked_scenarios {
    use super::*;

    #[test]
    fn update_then_read_back_both_keys() {
        let mut cache: LruCache<i32, i32> = LruCache::try_new(2).unwrap();
        cache.insert(2, 6);
        assert_eq!(cache.get(&1), None);
        cache.insert(1, 5);
        cache.insert(1, 2);
        assert_eq!(cache.get(&1), Some(&2));
        assert_eq!(cache.get(&2), Some(&6));
    }

    #[test]
    fn refreshed_key_survives_overflow() {
        let mut cache: LruCache<i32, i32> = LruCache::try_new(2).unwrap();
        cache.insert(1, 1);
        cache.insert(2, 2);
        assert_eq!(cache.get(&1), Some(&1));
        cache.insert(3, 3);
        assert_eq!(cache.get(&2), None);
        assert_eq!(cache.get(&3), Some(&3));
    }
}

// ==============================================
// Construction validation
// ==============================================

mod construction {
    use super::*;

    #[test]
    fn zero_capacity_fails() {
        assert_eq!(
            LruCache::<u64, u64>::try_new(0).unwrap_err(),
            ConfigError::ZeroCapacity
        );
    }

    #[test]
    fn capacity_at_or_above_limit_fails() {
        for capacity in [DEFAULT_CAPACITY_LIMIT, DEFAULT_CAPACITY_LIMIT + 1] {
            let err = LruCache::<u64, u64>::try_new(capacity).unwrap_err();
            assert_eq!(
                err,
                ConfigError::CapacityTooLarge {
                    capacity,
                    limit: DEFAULT_CAPACITY_LIMIT,
                }
            );
        }
    }

    #[test]
    fn errors_display_the_offending_parameter() {
        let err = LruCache::<u64, u64>::try_new(5000).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("5000"));
        assert!(msg.contains("3000"));
    }
}

// ==============================================
// Trait-object usage
// ==============================================

mod trait_usage {
    use super::*;

    fn churn<C: LruCacheTrait<u64, u64>>(cache: &mut C) {
        for key in 0..10 {
            cache.insert(key, key);
        }
        cache.touch(&5);
        let _ = cache.pop_lru();
    }

    #[test]
    fn lru_cache_works_through_trait_bounds() {
        let mut cache: LruCache<u64, u64> = LruCache::try_new(4).unwrap();
        churn(&mut cache);
        assert!(cache.contains(&5));
        assert!(cache.len() <= 4);
        cache.check_invariants().unwrap();
    }

    #[test]
    fn remove_batch_through_mutable_cache() {
        let mut cache: LruCache<u64, u64> = LruCache::try_new(4).unwrap();
        cache.insert(1, 1);
        cache.insert(2, 2);
        let removed = MutableCache::remove_batch(&mut cache, &[2, 3]);
        assert_eq!(removed, vec![Some(2), None]);
    }
}

// ==============================================
// Concurrent wrapper
// ==============================================

#[cfg(feature = "concurrency")]
mod concurrent {
    use std::sync::Arc;

    use lrukit::policy::lru::ConcurrentLruCache;

    #[test]
    fn parallel_readers_and_writers_keep_size_bounded() {
        let cache = Arc::new(ConcurrentLruCache::try_new(32).unwrap());
        let handles: Vec<_> = (0..4u64)
            .map(|t| {
                let cache = Arc::clone(&cache);
                std::thread::spawn(move || {
                    for i in 0..200u64 {
                        let key = (t * 200 + i) % 64;
                        if i % 3 == 0 {
                            cache.insert(key, i);
                        } else {
                            let _ = cache.get(&key);
                        }
                        assert!(cache.len() <= 32);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert!(cache.len() <= 32);
    }

    #[test]
    fn construction_validation_applies_to_wrapper() {
        assert!(ConcurrentLruCache::<u64, u64>::try_new(0).is_err());
        assert!(ConcurrentLruCache::<u64, u64>::try_with_limit(50, 10).is_err());
    }
}
