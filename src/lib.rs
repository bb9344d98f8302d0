//! lrukit: fixed-capacity LRU caching built on a slot-arena recency list.
//!
//! The cache pairs a hash index (key -> stable slot handle) with a recency
//! list (MRU at the front, LRU at the back) whose nodes live in a slot arena
//! and are linked by `SlotId`, so every operation is O(1) without raw
//! pointers.
//!
//! ```
//! use lrukit::policy::lru::LruCache;
//!
//! let mut cache: LruCache<u32, &str> = LruCache::try_new(2).unwrap();
//! cache.insert(1, "one");
//! cache.insert(2, "two");
//! cache.get(&1);            // refreshes key 1
//! cache.insert(3, "three"); // evicts key 2, the least recently used
//! assert_eq!(cache.get(&2), None);
//! assert_eq!(cache.get(&1), Some(&"one"));
//! ```

pub mod ds;
pub mod error;
pub mod policy;
pub mod prelude;
pub mod stats;
pub mod traits;
