//! # Least Recently Used (LRU) Cache
//!
//! Fixed-capacity cache that evicts the least recently touched entry when a
//! new key is inserted at capacity.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────┐
//!   │                       LruCache<K, V>                         │
//!   │                                                              │
//!   │   ┌────────────────────────────────────────────────────────┐ │
//!   │   │  KeyIndex<K>   (FxHashMap<K, SlotId>)                  │ │
//!   │   │                                                        │ │
//!   │   │  ┌─────────┬──────────────────────────────────┐        │ │
//!   │   │  │   Key   │  SlotId                          │        │ │
//!   │   │  ├─────────┼──────────────────────────────────┤        │ │
//!   │   │  │  k_1    │  ────────────────────────────┐   │        │ │
//!   │   │  │  k_2    │  ──────────────────────┐     │   │        │ │
//!   │   │  └─────────┴────────────────────────┼─────┼───┘        │ │
//!   │   └───────────────────────────────────── ─────┼────────────┘ │
//!   │                                         │     │              │
//!   │   ┌─────────────────────────────────────┼─────┼────────────┐ │
//!   │   │  RecencyList<Entry<K, V>>           ▼     ▼            │ │
//!   │   │                                                        │ │
//!   │   │  front ──► [Entry] ◄──► [Entry] ◄──► [Entry] ◄── back  │ │
//!   │   │    (MRU)                                   (LRU)       │ │
//!   │   └────────────────────────────────────────────────────────┘ │
//!   └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every public operation keeps the pair synchronized: each indexed key has
//! exactly one live ledger node and vice versa, and `len() <= capacity()`
//! always holds.
//!
//! ## Operations
//!
//! | Method             | Complexity | Description                            |
//! |--------------------|------------|----------------------------------------|
//! | `try_new(cap)`     | O(1)       | Validated construction                 |
//! | `insert(k, v)`     | O(1)       | Insert or update, may evict the LRU    |
//! | `get(&k)`          | O(1)       | Value lookup, moves entry to MRU       |
//! | `peek(&k)`         | O(1)       | Value lookup without reordering        |
//! | `remove(&k)`       | O(1)       | Remove entry by key                    |
//! | `pop_lru()`        | O(1)       | Remove and return the LRU entry        |
//! | `peek_lru()`       | O(1)       | Inspect the LRU entry                  |
//! | `touch(&k)`        | O(1)       | Move to MRU without returning a value  |
//! | `recency_rank(&k)` | O(n)       | Position in recency order (0 = MRU)    |
//!
//! A miss on `get` is a normal outcome signaled with `None`, never an error.
//! Exactly one entry is evicted per over-capacity insertion, always the one
//! least recently touched by `get`, `insert`, or `touch`; recency order is
//! total, so the choice is never ambiguous.
//!
//! ## Thread Safety
//!
//! - `LruCache`: **not** thread-safe; a single logical owner performs all
//!   mutations. Correctness depends on the index and ledger being observed
//!   together, so sharing requires one lock around the whole cache.
//! - [`ConcurrentLruCache`]: whole-cache `parking_lot::RwLock` wrapper
//!   (`concurrency` feature). `get` takes the write lock because it updates
//!   recency; `peek` and `contains` take the read lock.

use std::hash::Hash;

#[cfg(feature = "concurrency")]
use parking_lot::RwLock;

use crate::ds::key_index::KeyIndex;
use crate::ds::recency_list::RecencyList;
use crate::error::{ConfigError, InvariantError};
use crate::stats::CacheStats;
use crate::traits::{CoreCache, LruCacheTrait, MutableCache};

/// Default exclusive upper bound on capacity.
///
/// A policy choice, not an architectural constant; use
/// [`LruCache::try_with_limit`] to override.
pub const DEFAULT_CAPACITY_LIMIT: usize = 3000;

/// One cached entry. The key is duplicated here so eviction can remove the
/// index mapping without a reverse lookup.
#[derive(Debug)]
struct Entry<K, V> {
    key: K,
    value: V,
}

/// Fixed-capacity LRU cache pairing a hash index with a recency list.
///
/// # Example
///
/// ```
/// use lrukit::policy::lru::LruCache;
///
/// let mut cache = LruCache::try_new(2).unwrap();
/// cache.insert(1, "one");
/// cache.insert(2, "two");
///
/// cache.get(&1);            // key 1 is now MRU
/// cache.insert(3, "three"); // evicts key 2
///
/// assert_eq!(cache.get(&2), None);
/// assert_eq!(cache.get(&1), Some(&"one"));
/// assert_eq!(cache.len(), 2);
/// ```
#[derive(Debug)]
pub struct LruCache<K, V> {
    index: KeyIndex<K>,
    ledger: RecencyList<Entry<K, V>>,
    capacity: usize,
    stats: CacheStats,
}

impl<K, V> LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates a cache with the given capacity, validated against
    /// [`DEFAULT_CAPACITY_LIMIT`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for capacity `0` or capacity at/above the
    /// limit. No partial cache is created on failure.
    ///
    /// # Example
    ///
    /// ```
    /// use lrukit::policy::lru::LruCache;
    ///
    /// let cache: LruCache<u64, String> = LruCache::try_new(100).unwrap();
    /// assert_eq!(cache.capacity(), 100);
    ///
    /// assert!(LruCache::<u64, String>::try_new(0).is_err());
    /// assert!(LruCache::<u64, String>::try_new(3000).is_err());
    /// ```
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        Self::try_with_limit(capacity, DEFAULT_CAPACITY_LIMIT)
    }

    /// Creates a cache with the given capacity and a custom exclusive
    /// capacity limit.
    pub fn try_with_limit(capacity: usize, limit: usize) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if capacity >= limit {
            return Err(ConfigError::CapacityTooLarge { capacity, limit });
        }
        Ok(Self {
            index: KeyIndex::with_capacity(capacity),
            ledger: RecencyList::with_capacity(capacity),
            capacity,
            stats: CacheStats::new(),
        })
    }

    /// Inserts a key-value pair, returning the previous value if the key
    /// existed.
    ///
    /// An existing key is updated in place and refreshed to most recently
    /// used; the size does not change. A new key at capacity evicts exactly
    /// one entry, the least recently used, before insertion.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        if let Some(id) = self.index.lookup(&key) {
            let moved = self.ledger.move_to_front(id);
            debug_assert!(moved, "indexed handle not live in ledger");
            return self
                .ledger
                .get_mut(id)
                .map(|entry| std::mem::replace(&mut entry.value, value));
        }

        if self.ledger.len() == self.capacity {
            if let Some(evicted) = self.ledger.pop_back() {
                self.index.remove(&evicted.key);
                self.stats.record_eviction();
            }
        }

        let id = self.ledger.push_front(Entry {
            key: key.clone(),
            value,
        });
        self.index.insert(key, id);
        self.stats.record_insert();
        None
    }

    /// Gets a reference to the value for `key`, refreshing its recency.
    ///
    /// A miss returns `None`; it is a first-class outcome, not an error.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        match self.index.lookup(key) {
            Some(id) => {
                let moved = self.ledger.move_to_front(id);
                debug_assert!(moved, "indexed handle not live in ledger");
                self.stats.record_hit();
                self.ledger.get(id).map(|entry| &entry.value)
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    /// Gets a reference to the value for `key` without affecting recency
    /// order or statistics.
    pub fn peek(&self, key: &K) -> Option<&V> {
        let id = self.index.lookup(key)?;
        self.ledger.get(id).map(|entry| &entry.value)
    }

    /// Returns `true` if `key` is present, without affecting recency order.
    pub fn contains(&self, key: &K) -> bool {
        self.index.contains(key)
    }

    /// Removes the entry for `key`, returning its value if present.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let id = self.index.lookup(key)?;
        self.index.remove(key);
        self.ledger.remove(id).map(|entry| entry.value)
    }

    /// Removes and returns the least recently used entry.
    pub fn pop_lru(&mut self) -> Option<(K, V)> {
        let entry = self.ledger.pop_back()?;
        self.index.remove(&entry.key);
        Some((entry.key, entry.value))
    }

    /// Inspects the least recently used entry without removing it.
    pub fn peek_lru(&self) -> Option<(&K, &V)> {
        self.ledger.back().map(|entry| (&entry.key, &entry.value))
    }

    /// Marks `key` as most recently used without retrieving its value.
    ///
    /// Returns `false` if the key is not present.
    pub fn touch(&mut self, key: &K) -> bool {
        match self.index.lookup(key) {
            Some(id) => {
                let moved = self.ledger.move_to_front(id);
                debug_assert!(moved, "indexed handle not live in ledger");
                moved
            }
            None => false,
        }
    }

    /// Returns the recency rank of `key` (0 = most recently used), or
    /// `None` if absent. O(n); intended for diagnostics and tests.
    pub fn recency_rank(&self, key: &K) -> Option<usize> {
        self.ledger.iter().position(|entry| entry.key == *key)
    }

    /// Returns the current number of entries.
    pub fn len(&self) -> usize {
        self.ledger.len()
    }

    /// Returns `true` if the cache contains no entries.
    pub fn is_empty(&self) -> bool {
        self.ledger.is_empty()
    }

    /// Returns the fixed capacity chosen at construction.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Removes all entries. Capacity and statistics are unchanged.
    pub fn clear(&mut self) {
        self.index.clear();
        self.ledger.clear();
    }

    /// Returns the hit/miss/eviction counters.
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Verifies the cross-structure invariants between index and ledger.
    ///
    /// A failure here is a bug in the cache itself, never a user error.
    ///
    /// # Errors
    ///
    /// Returns [`InvariantError`] describing the first violated invariant.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.index.len() != self.ledger.len() {
            return Err(InvariantError::new(format!(
                "index has {} keys but ledger has {} nodes",
                self.index.len(),
                self.ledger.len()
            )));
        }
        if self.ledger.len() > self.capacity {
            return Err(InvariantError::new(format!(
                "size {} exceeds capacity {}",
                self.ledger.len(),
                self.capacity
            )));
        }
        for (key, id) in self.index.iter() {
            match self.ledger.get(id) {
                Some(entry) if entry.key == *key => {}
                Some(_) => {
                    return Err(InvariantError::new(
                        "indexed handle resolves to a node with a different key",
                    ));
                }
                None => {
                    return Err(InvariantError::new(
                        "indexed handle does not resolve to a live node",
                    ));
                }
            }
        }
        if self.ledger.iter().count() != self.ledger.len() {
            return Err(InvariantError::new("ledger links do not reach every node"));
        }
        Ok(())
    }
}

impl<K, V> CoreCache<K, V> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn insert(&mut self, key: K, value: V) -> Option<V> {
        LruCache::insert(self, key, value)
    }

    fn get(&mut self, key: &K) -> Option<&V> {
        LruCache::get(self, key)
    }

    fn contains(&self, key: &K) -> bool {
        LruCache::contains(self, key)
    }

    fn len(&self) -> usize {
        LruCache::len(self)
    }

    fn capacity(&self) -> usize {
        LruCache::capacity(self)
    }

    fn clear(&mut self) {
        LruCache::clear(self)
    }
}

impl<K, V> MutableCache<K, V> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn remove(&mut self, key: &K) -> Option<V> {
        LruCache::remove(self, key)
    }
}

impl<K, V> LruCacheTrait<K, V> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn pop_lru(&mut self) -> Option<(K, V)> {
        LruCache::pop_lru(self)
    }

    fn peek_lru(&self) -> Option<(&K, &V)> {
        LruCache::peek_lru(self)
    }

    fn touch(&mut self, key: &K) -> bool {
        LruCache::touch(self, key)
    }

    fn recency_rank(&self, key: &K) -> Option<usize> {
        LruCache::recency_rank(self, key)
    }
}

/// Thread-safe wrapper guarding a whole [`LruCache`] with one
/// `parking_lot::RwLock`.
///
/// The index and ledger must be observed together, so there is no
/// fine-grained locking: recency-updating reads (`get`, `touch`) take the
/// write lock, order-preserving reads (`peek`, `contains`, `len`) take the
/// read lock. Values are returned by clone.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use lrukit::policy::lru::ConcurrentLruCache;
///
/// let cache = Arc::new(ConcurrentLruCache::try_new(100).unwrap());
/// let handle = Arc::clone(&cache);
/// std::thread::spawn(move || {
///     handle.insert(1, "one".to_string());
/// })
/// .join()
/// .unwrap();
///
/// assert_eq!(cache.get(&1), Some("one".to_string()));
/// ```
#[cfg(feature = "concurrency")]
#[derive(Debug)]
pub struct ConcurrentLruCache<K, V> {
    inner: RwLock<LruCache<K, V>>,
}

#[cfg(feature = "concurrency")]
impl<K, V> ConcurrentLruCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Creates a concurrent cache with the given capacity.
    ///
    /// # Errors
    ///
    /// Same validation as [`LruCache::try_new`].
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        Ok(Self {
            inner: RwLock::new(LruCache::try_new(capacity)?),
        })
    }

    /// Creates a concurrent cache with a custom capacity limit.
    pub fn try_with_limit(capacity: usize, limit: usize) -> Result<Self, ConfigError> {
        Ok(Self {
            inner: RwLock::new(LruCache::try_with_limit(capacity, limit)?),
        })
    }

    /// Inserts a key-value pair, returning the previous value if present.
    pub fn insert(&self, key: K, value: V) -> Option<V> {
        self.inner.write().insert(key, value)
    }

    /// Gets a clone of the value for `key`, refreshing its recency.
    pub fn get(&self, key: &K) -> Option<V> {
        self.inner.write().get(key).cloned()
    }

    /// Gets a clone of the value for `key` without reordering.
    pub fn peek(&self, key: &K) -> Option<V> {
        self.inner.read().peek(key).cloned()
    }

    /// Returns `true` if `key` is present.
    pub fn contains(&self, key: &K) -> bool {
        self.inner.read().contains(key)
    }

    /// Removes the entry for `key`, returning its value if present.
    pub fn remove(&self, key: &K) -> Option<V> {
        self.inner.write().remove(key)
    }

    /// Removes and returns the least recently used entry.
    pub fn pop_lru(&self) -> Option<(K, V)> {
        self.inner.write().pop_lru()
    }

    /// Clones the least recently used entry without removing it.
    pub fn peek_lru(&self) -> Option<(K, V)> {
        self.inner
            .read()
            .peek_lru()
            .map(|(k, v)| (k.clone(), v.clone()))
    }

    /// Marks `key` as most recently used.
    pub fn touch(&self, key: &K) -> bool {
        self.inner.write().touch(key)
    }

    /// Returns the current number of entries.
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    /// Returns `true` if the cache contains no entries.
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Returns the fixed capacity.
    pub fn capacity(&self) -> usize {
        self.inner.read().capacity()
    }

    /// Removes all entries.
    pub fn clear(&self) {
        self.inner.write().clear()
    }

    /// Returns the current hit ratio in `[0.0, 1.0]`.
    pub fn hit_ratio(&self) -> f64 {
        self.inner.read().stats().hit_ratio()
    }
}
