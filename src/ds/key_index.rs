//! Hash index from key to recency-list handle.
//!
//! Thin wrapper over `FxHashMap<K, SlotId>` that encodes the orchestrator's
//! contract: a key maps to exactly one live node, mappings are never
//! silently overwritten, and callers only remove keys they know exist.
//! Violations are caught by debug assertions rather than surfaced as
//! recoverable errors.

use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::ds::slot_arena::SlotId;

/// O(1) translation from key to [`SlotId`].
#[derive(Debug)]
pub struct KeyIndex<K> {
    map: FxHashMap<K, SlotId>,
}

impl<K> KeyIndex<K>
where
    K: Eq + Hash,
{
    /// Creates an empty index.
    pub fn new() -> Self {
        Self {
            map: FxHashMap::default(),
        }
    }

    /// Creates an empty index with reserved capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            map: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    /// Returns the handle for `key`, if present. A miss is a normal outcome,
    /// never an error.
    pub fn lookup(&self, key: &K) -> Option<SlotId> {
        self.map.get(key).copied()
    }

    /// Associates `key` with `id`. Overwriting a live mapping is a contract
    /// bug in the caller: the stale mapping must be removed first.
    pub fn insert(&mut self, key: K, id: SlotId) {
        let previous = self.map.insert(key, id);
        debug_assert!(previous.is_none(), "key index mapping overwritten");
    }

    /// Removes the mapping for `key`, returning its handle. Callers only
    /// remove keys they know exist; an absent key is a contract bug.
    pub fn remove(&mut self, key: &K) -> Option<SlotId> {
        let removed = self.map.remove(key);
        debug_assert!(removed.is_some(), "removed key absent from index");
        removed
    }

    /// Returns `true` if `key` is present.
    pub fn contains(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    /// Returns the number of mappings.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` if the index is empty.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Removes all mappings.
    pub fn clear(&mut self) {
        self.map.clear();
    }

    /// Iterates over `(key, handle)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, SlotId)> {
        self.map.iter().map(|(k, id)| (k, *id))
    }
}

impl<K> Default for KeyIndex<K>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}
