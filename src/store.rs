//! Key → entry map with recency ordering.
//!
//! ```text
//!   ┌──────────────────────────────┐
//!   │ FxHashMap<String, SlotId>    │
//!   │  "a.example:443" ── id_2 ──┐ │
//!   │  "b.example:443" ── id_1 ─┐│ │
//!   └───────────────────────────┼┼─┘
//!                               ▼▼
//!   RecencyList<CacheEntry<S>>
//!     head (MRU) ─► [id_1] ◄──► [id_2] ◄── tail (LRU)
//! ```
//!
//! Every operation that takes a [`CacheEntry`] out of the store hands it back
//! to the caller, which decides when its session reference is released. The
//! store itself never acquires or releases.

use std::time::SystemTime;

use rustc_hash::FxHashMap;

use crate::ds::{RecencyList, SlotId};
use crate::handle::SessionHandle;

/// A stored mapping: the resumption key, one strong session reference, and the
/// instant the mapping was created.
#[derive(Debug)]
pub struct CacheEntry<S> {
    key: String,
    handle: SessionHandle<S>,
    inserted_at: SystemTime,
}

impl<S> CacheEntry<S> {
    pub fn new(key: impl Into<String>, handle: SessionHandle<S>, inserted_at: SystemTime) -> Self {
        Self {
            key: key.into(),
            handle,
            inserted_at,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn handle(&self) -> &SessionHandle<S> {
        &self.handle
    }

    pub fn inserted_at(&self) -> SystemTime {
        self.inserted_at
    }

    /// Consumes the entry and drops its session reference.
    pub fn release(self) {
        self.handle.release();
    }
}

/// Entries indexed by key and ordered most- to least-recently used.
#[derive(Debug)]
pub struct EntryStore<S> {
    index: FxHashMap<String, SlotId>,
    order: RecencyList<CacheEntry<S>>,
}

impl<S> EntryStore<S> {
    pub fn new() -> Self {
        Self {
            index: FxHashMap::default(),
            order: RecencyList::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            order: RecencyList::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    #[inline]
    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Looks up `key` without touching recency.
    pub fn get(&self, key: &str) -> Option<&CacheEntry<S>> {
        let id = *self.index.get(key)?;
        self.order.get(id)
    }

    /// Looks up `key` and makes it the most recently used entry.
    pub fn get_and_promote(&mut self, key: &str) -> Option<&CacheEntry<S>> {
        let id = *self.index.get(key)?;
        self.order.move_to_front(id);
        self.order.get(id)
    }

    /// Stores `entry` at the most-recently-used end.
    ///
    /// Returns the entry previously stored under the same key, if any. The
    /// caller owns it and must release it.
    pub fn insert(&mut self, entry: CacheEntry<S>) -> Option<CacheEntry<S>> {
        let replaced = self.remove(&entry.key);
        let key = entry.key.clone();
        let id = self.order.push_front(entry);
        self.index.insert(key, id);
        replaced
    }

    pub fn remove(&mut self, key: &str) -> Option<CacheEntry<S>> {
        let id = self.index.remove(key)?;
        self.order.remove(id)
    }

    /// Removes the least recently used entry.
    pub fn pop_lru(&mut self) -> Option<CacheEntry<S>> {
        let entry = self.order.pop_back()?;
        self.index.remove(&entry.key);
        Some(entry)
    }

    /// Key of the least recently used entry.
    pub fn peek_lru(&self) -> Option<&str> {
        self.order.back().map(CacheEntry::key)
    }

    /// Removes every entry for which `keep` returns `false` and hands the
    /// removed entries back. Relative order of the survivors is unchanged.
    pub fn extract_if<F>(&mut self, mut keep: F) -> Vec<CacheEntry<S>>
    where
        F: FnMut(&CacheEntry<S>) -> bool,
    {
        let doomed: Vec<SlotId> = self
            .order
            .iter_entries()
            .filter(|(_, entry)| !keep(*entry))
            .map(|(id, _)| id)
            .collect();

        let mut removed = Vec::with_capacity(doomed.len());
        for id in doomed {
            if let Some(entry) = self.order.remove(id) {
                self.index.remove(&entry.key);
                removed.push(entry);
            }
        }
        removed
    }

    /// Empties the store, yielding every entry most recently used first.
    pub fn drain(&mut self) -> impl Iterator<Item = CacheEntry<S>> + '_ {
        self.index.clear();
        self.order.drain()
    }

    /// Keys from most to least recently used.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(CacheEntry::key)
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        self.order.debug_validate_invariants();
        assert_eq!(
            self.index.len(),
            self.order.len(),
            "index and recency list disagree on size"
        );
        for (key, &id) in &self.index {
            let entry = self
                .order
                .get(id)
                .unwrap_or_else(|| panic!("index points at a dead slot for {key:?}"));
            assert_eq!(entry.key, *key, "slot holds a different key");
        }
    }
}

impl<S> Default for EntryStore<S> {
    fn default() -> Self {
        Self::new()
    }
}
