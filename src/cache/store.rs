//! Cache Store Module
//!
//! Main cache engine combining HashMap storage with the recency index and
//! TTL expiration. The store is single-threaded; `Cache` wraps it in a lock.
//! Every time-dependent operation takes `now` explicitly.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::cache::{CacheEntry, CacheStats, RecencyIndex};
use crate::error::{CacheError, Result};

/// Upper bound on slots reserved up front; larger stores grow on demand.
const PREALLOCATE_LIMIT: usize = 4096;

// == Cache Store ==
/// Cache storage with LRU eviction and TTL support.
///
/// Invariants after every operation:
/// - `entries.len() <= capacity`
/// - `entries.len() == recency.len()`, and each entry's slot holds its key
#[derive(Debug)]
pub struct CacheStore {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// Recency ordering, MRU first
    recency: RecencyIndex,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of entries allowed
    capacity: usize,
}

impl CacheStore {
    // == Constructor ==
    /// Creates a new CacheStore holding at most `capacity` entries.
    ///
    /// # Errors
    /// `CacheError::InvalidConfig` if `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(CacheError::InvalidConfig(
                "capacity must be at least 1".to_string(),
            ));
        }

        let reserve = capacity.min(PREALLOCATE_LIMIT);
        Ok(Self {
            entries: HashMap::with_capacity(reserve),
            recency: RecencyIndex::with_capacity(reserve),
            stats: CacheStats::new(capacity),
            capacity,
        })
    }

    // == Put ==
    /// Stores a key-value pair, refreshing it to most recently used.
    ///
    /// Overwriting an existing key replaces its value and TTL without
    /// counting as an insertion. Inserting a new key into a full store
    /// first evicts the least recently used entry, expired or not.
    ///
    /// # Arguments
    /// * `ttl` - `None` or zero for an immortal entry
    pub fn put(&mut self, key: String, value: String, ttl: Option<Duration>, now: Instant) {
        if let Some(entry) = self.entries.get_mut(&key) {
            entry.refresh(value, ttl, now);
            self.recency.move_to_front(entry.slot);
            self.check_invariants();
            return;
        }

        if self.entries.len() >= self.capacity {
            self.evict_oldest();
        }

        let slot = self.recency.insert_at_front(key.clone());
        let entry = CacheEntry::new(value, ttl, now, slot);
        self.entries.insert(key, entry);
        self.check_invariants();
    }

    // == Get ==
    /// Looks up a live entry and marks it most recently used.
    ///
    /// An expired entry counts as a miss and is removed on the spot.
    pub fn get(&mut self, key: &str, now: Instant) -> Option<&CacheEntry> {
        let expired = match self.entries.get(key) {
            Some(entry) => entry.is_expired(now),
            None => {
                self.stats.record_miss();
                return None;
            }
        };

        if expired {
            self.remove_entry(key);
            self.stats.record_expirations(1);
            self.stats.record_miss();
            self.check_invariants();
            debug!(key, "removed expired entry on access");
            return None;
        }

        self.stats.record_hit();
        let entry = self.entries.get(key)?;
        self.recency.move_to_front(entry.slot);
        Some(entry)
    }

    // == Contains ==
    /// Checks whether a live entry exists without touching recency or stats.
    pub fn contains(&self, key: &str, now: Instant) -> bool {
        self.entries
            .get(key)
            .is_some_and(|entry| !entry.is_expired(now))
    }

    // == Delete ==
    /// Removes an entry by key.
    ///
    /// Returns `false` if the key was absent; deleting twice is harmless.
    pub fn delete(&mut self, key: &str) -> bool {
        let removed = self.remove_entry(key).is_some();
        self.check_invariants();
        removed
    }

    // == Purge Expired ==
    /// Removes all entries expired at `now`.
    ///
    /// Returns the number of entries removed.
    pub fn purge_expired(&mut self, now: Instant) -> usize {
        let before = self.entries.len();
        let recency = &mut self.recency;

        self.entries.retain(|_, entry| {
            if entry.is_expired(now) {
                recency.remove(entry.slot);
                false
            } else {
                true
            }
        });

        let removed = before - self.entries.len();
        self.stats.record_expirations(removed);
        self.check_invariants();
        removed
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.total_entries = self.entries.len();
        stats
    }

    /// Returns the current number of entries, including expired entries not
    /// yet touched or swept.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Keys from most to least recently used.
    pub fn keys_by_recency(&self) -> impl Iterator<Item = &str> {
        self.recency.iter()
    }

    fn evict_oldest(&mut self) {
        if let Some(evicted) = self.recency.remove_oldest() {
            self.entries.remove(&evicted);
            self.stats.record_eviction();
            debug!(key = %evicted, "evicted least recently used entry");
        }
    }

    fn remove_entry(&mut self, key: &str) -> Option<CacheEntry> {
        let entry = self.entries.remove(key)?;
        self.recency.remove(entry.slot);
        Some(entry)
    }

    fn check_invariants(&self) {
        debug_assert_eq!(
            self.entries.len(),
            self.recency.len(),
            "map and recency index out of sync"
        );
        debug_assert!(
            self.entries.len() <= self.capacity,
            "store holds {} entries over capacity {}",
            self.entries.len(),
            self.capacity
        );
        debug_assert!(
            self.recency.boundaries_consistent(),
            "recency sentinels inconsistent"
        );
    }
}
