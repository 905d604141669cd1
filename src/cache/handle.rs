//! Shared Cache Handle
//!
//! Thread-safe front of the cache. One `parking_lot::Mutex` guards the map
//! and the recency index together, so every operation observes them in
//! agreement. The lock is never held across an `.await`.

use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use tracing::info;

use crate::cache::{CacheStats, CacheStore};
use crate::config::CacheConfig;
use crate::error::Result;
use crate::tasks::Reclaimer;

// == Cache ==
/// Cloneable handle to a capacity-bounded LRU cache with per-entry TTL.
///
/// Clones share the same store. The background reclaimer stops on
/// [`Cache::close`], on [`Cache::shutdown`], or when the last handle drops.
/// After closing, the cache keeps serving requests; expired entries are
/// then only removed lazily on `get` or by an explicit
/// [`Cache::purge_expired`].
#[derive(Debug, Clone)]
pub struct Cache {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    store: Arc<Mutex<CacheStore>>,
    reclaimer: Mutex<Option<Reclaimer>>,
}

impl Drop for Inner {
    fn drop(&mut self) {
        if let Some(reclaimer) = self.reclaimer.get_mut().take() {
            reclaimer.stop();
        }
    }
}

impl Cache {
    // == Constructors ==
    /// Creates a cache with the default sweep interval.
    ///
    /// Must be called inside a Tokio runtime since the reclaimer is enabled.
    pub fn new(capacity: usize) -> Result<Self> {
        Self::with_config(CacheConfig::new(capacity))
    }

    /// Creates a cache from explicit configuration.
    ///
    /// The store is fully built before the reclaimer is spawned.
    ///
    /// # Errors
    /// - `CacheError::InvalidConfig` if capacity is zero
    /// - `CacheError::RuntimeUnavailable` if sweeping is enabled outside a
    ///   Tokio runtime
    pub fn with_config(config: CacheConfig) -> Result<Self> {
        let store = Arc::new(Mutex::new(CacheStore::new(config.capacity)?));

        let reclaimer = if config.sweep_interval.is_zero() {
            None
        } else {
            Some(Reclaimer::spawn(store.clone(), config.sweep_interval)?)
        };

        Ok(Self {
            inner: Arc::new(Inner {
                store,
                reclaimer: Mutex::new(reclaimer),
            }),
        })
    }

    // == Put ==
    /// Inserts or overwrites a key as most recently used.
    ///
    /// `ttl` of `None` or zero makes the entry immortal.
    pub fn put(&self, key: impl Into<String>, value: impl Into<String>, ttl: Option<Duration>) {
        let (key, value) = (key.into(), value.into());
        self.inner.store.lock().put(key, value, ttl, Instant::now());
    }

    /// Like [`Cache::put`] with the TTL in whole seconds; `0` is immortal.
    pub fn put_secs(&self, key: impl Into<String>, value: impl Into<String>, ttl_secs: u64) {
        self.put(key, value, Some(Duration::from_secs(ttl_secs)));
    }

    // == Get ==
    /// Returns the value of a live entry and marks it most recently used.
    ///
    /// An expired entry is removed by this call and reported as a miss.
    pub fn get(&self, key: &str) -> Option<String> {
        let now = Instant::now();
        self.inner
            .store
            .lock()
            .get(key, now)
            .map(|entry| entry.value.clone())
    }

    /// Like [`Cache::get`], also returning the remaining TTL (`None` if
    /// the entry is immortal).
    pub fn get_with_ttl(&self, key: &str) -> Option<(String, Option<Duration>)> {
        let now = Instant::now();
        self.inner
            .store
            .lock()
            .get(key, now)
            .map(|entry| (entry.value.clone(), entry.ttl_remaining(now)))
    }

    /// Checks for a live entry without refreshing recency.
    pub fn contains(&self, key: &str) -> bool {
        self.inner.store.lock().contains(key, Instant::now())
    }

    // == Delete ==
    /// Removes a key. Returns `false` when it was not present.
    pub fn delete(&self, key: &str) -> bool {
        self.inner.store.lock().delete(key)
    }

    // == Size ==
    /// Number of entries currently held.
    ///
    /// This is an upper bound on the live count: expired entries stay until
    /// touched by `get` or removed by a sweep.
    pub fn size(&self) -> usize {
        self.inner.store.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    pub fn capacity(&self) -> usize {
        self.inner.store.lock().capacity()
    }

    /// Current statistics snapshot.
    pub fn stats(&self) -> CacheStats {
        self.inner.store.lock().stats()
    }

    /// Runs one sweep now. Returns the number of entries removed.
    pub fn purge_expired(&self) -> usize {
        self.inner.store.lock().purge_expired(Instant::now())
    }

    // == Lifecycle ==
    /// Whether the background reclaimer is active.
    pub fn is_sweeping(&self) -> bool {
        self.inner
            .reclaimer
            .lock()
            .as_ref()
            .is_some_and(Reclaimer::is_running)
    }

    /// Stops the background reclaimer without waiting for it to exit.
    ///
    /// Idempotent. Foreground operations stay usable.
    pub fn close(&self) {
        if let Some(reclaimer) = self.inner.reclaimer.lock().as_ref() {
            if reclaimer.is_running() {
                reclaimer.stop();
                info!("Cache closed, background sweep stopped");
            }
        }
    }

    /// Stops the background reclaimer and waits for its task to finish.
    pub async fn shutdown(&self) {
        let reclaimer = self.inner.reclaimer.lock().take();
        if let Some(reclaimer) = reclaimer {
            reclaimer.shutdown().await;
            info!("Cache shut down");
        }
    }
}
