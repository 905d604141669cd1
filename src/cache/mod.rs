//! Cache Module
//!
//! Provides in-memory caching with TTL expiration and LRU eviction.
//!
//! - [`CacheStore`] is the single-threaded core: a map of entries plus an
//!   arena-backed recency index.
//! - [`Cache`] is the shared handle callers use; it serializes every
//!   operation through one lock and owns the background reclaimer.

mod entry;
mod handle;
mod lru;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use handle::Cache;
pub use lru::{RecencyIndex, Slot};
pub use stats::CacheStats;
pub use store::CacheStore;
