//! TTL LRU Cache - A concurrent in-memory cache
//!
//! Bounds memory with least-recently-used eviction, expires entries by
//! per-entry TTL, and reclaims expired entries in the background.
//! An axum front-end in [`api`] exposes the cache over HTTP.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use cache::{Cache, CacheStats};
pub use config::{CacheConfig, Config};
pub use error::CacheError;
