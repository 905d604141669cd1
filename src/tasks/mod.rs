//! Background Tasks Module
//!
//! Contains background tasks that run periodically alongside the cache.
//!
//! # Tasks
//! - TTL Reclaimer: Removes expired cache entries at a fixed interval

mod reclaimer;

pub use reclaimer::Reclaimer;
