//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use std::time::{Duration, Instant};

use crate::cache::lru::Slot;

// == Cache Entry ==
/// Represents a single live cache slot: the value, its expiry and its node
/// in the recency index.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The stored value
    pub value: String,
    /// When the current value was written
    pub created_at: Instant,
    /// Expiration instant, None = immortal
    pub expires_at: Option<Instant>,
    /// Handle of this entry's node in the recency index
    pub(crate) slot: Slot,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new cache entry written at `now`.
    ///
    /// A TTL of `None` or zero makes the entry immortal.
    pub(crate) fn new(value: String, ttl: Option<Duration>, now: Instant, slot: Slot) -> Self {
        Self {
            value,
            created_at: now,
            expires_at: expiry_for(ttl, now),
            slot,
        }
    }

    // == Refresh ==
    /// Replaces value and TTL in place, keeping the recency slot.
    pub(crate) fn refresh(&mut self, value: String, ttl: Option<Duration>, now: Instant) {
        self.value = value;
        self.created_at = now;
        self.expires_at = expiry_for(ttl, now);
    }

    // == Is Expired ==
    /// Checks if the entry has expired at `now`.
    ///
    /// Boundary condition: an entry is expired once `now >= expires_at`, so
    /// the TTL is exclusive of its final instant.
    pub fn is_expired(&self, now: Instant) -> bool {
        match self.expires_at {
            Some(expires) => now >= expires,
            None => false,
        }
    }

    // == Time To Live ==
    /// Returns remaining TTL at `now`, or None if the entry is immortal.
    ///
    /// # Returns
    /// - `Some(Duration::ZERO)` if the TTL has elapsed
    /// - `Some(remaining)` if the entry has TTL and hasn't expired
    /// - `None` if the entry never expires
    pub fn ttl_remaining(&self, now: Instant) -> Option<Duration> {
        self.expires_at
            .map(|expires| expires.saturating_duration_since(now))
    }
}

/// Converts a relative TTL into an absolute expiry. Zero means "no TTL".
fn expiry_for(ttl: Option<Duration>, now: Instant) -> Option<Instant> {
    match ttl {
        Some(ttl) if !ttl.is_zero() => now.checked_add(ttl),
        _ => None,
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    fn entry(ttl: Option<Duration>, now: Instant) -> CacheEntry {
        CacheEntry::new("test_value".to_string(), ttl, now, 2)
    }

    #[test]
    fn test_entry_creation_no_ttl() {
        let now = Instant::now();
        let entry = entry(None, now);

        assert_eq!(entry.value, "test_value");
        assert!(entry.expires_at.is_none());
        assert!(!entry.is_expired(now + Duration::from_secs(86_400)));
    }

    #[test]
    fn test_entry_zero_ttl_is_immortal() {
        let now = Instant::now();
        let entry = entry(Some(Duration::ZERO), now);

        assert!(entry.expires_at.is_none());
        assert!(entry.ttl_remaining(now).is_none());
    }

    #[test]
    fn test_entry_creation_with_ttl() {
        let now = Instant::now();
        let entry = entry(Some(Duration::from_secs(60)), now);

        assert_eq!(entry.expires_at, Some(now + Duration::from_secs(60)));
        assert!(!entry.is_expired(now));
        assert!(entry.is_expired(now + Duration::from_secs(61)));
    }

    #[test]
    fn test_expiration_boundary_condition() {
        let now = Instant::now();
        let entry = entry(Some(Duration::from_secs(2)), now);

        assert!(!entry.is_expired(now + Duration::from_millis(1999)));
        assert!(entry.is_expired(now + Duration::from_secs(2)), "expired at boundary");
    }

    #[test]
    fn test_ttl_remaining() {
        let now = Instant::now();
        let entry = entry(Some(Duration::from_secs(10)), now);

        assert_eq!(
            entry.ttl_remaining(now + Duration::from_secs(4)),
            Some(Duration::from_secs(6))
        );
        // Saturates once elapsed
        assert_eq!(
            entry.ttl_remaining(now + Duration::from_secs(30)),
            Some(Duration::ZERO)
        );
    }

    #[test]
    fn test_refresh_replaces_value_and_ttl() {
        let now = Instant::now();
        let mut entry = entry(Some(Duration::from_secs(1)), now);
        let later = now + Duration::from_millis(500);

        entry.refresh("new".to_string(), None, later);

        assert_eq!(entry.value, "new");
        assert_eq!(entry.created_at, later);
        assert!(entry.expires_at.is_none());
        assert_eq!(entry.slot, 2);
    }
}
