//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use std::time::Duration;

use tokio::time::Instant;

// == Cache Entry ==
/// A stored value together with its absolute expiry instant.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Instant after which the entry is logically absent
    pub expires_at: Instant,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates an entry that expires `ttl` after `now`.
    pub fn new(value: V, ttl: Duration, now: Instant) -> Self {
        Self {
            value,
            expires_at: now + ttl,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired at `now`.
    ///
    /// Boundary condition: an entry is expired once `now >= expires_at`, so a
    /// value set with TTL `t` is visible for `[0, t)` and gone from `t` on.
    /// A zero TTL therefore yields an entry that is already expired.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_fresh_before_ttl() {
        let now = Instant::now();
        let entry = CacheEntry::new("value", Duration::from_secs(15), now);

        assert!(!entry.is_expired_at(now));
        assert!(!entry.is_expired_at(now + Duration::from_millis(14_999)));
    }

    #[test]
    fn test_expiration_boundary_condition() {
        let now = Instant::now();
        let entry = CacheEntry::new("value", Duration::from_secs(15), now);

        assert!(entry.is_expired_at(now + Duration::from_secs(15)));
        assert!(entry.is_expired_at(now + Duration::from_secs(16)));
    }

    #[test]
    fn test_zero_ttl_is_already_expired() {
        let now = Instant::now();
        let entry = CacheEntry::new(1u8, Duration::ZERO, now);

        assert!(entry.is_expired_at(now));
    }
}
