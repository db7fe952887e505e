//! A single cached snapshot.

use derive_getters::Getters;
use std::sync::Arc;
use std::time::Duration;
use tally_core::{CandidateEntity, CollectionKey};
use tokio::time::Instant;

/// Cache entry with value and expiration.
#[derive(Debug, Clone, Getters)]
pub struct CacheEntry {
    key: CollectionKey,
    value: Arc<[CandidateEntity]>,
    created_at: Instant,
    ttl: Duration,
}

impl CacheEntry {
    pub(crate) fn new(key: CollectionKey, value: Arc<[CandidateEntity]>, ttl: Duration) -> Self {
        Self {
            key,
            value,
            created_at: Instant::now(),
            ttl,
        }
    }

    /// Time since the snapshot was stored.
    pub fn age(&self) -> Duration {
        self.created_at.elapsed()
    }

    /// Check if this entry is expired.
    ///
    /// An entry whose age equals its TTL is still fresh.
    pub fn is_expired(&self) -> bool {
        self.age() > self.ttl
    }

    /// Get remaining time until expiration.
    pub fn time_remaining(&self) -> Option<Duration> {
        self.ttl.checked_sub(self.age())
    }
}
