//! Point-in-time cache statistics.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tally_core::CollectionKey;

/// Statistics for one cached entry.
#[derive(Debug, Clone, PartialEq, Getters, Serialize, Deserialize)]
pub struct CacheEntryStats {
    /// Collection the entry belongs to
    key: CollectionKey,
    /// Seconds since the snapshot was stored
    age_secs: f64,
    /// TTL the snapshot was stored with
    ttl_secs: u64,
    /// Number of candidates in the snapshot
    size: usize,
    /// Whether the entry is past its TTL
    expired: bool,
}

impl CacheEntryStats {
    pub(crate) fn new(
        key: CollectionKey,
        age_secs: f64,
        ttl_secs: u64,
        size: usize,
        expired: bool,
    ) -> Self {
        Self {
            key,
            age_secs,
            ttl_secs,
            size,
            expired,
        }
    }
}

/// Snapshot of everything currently held by a [`crate::CacheStore`].
#[derive(Debug, Clone, PartialEq, Getters, Serialize, Deserialize)]
pub struct CacheStats {
    /// Number of stored entries, expired ones included
    total_entries: usize,
    /// Per-entry details, ordered by key
    entries: Vec<CacheEntryStats>,
}

impl CacheStats {
    pub(crate) fn new(mut entries: Vec<CacheEntryStats>) -> Self {
        entries.sort_by_key(|e| e.key);
        Self {
            total_entries: entries.len(),
            entries,
        }
    }

    /// Number of entries past their TTL.
    pub fn expired_entries(&self) -> usize {
        self.entries.iter().filter(|e| e.expired).count()
    }
}
