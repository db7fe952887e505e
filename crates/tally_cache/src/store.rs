//! Concurrent snapshot store.

use crate::{CacheConfig, CacheEntry, CacheEntryStats, CacheStats};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tally_core::{CandidateEntity, CollectionKey};

/// Shared, immutable candidate sequence handed out by the cache.
pub type Snapshot = Arc<[CandidateEntity]>;

/// Entry for one key plus a counter bumped on every invalidation.
#[derive(Debug, Default)]
struct SlotState {
    entry: Option<CacheEntry>,
    generation: u64,
}

impl SlotState {
    fn clear(&mut self) -> bool {
        self.generation += 1;
        self.entry.take().is_some()
    }
}

type Slot = Arc<RwLock<SlotState>>;

/// In-memory snapshot cache keyed by collection.
///
/// Each key owns its own lock, so writing one collection never blocks readers
/// of another. The index lock is only taken to find or create a key's slot.
/// Nothing in here performs I/O; fetching on a miss is the caller's job.
///
/// Every key carries a generation that [`CacheStore::invalidate`] and
/// [`CacheStore::invalidate_all`] advance. A caller that reads
/// [`CacheStore::generation`] before fetching and commits with
/// [`CacheStore::set_if_generation`] cannot overwrite an invalidation that
/// happened while its fetch was in flight.
///
/// Construct one per process and share it as `Arc<CacheStore>`.
///
/// # Example
///
/// ```
/// use tally_cache::{CacheConfig, CacheStore};
/// use tally_core::{CandidateEntity, CollectionKey};
/// use std::time::Duration;
///
/// let cache = CacheStore::new(CacheConfig::default());
/// cache.set(
///     CollectionKey::Groups,
///     vec![CandidateEntity::new(1, "Roommates")],
///     Duration::from_secs(300),
/// );
///
/// let groups = cache.get(CollectionKey::Groups).unwrap();
/// assert_eq!(groups[0].display_name(), "Roommates");
///
/// cache.invalidate(CollectionKey::Groups);
/// assert!(cache.get(CollectionKey::Groups).is_none());
/// ```
#[derive(Debug)]
pub struct CacheStore {
    config: CacheConfig,
    slots: RwLock<HashMap<CollectionKey, Slot>>,
}

impl CacheStore {
    /// Create a new cache with configuration.
    pub fn new(config: CacheConfig) -> Self {
        tracing::debug!(
            static_ttl_secs = config.static_ttl_secs(),
            volatile_ttl_secs = config.volatile_ttl_secs(),
            "Creating new CacheStore"
        );
        Self {
            config,
            slots: RwLock::new(HashMap::new()),
        }
    }

    /// The configuration this cache was built with.
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    fn slot(&self, key: CollectionKey) -> Option<Slot> {
        self.slots.read().get(&key).cloned()
    }

    fn slot_or_insert(&self, key: CollectionKey) -> Slot {
        if let Some(slot) = self.slot(key) {
            return slot;
        }
        self.slots.write().entry(key).or_default().clone()
    }

    fn all_slots(&self) -> Vec<Slot> {
        self.slots.read().values().cloned().collect()
    }

    /// Get a cached snapshot.
    ///
    /// Returns None if:
    /// - No entry exists for `key`
    /// - The entry is expired
    ///
    /// An expired entry is left in place; it stays reachable through
    /// [`CacheStore::get_stale`] until it is replaced, invalidated or swept.
    #[tracing::instrument(skip(self))]
    pub fn get(&self, key: CollectionKey) -> Option<Snapshot> {
        let Some(slot) = self.slot(key) else {
            tracing::debug!("Cache miss");
            return None;
        };
        let guard = slot.read();
        let Some(entry) = guard.entry.as_ref() else {
            tracing::debug!("Cache miss");
            return None;
        };

        if entry.is_expired() {
            tracing::debug!(age = ?entry.age(), ttl = ?entry.ttl(), "Cache entry expired");
            return None;
        }

        tracing::debug!(time_remaining = ?entry.time_remaining(), "Cache hit");
        Some(Arc::clone(entry.value()))
    }

    /// Get a snapshot whether or not it has expired.
    ///
    /// For callers that decide on their own to fall back to stale data.
    pub fn get_stale(&self, key: CollectionKey) -> Option<Snapshot> {
        let slot = self.slot(key)?;
        let guard = slot.read();
        guard.entry.as_ref().map(|entry| Arc::clone(entry.value()))
    }

    /// Get a copy of the full entry, expired or not.
    pub fn entry(&self, key: CollectionKey) -> Option<CacheEntry> {
        let slot = self.slot(key)?;
        let guard = slot.read();
        guard.entry.clone()
    }

    /// Current invalidation generation of `key`.
    ///
    /// Read it before starting a fetch and pass it to
    /// [`CacheStore::set_if_generation`] when committing the result.
    pub fn generation(&self, key: CollectionKey) -> u64 {
        self.slot_or_insert(key).read().generation
    }

    /// Store a snapshot, replacing any previous entry for `key`.
    #[tracing::instrument(skip(self, value))]
    pub fn set(&self, key: CollectionKey, value: impl Into<Snapshot>, ttl: Duration) {
        let value = value.into();
        let size = value.len();
        let slot = self.slot_or_insert(key);
        let replaced = slot
            .write()
            .entry
            .replace(CacheEntry::new(key, value, ttl))
            .is_some();
        tracing::debug!(size, replaced, "Inserted entry into cache");
    }

    /// Store a snapshot only if `key` has not been invalidated since
    /// `generation` was read.
    ///
    /// Returns `false` and leaves the cache untouched when the snapshot is
    /// older than an invalidation.
    #[tracing::instrument(skip(self, value))]
    pub fn set_if_generation(
        &self,
        key: CollectionKey,
        value: impl Into<Snapshot>,
        ttl: Duration,
        generation: u64,
    ) -> bool {
        let slot = self.slot_or_insert(key);
        let mut guard = slot.write();
        if guard.generation != generation {
            tracing::debug!(
                current = guard.generation,
                "Discarding snapshot fetched before invalidation"
            );
            return false;
        }
        let value = value.into();
        let size = value.len();
        guard.entry = Some(CacheEntry::new(key, value, ttl));
        tracing::debug!(size, "Inserted entry into cache");
        true
    }

    /// Store a snapshot with the TTL configured for the key's class.
    pub fn set_default(&self, key: CollectionKey, value: impl Into<Snapshot>) {
        self.set(key, value, self.config.ttl_for(key));
    }

    /// Remove the entry for `key`. Does nothing when absent.
    #[tracing::instrument(skip(self))]
    pub fn invalidate(&self, key: CollectionKey) {
        let removed = self.slot_or_insert(key).write().clear();
        if removed {
            tracing::debug!("Invalidated cache entry");
        } else {
            tracing::debug!("Invalidate requested for absent entry");
        }
    }

    /// Clear all cache entries.
    pub fn invalidate_all(&self) {
        let count = self
            .all_slots()
            .iter()
            .filter(|slot| slot.write().clear())
            .count();
        tracing::info!(cleared = count, "Cleared cache");
    }

    /// Remove expired entries from cache.
    pub fn cleanup_expired(&self) -> usize {
        let removed = self
            .all_slots()
            .iter()
            .filter(|slot| {
                let mut guard = slot.write();
                if guard.entry.as_ref().is_some_and(CacheEntry::is_expired) {
                    guard.entry = None;
                    true
                } else {
                    false
                }
            })
            .count();

        if removed > 0 {
            tracing::info!(removed, remaining = self.len(), "Cleaned up expired cache entries");
        }
        removed
    }

    /// Per-entry statistics, ordered by key.
    pub fn stats(&self) -> CacheStats {
        let entries = self
            .all_slots()
            .iter()
            .filter_map(|slot| {
                slot.read().entry.as_ref().map(|entry| {
                    CacheEntryStats::new(
                        *entry.key(),
                        (entry.age().as_secs_f64() * 100.0).round() / 100.0,
                        entry.ttl().as_secs(),
                        entry.value().len(),
                        entry.is_expired(),
                    )
                })
            })
            .collect();
        CacheStats::new(entries)
    }

    /// Get number of cached entries, expired ones included.
    pub fn len(&self) -> usize {
        self.all_slots()
            .iter()
            .filter(|slot| slot.read().entry.is_some())
            .count()
    }

    /// Check if cache is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for CacheStore {
    fn default() -> Self {
        Self::new(CacheConfig::default())
    }
}
