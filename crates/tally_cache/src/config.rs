//! TTL configuration per collection class.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tally_core::{CollectionClass, CollectionKey};

/// Configuration for [`crate::CacheStore`].
///
/// # Example
///
/// ```
/// use tally_cache::CacheConfig;
/// use tally_core::CollectionKey;
/// use std::time::Duration;
///
/// let config = CacheConfig::default().with_volatile_ttl_secs(60);
/// assert_eq!(config.ttl_for(CollectionKey::Friends), Duration::from_secs(60));
/// assert_eq!(config.ttl_for(CollectionKey::Categories), Duration::from_secs(86_400));
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Getters,
    derive_setters::Setters,
    derive_builder::Builder,
)]
#[setters(prefix = "with_")]
pub struct CacheConfig {
    /// TTL for near-static collections (seconds)
    #[serde(default = "default_static_ttl")]
    #[builder(default = "default_static_ttl()")]
    static_ttl_secs: u64,

    /// TTL for collections the user mutates during a session (seconds)
    #[serde(default = "default_volatile_ttl")]
    #[builder(default = "default_volatile_ttl()")]
    volatile_ttl_secs: u64,
}

fn default_static_ttl() -> u64 {
    86_400 // 24 hours
}

fn default_volatile_ttl() -> u64 {
    300 // 5 minutes
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            static_ttl_secs: default_static_ttl(),
            volatile_ttl_secs: default_volatile_ttl(),
        }
    }
}

impl CacheConfig {
    /// TTL applied to snapshots of `key`.
    pub fn ttl_for(&self, key: CollectionKey) -> Duration {
        match key.class() {
            CollectionClass::Static => Duration::from_secs(self.static_ttl_secs),
            CollectionClass::Volatile => Duration::from_secs(self.volatile_ttl_secs),
        }
    }
}
