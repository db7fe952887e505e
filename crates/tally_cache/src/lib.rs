//! Collection snapshot caching with TTL support.
//!
//! This crate provides the in-memory store that bounds remote calls for
//! friends, groups, categories and currencies. Entries expire per key
//! according to the collection's class and are removed explicitly when the
//! write path mutates a collection.

#![warn(missing_docs)]

mod config;
mod entry;
mod stats;
mod store;

pub use config::{CacheConfig, CacheConfigBuilder};
pub use entry::CacheEntry;
pub use stats::{CacheEntryStats, CacheStats};
pub use store::{CacheStore, Snapshot};
