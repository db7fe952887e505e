//! Fuzzy entity resolution over cached remote collections.
//!
//! Turns free-text references such as "jon" or "roomates" into canonical
//! ids. Candidate lists come from a [`SourceProvider`] and are cached in a
//! shared [`tally_cache::CacheStore`]; every candidate is scored with a
//! [`Scorer`] and the survivors are ranked deterministically.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use tally_cache::CacheStore;
//! use tally_core::{CandidateEntity, CollectionKey};
//! use tally_resolver::EntityResolver;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let resolver = EntityResolver::new(Arc::new(CacheStore::default()));
//!
//! let matches = resolver
//!     .resolve(CollectionKey::Groups, "roomates", 70, |_| async {
//!         Ok(vec![CandidateEntity::new(1, "Roommates")])
//!     })
//!     .await
//!     .unwrap();
//!
//! assert_eq!(*matches[0].id(), 1);
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod resolver;
pub mod scoring;
pub mod source;

pub use config::{ResolutionConfig, ResolverConfig};
pub use resolver::{EntityResolver, DEFAULT_THRESHOLD};
pub use scoring::{FuzzyScorer, Scorer};
pub use source::{InMemorySource, PayloadFetcher, PayloadSource, SourceProvider};
