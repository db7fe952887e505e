//! Core data types for tally.
//!
//! This crate provides the types shared by the cache, the resolver and the
//! tool layer: which remote collection is being addressed, the candidate
//! snapshot entries fetched from it, and the scored matches handed back to
//! callers.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod candidate;
mod collection;
mod matched;

pub use candidate::{CandidateEntity, CandidateEntityBuilder, Metadata};
pub use collection::{CollectionClass, CollectionKey};
pub use matched::ResolutionMatch;
