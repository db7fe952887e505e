//! Candidate entities fetched from a remote collection.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Opaque per-entity details carried through resolution untouched.
pub type Metadata = BTreeMap<String, Value>;

/// One element of a remote collection, as it looked at fetch time.
///
/// Snapshots are never mutated in place; a refresh replaces the whole
/// cached sequence.
///
/// # Examples
///
/// ```
/// use tally_core::{CandidateEntityBuilder, Metadata};
/// use serde_json::json;
///
/// let friend = CandidateEntityBuilder::default()
///     .id(42)
///     .display_name("John Smith")
///     .metadata(Metadata::from([("email".to_string(), json!("john@example.com"))]))
///     .build()
///     .unwrap();
///
/// assert_eq!(*friend.id(), 42);
/// assert_eq!(friend.display_name(), "John Smith");
/// ```
#[derive(Debug, Clone, PartialEq, Getters, Serialize, Deserialize, derive_builder::Builder)]
#[builder(setter(into))]
pub struct CandidateEntity {
    /// Canonical remote identifier.
    id: i64,

    /// Label the query is scored against.
    display_name: String,

    /// Extra fields from the remote payload.
    #[builder(default)]
    #[serde(default)]
    metadata: Metadata,
}

impl CandidateEntity {
    /// Creates a candidate without metadata.
    pub fn new(id: i64, display_name: impl Into<String>) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            metadata: Metadata::new(),
        }
    }

    /// Returns this candidate with `metadata` attached.
    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }
}
