//! Scored resolution results.

use crate::{CandidateEntity, Metadata};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// A candidate that passed the match threshold for one query.
///
/// Scores depend on the query, so matches are built fresh for every call and
/// never cached.
#[derive(Debug, Clone, PartialEq, Getters, Serialize, Deserialize)]
pub struct ResolutionMatch {
    /// Canonical remote identifier.
    id: i64,
    /// Display name the query matched against.
    name: String,
    /// Similarity score in `[0, 100]`.
    score: f64,
    /// Metadata copied from the candidate.
    metadata: Metadata,
}

impl ResolutionMatch {
    /// Builds a match from a candidate and its score.
    pub fn from_candidate(candidate: &CandidateEntity, score: f64) -> Self {
        Self {
            id: *candidate.id(),
            name: candidate.display_name().clone(),
            score,
            metadata: candidate.metadata().clone(),
        }
    }
}
