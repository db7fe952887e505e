//! Errors raised by the remote collection source.

/// Specific source failure conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum SourceErrorKind {
    /// The remote call failed (network, auth, rate limit)
    #[display("Source unavailable for '{}': {}", collection, reason)]
    Unavailable {
        /// Collection that was being fetched
        collection: String,
        /// Failure reported by the collaborator
        reason: String,
    },

    /// The remote answered with a payload of the wrong shape
    #[display("Malformed '{}' payload: {}", collection, reason)]
    MalformedPayload {
        /// Collection that was being fetched
        collection: String,
        /// What was wrong with the payload
        reason: String,
    },
}

/// Source error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Source Error: {} at line {} in {}", kind, line, file)]
pub struct SourceError {
    kind: SourceErrorKind,
    line: u32,
    file: &'static str,
}

impl SourceError {
    /// Create a new source error with caller location tracking.
    #[track_caller]
    pub fn new(kind: SourceErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Shorthand for [`SourceErrorKind::Unavailable`].
    ///
    /// # Examples
    ///
    /// ```
    /// use tally_error::{SourceError, SourceErrorKind};
    ///
    /// let err = SourceError::unavailable("friends", "HTTP 429 Too Many Requests");
    /// assert!(matches!(err.kind(), SourceErrorKind::Unavailable { .. }));
    /// ```
    #[track_caller]
    pub fn unavailable(collection: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::new(SourceErrorKind::Unavailable {
            collection: collection.into(),
            reason: reason.into(),
        })
    }

    /// Shorthand for [`SourceErrorKind::MalformedPayload`].
    #[track_caller]
    pub fn malformed(collection: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::new(SourceErrorKind::MalformedPayload {
            collection: collection.into(),
            reason: reason.into(),
        })
    }

    /// Get the error kind.
    pub fn kind(&self) -> &SourceErrorKind {
        &self.kind
    }
}
