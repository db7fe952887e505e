//! Data integrity errors for fetched snapshots.

/// Specific integrity violations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum IntegrityErrorKind {
    /// Two candidates in one snapshot share an id
    #[display("Duplicate id {} in '{}' snapshot", id, collection)]
    DuplicateId {
        /// Collection the snapshot belongs to
        collection: String,
        /// The repeated id
        id: i64,
    },
}

/// Integrity error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Integrity Error: {} at line {} in {}", kind, line, file)]
pub struct IntegrityError {
    kind: IntegrityErrorKind,
    line: u32,
    file: &'static str,
}

impl IntegrityError {
    /// Create a new integrity error with caller location tracking.
    #[track_caller]
    pub fn new(kind: IntegrityErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &IntegrityErrorKind {
        &self.kind
    }
}
