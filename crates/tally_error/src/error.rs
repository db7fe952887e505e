//! Top-level error wrapper types.

use crate::{ConfigError, IntegrityError, SourceError, ValidationError};

/// Every failure the resolution core can report.
///
/// # Examples
///
/// ```
/// use tally_error::{TallyError, ValidationError};
///
/// let err: TallyError = ValidationError::new("threshold", "must be between 0 and 100").into();
/// assert_eq!(err.error_type(), "validation");
/// assert!(format!("{}", err).contains("Validation Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum TallyErrorKind {
    /// Caller input rejected before any work was done
    #[from(ValidationError)]
    Validation(ValidationError),
    /// The remote collection could not be fetched
    #[from(SourceError)]
    Source(SourceError),
    /// A fetched snapshot violated an integrity rule
    #[from(IntegrityError)]
    Integrity(IntegrityError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
}

/// Tally error with kind discrimination.
///
/// # Examples
///
/// ```
/// use tally_error::{SourceError, TallyErrorKind, TallyResult};
///
/// fn fetch() -> TallyResult<()> {
///     Err(SourceError::unavailable("groups", "connection reset"))?
/// }
///
/// let err = fetch().unwrap_err();
/// assert!(matches!(err.kind(), TallyErrorKind::Source(_)));
/// assert_eq!(err.error_type(), "source_unavailable");
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Tally Error: {}", _0)]
pub struct TallyError(Box<TallyErrorKind>);

impl TallyError {
    /// Create a new error from a kind.
    pub fn new(kind: TallyErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &TallyErrorKind {
        &self.0
    }

    /// Stable machine-readable name of the error class.
    pub fn error_type(&self) -> &'static str {
        match self.kind() {
            TallyErrorKind::Validation(_) => "validation",
            TallyErrorKind::Source(_) => "source_unavailable",
            TallyErrorKind::Integrity(_) => "data_integrity",
            TallyErrorKind::Config(_) => "configuration",
        }
    }

    /// Human-readable message without the location suffix.
    pub fn message(&self) -> String {
        match self.kind() {
            TallyErrorKind::Validation(e) => format!("{} {}", e.field, e.reason),
            TallyErrorKind::Source(e) => e.kind().to_string(),
            TallyErrorKind::Integrity(e) => e.kind().to_string(),
            TallyErrorKind::Config(e) => e.message.clone(),
        }
    }

    /// True when the error was raised by input validation.
    pub fn is_validation(&self) -> bool {
        matches!(self.kind(), TallyErrorKind::Validation(_))
    }
}

// Generic From implementation for any type that converts to TallyErrorKind
impl<T> From<T> for TallyError
where
    T: Into<TallyErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for tally operations.
pub type TallyResult<T> = std::result::Result<T, TallyError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{IntegrityErrorKind, SourceErrorKind};

    #[test]
    fn test_error_type_names() {
        let validation: TallyError = ValidationError::new("query", "cannot be empty").into();
        let source: TallyError = SourceError::unavailable("friends", "timeout").into();
        let integrity: TallyError = IntegrityError::new(IntegrityErrorKind::DuplicateId {
            collection: "friends".to_string(),
            id: 7,
        })
        .into();
        let config: TallyError = ConfigError::new("bad ttl").into();

        assert_eq!(validation.error_type(), "validation");
        assert_eq!(source.error_type(), "source_unavailable");
        assert_eq!(integrity.error_type(), "data_integrity");
        assert_eq!(config.error_type(), "configuration");
        assert!(validation.is_validation());
        assert!(!source.is_validation());
    }

    #[test]
    fn test_message_omits_location() {
        let err: TallyError = SourceError::unavailable("groups", "HTTP 503").into();
        assert_eq!(err.message(), "Source unavailable for 'groups': HTTP 503");
        assert!(err.to_string().contains("at line"));
    }

    #[test]
    fn test_source_kind_preserved() {
        let err: TallyError =
            SourceError::malformed("categories", "missing 'categories' array").into();
        match err.kind() {
            TallyErrorKind::Source(e) => assert!(matches!(
                e.kind(),
                SourceErrorKind::MalformedPayload { collection, .. } if collection == "categories"
            )),
            other => panic!("unexpected kind: {other}"),
        }
    }

    #[test]
    fn test_duplicate_id_display() {
        let err = IntegrityError::new(IntegrityErrorKind::DuplicateId {
            collection: "groups".to_string(),
            id: 42,
        });
        assert!(err.to_string().contains("Duplicate id 42 in 'groups' snapshot"));
    }
}
