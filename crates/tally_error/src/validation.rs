//! Input validation errors.

/// Rejected caller input. Raised before any cache or fetch activity.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("Validation Error: '{}' {} at line {} in {}", field, reason, line, file)]
pub struct ValidationError {
    /// Name of the offending input
    pub field: String,
    /// Why the input was rejected
    pub reason: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl ValidationError {
    /// Create a new ValidationError for `field` at the current location.
    ///
    /// # Examples
    ///
    /// ```
    /// use tally_error::ValidationError;
    ///
    /// let err = ValidationError::new("query", "cannot be empty");
    /// assert_eq!(err.field, "query");
    /// assert!(err.to_string().contains("cannot be empty"));
    /// ```
    #[track_caller]
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            field: field.into(),
            reason: reason.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}
