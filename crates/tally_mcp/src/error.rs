//! Error types for the tool layer.

use serde_json::{Value, json};
use tally_error::{TallyError, TallyErrorKind};

/// Errors returned by tool execution.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum McpError {
    /// Tool not found
    #[display("Tool not found: {}", _0)]
    ToolNotFound(String),

    /// Tool execution failed
    #[display("Tool execution failed: {}", _0)]
    ToolExecutionFailed(String),

    /// Invalid tool input
    #[display("Invalid tool input: {}", _0)]
    InvalidInput(String),

    /// Backend unavailable
    #[display("Backend unavailable: {}", _0)]
    BackendUnavailable(String),
}

impl std::error::Error for McpError {}

impl McpError {
    /// Stable machine-readable category.
    pub fn error_type(&self) -> &'static str {
        match self {
            Self::ToolNotFound(_) => "tool_not_found",
            Self::ToolExecutionFailed(_) => "tool_execution_failed",
            Self::InvalidInput(_) => "invalid_input",
            Self::BackendUnavailable(_) => "backend_unavailable",
        }
    }

    /// The message without the category prefix.
    pub fn message(&self) -> &str {
        match self {
            Self::ToolNotFound(m)
            | Self::ToolExecutionFailed(m)
            | Self::InvalidInput(m)
            | Self::BackendUnavailable(m) => m,
        }
    }

    /// Structured form handed back to the caller.
    ///
    /// ```
    /// use tally_mcp::McpError;
    ///
    /// let json = McpError::InvalidInput("Missing 'query' field".into()).to_json();
    /// assert_eq!(json["error_type"], "invalid_input");
    /// assert_eq!(json["message"], "Missing 'query' field");
    /// ```
    pub fn to_json(&self) -> Value {
        json!({
            "error_type": self.error_type(),
            "message": self.message(),
        })
    }
}

impl From<TallyError> for McpError {
    fn from(err: TallyError) -> Self {
        let message = err.message();
        match err.kind() {
            TallyErrorKind::Validation(_) => Self::InvalidInput(message),
            TallyErrorKind::Source(_) => Self::BackendUnavailable(message),
            TallyErrorKind::Integrity(_) | TallyErrorKind::Config(_) => {
                Self::ToolExecutionFailed(format!("{}: {}", err.error_type(), message))
            }
        }
    }
}

/// Result type for tool operations.
pub type McpResult<T> = Result<T, McpError>;
