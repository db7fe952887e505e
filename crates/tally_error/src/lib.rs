//! Error types for the tally workspace.
//!
//! This crate provides the error taxonomy shared by the cache, the resolver
//! and the tool layer.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All constructors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use tally_error::{TallyResult, ValidationError};
//!
//! fn check_threshold(threshold: i64) -> TallyResult<u8> {
//!     if !(0..=100).contains(&threshold) {
//!         Err(ValidationError::new("threshold", "must be between 0 and 100"))?
//!     }
//!     Ok(threshold as u8)
//! }
//!
//! assert!(check_threshold(101).is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod integrity;
mod source;
mod validation;

pub use config::ConfigError;
pub use error::{TallyError, TallyErrorKind, TallyResult};
pub use integrity::{IntegrityError, IntegrityErrorKind};
pub use source::{SourceError, SourceErrorKind};
pub use validation::ValidationError;
