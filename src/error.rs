//! Error types for formatting.

use thiserror::Error;

/// Errors that can occur when parsing or applying a format code.
///
/// Custom format strings never fail: malformed placeholder runs degrade to
/// literal text. Only an unrecognized standard single-letter code is fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("unknown standard format specifier '{code}'")]
    UnknownStandardFormat { code: String },
}
