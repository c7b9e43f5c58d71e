//! Error types for capability descriptor validation and parsing.

use thiserror::Error;

/// Result type for capability descriptor construction.
pub type CapabilityResult<T> = Result<T, CapabilityError>;

/// Errors returned while constructing capability descriptor values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CapabilityError {
    /// The message name is empty after trimming.
    #[error("message name must not be empty")]
    EmptyMessageName,

    /// The message name contains characters outside `[a-z0-9_]`.
    #[error(
        "message name '{0}' contains invalid characters (only lowercase alphanumeric and underscores allowed)"
    )]
    InvalidMessageName(String),

    /// The message name exceeds the 100-character limit.
    #[error("message name exceeds 100 character limit: {0}")]
    MessageNameTooLong(String),

    /// The same message is listed twice within one partition.
    #[error("message '{0}' is declared more than once")]
    DuplicateMessage(String),

    /// The same message is listed as both required and optional.
    #[error("message '{0}' is declared as both required and optional")]
    AmbiguousMessage(String),

    /// The configuration document could not be parsed.
    #[error("invalid capability configuration: {0}")]
    InvalidConfiguration(String),
}
