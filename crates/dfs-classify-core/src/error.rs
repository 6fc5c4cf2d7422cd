//! Error types for building graphs and configurations from external input.
//!
//! Traversal itself cannot fail; only reading edge lists and validating
//! settings can.

use thiserror::Error;

/// Result type alias for edge-list parsing.
pub type ParseResult<T> = Result<T, ParseError>;

/// Errors that can occur while reading an edge list.
#[derive(Debug, Error)]
pub enum ParseError {
    /// A line did not hold exactly two vertex tokens.
    #[error("line {line}: expected `<from> <to>` or `<from> -> <to>`, found {content:?}")]
    MalformedLine { line: usize, content: String },

    /// A vertex token could not be converted to the vertex type.
    #[error("line {line}: invalid vertex {token:?}: {message}")]
    InvalidVertex {
        line: usize,
        token: String,
        message: String,
    },

    /// JSON edge list could not be decoded.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error (file operations).
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for configuration validation.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that can occur while validating a [`crate::ClassifyConfig`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The clock would overflow before a large graph finished.
    #[error("clock base {base} is too large (maximum {max})")]
    ClockBaseTooLarge { base: u64, max: u64 },
}
