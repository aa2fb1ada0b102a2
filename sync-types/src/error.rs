//! Error types for code-sync.

use thiserror::Error;

/// A sync code failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodeError {
    /// The normalized code does not have exactly six characters.
    #[error("invalid sync code: expected 6 characters, got {len}")]
    InvalidLength {
        /// Character count after normalization.
        len: usize,
    },
}

/// A record payload has the wrong shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// Records are built from JSON objects only.
    #[error("record body must be a JSON object, got {kind}")]
    NotAnObject {
        /// JSON type of the rejected value.
        kind: &'static str,
    },
}
