//! Error types for sync-relay.
//!
//! [`RelayError`] doubles as the HTTP error response: its `Display` text
//! becomes the `error` field and [`RelayError::status_code`] picks the status.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use std::path::PathBuf;
use sync_types::{CodeError, ErrorBody, RecordError, SyncCode};

/// Main error type for sync-relay operations.
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    /// Sync code in the path is malformed.
    #[error("Invalid sync code")]
    InvalidCode(#[from] CodeError),

    /// Code segment of the path could not be decoded.
    #[error("Invalid sync code")]
    UnreadableCode(String),

    /// Well-formed code with no live record.
    #[error("Sync code not found")]
    NotFound {
        /// The code that was looked up.
        code: SyncCode,
    },

    /// No route matches the request.
    #[error("Not found")]
    RouteNotFound,

    /// Every allocation attempt hit an existing record.
    #[error("Could not generate unique code")]
    CodeSpaceExhausted {
        /// Number of codes tried.
        attempts: u32,
    },

    /// Request body is valid JSON but not an object.
    #[error("Request body must be a JSON object")]
    InvalidBody(#[from] RecordError),

    /// Request body exceeds `limits.max_body_bytes`.
    #[error("Request body too large")]
    BodyTooLarge,

    /// Request body could not be read.
    #[error("{0}")]
    BodyUnreadable(String),

    /// Request body is not valid JSON.
    #[error("{0}")]
    MalformedBody(#[source] serde_json::Error),

    /// Storage error.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

impl RelayError {
    /// HTTP status reported for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidCode(_) | Self::UnreadableCode(_) | Self::InvalidBody(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::NotFound { .. } | Self::RouteNotFound => StatusCode::NOT_FOUND,
            Self::BodyTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Self::CodeSpaceExhausted { .. }
            | Self::BodyUnreadable(_)
            | Self::MalformedBody(_)
            | Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        }
        (status, Json(ErrorBody::new(self.to_string()))).into_response()
    }
}

/// Storage layer errors.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Database error.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Record could not be encoded for storage.
    #[error("record serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Stored text is not a valid record.
    #[error("stored record {code} is corrupt: {source}")]
    Corrupt {
        /// Key of the unreadable record.
        code: String,
        /// Underlying parse error.
        source: serde_json::Error,
    },

    /// Database path error.
    #[error("invalid database path: {path}")]
    InvalidPath {
        /// The invalid path.
        path: PathBuf,
    },
}

/// Result type alias for relay operations.
pub type Result<T> = std::result::Result<T, RelayError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_map_to_4xx() {
        let invalid = RelayError::from(CodeError::InvalidLength { len: 3 });
        assert_eq!(invalid.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(invalid.to_string(), "Invalid sync code");

        let unreadable = RelayError::UnreadableCode("Invalid UTF-8".to_string());
        assert_eq!(unreadable.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(unreadable.to_string(), "Invalid sync code");

        let missing = RelayError::NotFound {
            code: SyncCode::parse("ZZZZZZ").unwrap(),
        };
        assert_eq!(missing.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(missing.to_string(), "Sync code not found");

        assert_eq!(RelayError::RouteNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(RelayError::RouteNotFound.to_string(), "Not found");

        let body = RelayError::from(RecordError::NotAnObject { kind: "array" });
        assert_eq!(body.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            RelayError::BodyTooLarge.status_code(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
    }

    #[test]
    fn exhaustion_is_a_server_error() {
        let err = RelayError::CodeSpaceExhausted { attempts: 10 };
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "Could not generate unique code");
    }

    #[test]
    fn malformed_body_reports_parser_message() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{oops").unwrap_err();
        let expected = parse_err.to_string();
        let err = RelayError::MalformedBody(parse_err);
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), expected);
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RelayError>();
        assert_send_sync::<StorageError>();
    }
}
