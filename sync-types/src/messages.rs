//! JSON bodies returned by the relay.

use serde::{Deserialize, Serialize};

use crate::SyncCode;

/// Acknowledgement of a successful write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncAck {
    /// Code the record is stored under.
    pub sync_code: SyncCode,
    /// `"Created"` or `"Updated"`.
    pub message: String,
}

impl SyncAck {
    /// Acknowledge a newly created record.
    pub fn created(sync_code: SyncCode) -> Self {
        Self {
            sync_code,
            message: "Created".to_string(),
        }
    }

    /// Acknowledge a replaced record.
    pub fn updated(sync_code: SyncCode) -> Self {
        Self {
            sync_code,
            message: "Updated".to_string(),
        }
    }
}

/// Body of every error response: `{"error": "<message>"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable failure message.
    pub error: String,
}

impl ErrorBody {
    /// Wrap a message.
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ack_uses_camel_case() {
        let ack = SyncAck::created(SyncCode::parse("ABC234").unwrap());
        let json = serde_json::to_value(&ack).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "syncCode": "ABC234", "message": "Created" })
        );
    }

    #[test]
    fn updated_ack_message() {
        let ack = SyncAck::updated(SyncCode::parse("ABC234").unwrap());
        assert_eq!(ack.message, "Updated");
    }

    #[test]
    fn error_body_shape() {
        let body = ErrorBody::new("Not found");
        assert_eq!(serde_json::to_string(&body).unwrap(), r#"{"error":"Not found"}"#);
    }
}
