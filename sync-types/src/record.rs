//! The stored record: a caller payload plus relay-managed fields.
//!
//! Records are persisted as JSON text of the form
//!
//! ```json
//! { "syncCode": "K7M2QX", "createdAt": "2026-10-19T08:15:00.123Z",
//!   "updatedAt": "2026-10-19T08:15:00.123Z", "exercise": "bench" }
//! ```
//!
//! The three system fields always win over caller fields with the same name.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::{RecordError, SyncCode};

/// Field holding the record's code.
pub const SYNC_CODE_FIELD: &str = "syncCode";
/// Field holding the creation timestamp.
pub const CREATED_AT_FIELD: &str = "createdAt";
/// Field holding the last-write timestamp.
pub const UPDATED_AT_FIELD: &str = "updatedAt";

const RESERVED_FIELDS: [&str; 3] = [SYNC_CODE_FIELD, CREATED_AT_FIELD, UPDATED_AT_FIELD];

/// A record as stored under its sync code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncRecord {
    /// Key the record is stored under.
    pub sync_code: SyncCode,
    /// Set once when the record is created.
    #[serde(serialize_with = "serialize_iso_millis")]
    pub created_at: DateTime<Utc>,
    /// Refreshed on every write.
    #[serde(serialize_with = "serialize_iso_millis")]
    pub updated_at: DateTime<Utc>,
    /// Caller-supplied fields, minus the reserved names.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl SyncRecord {
    /// Build a fresh record; `createdAt` and `updatedAt` are both `now`.
    pub fn new(sync_code: SyncCode, fields: Map<String, Value>, now: DateTime<Utc>) -> Self {
        Self {
            sync_code,
            created_at: now,
            updated_at: now,
            fields: strip_reserved(fields),
        }
    }

    /// Build the record that replaces `self`.
    ///
    /// Content comes entirely from `fields`; the code and `createdAt` carry
    /// over and `updatedAt` becomes `now`.
    pub fn replaced_by(&self, fields: Map<String, Value>, now: DateTime<Utc>) -> Self {
        Self {
            sync_code: self.sync_code.clone(),
            created_at: self.created_at,
            updated_at: now,
            fields: strip_reserved(fields),
        }
    }

    /// Serialize to the JSON text kept in the store.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parse stored JSON text.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

/// Accept a request payload as record fields.
///
/// Only JSON objects can be spread into a record.
pub fn into_fields(value: Value) -> Result<Map<String, Value>, RecordError> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(RecordError::NotAnObject {
            kind: json_kind(&other),
        }),
    }
}

/// Current time truncated to whole milliseconds.
///
/// Stored timestamps carry millisecond precision, so truncating here keeps a
/// record equal to itself after a store round trip.
pub fn now_millis() -> DateTime<Utc> {
    let now = Utc::now();
    DateTime::from_timestamp_millis(now.timestamp_millis()).unwrap_or(now)
}

fn strip_reserved(mut fields: Map<String, Value>) -> Map<String, Value> {
    for name in RESERVED_FIELDS {
        fields.remove(name);
    }
    fields
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn serialize_iso_millis<S: Serializer>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::Millis, true))
}
