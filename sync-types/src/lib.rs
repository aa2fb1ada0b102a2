//! # sync-types
//!
//! Shared types for the code-sync relay.
//!
//! This crate provides the foundational types used by the relay and its clients:
//! - [`SyncCode`] - The 6-character human-shareable key of a record
//! - [`SyncRecord`] - A caller payload plus the relay-managed fields
//! - [`SyncAck`], [`ErrorBody`] - JSON bodies exchanged over HTTP
//! - [`CodeError`], [`RecordError`] - Error types

#![warn(missing_docs)]
#![warn(clippy::all)]

mod code;
mod error;
mod messages;
pub mod record;

pub use code::{SyncCode, CODE_ALPHABET, CODE_LEN};
pub use error::{CodeError, RecordError};
pub use messages::{ErrorBody, SyncAck};
pub use record::SyncRecord;

/// Lifetime of a stored record, refreshed on every write (365 days).
pub const RECORD_TTL_SECS: u64 = 365 * 24 * 60 * 60;
