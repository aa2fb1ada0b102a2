//! # sync-relay
//!
//! Share-code relay server for code-sync.
//!
//! This crate implements a relay server that:
//! - Stores an arbitrary JSON object under a fresh 6-character sync code
//! - Returns the stored object to anyone presenting the code
//! - Replaces the object on request, keeping its creation time
//! - Lets records expire 365 days after their last write
//!
//! ## Architecture
//!
//! ```text
//! Client A ──┐                    ┌── Client B
//!            │    HTTP / JSON     │
//!            ├───────────────────►│
//!            │                    │
//!        ┌───┴────────────────────┴───┐
//!        │        sync-relay          │
//!        │  ┌─────────────────────┐   │
//!        │  │ RecordStore (TTL'd) │   │
//!        │  └─────────────────────┘   │
//!        └────────────────────────────┘
//! ```
//!
//! ## Operations
//!
//! - `POST /sync` → allocate code, store record (201)
//! - `GET /sync/:code` → stored record
//! - `PUT /sync/:code` → replace record
//! - `GET /health` → `{"status":"ok"}`

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cleanup;
pub mod codes;
pub mod config;
pub mod error;
pub mod http;
pub mod server;
pub mod storage;

pub use server::SyncRelay;
