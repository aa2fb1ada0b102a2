//! CLI command implementations.

pub mod create;
pub mod fetch;
pub mod health;
pub mod update;

use anyhow::{Context, Result};
use sync_types::SyncCode;

/// Validate a user-supplied code before touching the network.
pub(crate) fn parse_code(raw: &str) -> Result<SyncCode> {
    SyncCode::parse(raw).with_context(|| format!("'{raw}' is not a valid sync code"))
}
