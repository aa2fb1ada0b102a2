//! Replace the record stored under a sync code.

use anyhow::{Context, Result};
use std::path::Path;

use super::parse_code;
use crate::client::RelayClient;
use crate::payload;

/// Run the update command.
pub async fn run(
    client: &RelayClient,
    code: &str,
    json: Option<&str>,
    file: Option<&Path>,
) -> Result<()> {
    let code = parse_code(code)?;
    let fields = payload::load(json, file).await?;

    let ack = client
        .update(&code, &fields)
        .await
        .with_context(|| format!("Failed to update record {code}"))?;

    println!("Record updated!");
    println!("  Sync code: {}", ack.sync_code);
    Ok(())
}
