//! Store a JSON object under a new sync code.

use anyhow::{Context, Result};
use std::path::Path;
use sync_types::SyncCode;

use crate::client::RelayClient;
use crate::payload;

/// Run the create command.
pub async fn run(client: &RelayClient, json: Option<&str>, file: Option<&Path>) -> Result<()> {
    let code = create(client, json, file).await?;

    println!("Record stored!");
    println!();
    println!("  Sync code: {}", code);
    println!();
    println!("Run 'sync-cli fetch {}' on another device to read it.", code);
    Ok(())
}

async fn create(client: &RelayClient, json: Option<&str>, file: Option<&Path>) -> Result<SyncCode> {
    let fields = payload::load(json, file).await?;
    let ack = client
        .create(&fields)
        .await
        .context("Failed to create record")?;
    Ok(ack.sync_code)
}
