//! Check relay liveness.

use anyhow::{Context, Result};

use crate::client::RelayClient;

/// Run the health command.
pub async fn run(client: &RelayClient) -> Result<()> {
    let status = client.health().await.context("Relay is not reachable")?;

    match status.get("status").and_then(|s| s.as_str()) {
        Some("ok") => {
            println!("Relay OK");
            Ok(())
        }
        _ => anyhow::bail!("Relay reported unexpected status: {status}"),
    }
}
