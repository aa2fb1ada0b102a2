//! Print the record stored under a sync code.

use anyhow::{Context, Result};
use serde_json::Value;
use std::path::Path;

use super::parse_code;
use crate::client::RelayClient;

/// Run the fetch command.
pub async fn run(client: &RelayClient, code: &str, output: Option<&Path>) -> Result<()> {
    let record = fetch(client, code).await?;
    let pretty = serde_json::to_string_pretty(&record)?;

    match output {
        Some(path) => {
            tokio::fs::write(path, format!("{pretty}\n"))
                .await
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("Record written to {}", path.display());
        }
        None => println!("{}", pretty),
    }

    Ok(())
}

async fn fetch(client: &RelayClient, code: &str) -> Result<Value> {
    let code = parse_code(code)?;
    client
        .fetch(&code)
        .await
        .with_context(|| format!("Failed to fetch record {code}"))
}
