//! Loading the JSON object a command sends to the relay.

use anyhow::{Context, Result};
use serde_json::{Map, Value};
use std::path::Path;

/// Read the payload from `file` or the inline `json` argument.
///
/// The payload must be a JSON object; anything else is rejected before a
/// request is made.
pub async fn load(json: Option<&str>, file: Option<&Path>) -> Result<Map<String, Value>> {
    let text = match (json, file) {
        (_, Some(path)) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?,
        (Some(json), None) => json.to_string(),
        (None, None) => anyhow::bail!("No payload given. Pass a JSON object or --file <path>."),
    };

    parse(&text)
}

fn parse(text: &str) -> Result<Map<String, Value>> {
    let value: Value = serde_json::from_str(text).context("Payload is not valid JSON")?;
    sync_types::record::into_fields(value).context("Payload must be a JSON object")
}
