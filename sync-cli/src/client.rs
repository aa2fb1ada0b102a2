//! HTTP client for the relay API.

use anyhow::{Context, Result};
use reqwest::{Response, Url};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use sync_types::{ErrorBody, SyncAck, SyncCode};

/// Thin wrapper over `reqwest` bound to one relay.
#[derive(Debug, Clone)]
pub struct RelayClient {
    http: reqwest::Client,
    base: Url,
}

impl RelayClient {
    /// Create a client for the relay at `base`.
    pub fn new(base: &str) -> Result<Self> {
        let mut base = Url::parse(base).with_context(|| format!("Invalid relay URL: {base}"))?;
        // Without a trailing slash, `join` would replace the last path segment.
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        Ok(Self {
            http: reqwest::Client::new(),
            base,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base
            .join(path)
            .with_context(|| format!("Invalid endpoint path: {path}"))
    }

    /// `POST /sync`
    pub async fn create(&self, fields: &Map<String, Value>) -> Result<SyncAck> {
        let response = self
            .http
            .post(self.endpoint("sync")?)
            .json(fields)
            .send()
            .await
            .context("Failed to reach relay")?;
        decode(response).await
    }

    /// `GET /sync/{code}`
    pub async fn fetch(&self, code: &SyncCode) -> Result<Value> {
        let response = self
            .http
            .get(self.endpoint(&format!("sync/{code}"))?)
            .send()
            .await
            .context("Failed to reach relay")?;
        decode(response).await
    }

    /// `PUT /sync/{code}`
    pub async fn update(&self, code: &SyncCode, fields: &Map<String, Value>) -> Result<SyncAck> {
        let response = self
            .http
            .put(self.endpoint(&format!("sync/{code}"))?)
            .json(fields)
            .send()
            .await
            .context("Failed to reach relay")?;
        decode(response).await
    }

    /// `GET /health`
    pub async fn health(&self) -> Result<Value> {
        let response = self
            .http
            .get(self.endpoint("health")?)
            .send()
            .await
            .context("Failed to reach relay")?;
        decode(response).await
    }
}

/// Decode a success body, or turn the relay's `{error}` body into an error.
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    if status.is_success() {
        return response
            .json::<T>()
            .await
            .context("Relay returned an unexpected body");
    }

    let text = response.text().await.unwrap_or_default();
    match serde_json::from_str::<ErrorBody>(&text) {
        Ok(body) => anyhow::bail!("Relay returned {}: {}", status, body.error),
        Err(_) => anyhow::bail!("Relay returned {}", status),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::relay_client;
    use serde_json::json;

    fn fields(value: Value) -> Map<String, Value> {
        sync_types::record::into_fields(value).unwrap()
    }

    #[test]
    fn base_url_gets_trailing_slash() {
        let client = RelayClient::new("http://relay.example:8787/api").unwrap();
        assert_eq!(
            client.endpoint("sync/ABC234").unwrap().as_str(),
            "http://relay.example:8787/api/sync/ABC234"
        );

        let client = RelayClient::new("http://relay.example").unwrap();
        assert_eq!(
            client.endpoint("health").unwrap().as_str(),
            "http://relay.example/health"
        );
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        assert!(RelayClient::new("not a url").is_err());
    }

    #[tokio::test]
    async fn create_fetch_update_against_relay() {
        let client = relay_client().await;

        let ack = client.create(&fields(json!({ "exercise": "bench" }))).await.unwrap();
        assert_eq!(ack.message, "Created");

        let record = client.fetch(&ack.sync_code).await.unwrap();
        assert_eq!(record["exercise"], "bench");
        assert_eq!(record["syncCode"], ack.sync_code.as_str());

        let updated = client
            .update(&ack.sync_code, &fields(json!({ "exercise": "squat" })))
            .await
            .unwrap();
        assert_eq!(updated.message, "Updated");

        let record = client.fetch(&ack.sync_code).await.unwrap();
        assert_eq!(record["exercise"], "squat");
    }

    #[tokio::test]
    async fn relay_errors_are_surfaced() {
        let client = relay_client().await;

        let err = client
            .fetch(&SyncCode::parse("ZZZZZZ").unwrap())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Sync code not found"), "{err}");
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let client = relay_client().await;
        assert_eq!(client.health().await.unwrap(), json!({ "status": "ok" }));
    }
}
