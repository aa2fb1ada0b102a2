//! Main SyncRelay coordination.
//!
//! SyncRelay owns the store handle and the code source and implements the
//! three record operations. Each call is one independent transaction.

use crate::codes::{CodeSource, RandomCodes};
use crate::config::Config;
use crate::error::{RelayError, Result, StorageError};
use crate::storage::RecordStore;
use serde_json::{Map, Value};
use std::sync::Arc;
use std::time::Duration;
use sync_types::record::{self, now_millis};
use sync_types::{SyncCode, SyncRecord};

/// Main relay.
pub struct SyncRelay {
    config: Config,
    store: Arc<dyn RecordStore>,
    codes: Arc<dyn CodeSource>,
}

impl std::fmt::Debug for SyncRelay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncRelay")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl SyncRelay {
    /// Create a new SyncRelay over the given store, with random codes.
    pub fn new(config: Config, store: Arc<dyn RecordStore>) -> Self {
        Self {
            config,
            store,
            codes: Arc::new(RandomCodes),
        }
    }

    /// Replace the code source.
    pub fn with_code_source(mut self, codes: Arc<dyn CodeSource>) -> Self {
        self.codes = codes;
        self
    }

    /// Get the relay configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get a clone of the store handle for background tasks.
    pub fn store(&self) -> Arc<dyn RecordStore> {
        self.store.clone()
    }

    fn ttl(&self) -> Duration {
        self.config.storage.ttl()
    }

    /// Store a new record under a freshly allocated code.
    ///
    /// Each attempt draws a code and inserts only if the code is free; up to
    /// `limits.max_code_attempts` attempts are made.
    pub async fn create_record(&self, body: &[u8]) -> Result<SyncCode> {
        let fields = parse_fields(body)?;
        let attempts = self.config.limits.max_code_attempts;

        let mut record = SyncRecord::new(self.codes.next_code(), fields, now_millis());
        for attempt in 1..=attempts {
            if attempt > 1 {
                record.sync_code = self.codes.next_code();
            }
            let value = record.to_json().map_err(StorageError::Serialization)?;

            if self
                .store
                .put_if_absent(record.sync_code.as_str(), &value, self.ttl())
                .await?
            {
                tracing::info!("Created record {} (attempt {})", record.sync_code, attempt);
                return Ok(record.sync_code);
            }

            tracing::debug!(
                "Code {} already taken (attempt {}/{})",
                record.sync_code,
                attempt,
                attempts
            );
        }

        tracing::warn!("Could not allocate a free code in {} attempts", attempts);
        Err(RelayError::CodeSpaceExhausted { attempts })
    }

    /// Fetch the stored JSON text of a record, unmodified.
    pub async fn fetch_record(&self, raw_code: &str) -> Result<String> {
        let code = SyncCode::parse(raw_code)?;

        match self.store.get(code.as_str()).await? {
            Some(text) => {
                tracing::debug!("Fetched record {}", code);
                Ok(text)
            }
            None => Err(RelayError::NotFound { code }),
        }
    }

    /// Replace the content of an existing record.
    ///
    /// The code and `createdAt` are kept, `updatedAt` is refreshed and the
    /// expiry window restarts.
    pub async fn replace_record(&self, raw_code: &str, body: &[u8]) -> Result<SyncCode> {
        let code = SyncCode::parse(raw_code)?;

        let existing = match self.store.get(code.as_str()).await? {
            Some(text) => SyncRecord::from_json(&text).map_err(|source| StorageError::Corrupt {
                code: code.to_string(),
                source,
            })?,
            None => return Err(RelayError::NotFound { code }),
        };

        let fields = parse_fields(body)?;
        // A clock step backwards must not move updatedAt back.
        let now = now_millis().max(existing.updated_at);
        // Key by the requested code; it is what the caller looked up.
        let mut replacement = existing.replaced_by(fields, now);
        replacement.sync_code = code;

        let value = replacement.to_json().map_err(StorageError::Serialization)?;
        self.store
            .put(replacement.sync_code.as_str(), &value, self.ttl())
            .await?;

        tracing::info!("Updated record {}", replacement.sync_code);
        Ok(replacement.sync_code)
    }
}

fn parse_fields(body: &[u8]) -> Result<Map<String, Value>> {
    let value: Value = serde_json::from_slice(body).map_err(RelayError::MalformedBody)?;
    Ok(record::into_fields(value)?)
}
