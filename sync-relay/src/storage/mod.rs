//! Storage layer for sync-relay.
//!
//! Records live in a key-value store with per-key expiry. The relay only
//! depends on the [`RecordStore`] contract; [`SqliteStorage`] and
//! [`MemoryStorage`] are the bundled backends.

mod memory;
mod sqlite;

pub use memory::MemoryStorage;
pub use sqlite::SqliteStorage;

use crate::error::StorageError;
use async_trait::async_trait;
use std::time::Duration;

/// Trait for record storage backends.
///
/// Values are opaque JSON text. A key whose time-to-live has elapsed must
/// behave exactly like a key that was never written, whether or not it has
/// been purged yet.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Get the live value stored under `key`.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// The key expires `ttl` after this write.
    async fn put(&self, key: &str, value: &str, ttl: Duration) -> Result<(), StorageError>;

    /// Store `value` under `key` only if no live value exists.
    ///
    /// The check and the write are a single atomic step. Returns `true`
    /// if the value was written.
    async fn put_if_absent(
        &self,
        key: &str,
        value: &str,
        ttl: Duration,
    ) -> Result<bool, StorageError>;

    /// Remove expired keys.
    ///
    /// Returns the number of keys deleted.
    async fn purge_expired(&self) -> Result<u64, StorageError>;
}
