//! In-memory storage backend.
//!
//! Nothing survives a restart. Used by tests and for throwaway relays.

use super::RecordStore;
use crate::error::StorageError;
use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
struct MemoryEntry {
    value: String,
    /// `None` when the TTL is too large to represent.
    expires_at: Option<Instant>,
}

impl MemoryEntry {
    fn new(value: &str, ttl: Duration, now: Instant) -> Self {
        Self {
            value: value.to_string(),
            expires_at: now.checked_add(ttl),
        }
    }

    fn is_live(&self, now: Instant) -> bool {
        self.expires_at.map_or(true, |at| at > now)
    }
}

/// `DashMap`-backed record storage.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: DashMap<String, MemoryEntry>,
}

impl MemoryStorage {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys held, expired or not.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store holds no keys at all.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl RecordStore for MemoryStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let now = Instant::now();
        Ok(self
            .entries
            .get(key)
            .filter(|entry| entry.is_live(now))
            .map(|entry| entry.value.clone()))
    }

    async fn put(&self, key: &str, value: &str, ttl: Duration) -> Result<(), StorageError> {
        self.entries
            .insert(key.to_string(), MemoryEntry::new(value, ttl, Instant::now()));
        Ok(())
    }

    async fn put_if_absent(
        &self,
        key: &str,
        value: &str,
        ttl: Duration,
    ) -> Result<bool, StorageError> {
        let now = Instant::now();
        // The entry guard holds the shard lock across the check and the write.
        match self.entries.entry(key.to_string()) {
            Entry::Occupied(mut occupied) => {
                if occupied.get().is_live(now) {
                    return Ok(false);
                }
                occupied.insert(MemoryEntry::new(value, ttl, now));
                Ok(true)
            }
            Entry::Vacant(vacant) => {
                vacant.insert(MemoryEntry::new(value, ttl, now));
                Ok(true)
            }
        }
    }

    async fn purge_expired(&self) -> Result<u64, StorageError> {
        let now = Instant::now();
        let mut deleted = 0u64;
        self.entries.retain(|_, entry| {
            let live = entry.is_live(now);
            if !live {
                deleted += 1;
            }
            live
        });
        Ok(deleted)
    }
}
