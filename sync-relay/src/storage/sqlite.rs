//! SQLite storage backend for sync-relay.

use super::RecordStore;
use crate::error::StorageError;
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use std::str::FromStr;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// SQLite-based record storage.
///
/// Uses WAL mode for concurrent reads/writes. Expiry is stored as a
/// millisecond timestamp and checked on every read.
#[derive(Clone)]
pub struct SqliteStorage {
    pool: SqlitePool,
}

impl std::fmt::Debug for SqliteStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteStorage")
            .field("connections", &self.pool.size())
            .finish_non_exhaustive()
    }
}

impl SqliteStorage {
    /// Create a new SQLite storage from a database path.
    ///
    /// Creates the database file if it doesn't exist.
    pub async fn new(path: &Path) -> Result<Self, StorageError> {
        let url = path.to_str().ok_or_else(|| StorageError::InvalidPath {
            path: path.to_path_buf(),
        })?;
        let options = SqliteConnectOptions::from_str(url)
            .map_err(StorageError::Database)?
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
            .synchronous(sqlx::sqlite::SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            .max_connections(10)
            .connect_with(options)
            .await
            .map_err(StorageError::Database)?;

        let storage = Self { pool };
        storage.run_migrations().await?;
        Ok(storage)
    }

    /// Create an in-memory SQLite storage (for testing).
    pub async fn in_memory() -> Result<Self, StorageError> {
        let options = SqliteConnectOptions::from_str(":memory:")
            .map_err(StorageError::Database)?
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
            .synchronous(sqlx::sqlite::SqliteSynchronous::Normal);

        // A single connection: every new connection would open its own empty database.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .map_err(StorageError::Database)?;

        let storage = Self { pool };
        storage.run_migrations().await?;
        Ok(storage)
    }

    /// Run database migrations.
    async fn run_migrations(&self) -> Result<(), StorageError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS records (
                code TEXT PRIMARY KEY,
                body TEXT NOT NULL,
                expires_at INTEGER NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(StorageError::Database)?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_records_expires ON records(expires_at)")
            .execute(&self.pool)
            .await
            .map_err(StorageError::Database)?;

        Ok(())
    }

    /// Number of rows currently in the table, expired or not.
    pub async fn row_count(&self) -> Result<u64, StorageError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM records")
            .fetch_one(&self.pool)
            .await
            .map_err(StorageError::Database)?;

        Ok(count as u64)
    }

    fn current_millis() -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as i64)
            .unwrap_or(0)
    }

    fn expiry_from(now: i64, ttl: Duration) -> i64 {
        now.saturating_add(i64::try_from(ttl.as_millis()).unwrap_or(i64::MAX))
    }
}

#[async_trait]
impl RecordStore for SqliteStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let body: Option<String> = sqlx::query_scalar(
            r#"
            SELECT body FROM records WHERE code = ?1 AND expires_at > ?2
            "#,
        )
        .bind(key)
        .bind(Self::current_millis())
        .fetch_optional(&self.pool)
        .await
        .map_err(StorageError::Database)?;

        Ok(body)
    }

    async fn put(&self, key: &str, value: &str, ttl: Duration) -> Result<(), StorageError> {
        let expires_at = Self::expiry_from(Self::current_millis(), ttl);

        sqlx::query(
            r#"
            INSERT INTO records (code, body, expires_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(code) DO UPDATE SET body = excluded.body, expires_at = excluded.expires_at
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(expires_at)
        .execute(&self.pool)
        .await
        .map_err(StorageError::Database)?;

        Ok(())
    }

    async fn put_if_absent(
        &self,
        key: &str,
        value: &str,
        ttl: Duration,
    ) -> Result<bool, StorageError> {
        let now = Self::current_millis();
        let expires_at = Self::expiry_from(now, ttl);

        // An expired row still occupies the primary key, so take it over in the same statement.
        let result = sqlx::query(
            r#"
            INSERT INTO records (code, body, expires_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(code) DO UPDATE SET body = excluded.body, expires_at = excluded.expires_at
            WHERE records.expires_at <= ?4
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(expires_at)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(StorageError::Database)?;

        Ok(result.rows_affected() == 1)
    }

    async fn purge_expired(&self) -> Result<u64, StorageError> {
        let result = sqlx::query(
            r#"
            DELETE FROM records WHERE expires_at <= ?1
            "#,
        )
        .bind(Self::current_millis())
        .execute(&self.pool)
        .await
        .map_err(StorageError::Database)?;

        Ok(result.rows_affected())
    }
}
