//! Connection pool management
//!
//! An in-memory SQLite database lives only as long as the connection that
//! opened it, so in-memory pools hold exactly one connection that is never
//! reaped. File-backed pools run in WAL mode with the configured size.

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};

use crate::config::DatabaseConfig;

use super::errors::{StorageError, StorageResult};
use super::migrations;

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Handle to the embedded database
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open the database described by `config`.
    pub async fn connect(config: &DatabaseConfig) -> StorageResult<Self> {
        let options = SqliteConnectOptions::from_str(&config.url)
            .map_err(|e| StorageError::Connection(format!("{}: {}", config.url, e)))?
            .create_if_missing(true)
            .foreign_keys(true);

        let acquire_timeout = Duration::from_millis(config.acquire_timeout_ms);

        let pool = if config.is_in_memory() {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .acquire_timeout(acquire_timeout)
                .connect_with(options)
                .await?
        } else {
            SqlitePoolOptions::new()
                .max_connections(config.max_connections)
                .acquire_timeout(acquire_timeout)
                .connect_with(
                    options
                        .journal_mode(SqliteJournalMode::Wal)
                        .busy_timeout(BUSY_TIMEOUT),
                )
                .await?
        };

        tracing::debug!(url = %config.url, in_memory = config.is_in_memory(), "database pool opened");

        Ok(Self { pool })
    }

    /// Open a fresh private in-memory database with the schema applied.
    pub async fn in_memory() -> StorageResult<Self> {
        let db = Self::connect(&DatabaseConfig::default()).await?;
        db.migrate().await?;
        Ok(db)
    }

    /// Apply pending migrations, returning how many ran.
    pub async fn migrate(&self) -> StorageResult<usize> {
        migrations::apply(&self.pool).await
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close every pooled connection. Later queries fail with a connection error.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
