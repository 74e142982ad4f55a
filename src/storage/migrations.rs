//! Embedded schema migrations
//!
//! Migrations run in order, each inside its own transaction, and are
//! recorded in `schema_version`. Applying twice is a no-op.

use chrono::Utc;
use sqlx::sqlite::SqlitePool;
use sqlx::Executor;

use super::errors::{StorageError, StorageResult};

/// Migration metadata
pub struct Migration {
    pub id: &'static str,
    pub sql: &'static str,
}

/// All embedded migrations in order
pub const MIGRATIONS: &[Migration] = &[Migration {
    id: "001_create_notes",
    sql: include_str!("../../migrations/001_create_notes.sql"),
}];

const CREATE_SCHEMA_VERSION: &str = "CREATE TABLE IF NOT EXISTS schema_version (
    id INTEGER PRIMARY KEY,
    migration_id TEXT NOT NULL UNIQUE,
    applied_at TEXT NOT NULL
)";

/// Apply every pending migration. Returns the number applied.
pub async fn apply(pool: &SqlitePool) -> StorageResult<usize> {
    pool.execute(CREATE_SCHEMA_VERSION).await?;

    let mut applied = 0;
    for migration in MIGRATIONS {
        if is_applied(pool, migration.id).await? {
            continue;
        }
        apply_one(pool, migration).await?;
        tracing::info!(migration = migration.id, "migration applied");
        applied += 1;
    }

    Ok(applied)
}

async fn is_applied(pool: &SqlitePool, migration_id: &str) -> StorageResult<bool> {
    let row: Option<i64> =
        sqlx::query_scalar("SELECT 1 FROM schema_version WHERE migration_id = ?")
            .bind(migration_id)
            .fetch_optional(pool)
            .await?;
    Ok(row.is_some())
}

async fn apply_one(pool: &SqlitePool, migration: &Migration) -> StorageResult<()> {
    let mut tx = pool.begin().await?;

    (&mut *tx)
        .execute(migration.sql)
        .await
        .map_err(|e| StorageError::migration(migration.id, e))?;

    sqlx::query("INSERT INTO schema_version (migration_id, applied_at) VALUES (?, ?)")
        .bind(migration.id)
        .bind(Utc::now())
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(())
}

/// Ids of the migrations recorded as applied, in application order.
pub async fn applied_ids(pool: &SqlitePool) -> StorageResult<Vec<String>> {
    let ids = sqlx::query_scalar("SELECT migration_id FROM schema_version ORDER BY id")
        .fetch_all(pool)
        .await?;
    Ok(ids)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DatabaseConfig;
    use crate::storage::Database;

    async fn fresh_pool() -> SqlitePool {
        Database::connect(&DatabaseConfig::default())
            .await
            .unwrap()
            .pool()
            .clone()
    }

    #[tokio::test]
    async fn test_apply_migrations() {
        let pool = fresh_pool().await;
        assert_eq!(apply(&pool).await.unwrap(), MIGRATIONS.len());
        assert_eq!(applied_ids(&pool).await.unwrap(), vec!["001_create_notes"]);
    }

    #[tokio::test]
    async fn test_idempotency() {
        let pool = fresh_pool().await;
        apply(&pool).await.unwrap();
        assert_eq!(apply(&pool).await.unwrap(), 0);
        assert_eq!(applied_ids(&pool).await.unwrap().len(), MIGRATIONS.len());
    }
}
