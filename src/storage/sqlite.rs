//! SQLite-backed note repository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures_util::StreamExt;
use sqlx::sqlite::SqlitePool;
use sqlx::FromRow;

use crate::model::{Note, NoteDraft, NoteId, Page};

use super::database::Database;
use super::errors::{StorageError, StorageResult};
use super::repository::{NoteRepository, NoteStream};

const INSERT_NOTE: &str = "INSERT INTO notes (title, body, created_at, last_modified)
    VALUES (?, ?, ?, ?)
    RETURNING id, title, body, created_at, last_modified";

const SELECT_NOTE: &str = "SELECT id, title, body, created_at, last_modified
    FROM notes WHERE id = ?";

const UPDATE_NOTE: &str = "UPDATE notes SET title = ?, body = ?, last_modified = ?
    WHERE id = ?
    RETURNING id, title, body, created_at, last_modified";

const DELETE_NOTE: &str = "DELETE FROM notes WHERE id = ?";

const SELECT_PAGE: &str = "SELECT id, title, body, created_at, last_modified
    FROM notes ORDER BY id ASC LIMIT ? OFFSET ?";

/// Row shape of the `notes` table
#[derive(Debug, FromRow)]
struct NoteRow {
    id: i64,
    title: String,
    body: String,
    created_at: DateTime<Utc>,
    last_modified: DateTime<Utc>,
}

impl From<NoteRow> for Note {
    fn from(row: NoteRow) -> Self {
        Note {
            id: row.id,
            title: row.title,
            body: row.body,
            created_at: row.created_at,
            last_modified: row.last_modified,
        }
    }
}

/// `NoteRepository` over a sqlx SQLite pool
#[derive(Debug, Clone)]
pub struct SqliteNoteRepository {
    pool: SqlitePool,
}

impl SqliteNoteRepository {
    pub fn new(database: &Database) -> Self {
        Self {
            pool: database.pool().clone(),
        }
    }
}

#[async_trait]
impl NoteRepository for SqliteNoteRepository {
    async fn insert(&self, draft: &NoteDraft, at: DateTime<Utc>) -> StorageResult<Note> {
        let row: NoteRow = sqlx::query_as(INSERT_NOTE)
            .bind(draft.title())
            .bind(draft.body())
            .bind(at)
            .bind(at)
            .fetch_one(&self.pool)
            .await?;
        Ok(row.into())
    }

    async fn find_by_id(&self, id: NoteId) -> StorageResult<Option<Note>> {
        let row: Option<NoteRow> = sqlx::query_as(SELECT_NOTE)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Note::from))
    }

    async fn update(
        &self,
        id: NoteId,
        draft: &NoteDraft,
        at: DateTime<Utc>,
    ) -> StorageResult<Option<Note>> {
        let row: Option<NoteRow> = sqlx::query_as(UPDATE_NOTE)
            .bind(draft.title())
            .bind(draft.body())
            .bind(at)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Note::from))
    }

    async fn delete_by_id(&self, id: NoteId) -> StorageResult<bool> {
        let result = sqlx::query(DELETE_NOTE).bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }

    fn find_all(&self, page: Page) -> NoteStream<'_> {
        // SQLite integers are signed; an offset past i64::MAX matches nothing anyway.
        let offset = i64::try_from(page.offset).unwrap_or(i64::MAX);

        sqlx::query_as::<_, NoteRow>(SELECT_PAGE)
            .bind(i64::from(page.limit))
            .bind(offset)
            .fetch(&self.pool)
            .map(|row| row.map(Note::from).map_err(StorageError::from))
            .boxed()
    }

    async fn ping(&self) -> StorageResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
