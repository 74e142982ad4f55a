//! Note repository seam
//!
//! The service layer talks to storage only through this trait, so tests can
//! substitute a failing or call-counting repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures_util::stream::BoxStream;

use crate::model::{Note, NoteDraft, NoteId, Page};

use super::errors::StorageResult;

/// Lazy sequence of notes. Dropping the stream abandons the query.
pub type NoteStream<'a> = BoxStream<'a, StorageResult<Note>>;

/// Persistence operations on notes
#[async_trait]
pub trait NoteRepository: Send + Sync {
    /// Insert a new note stamped with `at` as both creation and modification time.
    async fn insert(&self, draft: &NoteDraft, at: DateTime<Utc>) -> StorageResult<Note>;

    /// Fetch a note by id
    async fn find_by_id(&self, id: NoteId) -> StorageResult<Option<Note>>;

    /// Replace title and body. Returns `None` when no such note exists.
    async fn update(
        &self,
        id: NoteId,
        draft: &NoteDraft,
        at: DateTime<Utc>,
    ) -> StorageResult<Option<Note>>;

    /// Delete a note. Returns whether a row was removed.
    async fn delete_by_id(&self, id: NoteId) -> StorageResult<bool>;

    /// Stream a window of notes in creation order.
    fn find_all(&self, page: Page) -> NoteStream<'_>;

    /// Round-trip to the database
    async fn ping(&self) -> StorageResult<()>;
}
