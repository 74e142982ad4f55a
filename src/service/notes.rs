//! Note use cases
//!
//! Each operation validates before it stores, and stores before it reports.
//! Collaborators are passed in at construction; nothing is looked up.

use std::sync::Arc;

use chrono::Utc;
use futures_util::TryStreamExt;

use crate::model::{Note, NoteDraft, NoteId, NoteInput, Page, MAX_PAGE_LIMIT};
use crate::observability::MetricsRegistry;
use crate::storage::{NoteRepository, StorageError};
use crate::validation::validate_note;

use super::errors::{ServiceError, ServiceResult};

/// Orchestrates validation and persistence for notes
#[derive(Clone)]
pub struct NoteService {
    repo: Arc<dyn NoteRepository>,
    metrics: Arc<MetricsRegistry>,
}

impl NoteService {
    pub fn new(repo: Arc<dyn NoteRepository>, metrics: Arc<MetricsRegistry>) -> Self {
        Self { repo, metrics }
    }

    /// Validate and persist a new note.
    #[tracing::instrument(skip_all)]
    pub async fn create(&self, input: &NoteInput) -> ServiceResult<Note> {
        let draft = self.validate(input)?;

        let note = self
            .repo
            .insert(&draft, Utc::now())
            .await
            .map_err(|e| self.storage_failure("create", e))?;

        self.metrics.increment_created();
        tracing::info!(note_id = note.id, "note created");
        Ok(note)
    }

    /// Fetch one note.
    #[tracing::instrument(skip(self))]
    pub async fn get(&self, id: NoteId) -> ServiceResult<Note> {
        let note = self
            .repo
            .find_by_id(id)
            .await
            .map_err(|e| self.storage_failure("get", e))?
            .ok_or_else(|| self.not_found(id))?;

        self.metrics.increment_read();
        Ok(note)
    }

    /// Replace a note's title and body.
    ///
    /// Validation runs before the store is consulted, so an invalid payload
    /// for a missing id is reported as invalid, not as not-found.
    #[tracing::instrument(skip(self, input))]
    pub async fn update(&self, id: NoteId, input: &NoteInput) -> ServiceResult<Note> {
        let draft = self.validate(input)?;

        let note = self
            .repo
            .update(id, &draft, Utc::now())
            .await
            .map_err(|e| self.storage_failure("update", e))?
            .ok_or_else(|| self.not_found(id))?;

        self.metrics.increment_updated();
        tracing::info!(note_id = note.id, "note updated");
        Ok(note)
    }

    /// Remove a note. Removing a missing note is `NotFound`.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: NoteId) -> ServiceResult<()> {
        let removed = self
            .repo
            .delete_by_id(id)
            .await
            .map_err(|e| self.storage_failure("delete", e))?;

        if !removed {
            return Err(self.not_found(id));
        }

        self.metrics.increment_deleted();
        tracing::info!(note_id = id, "note deleted");
        Ok(())
    }

    /// Collect a window of notes in creation order.
    #[tracing::instrument(skip(self))]
    pub async fn list(&self, page: Page) -> ServiceResult<Vec<Note>> {
        if !page.is_bounded() {
            return Err(ServiceError::InvalidPage {
                limit: page.limit,
                max: MAX_PAGE_LIMIT,
            });
        }

        let notes: Vec<Note> = self
            .repo
            .find_all(page)
            .try_collect()
            .await
            .map_err(|e| self.storage_failure("list", e))?;

        self.metrics.increment_lists();
        tracing::debug!(count = notes.len(), "notes listed");
        Ok(notes)
    }

    /// Whether the database answers.
    pub async fn ping(&self) -> ServiceResult<()> {
        self.repo.ping().await.map_err(ServiceError::from)
    }

    pub fn metrics(&self) -> &MetricsRegistry {
        &self.metrics
    }

    fn validate(&self, input: &NoteInput) -> ServiceResult<NoteDraft> {
        validate_note(input).map_err(|errors| {
            self.metrics.increment_validation_rejections();
            tracing::debug!(violations = errors.violations().len(), "note rejected by validation");
            ServiceError::from(errors)
        })
    }

    fn not_found(&self, id: NoteId) -> ServiceError {
        self.metrics.increment_not_found();
        ServiceError::NotFound(id)
    }

    fn storage_failure(&self, op: &'static str, err: StorageError) -> ServiceError {
        self.metrics.increment_storage_failures();
        tracing::error!(op, code = err.code(), error = %err, "storage failure");
        ServiceError::Storage(err)
    }
}
