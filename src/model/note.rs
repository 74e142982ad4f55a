//! Note entity
//!
//! A note is the only resource the service manages. `NoteInput` is what a
//! client sends, `NoteDraft` is an input that passed validation, and `Note`
//! is a persisted row.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier assigned by the store on insert.
pub type NoteId = i64;

/// Maximum title length in characters.
pub const TITLE_MAX_CHARS: usize = 255;

/// A persisted note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub last_modified: DateTime<Utc>,
}

/// Candidate note as received from a client.
///
/// Both fields are optional on the wire so that a missing field becomes a
/// validation violation instead of a deserialization failure. Unknown fields
/// such as a client-supplied `id` are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteInput {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
}

impl NoteInput {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            body: Some(body.into()),
        }
    }
}

/// A note payload that satisfied every validation rule.
///
/// Only `validation::validate_note` constructs drafts outside of tests, so a
/// draft reaching the store is always valid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteDraft {
    title: String,
    body: String,
}

impl NoteDraft {
    pub(crate) fn new_unchecked(title: String, body: String) -> Self {
        Self { title, body }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn body(&self) -> &str {
        &self.body
    }
}
