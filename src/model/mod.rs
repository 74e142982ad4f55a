//! Domain records
//!
//! Plain data types shared by the validation, storage and service layers.

mod note;
mod page;

pub use note::{Note, NoteDraft, NoteId, NoteInput, TITLE_MAX_CHARS};
pub use page::{Page, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};
