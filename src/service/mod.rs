//! Service layer
//!
//! One method per use case (create, read, update, delete, list). Invalid
//! input is rejected before any storage call; storage failures surface as
//! `ServiceError::Storage`.

mod errors;
mod notes;

pub use errors::{ServiceError, ServiceResult};
pub use notes::NoteService;
