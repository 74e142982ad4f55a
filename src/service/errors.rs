//! Service error types
//!
//! A use case fails for one of three reasons: the input was invalid, the
//! addressed note does not exist, or storage failed. Storage errors are
//! wrapped unchanged.

use thiserror::Error;

use crate::model::NoteId;
use crate::storage::StorageError;
use crate::validation::ValidationErrors;

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// Input failed validation; storage was not touched
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    /// No note with this id
    #[error("Note {0} not found")]
    NotFound(NoteId),

    /// List window outside the allowed range
    #[error("Limit {limit} must be between 1 and {max}")]
    InvalidPage { limit: u32, max: u32 },

    /// Persistence adapter failure
    #[error(transparent)]
    Storage(#[from] StorageError),
}
