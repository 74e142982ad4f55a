//! Storage error types
//!
//! Error codes:
//! - NOTES_STORAGE_CONNECTION (transient)
//! - NOTES_STORAGE_TIMEOUT (transient)
//! - NOTES_STORAGE_CONSTRAINT
//! - NOTES_STORAGE_QUERY
//! - NOTES_STORAGE_MIGRATION

use sqlx::error::ErrorKind;
use thiserror::Error;

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Failures raised by the persistence adapter.
///
/// Messages are captured as strings so the error stays `Clone` and can cross
/// task boundaries without holding driver state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// The database could not be reached or the connection broke
    #[error("Database connection failed: {0}")]
    Connection(String),

    /// No connection became available within the acquire timeout
    #[error("Database operation timed out: {0}")]
    Timeout(String),

    /// A table constraint rejected the write
    #[error("Constraint violation: {0}")]
    Constraint(String),

    /// Statement or row decoding failure
    #[error("Query failed: {0}")]
    Query(String),

    /// Schema migration failed
    #[error("Migration {id} failed: {reason}")]
    Migration { id: String, reason: String },
}

impl StorageError {
    /// Returns the stable error code string
    pub fn code(&self) -> &'static str {
        match self {
            StorageError::Connection(_) => "NOTES_STORAGE_CONNECTION",
            StorageError::Timeout(_) => "NOTES_STORAGE_TIMEOUT",
            StorageError::Constraint(_) => "NOTES_STORAGE_CONSTRAINT",
            StorageError::Query(_) => "NOTES_STORAGE_QUERY",
            StorageError::Migration { .. } => "NOTES_STORAGE_MIGRATION",
        }
    }

    /// Whether retrying later could succeed without any change in input.
    pub fn is_transient(&self) -> bool {
        matches!(self, StorageError::Connection(_) | StorageError::Timeout(_))
    }

    pub(crate) fn migration(id: &str, source: impl std::fmt::Display) -> Self {
        StorageError::Migration {
            id: id.to_string(),
            reason: source.to_string(),
        }
    }
}

impl From<sqlx::Error> for StorageError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::PoolTimedOut => StorageError::Timeout(err.to_string()),
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::Protocol(_)
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed => StorageError::Connection(err.to_string()),
            sqlx::Error::Database(db) => match db.kind() {
                ErrorKind::UniqueViolation
                | ErrorKind::ForeignKeyViolation
                | ErrorKind::NotNullViolation
                | ErrorKind::CheckViolation => StorageError::Constraint(db.message().to_string()),
                _ => StorageError::Query(err.to_string()),
            },
            _ => StorageError::Query(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_timeout_is_transient() {
        let err = StorageError::from(sqlx::Error::PoolTimedOut);
        assert!(matches!(err, StorageError::Timeout(_)));
        assert!(err.is_transient());
        assert_eq!(err.code(), "NOTES_STORAGE_TIMEOUT");
    }

    #[test]
    fn test_pool_closed_is_connection_error() {
        let err = StorageError::from(sqlx::Error::PoolClosed);
        assert!(matches!(err, StorageError::Connection(_)));
        assert!(err.is_transient());
    }

    #[test]
    fn test_row_not_found_is_query_error() {
        let err = StorageError::from(sqlx::Error::RowNotFound);
        assert!(matches!(err, StorageError::Query(_)));
        assert!(!err.is_transient());
    }

    #[test]
    fn test_migration_display() {
        let err = StorageError::migration("001_create_notes", "syntax error");
        assert_eq!(err.to_string(), "Migration 001_create_notes failed: syntax error");
        assert_eq!(err.code(), "NOTES_STORAGE_MIGRATION");
    }
}
