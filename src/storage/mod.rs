//! Persistence adapter
//!
//! Non-blocking access to the embedded SQLite database through sqlx.
//!
//! # Design Principles
//!
//! - Every call is a suspension point on the tokio runtime; nothing blocks
//!   a worker thread
//! - List queries are lazy streams; dropping the stream abandons the query
//! - The pool is the only shared mutable resource and arbitrates access
//! - Driver errors are classified into `StorageError` at this boundary

mod database;
mod errors;
pub mod migrations;
mod repository;
mod sqlite;

pub use database::Database;
pub use errors::{StorageError, StorageResult};
pub use repository::{NoteRepository, NoteStream};
pub use sqlite::SqliteNoteRepository;
