//! Operation counters
//!
//! - Counters only, monotonic, reset on process start
//! - Lock-free; Relaxed ordering is enough since no counter guards other data

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Per-operation counters for the notes service
#[derive(Debug, Default)]
pub struct MetricsRegistry {
    notes_created: AtomicU64,
    notes_read: AtomicU64,
    notes_updated: AtomicU64,
    notes_deleted: AtomicU64,
    lists_served: AtomicU64,
    validation_rejections: AtomicU64,
    not_found: AtomicU64,
    storage_failures: AtomicU64,
}

/// Point-in-time copy of every counter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub notes_created: u64,
    pub notes_read: u64,
    pub notes_updated: u64,
    pub notes_deleted: u64,
    pub lists_served: u64,
    pub validation_rejections: u64,
    pub not_found: u64,
    pub storage_failures: u64,
}

impl MetricsRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment_created(&self) {
        self.notes_created.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_read(&self) {
        self.notes_read.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_updated(&self) {
        self.notes_updated.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_deleted(&self) {
        self.notes_deleted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_lists(&self) {
        self.lists_served.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_validation_rejections(&self) {
        self.validation_rejections.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_not_found(&self) {
        self.not_found.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_storage_failures(&self) {
        self.storage_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Read every counter
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            notes_created: self.notes_created.load(Ordering::Relaxed),
            notes_read: self.notes_read.load(Ordering::Relaxed),
            notes_updated: self.notes_updated.load(Ordering::Relaxed),
            notes_deleted: self.notes_deleted.load(Ordering::Relaxed),
            lists_served: self.lists_served.load(Ordering::Relaxed),
            validation_rejections: self.validation_rejections.load(Ordering::Relaxed),
            not_found: self.not_found.load(Ordering::Relaxed),
            storage_failures: self.storage_failures.load(Ordering::Relaxed),
        }
    }
}
