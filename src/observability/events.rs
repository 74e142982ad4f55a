//! Lifecycle events
//!
//! Process-level milestones are logged under a fixed `event` field so they
//! can be filtered regardless of the message text.

use std::fmt;

/// Observable lifecycle events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Boot & Lifecycle
    /// Startup begins
    BootStart,
    /// Configuration loaded
    ConfigLoaded,
    /// Database pool opened
    DatabaseConnected,
    /// Schema migrations finished
    MigrationsApplied,
    /// Listener bound, ready for requests
    Serving,
    /// Shutdown signal received
    ShutdownStart,
    /// In-flight requests drained, pool closed
    ShutdownComplete,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::BootStart => "NOTESD_STARTUP_BEGIN",
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::DatabaseConnected => "DATABASE_CONNECTED",
            Event::MigrationsApplied => "MIGRATIONS_APPLIED",
            Event::Serving => "NOTESD_SERVING",
            Event::ShutdownStart => "SHUTDOWN_START",
            Event::ShutdownComplete => "SHUTDOWN_COMPLETE",
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Log a lifecycle event at INFO
pub fn log_event(event: Event) {
    tracing::info!(event = event.as_str());
}
