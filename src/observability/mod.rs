//! Observability
//!
//! - Structured logging through `tracing` (pretty or JSON)
//! - Lifecycle events under a fixed `event` field
//! - Operation counters exposed at `/metrics`
//!
//! Observability is read-only: nothing here changes the outcome of a request.

mod events;
mod logger;
mod metrics;

pub use events::{log_event, Event};
pub use logger::{init, LoggingError};
pub use metrics::{MetricsRegistry, MetricsSnapshot};
