//! Observability for joinql
//!
//! - Structured logging (JSON lines)
//! - Typed pipeline events
//! - Begin/complete scopes around each query
//! - Query counters
//!
//! Observability is read-only: it never changes query results, and a
//! failed log write never fails a query.

mod events;
mod logger;
mod metrics;
mod scope;

pub use events::Event;
pub use logger::{Logger, Severity};
pub use metrics::{MetricsSnapshot, QueryMetrics};
pub use scope::{ObservationScope, Timer};

/// Log a pipeline event at its own severity
pub fn log_event(event: Event, fields: &[(&str, &str)]) {
    Logger::log(event.severity(), event.as_str(), fields);
}
