//! Observability subsystem for flexdb
//!
//! - Structured logging (JSON lines)
//! - Counters
//! - Typed lifecycle events
//!
//! Observability is read-only: nothing here can fail an operation.
//!
//! ```ignore
//! use flexdb::observability::{log_event_with_fields, Event, MetricsRegistry};
//!
//! log_event_with_fields(Event::SchemaCreated, &[("collection", "products")]);
//!
//! let metrics = MetricsRegistry::new();
//! metrics.increment_documents_created();
//! ```

mod events;
mod logger;
mod metrics;

pub use events::Event;
pub use logger::{Logger, Severity};
pub use metrics::{MetricsRegistry, MetricsSnapshot};

/// Log a lifecycle event with fields
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    Logger::log(event.severity(), event.as_str(), fields);
}
