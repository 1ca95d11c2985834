//! Observability events for flexdb
//!
//! Every state change the service makes, and every write it refuses, is
//! logged under one of these names.

use std::fmt;

use super::logger::Severity;

/// Observable events in flexdb
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Configuration
    /// Configuration loaded
    ConfigLoaded,

    // Schema lifecycle
    /// Schema registered
    SchemaCreated,
    /// Schema field list replaced
    SchemaUpdated,
    /// Schema removed and its collection dropped
    SchemaDeleted,

    // Document lifecycle
    /// Document inserted
    DocumentCreated,
    /// Document data replaced by a merge
    DocumentUpdated,
    /// Document removed
    DocumentDeleted,

    // Failures
    /// Write refused by validation
    WriteRejected,
    /// Store call failed
    StoreFailure,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::SchemaCreated => "SCHEMA_CREATED",
            Event::SchemaUpdated => "SCHEMA_UPDATED",
            Event::SchemaDeleted => "SCHEMA_DELETED",
            Event::DocumentCreated => "DOCUMENT_CREATED",
            Event::DocumentUpdated => "DOCUMENT_UPDATED",
            Event::DocumentDeleted => "DOCUMENT_DELETED",
            Event::WriteRejected => "WRITE_REJECTED",
            Event::StoreFailure => "STORE_FAILURE",
        }
    }

    /// Severity the event is logged at
    pub fn severity(&self) -> Severity {
        match self {
            Event::WriteRejected => Severity::Warn,
            Event::StoreFailure => Severity::Error,
            _ => Severity::Info,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
