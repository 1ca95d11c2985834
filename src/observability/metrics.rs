//! Metrics registry for flexdb
//!
//! - Counters only
//! - Monotonic increase
//! - Reset only on process start

use std::sync::atomic::{AtomicU64, Ordering};

/// Operational counters for one service instance.
///
/// Counters use Relaxed ordering; a snapshot is not a consistent cut across
/// counters.
#[derive(Debug, Default)]
pub struct MetricsRegistry {
    schemas_created: AtomicU64,
    schemas_deleted: AtomicU64,
    documents_created: AtomicU64,
    documents_updated: AtomicU64,
    documents_deleted: AtomicU64,
    /// Creates and updates refused by validation
    writes_rejected: AtomicU64,
}

impl MetricsRegistry {
    /// Create a new metrics registry with all counters at zero
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment_schemas_created(&self) {
        self.schemas_created.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_schemas_deleted(&self) {
        self.schemas_deleted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_documents_created(&self) {
        self.documents_created.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_documents_updated(&self) {
        self.documents_updated.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_documents_deleted(&self) {
        self.documents_deleted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_writes_rejected(&self) {
        self.writes_rejected.fetch_add(1, Ordering::Relaxed);
    }

    /// Get all metrics as a snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            schemas_created: self.schemas_created.load(Ordering::Relaxed),
            schemas_deleted: self.schemas_deleted.load(Ordering::Relaxed),
            documents_created: self.documents_created.load(Ordering::Relaxed),
            documents_updated: self.documents_updated.load(Ordering::Relaxed),
            documents_deleted: self.documents_deleted.load(Ordering::Relaxed),
            writes_rejected: self.writes_rejected.load(Ordering::Relaxed),
        }
    }
}

/// A point-in-time snapshot of all metrics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub schemas_created: u64,
    pub schemas_deleted: u64,
    pub documents_created: u64,
    pub documents_updated: u64,
    pub documents_deleted: u64,
    pub writes_rejected: u64,
}
