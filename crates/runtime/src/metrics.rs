//! Routing counters.
//!
//! Uses atomics for lock-free access across the threads delivering
//! occurrences.

use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Default)]
pub struct RouterMetrics {
    /// Occurrences handed to handlers
    routed: AtomicU64,

    /// Occurrences rejected by the dedup window
    duplicates: AtomicU64,

    /// Routed occurrences that changed no object
    ignored: AtomicU64,

    /// Objects whose lore was rewritten
    objects_updated: AtomicU64,
}

impl RouterMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_duplicate(&self) {
        self.duplicates.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a routed occurrence and the number of objects it updated.
    pub fn record_routed(&self, updated: usize) {
        self.routed.fetch_add(1, Ordering::Relaxed);
        if updated == 0 {
            self.ignored.fetch_add(1, Ordering::Relaxed);
        } else {
            self.objects_updated
                .fetch_add(updated as u64, Ordering::Relaxed);
        }
    }

    pub fn routed(&self) -> u64 {
        self.routed.load(Ordering::Relaxed)
    }

    pub fn duplicates(&self) -> u64 {
        self.duplicates.load(Ordering::Relaxed)
    }

    pub fn ignored(&self) -> u64 {
        self.ignored.load(Ordering::Relaxed)
    }

    pub fn objects_updated(&self) -> u64 {
        self.objects_updated.load(Ordering::Relaxed)
    }

    /// Creates a snapshot of all counters for display/logging.
    ///
    /// Note: fields are read one at a time, so a snapshot taken while
    /// occurrences are being routed may mix counts from different moments.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            routed: self.routed(),
            duplicates: self.duplicates(),
            ignored: self.ignored(),
            objects_updated: self.objects_updated(),
        }
    }
}

/// Snapshot of metrics at a point in time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub routed: u64,
    pub duplicates: u64,
    pub ignored: u64,
    pub objects_updated: u64,
}
