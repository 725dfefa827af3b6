//! Query counters
//!
//! - Counters only, monotonic
//! - Thread-safe, lock-free

use std::sync::atomic::{AtomicU64, Ordering};

/// Counters shared by every query run through one engine
#[derive(Debug, Default)]
pub struct QueryMetrics {
    /// Queries that returned rows
    queries_executed: AtomicU64,
    /// Queries that failed (parse, evaluation, source or policy)
    queries_failed: AtomicU64,
    /// Rows read from row sources
    rows_loaded: AtomicU64,
    /// Records produced by joins
    rows_joined: AtomicU64,
    /// Rows removed by WHERE
    rows_filtered_out: AtomicU64,
    /// Rows handed back to callers
    rows_returned: AtomicU64,
}

impl QueryMetrics {
    /// Create a registry with all counters at zero
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment_queries_executed(&self) {
        self.queries_executed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_queries_failed(&self) {
        self.queries_failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn add_rows_loaded(&self, rows: usize) {
        self.rows_loaded.fetch_add(rows as u64, Ordering::Relaxed);
    }

    pub fn add_rows_joined(&self, rows: usize) {
        self.rows_joined.fetch_add(rows as u64, Ordering::Relaxed);
    }

    pub fn add_rows_filtered_out(&self, rows: usize) {
        self.rows_filtered_out.fetch_add(rows as u64, Ordering::Relaxed);
    }

    pub fn add_rows_returned(&self, rows: usize) {
        self.rows_returned.fetch_add(rows as u64, Ordering::Relaxed);
    }

    /// Point-in-time copy of all counters
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            queries_executed: self.queries_executed.load(Ordering::Relaxed),
            queries_failed: self.queries_failed.load(Ordering::Relaxed),
            rows_loaded: self.rows_loaded.load(Ordering::Relaxed),
            rows_joined: self.rows_joined.load(Ordering::Relaxed),
            rows_filtered_out: self.rows_filtered_out.load(Ordering::Relaxed),
            rows_returned: self.rows_returned.load(Ordering::Relaxed),
        }
    }

    /// All counters as a JSON object
    pub fn to_json(&self) -> String {
        let s = self.snapshot();
        serde_json::json!({
            "queries_executed": s.queries_executed,
            "queries_failed": s.queries_failed,
            "rows_loaded": s.rows_loaded,
            "rows_joined": s.rows_joined,
            "rows_filtered_out": s.rows_filtered_out,
            "rows_returned": s.rows_returned,
        })
        .to_string()
    }
}

/// A point-in-time snapshot of all counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MetricsSnapshot {
    pub queries_executed: u64,
    pub queries_failed: u64,
    pub rows_loaded: u64,
    pub rows_joined: u64,
    pub rows_filtered_out: u64,
    pub rows_returned: u64,
}
