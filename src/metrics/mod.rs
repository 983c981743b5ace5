//! Basic metrics instrumentation for lookup calls.
//!
//! Provides counters and duration tracking for lookup requests and their outcomes.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Metrics collector for lookup traffic. Clones share the same counters.
#[derive(Debug, Clone)]
pub struct Metrics {
    /// Total number of lookup requests made
    lookups_total: Arc<AtomicU64>,

    /// Lookups that ended without an answer from the service
    lookup_errors_total: Arc<AtomicU64>,

    /// Total duration of all lookups in milliseconds
    lookup_duration_total_ms: Arc<AtomicU64>,

    /// Numbers the service resolved
    numbers_resolved_total: Arc<AtomicU64>,

    /// Numbers the service reported as unknown
    numbers_unresolved_total: Arc<AtomicU64>,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    /// Create a new metrics collector.
    pub fn new() -> Self {
        Self {
            lookups_total: Arc::new(AtomicU64::new(0)),
            lookup_errors_total: Arc::new(AtomicU64::new(0)),
            lookup_duration_total_ms: Arc::new(AtomicU64::new(0)),
            numbers_resolved_total: Arc::new(AtomicU64::new(0)),
            numbers_unresolved_total: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Record a lookup request with duration.
    pub fn record_lookup(&self, duration: Duration) {
        self.lookups_total.fetch_add(1, Ordering::Relaxed);
        self.lookup_duration_total_ms
            .fetch_add(duration.as_millis() as u64, Ordering::Relaxed);
    }

    /// Record a lookup that failed in transport.
    pub fn record_lookup_error(&self) {
        self.lookup_errors_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a number the service resolved.
    pub fn record_resolved(&self) {
        self.numbers_resolved_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a number the service did not resolve.
    pub fn record_unresolved(&self) {
        self.numbers_unresolved_total
            .fetch_add(1, Ordering::Relaxed);
    }

    pub fn lookups_total(&self) -> u64 {
        self.lookups_total.load(Ordering::Relaxed)
    }

    pub fn lookup_errors_total(&self) -> u64 {
        self.lookup_errors_total.load(Ordering::Relaxed)
    }

    pub fn lookup_duration_total_ms(&self) -> u64 {
        self.lookup_duration_total_ms.load(Ordering::Relaxed)
    }

    pub fn numbers_resolved_total(&self) -> u64 {
        self.numbers_resolved_total.load(Ordering::Relaxed)
    }

    pub fn numbers_unresolved_total(&self) -> u64 {
        self.numbers_unresolved_total.load(Ordering::Relaxed)
    }

    /// Get average lookup duration in milliseconds.
    pub fn lookup_duration_avg_ms(&self) -> f64 {
        let total = self.lookup_duration_total_ms.load(Ordering::Relaxed);
        let count = self.lookups_total.load(Ordering::Relaxed);
        if count == 0 {
            0.0
        } else {
            total as f64 / count as f64
        }
    }

    /// Reset all metrics to zero.
    pub fn reset(&self) {
        self.lookups_total.store(0, Ordering::Relaxed);
        self.lookup_errors_total.store(0, Ordering::Relaxed);
        self.lookup_duration_total_ms.store(0, Ordering::Relaxed);
        self.numbers_resolved_total.store(0, Ordering::Relaxed);
        self.numbers_unresolved_total.store(0, Ordering::Relaxed);
    }

    /// Get a summary of all metrics.
    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            lookups_total: self.lookups_total(),
            lookup_errors_total: self.lookup_errors_total(),
            lookup_duration_total_ms: self.lookup_duration_total_ms(),
            lookup_duration_avg_ms: self.lookup_duration_avg_ms(),
            numbers_resolved_total: self.numbers_resolved_total(),
            numbers_unresolved_total: self.numbers_unresolved_total(),
        }
    }
}

/// A snapshot of metrics values.
#[derive(Debug, Clone)]
pub struct MetricsSummary {
    pub lookups_total: u64,
    pub lookup_errors_total: u64,
    pub lookup_duration_total_ms: u64,
    pub lookup_duration_avg_ms: f64,
    pub numbers_resolved_total: u64,
    pub numbers_unresolved_total: u64,
}

/// Helper for timing lookup requests.
pub struct HttpTimer {
    start: Instant,
    metrics: Metrics,
}

impl HttpTimer {
    /// Start timing a lookup request.
    pub fn new(metrics: Metrics) -> Self {
        Self {
            start: Instant::now(),
            metrics,
        }
    }

    /// Complete the timing and record the duration.
    pub fn complete(self) {
        self.metrics.record_lookup(self.start.elapsed());
    }

    /// Complete the timing and record as an error.
    pub fn complete_with_error(self) {
        self.metrics.record_lookup(self.start.elapsed());
        self.metrics.record_lookup_error();
    }
}
