//! Metrics definitions for pagination.
//!
//! Metrics are recorded through the `metrics` crate facade; installing
//! an exporter (Prometheus or otherwise) is the embedding application's
//! job. Without a recorder installed every call here is a no-op.

use metrics::{counter, describe_counter, describe_histogram, histogram};
use std::time::Instant;

/// Initialize all metric descriptions.
/// Call this once at startup before any metrics are recorded.
pub fn init_metrics() {
    describe_counter!(
        "cursor_decode_failures_total",
        "Total number of cursor tokens rejected and served fail-open"
    );
    describe_counter!(
        "pages_served_total",
        "Total number of connection pages assembled"
    );
    describe_histogram!(
        "page_assembly_duration_seconds",
        "Time taken to fetch and assemble one page in seconds"
    );
}

/// Record a rejected cursor token (the request fell back to page one).
pub fn record_cursor_decode_failure() {
    counter!("cursor_decode_failures_total").increment(1);
}

/// Record a successfully assembled page.
pub fn record_page_served() {
    counter!("pages_served_total").increment(1);
}

/// Record page assembly duration.
pub fn record_page_assembly_duration(duration_secs: f64) {
    histogram!("page_assembly_duration_seconds").record(duration_secs);
}

/// A timer that automatically records duration when dropped.
pub struct PageTimer {
    start: Instant,
}

impl PageTimer {
    /// Start a new page assembly timer.
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for PageTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for PageTimer {
    fn drop(&mut self) {
        let duration = self.start.elapsed().as_secs_f64();
        record_page_assembly_duration(duration);
    }
}
