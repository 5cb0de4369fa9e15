// Run metrics module
//
// Counts what a viewer session found and how long the Steam lookups took

use crate::models::MetadataResult;
use std::time::{Duration, Instant};

/// Metrics for a single viewer session
///
/// Owned by the session and logged on shutdown.
#[derive(Debug)]
pub struct SessionMetrics {
    /// Addon directories found on disk
    pub addons_found: usize,

    /// Addons resolved to a title
    pub addons_resolved: usize,

    /// Addons the API returned an error code for
    pub addons_failed: usize,

    /// Time spent waiting on the Steam Web API
    pub lookup_time: Duration,

    /// Number of requests sent to the Steam Web API
    pub requests: usize,

    start_time: Instant,
}

impl SessionMetrics {
    pub fn new() -> Self {
        Self {
            addons_found: 0,
            addons_resolved: 0,
            addons_failed: 0,
            lookup_time: Duration::ZERO,
            requests: 0,
            start_time: Instant::now(),
        }
    }

    pub fn record_found(&mut self, count: usize) {
        self.addons_found = count;
    }

    /// Record one Steam Web API request
    pub fn record_request(&mut self, duration: Duration) {
        self.requests += 1;
        self.lookup_time += duration;
    }

    /// Tally resolved and failed addons from a batch
    pub fn record_results(&mut self, results: &[MetadataResult]) {
        let failed = results.iter().filter(|r| r.is_error()).count();
        self.addons_failed += failed;
        self.addons_resolved += results.len() - failed;
    }

    pub fn uptime(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Log metrics summary
    pub fn log_summary(&self) {
        tracing::info!("=== Session Summary ===");
        tracing::info!("Uptime: {:.2}s", self.uptime().as_secs_f64());
        tracing::info!(
            "Addons: {} found, {} resolved, {} failed",
            self.addons_found,
            self.addons_resolved,
            self.addons_failed
        );
        tracing::info!(
            "Steam Web API: {} requests, {:.2}s total",
            self.requests,
            self.lookup_time.as_secs_f64()
        );
    }
}

impl Default for SessionMetrics {
    fn default() -> Self {
        Self::new()
    }
}
