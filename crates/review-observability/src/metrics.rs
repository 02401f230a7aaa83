//! Per-invocation fetch metrics.

use std::time::{Duration, Instant};

use review_core::RequestId;
use serde::{Deserialize, Serialize};

/// Outcome of one filter's fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchMetrics {
    /// Review filter (`language` query value).
    pub filter: String,
    /// Fetch duration (microseconds).
    pub duration_us: u64,
    /// HTTP status code, when a response arrived.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    /// Response size in bytes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_bytes: Option<usize>,
    /// Whether the filter produced usable data.
    pub success: bool,
    /// Error message if failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Metrics for one command invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvocationMetrics {
    /// Request ID for correlation.
    pub request_id: String,
    /// Fetches in filter order.
    pub fetches: Vec<FetchMetrics>,
    /// Total invocation duration (microseconds).
    pub total_duration_us: u64,
}

/// Collector for invocation metrics.
///
/// Fetches run concurrently but each returns its own `FetchMetrics`; the
/// collector is filled after they are joined, so it needs no locking.
#[derive(Debug)]
pub struct FetchMetricsCollector {
    request_id: RequestId,
    start: Instant,
    fetches: Vec<FetchMetrics>,
}

impl FetchMetricsCollector {
    /// Create a new metrics collector.
    pub fn new(request_id: RequestId) -> Self {
        Self {
            request_id,
            start: Instant::now(),
            fetches: Vec::new(),
        }
    }

    /// Record a successful fetch.
    pub fn record_success(
        &mut self,
        filter: &str,
        duration: Duration,
        status_code: u16,
        response_bytes: usize,
    ) {
        self.fetches.push(FetchMetrics {
            filter: filter.to_string(),
            duration_us: duration.as_micros() as u64,
            status_code: Some(status_code),
            response_bytes: Some(response_bytes),
            success: true,
            error: None,
        });
    }

    /// Record a failed fetch.
    pub fn record_failure(
        &mut self,
        filter: &str,
        duration: Duration,
        status_code: Option<u16>,
        error: impl Into<String>,
    ) {
        self.fetches.push(FetchMetrics {
            filter: filter.to_string(),
            duration_us: duration.as_micros() as u64,
            status_code,
            response_bytes: None,
            success: false,
            error: Some(error.into()),
        });
    }

    /// Number of successful fetches recorded so far.
    pub fn succeeded(&self) -> usize {
        self.fetches.iter().filter(|f| f.success).count()
    }

    /// Number of failed fetches recorded so far.
    pub fn failed(&self) -> usize {
        self.fetches.iter().filter(|f| !f.success).count()
    }

    /// Finalize and return the metrics.
    pub fn finalize(self) -> InvocationMetrics {
        InvocationMetrics {
            request_id: self.request_id.to_string(),
            fetches: self.fetches,
            total_duration_us: self.start.elapsed().as_micros() as u64,
        }
    }
}

impl InvocationMetrics {
    /// Format as JSON.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    /// Slowest successful fetch, if any.
    pub fn slowest(&self) -> Option<&FetchMetrics> {
        self.fetches
            .iter()
            .filter(|f| f.success)
            .max_by_key(|f| f.duration_us)
    }

    /// Format as human-readable summary.
    pub fn to_summary(&self) -> String {
        let mut lines = Vec::new();

        lines.push(format!("Request: {}", self.request_id));
        lines.push(format!(
            "  Total: {}us ({:.2}ms)",
            self.total_duration_us,
            self.total_duration_us as f64 / 1000.0
        ));

        if !self.fetches.is_empty() {
            lines.push("  Fetches:".to_string());
            for fetch in &self.fetches {
                let status = if fetch.success {
                    format!("{}", fetch.status_code.unwrap_or(0))
                } else {
                    format!("FAILED ({})", fetch.error.as_deref().unwrap_or("unknown"))
                };
                lines.push(format!(
                    "    {}: {:.2}ms {}",
                    fetch.filter,
                    fetch.duration_us as f64 / 1000.0,
                    status
                ));
            }
        }

        lines.join("\n")
    }
}
