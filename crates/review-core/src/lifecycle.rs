//! Invocation lifecycle tracking.

use std::collections::HashMap;
use std::fmt;
use std::time::{Duration, Instant};

/// Lifecycle phases of one command invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecyclePhase {
    /// Command matched, pipeline started.
    Start,
    /// Every fetch has finished (successfully or not).
    FetchComplete {
        /// Filters with usable data.
        succeeded: usize,
        /// Filters dropped after a failure.
        failed: usize,
    },
    /// Report aggregated and ranked.
    ReportBuilt,
    /// Report rendered to a deliverable document or image.
    Rendered,
    /// Invocation finished.
    Completion,
    /// Invocation failed.
    Error(String),
}

impl LifecyclePhase {
    /// Short name used as a timing mark and log field.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::FetchComplete { .. } => "fetch_complete",
            Self::ReportBuilt => "report_built",
            Self::Rendered => "rendered",
            Self::Completion => "completion",
            Self::Error(_) => "error",
        }
    }
}

impl fmt::Display for LifecyclePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FetchComplete { succeeded, failed } => {
                write!(f, "fetch_complete ({} ok, {} failed)", succeeded, failed)
            }
            Self::Error(message) => write!(f, "error: {}", message),
            other => f.write_str(other.name()),
        }
    }
}

/// Timing context for observability.
#[derive(Debug, Clone)]
pub struct TimingContext {
    start: Instant,
    marks: HashMap<String, Instant>,
}

impl TimingContext {
    /// Create a new timing context.
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            marks: HashMap::new(),
        }
    }

    /// Record a timing mark.
    pub fn mark(&mut self, name: &str) {
        self.marks.insert(name.to_string(), Instant::now());
    }

    /// Record the mark for a lifecycle phase.
    pub fn mark_phase(&mut self, phase: &LifecyclePhase) {
        self.mark(phase.name());
    }

    /// Get elapsed time since start.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Time from start to a recorded mark.
    pub fn since_start(&self, name: &str) -> Option<Duration> {
        self.marks.get(name).map(|t| t.duration_since(self.start))
    }

    /// Time between two recorded marks.
    pub fn between(&self, from: &str, to: &str) -> Option<Duration> {
        let from = self.marks.get(from)?;
        let to = self.marks.get(to)?;
        Some(to.saturating_duration_since(*from))
    }
}

impl Default for TimingContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marks_are_recorded() {
        let mut timing = TimingContext::new();
        assert!(timing.since_start("start").is_none());

        timing.mark_phase(&LifecyclePhase::Start);
        timing.mark_phase(&LifecyclePhase::ReportBuilt);

        assert!(timing.since_start("start").is_some());
        assert!(timing.between("start", "report_built").is_some());
        assert!(timing.between("start", "rendered").is_none());
    }

    #[test]
    fn test_phase_display() {
        let phase = LifecyclePhase::FetchComplete { succeeded: 14, failed: 1 };
        assert_eq!(phase.to_string(), "fetch_complete (14 ok, 1 failed)");
        assert_eq!(LifecyclePhase::Rendered.to_string(), "rendered");
        assert_eq!(LifecyclePhase::Error("boom".into()).to_string(), "error: boom");
    }
}
