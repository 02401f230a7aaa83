//! Observability for the locale review board.
//!
//! This crate provides:
//! - `StructuredLogger` - Request-scoped structured logging on top of `tracing`
//! - `FetchMetricsCollector` - Per-filter fetch timings and outcomes

mod logging;
mod metrics;

pub use logging::*;
pub use metrics::*;

pub use review_core::{RequestId, TimingContext};
