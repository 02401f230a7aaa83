//! Fetch-then-aggregate pipeline.

use std::sync::Arc;

use review_core::{LifecyclePhase, PipelineConfig, RequestId, ReviewFilter, TimingContext};
use review_data::{HttpSession, ReviewFetcher};
use review_observability::{FetchMetricsCollector, InvocationMetrics, StructuredLogger};
use review_report::{build_report, LocaleReviewRecord, ReviewReport};
use serde::Serialize;
use thiserror::Error;

/// Pipeline-level failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    /// Every filter failed, so there is nothing to report.
    #[error("no review data available: all {attempted} requests failed")]
    NoData { attempted: usize },

    /// The host has not provided an HTTP session yet.
    #[error("HTTP session not initialized")]
    SessionUnavailable,
}

/// A successful run with its diagnostics.
#[derive(Debug, Clone)]
pub struct PipelineRun {
    pub report: ReviewReport,
    pub metrics: InvocationMetrics,
    pub timing: TimingContext,
}

/// Fetches every filter through a host-owned session and builds the report.
pub struct ReviewsPipeline {
    session: Option<Arc<dyn HttpSession>>,
    config: PipelineConfig,
    filters: Option<Vec<ReviewFilter>>,
}

impl ReviewsPipeline {
    pub fn new(session: Arc<dyn HttpSession>, config: PipelineConfig) -> Self {
        Self {
            session: Some(session),
            config,
            filters: None,
        }
    }

    /// Pipeline for a host whose session is not ready; every run fails.
    pub fn without_session(config: PipelineConfig) -> Self {
        Self {
            session: None,
            config,
            filters: None,
        }
    }

    /// Query only these filters instead of the full known set.
    pub fn with_filters(mut self, filters: Vec<ReviewFilter>) -> Self {
        self.filters = Some(filters);
        self
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Fetch and aggregate.
    pub async fn run(&self) -> Result<ReviewReport, PipelineError> {
        let logger = StructuredLogger::new(RequestId::generate()).with_component("pipeline");
        self.run_logged(&logger).await.map(|run| run.report)
    }

    /// Fetch and aggregate, logging under `logger`'s request ID.
    pub async fn run_logged(&self, logger: &StructuredLogger) -> Result<PipelineRun, PipelineError> {
        let mut timing = TimingContext::new();
        timing.mark_phase(&LifecyclePhase::Start);

        let Some(session) = self.session.clone() else {
            let err = PipelineError::SessionUnavailable;
            logger
                .error_builder("Pipeline not started")
                .field("error", err.to_string())
                .emit();
            return Err(err);
        };

        let mut fetcher = ReviewFetcher::new(session, &self.config, logger.child("fetcher"));
        if let Some(filters) = &self.filters {
            fetcher = fetcher.with_filters(filters.clone());
        }
        let attempted = fetcher.filters().len();

        let mut metrics = FetchMetricsCollector::new(logger.request_id().clone());
        let fetched = fetcher
            .fetch_all_recorded(self.config.timeout(), &mut metrics)
            .await;

        let phase = LifecyclePhase::FetchComplete {
            succeeded: metrics.succeeded(),
            failed: metrics.failed(),
        };
        timing.mark_phase(&phase);
        logger.debug(&phase.to_string());

        if fetched.is_empty() {
            let err = PipelineError::NoData { attempted };
            timing.mark_phase(&LifecyclePhase::Error(err.to_string()));
            logger
                .error_builder("Review fetch produced no data")
                .field("error", err.to_string())
                .emit();
            return Err(err);
        }

        let report = build_report(&fetched);
        timing.mark_phase(&LifecyclePhase::ReportBuilt);

        logger
            .info_builder("Review report built")
            .field_u64("ranked", report.ranked.len() as u64)
            .field_u64("all_reviews", report.all.total_reviews)
            .field("all_rate", report.all.positive_rate.clone())
            .emit();

        Ok(PipelineRun {
            report,
            metrics: metrics.finalize(),
            timing,
        })
    }
}

/// Serializable view of one run, shaped like the plugin's result payload.
#[derive(Debug, Clone, Serialize)]
pub struct ReviewsOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub all_data: Option<LocaleReviewRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub languages_data: Option<Vec<(ReviewFilter, LocaleReviewRecord)>>,
}

impl ReviewsOutcome {
    /// Prefix of the message carried by failed outcomes.
    pub const FAILURE_PREFIX: &'static str = "获取评价数据失败";

    pub fn failure_message(err: &PipelineError) -> String {
        format!("{}: {}", Self::FAILURE_PREFIX, err)
    }
}

impl From<Result<ReviewReport, PipelineError>> for ReviewsOutcome {
    fn from(result: Result<ReviewReport, PipelineError>) -> Self {
        match result {
            Ok(report) => Self {
                success: true,
                message: None,
                all_data: Some(report.all),
                languages_data: Some(report.ranked),
            },
            Err(err) => Self {
                success: false,
                message: Some(Self::failure_message(&err)),
                all_data: None,
                languages_data: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_are_not_empty() {
        assert!(!PipelineError::NoData { attempted: 15 }.to_string().is_empty());
        assert!(!PipelineError::SessionUnavailable.to_string().is_empty());
    }

    #[test]
    fn test_failed_outcome_json() {
        let outcome = ReviewsOutcome::from(Err(PipelineError::NoData { attempted: 15 }));
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["success"], false);
        assert!(json["message"]
            .as_str()
            .unwrap()
            .starts_with("获取评价数据失败: "));
        assert!(json.get("all_data").is_none());
    }

    #[test]
    fn test_successful_outcome_json() {
        let report = ReviewReport {
            all: LocaleReviewRecord::empty(&ReviewFilter::AllLanguages),
            ranked: vec![(
                ReviewFilter::language("english"),
                LocaleReviewRecord::empty(&ReviewFilter::language("english")),
            )],
        };
        let json = serde_json::to_value(ReviewsOutcome::from(Ok(report))).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["all_data"]["language_name"], "所有语言");
        assert_eq!(json["languages_data"][0][0], "english");
        assert_eq!(json["languages_data"][0][1]["positive_rate"], "0.00%");
    }

    #[tokio::test]
    async fn test_without_session() {
        let pipeline = ReviewsPipeline::without_session(PipelineConfig::default());
        assert_eq!(pipeline.run().await, Err(PipelineError::SessionUnavailable));
    }
}
