//! Per-filter review-summary fetching.

use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::future::join_all;
use review_core::{known_filters, PipelineConfig, ReviewFilter};
use review_observability::{FetchMetricsCollector, StructuredLogger};

use crate::{with_deadline, FetchError, FetchedReviews, HttpResponse, HttpSession, RawReviewResponse};

/// Fetches review summaries for a fixed set of filters.
///
/// Each filter is one independent GET; a failure for one filter is logged
/// and dropped, never propagated.
pub struct ReviewFetcher {
    session: Arc<dyn HttpSession>,
    base_url: String,
    filters: Vec<ReviewFilter>,
    logger: StructuredLogger,
}

/// Result of one filter's request, with what the metrics need.
struct FetchAttempt {
    filter: ReviewFilter,
    elapsed: Duration,
    status: Option<u16>,
    bytes: Option<usize>,
    result: Result<RawReviewResponse, FetchError>,
}

impl ReviewFetcher {
    /// Create a fetcher over a host-owned session, querying every known filter.
    pub fn new(session: Arc<dyn HttpSession>, config: &PipelineConfig, logger: StructuredLogger) -> Self {
        Self {
            session,
            base_url: config.base_url.clone(),
            filters: known_filters(),
            logger,
        }
    }

    /// Replace the filter set.
    pub fn with_filters(mut self, filters: Vec<ReviewFilter>) -> Self {
        self.filters = filters;
        self
    }

    /// Filters queried by `fetch_all`, in order.
    pub fn filters(&self) -> &[ReviewFilter] {
        &self.filters
    }

    /// Fetch one filter's summary.
    ///
    /// Succeeds only for a 200 response whose body decodes, reports
    /// `success == 1` and carries a `query_summary`.
    pub async fn fetch_locale(
        &self,
        filter: &ReviewFilter,
        timeout: Duration,
    ) -> Result<RawReviewResponse, FetchError> {
        self.attempt(filter, timeout).await.result
    }

    /// Fetch every filter concurrently, keeping only the successes.
    pub async fn fetch_all(&self, timeout: Duration) -> FetchedReviews {
        let mut metrics = FetchMetricsCollector::new(self.logger.request_id().clone());
        self.fetch_all_recorded(timeout, &mut metrics).await
    }

    /// `fetch_all`, recording per-filter timings into `metrics`.
    pub async fn fetch_all_recorded(
        &self,
        timeout: Duration,
        metrics: &mut FetchMetricsCollector,
    ) -> FetchedReviews {
        self.logger
            .debug_builder("Starting review fetches")
            .field_u64("filters", self.filters.len() as u64)
            .duration_ms("timeout_ms", timeout)
            .emit();

        let attempts = join_all(
            self.filters
                .iter()
                .map(|filter| self.attempt(filter, timeout)),
        )
        .await;

        let mut fetched = FetchedReviews::new();
        for attempt in attempts {
            let code = attempt.filter.query_value().to_string();
            match attempt.result {
                Ok(raw) => {
                    metrics.record_success(
                        &code,
                        attempt.elapsed,
                        attempt.status.unwrap_or(200),
                        attempt.bytes.unwrap_or(0),
                    );
                    fetched.push(attempt.filter, raw);
                }
                Err(err) => {
                    self.logger
                        .warn_builder("Review fetch failed")
                        .field("language", code.clone())
                        .field("error", err.to_string())
                        .duration_ms("elapsed_ms", attempt.elapsed)
                        .emit();
                    metrics.record_failure(&code, attempt.elapsed, attempt.status, err.to_string());
                }
            }
        }

        self.logger
            .info_builder("Review fetches complete")
            .field_u64("succeeded", fetched.len() as u64)
            .field_u64("failed", (self.filters.len() - fetched.len()) as u64)
            .emit();

        fetched
    }

    async fn attempt(&self, filter: &ReviewFilter, timeout: Duration) -> FetchAttempt {
        let started = Instant::now();
        let query = [
            ("json", "1"),
            ("filter", "updated"),
            ("language", filter.query_value()),
        ];

        let response = with_deadline(timeout, self.session.get(&self.base_url, &query, timeout)).await;
        let (status, bytes, result) = match response {
            Ok(response) => (
                Some(response.status),
                Some(response.body.len()),
                decode_response(&self.base_url, &response),
            ),
            Err(err) => (err.status_code(), None, Err(err)),
        };

        if result.is_ok() {
            self.logger
                .debug_builder("Review fetch succeeded")
                .field("language", filter.query_value())
                .duration_ms("elapsed_ms", started.elapsed())
                .emit();
        }

        FetchAttempt {
            filter: filter.clone(),
            elapsed: started.elapsed(),
            status,
            bytes,
            result,
        }
    }
}

/// Validate and decode one endpoint response.
pub fn decode_response(url: &str, response: &HttpResponse) -> Result<RawReviewResponse, FetchError> {
    if !response.is_ok() {
        return Err(FetchError::Http {
            status: response.status,
            url: url.to_string(),
        });
    }

    let raw: RawReviewResponse = response.json()?;
    if !raw.is_success() {
        return Err(FetchError::Unsuccessful {
            success: raw.success,
        });
    }
    if raw.query_summary.is_none() {
        return Err(FetchError::MissingSummary);
    }

    Ok(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use review_core::RequestId;

    #[derive(Clone)]
    enum Reply {
        Body(u16, String),
        Delay(Duration),
        Fail(FetchError),
    }

    struct MockSession {
        replies: HashMap<String, Reply>,
        calls: Mutex<Vec<Vec<(String, String)>>>,
    }

    impl MockSession {
        fn new() -> Self {
            Self {
                replies: HashMap::new(),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn reply(mut self, language: &str, reply: Reply) -> Self {
            self.replies.insert(language.to_string(), reply);
            self
        }
    }

    fn summary_body(positive: u64, negative: u64, desc: &str) -> String {
        format!(
            r#"{{"success":1,"query_summary":{{"total_positive":{},"total_negative":{},"total_reviews":{},"review_score_desc":"{}"}}}}"#,
            positive,
            negative,
            positive + negative,
            desc
        )
    }

    #[async_trait]
    impl HttpSession for MockSession {
        async fn get(
            &self,
            _url: &str,
            query: &[(&str, &str)],
            _timeout: Duration,
        ) -> Result<HttpResponse, FetchError> {
            self.calls.lock().unwrap().push(
                query
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
            );
            let language = query
                .iter()
                .find(|(k, _)| *k == "language")
                .map(|(_, v)| v.to_string())
                .unwrap_or_default();

            let reply = self
                .replies
                .get(&language)
                .cloned()
                .unwrap_or_else(|| Reply::Body(200, summary_body(8, 2, "Very Positive")));

            match reply {
                Reply::Body(status, body) => Ok(HttpResponse::json_body(status, body)),
                Reply::Delay(delay) => {
                    tokio::time::sleep(delay).await;
                    Ok(HttpResponse::json_body(200, summary_body(1, 1, "Mixed")))
                }
                Reply::Fail(err) => Err(err),
            }
        }
    }

    fn fetcher(session: MockSession) -> (ReviewFetcher, Arc<MockSession>) {
        let session = Arc::new(session);
        let logger = StructuredLogger::new(RequestId::from_string("test")).with_component("fetcher");
        let fetcher = ReviewFetcher::new(session.clone(), &PipelineConfig::default(), logger);
        (fetcher, session)
    }

    const TIMEOUT: Duration = Duration::from_secs(15);

    #[tokio::test]
    async fn test_fetch_locale_sends_expected_query() {
        let (fetcher, session) = fetcher(MockSession::new());
        let raw = fetcher
            .fetch_locale(&ReviewFilter::language("english"), TIMEOUT)
            .await
            .unwrap();
        assert_eq!(raw.query_summary.unwrap().total_positive, 8);

        let calls = session.calls.lock().unwrap();
        assert_eq!(
            calls[0],
            vec![
                ("json".to_string(), "1".to_string()),
                ("filter".to_string(), "updated".to_string()),
                ("language".to_string(), "english".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_fetch_locale_aggregate_uses_all() {
        let (fetcher, session) = fetcher(MockSession::new());
        fetcher
            .fetch_locale(&ReviewFilter::AllLanguages, TIMEOUT)
            .await
            .unwrap();
        let calls = session.calls.lock().unwrap();
        assert_eq!(calls[0][2].1, "all");
    }

    #[tokio::test]
    async fn test_fetch_locale_non_200() {
        let (fetcher, _) = fetcher(
            MockSession::new().reply("german", Reply::Body(503, summary_body(1, 1, "Mixed"))),
        );
        let err = fetcher
            .fetch_locale(&ReviewFilter::language("german"), TIMEOUT)
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), Some(503));
    }

    #[tokio::test]
    async fn test_fetch_locale_unsuccessful_body() {
        let (fetcher, _) = fetcher(
            MockSession::new().reply("thai", Reply::Body(200, r#"{"success":2}"#.to_string())),
        );
        let err = fetcher
            .fetch_locale(&ReviewFilter::language("thai"), TIMEOUT)
            .await
            .unwrap_err();
        assert_eq!(err, FetchError::Unsuccessful { success: 2 });
    }

    #[tokio::test]
    async fn test_fetch_locale_malformed_body() {
        let (fetcher, _) = fetcher(
            MockSession::new().reply("thai", Reply::Body(200, "<html>busy</html>".to_string())),
        );
        let err = fetcher
            .fetch_locale(&ReviewFilter::language("thai"), TIMEOUT)
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Deserialization(_)));
    }

    #[tokio::test]
    async fn test_fetch_locale_missing_summary() {
        let (fetcher, _) = fetcher(
            MockSession::new().reply("thai", Reply::Body(200, r#"{"success":1}"#.to_string())),
        );
        let err = fetcher
            .fetch_locale(&ReviewFilter::language("thai"), TIMEOUT)
            .await
            .unwrap_err();
        assert_eq!(err, FetchError::MissingSummary);
    }

    #[tokio::test]
    async fn test_fetch_locale_transport_error() {
        let (fetcher, _) = fetcher(MockSession::new().reply(
            "french",
            Reply::Fail(FetchError::Connection("connection refused".to_string())),
        ));
        let err = fetcher
            .fetch_locale(&ReviewFilter::language("french"), TIMEOUT)
            .await
            .unwrap_err();
        assert!(err.is_transport());
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetch_all_drops_only_timed_out_filter() {
        let (fetcher, _) = fetcher(
            MockSession::new().reply("japanese", Reply::Delay(Duration::from_secs(60))),
        );
        let fetched = fetcher.fetch_all(TIMEOUT).await;

        assert_eq!(fetched.len(), 14);
        assert!(!fetched.contains(&ReviewFilter::language("japanese")));
        assert!(fetched.contains(&ReviewFilter::AllLanguages));
        assert!(fetched.contains(&ReviewFilter::language("english")));
    }

    #[tokio::test]
    async fn test_fetch_all_keeps_filter_order() {
        let (fetcher, _) = fetcher(MockSession::new());
        let fetcher = fetcher.with_filters(vec![
            ReviewFilter::language("thai"),
            ReviewFilter::AllLanguages,
            ReviewFilter::language("english"),
        ]);
        let fetched = fetcher.fetch_all(TIMEOUT).await;
        let order: Vec<&str> = fetched.iter().map(|(f, _)| f.query_value()).collect();
        assert_eq!(order, vec!["thai", "all", "english"]);
    }

    #[tokio::test]
    async fn test_fetch_all_records_metrics() {
        let (fetcher, _) = fetcher(
            MockSession::new().reply("latam", Reply::Body(500, String::new())),
        );
        let mut metrics = FetchMetricsCollector::new(RequestId::from_string("test"));
        let fetched = fetcher.fetch_all_recorded(TIMEOUT, &mut metrics).await;

        assert_eq!(fetched.len(), 14);
        assert_eq!(metrics.succeeded(), 14);
        assert_eq!(metrics.failed(), 1);

        let report = metrics.finalize();
        let latam = report.fetches.iter().find(|f| f.filter == "latam").unwrap();
        assert_eq!(latam.status_code, Some(500));
        assert!(!latam.success);
    }

    #[tokio::test]
    async fn test_fetch_all_total_outage_is_empty() {
        let mut session = MockSession::new();
        for filter in known_filters() {
            session = session.reply(
                filter.query_value(),
                Reply::Fail(FetchError::Connection("dns failure".to_string())),
            );
        }
        let (fetcher, _) = fetcher(session);
        let fetched = fetcher.fetch_all(TIMEOUT).await;
        assert!(fetched.is_empty());
    }
}
