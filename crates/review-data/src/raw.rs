//! Raw review-summary payloads.

use review_core::ReviewFilter;
use serde::{Deserialize, Serialize};

/// Decoded body of one review-summary request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawReviewResponse {
    /// `1` when the endpoint served the request.
    #[serde(default)]
    pub success: i64,

    /// Summary counts; present on successful responses.
    #[serde(default)]
    pub query_summary: Option<QuerySummary>,
}

impl RawReviewResponse {
    /// Build a successful response around a summary.
    pub fn with_summary(summary: QuerySummary) -> Self {
        Self {
            success: 1,
            query_summary: Some(summary),
        }
    }

    /// Whether the endpoint reported success.
    pub fn is_success(&self) -> bool {
        self.success == 1
    }
}

/// Aggregate counts for one review filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuerySummary {
    #[serde(default)]
    pub total_positive: u64,
    #[serde(default)]
    pub total_negative: u64,
    #[serde(default)]
    pub total_reviews: u64,
    /// Qualitative label such as "Very Positive".
    #[serde(default)]
    pub review_score_desc: Option<String>,
}

impl QuerySummary {
    /// Create a summary from counts and a descriptor.
    pub fn new(positive: u64, negative: u64, total: u64, desc: impl Into<String>) -> Self {
        Self {
            total_positive: positive,
            total_negative: negative,
            total_reviews: total,
            review_score_desc: Some(desc.into()),
        }
    }
}

/// Successful fetches of one invocation, in fetch order.
///
/// Failed filters are simply absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchedReviews {
    entries: Vec<(ReviewFilter, RawReviewResponse)>,
}

impl FetchedReviews {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one filter's response.
    pub fn push(&mut self, filter: ReviewFilter, raw: RawReviewResponse) {
        self.entries.push((filter, raw));
    }

    /// Builder-style append.
    pub fn with(mut self, filter: ReviewFilter, raw: RawReviewResponse) -> Self {
        self.push(filter, raw);
        self
    }

    /// Response for a filter, if it was fetched successfully.
    pub fn get(&self, filter: &ReviewFilter) -> Option<&RawReviewResponse> {
        self.entries
            .iter()
            .find(|(f, _)| f == filter)
            .map(|(_, raw)| raw)
    }

    /// Whether a filter was fetched successfully.
    pub fn contains(&self, filter: &ReviewFilter) -> bool {
        self.get(filter).is_some()
    }

    /// Number of successful filters.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no filter produced data.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over entries in fetch order.
    pub fn iter(&self) -> impl Iterator<Item = &(ReviewFilter, RawReviewResponse)> {
        self.entries.iter()
    }
}

impl FromIterator<(ReviewFilter, RawReviewResponse)> for FetchedReviews {
    fn from_iter<I: IntoIterator<Item = (ReviewFilter, RawReviewResponse)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for FetchedReviews {
    type Item = (ReviewFilter, RawReviewResponse);
    type IntoIter = std::vec::IntoIter<(ReviewFilter, RawReviewResponse)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
