//! Per-language display records.

use std::borrow::Cow;

use review_core::ReviewFilter;
use review_data::RawReviewResponse;
use serde::Serialize;

use crate::{localize_descriptor, UNKNOWN_DESCRIPTOR};

/// Display-ready summary for one review filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocaleReviewRecord {
    pub language_name: String,
    pub total_positive: u64,
    pub total_negative: u64,
    pub total_reviews: u64,
    /// Two-decimal percentage, e.g. `"80.00%"`.
    pub positive_rate: String,
    pub review_score_desc: String,
    pub review_score_desc_cn: String,
}

impl LocaleReviewRecord {
    /// Record for a filter that returned no usable counts.
    pub fn empty(filter: &ReviewFilter) -> Self {
        Self {
            language_name: display_name(filter).into_owned(),
            total_positive: 0,
            total_negative: 0,
            total_reviews: 0,
            positive_rate: compute_rate(0, 0),
            review_score_desc: UNKNOWN_DESCRIPTOR.to_string(),
            review_score_desc_cn: localize_descriptor(UNKNOWN_DESCRIPTOR).to_string(),
        }
    }
}

/// Positive share of `total`, formatted with two decimals and a `%`.
pub fn compute_rate(positive: u64, total: u64) -> String {
    if total == 0 {
        return "0.00%".to_string();
    }
    format!("{:.2}%", positive as f64 / total as f64 * 100.0)
}

/// Display name for a filter; unmapped codes show the raw code.
pub fn display_name(filter: &ReviewFilter) -> Cow<'static, str> {
    filter.display_name()
}

/// Convert one raw response into a display record.
///
/// Missing counts read as zero and a missing descriptor as
/// [`UNKNOWN_DESCRIPTOR`].
pub fn normalize(filter: &ReviewFilter, raw: &RawReviewResponse) -> LocaleReviewRecord {
    let Some(summary) = raw.query_summary.as_ref() else {
        return LocaleReviewRecord::empty(filter);
    };

    let desc = summary
        .review_score_desc
        .as_deref()
        .unwrap_or(UNKNOWN_DESCRIPTOR);

    LocaleReviewRecord {
        language_name: display_name(filter).into_owned(),
        total_positive: summary.total_positive,
        total_negative: summary.total_negative,
        total_reviews: summary.total_reviews,
        positive_rate: compute_rate(summary.total_positive, summary.total_reviews),
        review_score_desc: desc.to_string(),
        review_score_desc_cn: localize_descriptor(desc).to_string(),
    }
}
