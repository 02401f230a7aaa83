//! Report assembly and ranking.

use review_core::ReviewFilter;
use review_data::FetchedReviews;
use serde::Serialize;

use crate::{normalize, LocaleReviewRecord};

/// The all-languages summary plus the per-language ranking of one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewReport {
    /// Aggregate record; default-filled when the aggregate fetch failed.
    pub all: LocaleReviewRecord,
    /// Languages by `total_reviews`, highest first.
    pub ranked: Vec<(ReviewFilter, LocaleReviewRecord)>,
}

impl ReviewReport {
    /// Record for a language, if it was ranked.
    pub fn language(&self, filter: &ReviewFilter) -> Option<&LocaleReviewRecord> {
        self.ranked
            .iter()
            .find(|(f, _)| f == filter)
            .map(|(_, record)| record)
    }
}

/// Normalize every fetched entry and rank the languages.
///
/// The aggregate is pulled out rather than ranked. Equal totals keep their
/// fetch order.
pub fn build_report(fetched: &FetchedReviews) -> ReviewReport {
    let mut all = None;
    let mut ranked = Vec::with_capacity(fetched.len());

    for (filter, raw) in fetched.iter() {
        let record = normalize(filter, raw);
        match filter {
            ReviewFilter::AllLanguages => all = Some(record),
            ReviewFilter::Language(_) => ranked.push((filter.clone(), record)),
        }
    }

    // `sort_by` is stable.
    ranked.sort_by(|(_, a), (_, b)| b.total_reviews.cmp(&a.total_reviews));

    ReviewReport {
        all: all.unwrap_or_else(|| LocaleReviewRecord::empty(&ReviewFilter::AllLanguages)),
        ranked,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use review_data::{QuerySummary, RawReviewResponse};

    fn raw(positive: u64, negative: u64, desc: &str) -> RawReviewResponse {
        RawReviewResponse::with_summary(QuerySummary::new(
            positive,
            negative,
            positive + negative,
            desc,
        ))
    }

    #[test]
    fn test_scenario_all_and_english() {
        let fetched = FetchedReviews::new()
            .with(ReviewFilter::AllLanguages, raw(80, 20, "Positive"))
            .with(ReviewFilter::language("english"), raw(40, 10, "Very Positive"));

        let report = build_report(&fetched);
        assert_eq!(report.all.positive_rate, "80.00%");
        assert_eq!(report.all.review_score_desc_cn, "好评");
        assert_eq!(report.ranked.len(), 1);

        let (filter, record) = &report.ranked[0];
        assert_eq!(filter, &ReviewFilter::language("english"));
        assert_eq!(record.positive_rate, "80.00%");
        assert_eq!(record.total_reviews, 50);
    }

    #[test]
    fn test_empty_input() {
        let report = build_report(&FetchedReviews::new());
        assert!(report.ranked.is_empty());
        assert_eq!(report.all.total_reviews, 0);
        assert_eq!(report.all.positive_rate, "0.00%");
        assert_eq!(report.all.language_name, "所有语言");
        assert_eq!(report.all.review_score_desc_cn, "未知");
    }

    #[test]
    fn test_aggregate_never_ranked() {
        let fetched = FetchedReviews::new()
            .with(ReviewFilter::language("german"), raw(5, 5, "Mixed"))
            .with(ReviewFilter::AllLanguages, raw(900, 100, "Very Positive"));

        let report = build_report(&fetched);
        assert!(report
            .ranked
            .iter()
            .all(|(filter, _)| !filter.is_all_languages()));
        assert_eq!(report.all.total_reviews, 1000);
    }

    #[test]
    fn test_language_all_code_becomes_aggregate() {
        let fetched =
            FetchedReviews::new().with(ReviewFilter::language("all"), raw(9, 1, "Positive"));

        let report = build_report(&fetched);
        assert!(report.ranked.is_empty());
        assert_eq!(report.all.total_reviews, 10);
        assert_eq!(report.all.positive_rate, "90.00%");
    }

    #[test]
    fn test_ranked_descending_and_stable() {
        let fetched = FetchedReviews::new()
            .with(ReviewFilter::language("thai"), raw(3, 2, "Mixed"))
            .with(ReviewFilter::language("schinese"), raw(70, 30, "Mostly Positive"))
            .with(ReviewFilter::language("german"), raw(4, 1, "Positive"))
            .with(ReviewFilter::language("english"), raw(150, 50, "Very Positive"))
            .with(ReviewFilter::language("french"), raw(1, 4, "Negative"));

        let report = build_report(&fetched);
        let order: Vec<&str> = report.ranked.iter().map(|(f, _)| f.query_value()).collect();
        assert_eq!(order, vec!["english", "schinese", "thai", "german", "french"]);
    }

    #[test]
    fn test_unknown_locale_kept_with_raw_name() {
        let fetched =
            FetchedReviews::new().with(ReviewFilter::language("vietnamese"), raw(1, 0, "Positive"));
        let report = build_report(&fetched);
        let record = report.language(&ReviewFilter::language("vietnamese")).unwrap();
        assert_eq!(record.language_name, "vietnamese");
    }
}
