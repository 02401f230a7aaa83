//! Review-language filters understood by the storefront endpoint.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Query value the endpoint uses for the all-languages aggregate.
pub const ALL_LANGUAGES_CODE: &str = "all";

/// Opaque identifier for one storefront review language (e.g. "english").
///
/// Only built through [`ReviewFilter::parse`] and friends, so it never holds
/// the aggregate code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct LocaleCode(String);

impl LocaleCode {

    /// Get the raw code.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LocaleCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A review filter: either the all-languages aggregate or one language.
///
/// The aggregate shares the endpoint's `language` parameter with real
/// languages but plays a different role downstream: it is reported
/// separately and never ranked.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ReviewFilter {
    /// Reviews in every language combined.
    AllLanguages,
    /// Reviews written in a single language.
    Language(LocaleCode),
}

impl ReviewFilter {
    /// Filter for a language code; `"all"` still yields the aggregate.
    pub fn language(code: impl Into<String>) -> Self {
        Self::from(code.into())
    }

    /// Parse a query value; `"all"` selects the aggregate.
    pub fn parse(code: &str) -> Self {
        Self::from(code.to_string())
    }

    /// Value sent as the endpoint's `language` query parameter.
    pub fn query_value(&self) -> &str {
        match self {
            Self::AllLanguages => ALL_LANGUAGES_CODE,
            Self::Language(code) => code.as_str(),
        }
    }

    /// Whether this is the all-languages aggregate.
    pub fn is_all_languages(&self) -> bool {
        matches!(self, Self::AllLanguages)
    }

    /// Human-readable name, falling back to the raw code when unmapped.
    pub fn display_name(&self) -> Cow<'static, str> {
        let code = self.query_value();
        KNOWN_FILTERS
            .iter()
            .find(|(known, _)| *known == code)
            .map(|(_, name)| Cow::Borrowed(*name))
            .unwrap_or_else(|| Cow::Owned(code.to_string()))
    }
}

impl fmt::Display for ReviewFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.query_value())
    }
}

impl From<String> for ReviewFilter {
    fn from(code: String) -> Self {
        if code == ALL_LANGUAGES_CODE {
            Self::AllLanguages
        } else {
            Self::Language(LocaleCode(code))
        }
    }
}

impl From<ReviewFilter> for String {
    fn from(filter: ReviewFilter) -> Self {
        match filter {
            ReviewFilter::AllLanguages => ALL_LANGUAGES_CODE.to_string(),
            ReviewFilter::Language(code) => code.0,
        }
    }
}

/// Every filter queried per invocation, in fetch order, with display names.
pub const KNOWN_FILTERS: &[(&str, &str)] = &[
    (ALL_LANGUAGES_CODE, "所有语言"),
    ("schinese", "简体中文"),
    ("tchinese", "繁体中文"),
    ("english", "英语"),
    ("german", "德语"),
    ("french", "法语"),
    ("italian", "意大利语"),
    ("indonesian", "印度尼西亚语"),
    ("japanese", "日语"),
    ("koreana", "韩语"),
    ("thai", "泰语"),
    ("spanish", "西班牙语-西班牙"),
    ("latam", "西班牙语-拉丁美洲"),
    ("portuguese", "葡萄牙语"),
    ("brazilian", "葡萄牙语-巴西"),
];

/// The fixed filter set, in fetch order.
pub fn known_filters() -> Vec<ReviewFilter> {
    KNOWN_FILTERS
        .iter()
        .map(|(code, _)| ReviewFilter::parse(code))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_all_is_aggregate() {
        assert_eq!(ReviewFilter::parse("all"), ReviewFilter::AllLanguages);
        assert!(ReviewFilter::parse("all").is_all_languages());
        assert!(!ReviewFilter::parse("english").is_all_languages());
    }

    #[test]
    fn test_language_all_is_aggregate() {
        assert_eq!(ReviewFilter::language("all"), ReviewFilter::AllLanguages);
        assert_eq!(ReviewFilter::from("all".to_string()), ReviewFilter::AllLanguages);
    }

    #[test]
    fn test_query_value() {
        assert_eq!(ReviewFilter::AllLanguages.query_value(), "all");
        assert_eq!(ReviewFilter::language("koreana").query_value(), "koreana");
    }

    #[test]
    fn test_display_name_known() {
        assert_eq!(ReviewFilter::AllLanguages.display_name(), "所有语言");
        assert_eq!(ReviewFilter::language("english").display_name(), "英语");
        assert_eq!(ReviewFilter::language("latam").display_name(), "西班牙语-拉丁美洲");
    }

    #[test]
    fn test_display_name_falls_back_to_code() {
        assert_eq!(ReviewFilter::language("klingon").display_name(), "klingon");
    }

    #[test]
    fn test_known_filters_start_with_aggregate() {
        let filters = known_filters();
        assert_eq!(filters.len(), 15);
        assert_eq!(filters[0], ReviewFilter::AllLanguages);
        assert_eq!(
            filters.iter().filter(|f| f.is_all_languages()).count(),
            1
        );
    }

    #[test]
    fn test_serializes_as_query_value() {
        let json = serde_json::to_string(&ReviewFilter::language("german")).unwrap();
        assert_eq!(json, "\"german\"");

        let parsed: ReviewFilter = serde_json::from_str("\"all\"").unwrap();
        assert_eq!(parsed, ReviewFilter::AllLanguages);
    }
}
