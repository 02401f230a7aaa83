//! Score-descriptor localization.

/// Descriptor used when the endpoint omits `review_score_desc`.
pub const UNKNOWN_DESCRIPTOR: &str = "unknown";

/// Endpoint score descriptors and their localized labels.
pub const DESCRIPTOR_LABELS: &[(&str, &str)] = &[
    ("Overwhelmingly Positive", "好评如潮"),
    ("Very Positive", "特别好评"),
    ("Positive", "好评"),
    ("Mostly Positive", "多半好评"),
    ("Mixed", "褒贬不一"),
    ("Mostly Negative", "多半差评"),
    ("Negative", "差评"),
    ("Very Negative", "差评如潮"),
    ("Overwhelmingly Negative", "差评如潮"),
    (UNKNOWN_DESCRIPTOR, "未知"),
];

/// Localized label for a descriptor. Unmapped descriptors pass through.
pub fn localize_descriptor(desc: &str) -> &str {
    DESCRIPTOR_LABELS
        .iter()
        .find(|(known, _)| *known == desc)
        .map(|(_, label)| *label)
        .unwrap_or(desc)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_descriptors() {
        assert_eq!(localize_descriptor("Very Positive"), "特别好评");
        assert_eq!(localize_descriptor("Mixed"), "褒贬不一");
        assert_eq!(localize_descriptor("Overwhelmingly Negative"), "差评如潮");
        assert_eq!(localize_descriptor(UNKNOWN_DESCRIPTOR), "未知");
    }

    #[test]
    fn test_unknown_descriptor_passes_through() {
        assert_eq!(localize_descriptor("2 user reviews"), "2 user reviews");
        assert_eq!(localize_descriptor(""), "");
        // Matching is exact.
        assert_eq!(localize_descriptor("very positive"), "very positive");
    }
}
