// Either/or choice between service-supplied and locally derived feedback

use super::types::{FeedbackItem, FeedbackSource};

/// Prefer the external list when present and non-empty, else the derived one.
/// No merging or deduplication happens between the two.
pub fn select_feedback(
    external: Option<&[FeedbackItem]>,
    derived: Vec<FeedbackItem>,
) -> Vec<FeedbackItem> {
    select_feedback_with_source(external, derived).0
}

/// Same choice as [`select_feedback`], also reporting which side won
pub fn select_feedback_with_source(
    external: Option<&[FeedbackItem]>,
    derived: Vec<FeedbackItem>,
) -> (Vec<FeedbackItem>, FeedbackSource) {
    match external {
        Some(items) if !items.is_empty() => (items.to_vec(), FeedbackSource::External),
        _ => (derived, FeedbackSource::Derived),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feedback::types::Severity;

    fn item(label: &str, severity: Severity) -> FeedbackItem {
        FeedbackItem::new(label, "note", severity)
    }

    #[test]
    fn test_external_wins_when_non_empty() {
        let external = vec![item("0:15", Severity::High), item("0:45", Severity::Medium)];
        let derived = vec![item("0:00-0:02", Severity::Positive)];

        let (selected, source) = select_feedback_with_source(Some(&external), derived);

        assert_eq!(selected, external);
        assert_eq!(source, FeedbackSource::External);
    }

    #[test]
    fn test_empty_external_falls_back() {
        let derived = vec![item("0:00-0:02", Severity::Positive)];

        let selected = select_feedback(Some(&[]), derived.clone());
        assert_eq!(selected, derived);
    }

    #[test]
    fn test_missing_external_falls_back() {
        let derived = vec![item("0:03", Severity::Low)];

        let (selected, source) = select_feedback_with_source(None, derived.clone());
        assert_eq!(selected, derived);
        assert_eq!(source, FeedbackSource::Derived);
    }

    #[test]
    fn test_both_empty() {
        assert!(select_feedback(None, Vec::new()).is_empty());
    }
}
