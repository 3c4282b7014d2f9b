// Feedback list items shared by "areas for improvement" and "strong moments"

use serde::{Deserialize, Serialize};

use crate::timing::StrongMoment;

/// How prominently a feedback item should be shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
    Medium,
    Low,
    Positive,
}

impl Severity {
    /// Convert from string representation
    /// Unrecognised values fall back to `Low`
    pub fn from_string(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" => Severity::High,
            "medium" => Severity::Medium,
            "positive" => Severity::Positive,
            _ => Severity::Low,
        }
    }
}

/// A single line in a feedback list
/// Accepts the analysis service's `time`/`issue` field names on input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackItem {
    /// `M:SS` or `M:SS-M:SS`
    #[serde(alias = "time")]
    pub time_range_label: String,

    #[serde(alias = "issue")]
    pub description: String,

    pub severity: Severity,
}

impl FeedbackItem {
    pub fn new(
        time_range_label: impl Into<String>,
        description: impl Into<String>,
        severity: Severity,
    ) -> Self {
        FeedbackItem {
            time_range_label: time_range_label.into(),
            description: description.into(),
            severity,
        }
    }
}

/// Strong moments always carry `Severity::Positive`
impl From<StrongMoment> for FeedbackItem {
    fn from(moment: StrongMoment) -> Self {
        FeedbackItem {
            time_range_label: moment.time_range_label,
            description: moment.description,
            severity: Severity::Positive,
        }
    }
}

/// Where a feedback list came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackSource {
    /// Supplied by the analysis service
    External,

    /// Derived locally from the offset series
    Derived,
}
