// Analysis payload boundary
// Validates the loosely-shaped service response once, so the timing engine
// only ever sees well-formed samples and items.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::feedback::{FeedbackItem, Severity};
use crate::timing::TimeSample;

#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Analysis payload must be a JSON object, got {0}")]
    NotAnObject(&'static str),
}

/// Scores computed by the analysis service, passed through untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreSummary {
    pub overall_score: Option<f64>,
    pub on_beat_percentage: Option<f64>,
    pub rushing_percentage: Option<f64>,
    pub dragging_percentage: Option<f64>,
}

/// A validated analysis payload
/// `None` means the field was absent (or not a list); `Some(vec![])` means it was empty
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalysisPayload {
    pub summary: ScoreSummary,

    /// Well-formed samples only
    pub timeseries: Option<Vec<TimeSample>>,

    /// Service-supplied areas for improvement (`segments` on the wire)
    pub segments: Option<Vec<FeedbackItem>>,

    /// Service-supplied strong moments (`strong_moments` on the wire)
    pub strong_moments: Option<Vec<FeedbackItem>>,

    /// Timeseries entries rejected as malformed
    pub dropped_samples: usize,
}

/// Parse and validate a JSON analysis payload
pub fn parse_payload(json: &str) -> Result<AnalysisPayload, PayloadError> {
    let value: Value = serde_json::from_str(json)?;
    AnalysisPayload::from_value(&value)
}

impl AnalysisPayload {
    /// Validate an already-parsed JSON value
    /// Only a non-object top level is an error; bad entries are dropped
    pub fn from_value(value: &Value) -> Result<Self, PayloadError> {
        let obj = value
            .as_object()
            .ok_or_else(|| PayloadError::NotAnObject(json_kind(value)))?;

        let summary = ScoreSummary {
            overall_score: number_field(obj, "overallScore"),
            on_beat_percentage: number_field(obj, "onBeatPercentage"),
            rushing_percentage: number_field(obj, "rushingPercentage"),
            dragging_percentage: number_field(obj, "draggingPercentage"),
        };

        let mut dropped_samples = 0;
        let timeseries = list_field(obj, "timeseries").map(|entries| {
            let mut samples = Vec::with_capacity(entries.len());
            for entry in entries {
                match parse_sample(entry) {
                    Some(sample) => samples.push(sample),
                    None => dropped_samples += 1,
                }
            }
            samples
        });

        if dropped_samples > 0 {
            log::warn!("Dropped {} malformed timeseries samples", dropped_samples);
        }

        let segments = list_field(obj, "segments")
            .map(|entries| parse_items(entries, "segments", Severity::Low));
        let strong_moments = list_field(obj, "strong_moments")
            .map(|entries| parse_items(entries, "strong_moments", Severity::Positive));

        Ok(AnalysisPayload {
            summary,
            timeseries,
            segments,
            strong_moments,
            dropped_samples,
        })
    }

    /// True when there are samples to run the precise path on
    pub fn has_timeseries(&self) -> bool {
        self.timeseries.as_ref().is_some_and(|ts| !ts.is_empty())
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn number_field(obj: &Map<String, Value>, key: &str) -> Option<f64> {
    obj.get(key).and_then(Value::as_f64)
}

/// A list field; null or absent is `None`, any other non-list is ignored with a warning
fn list_field<'a>(obj: &'a Map<String, Value>, key: &str) -> Option<&'a Vec<Value>> {
    match obj.get(key) {
        None | Some(Value::Null) => None,
        Some(Value::Array(entries)) => Some(entries),
        Some(other) => {
            log::warn!("Ignoring `{}`: expected a list, got {}", key, json_kind(other));
            None
        }
    }
}

fn parse_sample(entry: &Value) -> Option<TimeSample> {
    let time = entry.get("time")?.as_f64()?;
    let offset_ms = entry.get("offset_ms")?.as_f64()?;
    let sample = TimeSample::new(time, offset_ms);
    sample.is_well_formed().then_some(sample)
}

fn parse_items(entries: &[Value], field: &str, default_severity: Severity) -> Vec<FeedbackItem> {
    let items: Vec<FeedbackItem> = entries
        .iter()
        .filter_map(|entry| parse_item(entry, default_severity))
        .collect();

    if items.len() < entries.len() {
        log::warn!(
            "Dropped {} malformed `{}` entries",
            entries.len() - items.len(),
            field
        );
    }

    items
}

/// Accepts either `time`/`issue` or `timeRangeLabel`/`description`
fn parse_item(entry: &Value, default_severity: Severity) -> Option<FeedbackItem> {
    let obj = entry.as_object()?;
    let text = |keys: [&str; 2]| {
        keys.iter()
            .find_map(|k| obj.get(*k).and_then(Value::as_str))
            .map(str::to_string)
    };

    let label = text(["time", "timeRangeLabel"]);
    let description = text(["issue", "description"]);
    if label.is_none() && description.is_none() {
        return None;
    }

    let severity = obj
        .get("severity")
        .and_then(Value::as_str)
        .map(Severity::from_string)
        .unwrap_or(default_severity);

    Some(FeedbackItem {
        time_range_label: label.unwrap_or_default(),
        description: description.unwrap_or_default(),
        severity,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_full_payload() {
        let payload = AnalysisPayload::from_value(&json!({
            "job_id": "abc",
            "overallScore": 81.5,
            "onBeatPercentage": 70.0,
            "rushingPercentage": 20.0,
            "draggingPercentage": 10.0,
            "segments": [{"time": "0:15", "issue": "Rushing by 120ms", "severity": "medium"}],
            "timeseries": [{"time": 0.0, "offset_ms": 12.5}, {"time": 1.0, "offset_ms": -3.0}],
            "strong_moments": [{"time": "0:00-0:01", "issue": "Consistently on-beat (avg 5.0ms)", "severity": "positive"}],
        }))
        .unwrap();

        assert_eq!(payload.summary.overall_score, Some(81.5));
        assert_eq!(payload.summary.dragging_percentage, Some(10.0));
        assert_eq!(payload.timeseries.as_ref().unwrap().len(), 2);
        assert_eq!(payload.segments.as_ref().unwrap()[0].severity, Severity::Medium);
        assert_eq!(payload.strong_moments.as_ref().unwrap().len(), 1);
        assert_eq!(payload.dropped_samples, 0);
        assert!(payload.has_timeseries());
    }

    #[test]
    fn test_empty_object() {
        let payload = AnalysisPayload::from_value(&json!({})).unwrap();

        assert_eq!(payload, AnalysisPayload::default());
        assert!(!payload.has_timeseries());
    }

    #[test]
    fn test_non_object_fails_fast() {
        for value in [json!([1, 2]), json!(null), json!("text"), json!(3)] {
            assert!(matches!(
                AnalysisPayload::from_value(&value),
                Err(PayloadError::NotAnObject(_))
            ));
        }
    }

    #[test]
    fn test_malformed_samples_are_dropped() {
        let payload = AnalysisPayload::from_value(&json!({
            "timeseries": [
                {"time": 0, "offset_ms": 10},
                {"time": "one", "offset_ms": 10},
                {"time": 2},
                {"time": -1, "offset_ms": 0},
                "garbage",
                {"time": 3, "offset_ms": 400}
            ]
        }))
        .unwrap();

        let samples = payload.timeseries.unwrap();
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[1], TimeSample::new(3.0, 400.0));
        assert_eq!(payload.dropped_samples, 4);
    }

    #[test]
    fn test_implausible_time_is_dropped_and_report_builds() {
        let payload = parse_payload(
            r#"{"timeseries": [{"time": 0, "offset_ms": 5}, {"time": 1e20, "offset_ms": 1}]}"#,
        )
        .unwrap();

        assert_eq!(payload.timeseries.as_ref().unwrap().len(), 1);
        assert_eq!(payload.dropped_samples, 1);

        let report = crate::report::build_report(&payload, &crate::config::TimingConfig::default());
        assert_eq!(report.duration_secs, 1);
    }

    #[test]
    fn test_wrong_list_type_is_ignored() {
        let payload = AnalysisPayload::from_value(&json!({
            "timeseries": {"time": 0},
            "segments": "none"
        }))
        .unwrap();

        assert!(payload.timeseries.is_none());
        assert!(payload.segments.is_none());
    }

    #[test]
    fn test_item_field_aliases_and_defaults() {
        let payload = AnalysisPayload::from_value(&json!({
            "segments": [
                {"timeRangeLabel": "0:45", "description": "Dragging"},
                {"time": "1:00"},
                {"severity": "high"},
                42
            ],
            "strong_moments": [{"time": "0:10-0:12", "issue": "Locked in"}]
        }))
        .unwrap();

        let segments = payload.segments.unwrap();
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].time_range_label, "0:45");
        assert_eq!(segments[0].severity, Severity::Low);
        assert_eq!(segments[1].description, "");

        let strong = payload.strong_moments.unwrap();
        assert_eq!(strong[0].severity, Severity::Positive);
    }

    #[test]
    fn test_parse_payload_text() {
        assert!(matches!(parse_payload("[]"), Err(PayloadError::NotAnObject("an array"))));
        assert!(matches!(parse_payload("{oops"), Err(PayloadError::Parse(_))));
        assert!(parse_payload(r#"{"timeseries": []}"#).unwrap().timeseries.unwrap().is_empty());
    }
}
