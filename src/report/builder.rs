// Timing report assembly
// Chooses the precise or fallback timeline and merges feedback lists

use serde::{Deserialize, Serialize};

use super::payload::{AnalysisPayload, ScoreSummary};
use crate::config::TimingConfig;
use crate::feedback::{
    derive_improvements, select_feedback_with_source, FeedbackItem, FeedbackSource,
};
use crate::timing::{
    compress_timeline, detect_strong_moments, map_fallback_segments, FallbackItem, Segment,
};

/// How the timeline segments were derived
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimelineSource {
    /// Per-second classification of the offset series
    Measured,

    /// Keyword windows around service feedback items (low confidence)
    Approximate,

    /// Neither samples nor feedback items were available
    Empty,
}

/// Everything the presentation layer needs to draw a timing report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimingReport {
    pub summary: ScoreSummary,

    pub segments: Vec<Segment>,
    pub timeline_source: TimelineSource,

    /// End of the last segment, 0 when there are none
    pub duration_secs: u64,

    pub strong_moments: Vec<FeedbackItem>,
    pub strong_moments_source: FeedbackSource,

    pub improvements: Vec<FeedbackItem>,
    pub improvements_source: FeedbackSource,

    pub dropped_samples: usize,
}

/// Build a report from a validated payload
pub fn build_report(payload: &AnalysisPayload, config: &TimingConfig) -> TimingReport {
    let samples = payload.timeseries.as_deref().unwrap_or(&[]);
    let (segments, timeline_source) = build_timeline(payload, config);

    let derived_strong: Vec<FeedbackItem> = detect_strong_moments(samples, &config.strong)
        .into_iter()
        .map(FeedbackItem::from)
        .collect();
    let (strong_moments, strong_moments_source) =
        select_feedback_with_source(payload.strong_moments.as_deref(), derived_strong);

    let derived_improvements = derive_improvements(
        samples,
        config.on_beat_threshold_ms,
        config.max_derived_improvements,
        &config.improvement_severity,
    );
    let (improvements, improvements_source) =
        select_feedback_with_source(payload.segments.as_deref(), derived_improvements);

    let duration_secs = segments.iter().map(|s| s.end).max().unwrap_or(0);

    log::info!(
        "Built timing report: {} segments ({:?}), {} strong moments ({:?}), {} improvements ({:?})",
        segments.len(),
        timeline_source,
        strong_moments.len(),
        strong_moments_source,
        improvements.len(),
        improvements_source
    );

    TimingReport {
        summary: payload.summary.clone(),
        segments,
        timeline_source,
        duration_secs,
        strong_moments,
        strong_moments_source,
        improvements,
        improvements_source,
        dropped_samples: payload.dropped_samples,
    }
}

fn build_timeline(payload: &AnalysisPayload, config: &TimingConfig) -> (Vec<Segment>, TimelineSource) {
    if payload.has_timeseries() {
        let samples = payload.timeseries.as_deref().unwrap_or(&[]);
        let segments = compress_timeline(samples, config.on_beat_threshold_ms);
        if !segments.is_empty() {
            return (segments, TimelineSource::Measured);
        }
    }

    if let Some(items) = payload.segments.as_deref().filter(|items| !items.is_empty()) {
        let fallback: Vec<FallbackItem<'_>> = items
            .iter()
            .map(|item| FallbackItem::new(&item.time_range_label, &item.description))
            .collect();
        log::info!(
            "No offset series, approximating timeline from {} feedback items",
            fallback.len()
        );
        return (
            map_fallback_segments(&fallback, config.fallback_padding_secs),
            TimelineSource::Approximate,
        );
    }

    (Vec::new(), TimelineSource::Empty)
}
