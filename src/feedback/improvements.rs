// Areas for improvement derived from the offset series
// Used when the analysis service sends no improvement list of its own

use serde::{Deserialize, Serialize};

use super::types::{FeedbackItem, Severity};
use crate::timing::{classify_offset, format_clock, TimeSample, TimingStatus};

/// Offset magnitudes separating high / medium / low severity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeverityBands {
    /// Above this magnitude an item is `high`
    pub high_above_ms: f64,

    /// Above this magnitude (and not high) an item is `medium`
    pub medium_above_ms: f64,
}

impl Default for SeverityBands {
    fn default() -> Self {
        SeverityBands {
            high_above_ms: 150.0,
            medium_above_ms: 80.0,
        }
    }
}

impl SeverityBands {
    pub fn severity_for(&self, offset_ms: f64) -> Severity {
        let magnitude = offset_ms.abs();
        if magnitude > self.high_above_ms {
            Severity::High
        } else if magnitude > self.medium_above_ms {
            Severity::Medium
        } else {
            Severity::Low
        }
    }
}

/// Pick the worst off-beat samples, largest magnitude first
///
/// Only samples outside the on-beat band qualify, so a clean performance
/// yields no items. Ties keep time order.
pub fn derive_improvements(
    samples: &[TimeSample],
    on_beat_threshold_ms: f64,
    max_items: usize,
    bands: &SeverityBands,
) -> Vec<FeedbackItem> {
    let mut worst: Vec<TimeSample> = samples
        .iter()
        .filter(|s| s.is_well_formed())
        .filter(|s| classify_offset(s.offset_ms, on_beat_threshold_ms) != TimingStatus::OnBeat)
        .copied()
        .collect();

    worst.sort_by(|a, b| a.time.total_cmp(&b.time));
    worst.sort_by(|a, b| b.offset_ms.abs().total_cmp(&a.offset_ms.abs()));
    worst.truncate(max_items);

    worst.iter().map(|s| describe(s, bands)).collect()
}

fn describe(sample: &TimeSample, bands: &SeverityBands) -> FeedbackItem {
    let direction = if sample.offset_ms < 0.0 {
        "Rushing"
    } else {
        "Dragging"
    };

    FeedbackItem::new(
        format_clock(sample.time.floor() as u64),
        format!("{} by {}ms", direction, sample.offset_ms.abs().trunc() as u64),
        bands.severity_for(sample.offset_ms),
    )
}
