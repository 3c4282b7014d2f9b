// Timing data types
// Samples, per-second statuses, and timeline segments

use serde::{Deserialize, Serialize};

/// Classification of a timing offset relative to the expected beat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimingStatus {
    /// Offset within the symmetric threshold band
    OnBeat,

    /// Early by more than the threshold (negative offset)
    Rushing,

    /// Late by more than the threshold (positive offset)
    Dragging,

    /// Offset could not be classified (non-numeric input)
    Unknown,
}

/// Latest sample time accepted, in seconds (24 hours)
pub const MAX_SAMPLE_TIME_SECS: f64 = 86_400.0;

/// One timing measurement, roughly one per second of audio
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeSample {
    /// Seconds from start of the performance
    pub time: f64,

    /// Deviation from the expected beat in milliseconds
    /// Negative = early (rushing), positive = late (dragging)
    pub offset_ms: f64,
}

impl TimeSample {
    pub fn new(time: f64, offset_ms: f64) -> Self {
        TimeSample { time, offset_ms }
    }

    /// Time in `[0, MAX_SAMPLE_TIME_SECS]` and a finite offset
    pub fn is_well_formed(&self) -> bool {
        (0.0..=MAX_SAMPLE_TIME_SECS).contains(&self.time) && self.offset_ms.is_finite()
    }
}

/// Copy the well-formed samples and sort them by time.
/// The sort is stable so samples sharing a timestamp keep their input order.
pub(crate) fn sorted_well_formed(samples: &[TimeSample]) -> Vec<TimeSample> {
    let mut pts: Vec<TimeSample> = samples
        .iter()
        .filter(|s| s.is_well_formed())
        .copied()
        .collect();
    pts.sort_by(|a, b| a.time.total_cmp(&b.time));
    pts
}

/// A contiguous run of seconds sharing one status
/// Covers `[start, end)` in whole seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub start: u64,
    pub end: u64,
    pub status: TimingStatus,
}

impl Segment {
    pub fn new(start: u64, end: u64, status: TimingStatus) -> Self {
        Segment { start, end, status }
    }

    /// Length in seconds
    pub fn len_secs(&self) -> u64 {
        self.end.saturating_sub(self.start)
    }
}
