// Strong moment detection
// Finds sustained runs of samples inside a tight accuracy band

use serde::{Deserialize, Serialize};

use super::clock::format_clock_range;
use super::types::{sorted_well_formed, TimeSample};

/// Settings for strong moment detection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrongMomentSettings {
    /// Accuracy band in milliseconds
    /// Tighter than the on-beat band: a strong run is materially more accurate
    pub threshold_ms: f64,

    /// Runs spanning less than this, first to last sample, are discarded
    pub min_run_secs: f64,
}

impl Default for StrongMomentSettings {
    fn default() -> Self {
        StrongMomentSettings {
            threshold_ms: 30.0,
            min_run_secs: 1.0,
        }
    }
}

/// A sustained accurate stretch of the performance
/// Its severity is always positive and is attached when it becomes a
/// `FeedbackItem` (see `From<StrongMoment> for FeedbackItem`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrongMoment {
    /// `M:SS-M:SS`, first to last sample second (inclusive)
    pub time_range_label: String,

    /// e.g. "Consistently on-beat (avg 15ms)"
    pub description: String,

    /// Extent start in seconds (first sample time)
    pub start_secs: f64,

    /// Extent end in seconds (last sample time + 1, exclusive)
    pub end_secs: f64,

    /// Mean offset rounded half away from zero
    pub mean_offset_ms: i64,
}

/// Accumulator for a run of accurate samples
struct Run {
    first: f64,
    last: f64,
    sum: f64,
    count: usize,
}

impl Run {
    fn open(sample: &TimeSample) -> Self {
        Run {
            first: sample.time,
            last: sample.time,
            sum: sample.offset_ms,
            count: 1,
        }
    }

    fn extend(&mut self, sample: &TimeSample) {
        self.last = sample.time;
        self.sum += sample.offset_ms;
        self.count += 1;
    }

    /// Time from the first to the last sample of the run.
    /// A lone sample spans zero seconds.
    fn span(&self) -> f64 {
        self.last - self.first
    }
}

/// Detect strong moments in a sample series
///
/// Runs are consecutive in time order, not in whole seconds: a gap between
/// two accurate samples does not split a run, only an inaccurate sample does.
/// A run covers `[first, last + 1)` but must span at least `min_run_secs`
/// from its first to its last sample to be reported.
/// Output is ordered by start time.
pub fn detect_strong_moments(
    samples: &[TimeSample],
    settings: &StrongMomentSettings,
) -> Vec<StrongMoment> {
    let pts = sorted_well_formed(samples);

    let mut runs: Vec<Run> = Vec::new();
    let mut current: Option<Run> = None;

    for p in &pts {
        if p.offset_ms.abs() <= settings.threshold_ms {
            match current.as_mut() {
                Some(run) => run.extend(p),
                None => current = Some(Run::open(p)),
            }
        } else if let Some(run) = current.take() {
            runs.push(run);
        }
    }
    if let Some(run) = current {
        runs.push(run);
    }

    let moments: Vec<StrongMoment> = runs
        .into_iter()
        .filter(|run| run.span() >= settings.min_run_secs)
        .map(to_moment)
        .collect();

    log::debug!(
        "Detected {} strong moments (threshold {}ms)",
        moments.len(),
        settings.threshold_ms
    );

    moments
}

fn to_moment(run: Run) -> StrongMoment {
    let mean = (run.sum / run.count as f64).round() as i64;
    let label = format_clock_range(run.first.floor() as u64, run.last.floor() as u64);

    StrongMoment {
        time_range_label: label,
        description: format!("Consistently on-beat (avg {}ms)", mean),
        start_secs: run.first,
        end_secs: run.last + 1.0,
        mean_offset_ms: mean,
    }
}
