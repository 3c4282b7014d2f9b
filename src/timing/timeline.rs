// Timeline compression
// Classifies every second of a performance and collapses equal neighbours into segments

use super::classify::classify_offset;
use super::types::{sorted_well_formed, Segment, TimeSample, TimingStatus};

/// Status assigned to seconds with no sample
pub const IMPUTED_STATUS: TimingStatus = TimingStatus::OnBeat;

/// Build a contiguous timeline from a per-second offset series
///
/// Algorithm:
/// 1. Drop malformed samples, sort a copy by time (stable)
/// 2. Duration = floor(last time) + 1 seconds
/// 3. For each second take the first sample whose rounded time matches,
///    imputing on-beat when none does
/// 4. Collapse runs of equal status into `[start, end)` segments
///
/// The segments partition `[0, duration)` with no gaps or overlaps.
pub fn compress_timeline(samples: &[TimeSample], threshold_ms: f64) -> Vec<Segment> {
    let per_second = classify_seconds(samples, threshold_ms);
    let segments = collapse_runs(&per_second);

    log::debug!(
        "Compressed {} samples into {} segments over {}s",
        samples.len(),
        segments.len(),
        per_second.len()
    );

    segments
}

/// Per-second statuses for `[0, duration)`
fn classify_seconds(samples: &[TimeSample], threshold_ms: f64) -> Vec<TimingStatus> {
    let pts = sorted_well_formed(samples);
    let last = match pts.last() {
        Some(last) => last,
        None => return Vec::new(),
    };

    // Well-formed times are bounded by MAX_SAMPLE_TIME_SECS
    let duration = (last.time.floor() as usize).saturating_add(1);
    let mut slots: Vec<Option<TimingStatus>> = vec![None; duration];

    for p in &pts {
        // Non-negative times round half-up here, matching nearest-second lookup
        let second = p.time.round() as usize;
        if let Some(slot) = slots.get_mut(second) {
            if slot.is_none() {
                *slot = Some(classify_offset(p.offset_ms, threshold_ms));
            }
        }
    }

    slots
        .into_iter()
        .map(|slot| slot.unwrap_or(IMPUTED_STATUS))
        .collect()
}

/// Collapse consecutive equal statuses into segments
fn collapse_runs(per_second: &[TimingStatus]) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut iter = per_second.iter().enumerate();

    let (mut run_start, mut run_status) = match iter.next() {
        Some((_, &status)) => (0usize, status),
        None => return segments,
    };

    for (i, &status) in iter {
        if status != run_status {
            segments.push(Segment::new(run_start as u64, i as u64, run_status));
            run_start = i;
            run_status = status;
        }
    }

    segments.push(Segment::new(
        run_start as u64,
        per_second.len() as u64,
        run_status,
    ));

    segments
}
