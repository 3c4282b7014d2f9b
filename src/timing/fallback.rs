// Fallback timeline from coarse feedback items
// Low-fidelity approximation used only when no offset series is available.
// Status comes from keyword matching, not from offsets, and windows are a
// fixed width around each item's anchor second.

use super::clock::parse_clock_label;
use super::types::{Segment, TimingStatus};

/// Default half-width of a fallback window in seconds
pub const DEFAULT_FALLBACK_PADDING_SECS: u64 = 2;

/// Keyword table, checked in order against the lowercased description
const STATUS_KEYWORDS: &[(&str, TimingStatus)] = &[
    ("rush", TimingStatus::Rushing),
    ("drag", TimingStatus::Dragging),
];

/// Status used when no keyword matches
const DEFAULT_STATUS: TimingStatus = TimingStatus::OnBeat;

/// A coarse, text-described problem window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FallbackItem<'a> {
    /// `M:SS`, `M:SS-M:SS`, or bare seconds
    pub time_label: &'a str,
    pub description: &'a str,
}

impl<'a> FallbackItem<'a> {
    pub fn new(time_label: &'a str, description: &'a str) -> Self {
        FallbackItem {
            time_label,
            description,
        }
    }
}

/// Status for a free-text description (case-insensitive substring match)
pub fn status_from_description(description: &str) -> TimingStatus {
    let lowered = description.to_lowercase();
    STATUS_KEYWORDS
        .iter()
        .find(|(keyword, _)| lowered.contains(keyword))
        .map(|&(_, status)| status)
        .unwrap_or(DEFAULT_STATUS)
}

/// Approximate a timeline from feedback items
///
/// Each item becomes `[max(0, anchor - padding), anchor + padding)` where the
/// anchor is the leading clock token of its label. An unparsable label
/// anchors at 0 rather than dropping the item. A padding of 0 is treated as 1
/// so every window is non-empty; the window end saturates at `u64::MAX`.
/// Windows may overlap; output is sorted by start (stable).
pub fn map_fallback_segments(items: &[FallbackItem<'_>], padding_secs: u64) -> Vec<Segment> {
    let padding = padding_secs.max(1);

    let mut segments: Vec<Segment> = items
        .iter()
        .map(|item| {
            let anchor = parse_clock_label(item.time_label).unwrap_or_else(|| {
                log::debug!(
                    "Unparsable fallback time label {:?}, anchoring at 0",
                    item.time_label
                );
                0
            });
            Segment::new(
                anchor.saturating_sub(padding),
                anchor.saturating_add(padding),
                status_from_description(item.description),
            )
        })
        .collect();

    segments.sort_by_key(|s| s.start);
    segments
}
