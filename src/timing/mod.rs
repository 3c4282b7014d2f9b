// Timing engine
// Offset classification, timeline compression, strong moments, and fallback mapping

pub mod classify;
pub mod clock;
pub mod fallback;
pub mod strong;
pub mod timeline;
pub mod types;

pub use classify::{classify_offset, DEFAULT_ON_BEAT_THRESHOLD_MS};
pub use clock::{format_clock, format_clock_range, parse_clock, parse_clock_label};
pub use fallback::{map_fallback_segments, status_from_description, FallbackItem};
pub use strong::{detect_strong_moments, StrongMoment, StrongMomentSettings};
pub use timeline::compress_timeline;
pub use types::{Segment, TimeSample, TimingStatus, MAX_SAMPLE_TIME_SECS};
