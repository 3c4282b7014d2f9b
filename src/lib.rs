// BeatBuddy - Timing timeline and feedback engine
// Module declarations

pub mod cli;
pub mod config;
pub mod error;
pub mod feedback;
pub mod report;
pub mod state;
pub mod timing;

pub use cli::run;
pub use config::{ConfigError, TimingConfig};
pub use error::{BeatBuddyError, BeatBuddyResult};
pub use feedback::{select_feedback, FeedbackItem, FeedbackSource, Severity};
pub use report::{build_report, parse_payload, AnalysisPayload, TimelineSource, TimingReport};
pub use timing::{
    classify_offset, compress_timeline, detect_strong_moments, format_clock,
    map_fallback_segments, FallbackItem, Segment, StrongMoment, StrongMomentSettings,
    TimeSample, TimingStatus,
};
