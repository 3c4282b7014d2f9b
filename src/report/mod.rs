// Timing report
// Payload validation at the service boundary and report assembly

pub mod builder;
pub mod payload;

pub use builder::{build_report, TimelineSource, TimingReport};
pub use payload::{parse_payload, AnalysisPayload, PayloadError, ScoreSummary};
