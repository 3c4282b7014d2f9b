// Feedback lists
// Improvement items and strong moments, with external-vs-derived selection

pub mod improvements;
pub mod select;
pub mod types;

pub use improvements::{derive_improvements, SeverityBands};
pub use select::{select_feedback, select_feedback_with_source};
pub use types::{FeedbackItem, FeedbackSource, Severity};
