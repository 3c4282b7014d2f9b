// Offset classification
// Maps a signed millisecond offset onto on-beat / rushing / dragging

use super::types::TimingStatus;

/// Default symmetric on-beat band in milliseconds
pub const DEFAULT_ON_BEAT_THRESHOLD_MS: f64 = 70.0;

/// Classify an offset against a symmetric threshold band.
/// The band is inclusive: `|offset| == threshold` is on-beat.
/// NaN falls through every comparison and yields `Unknown`.
pub fn classify_offset(offset_ms: f64, threshold_ms: f64) -> TimingStatus {
    if offset_ms.abs() <= threshold_ms {
        TimingStatus::OnBeat
    } else if offset_ms < -threshold_ms {
        TimingStatus::Rushing
    } else if offset_ms > threshold_ms {
        TimingStatus::Dragging
    } else {
        TimingStatus::Unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_boundary_is_on_beat() {
        assert_eq!(classify_offset(70.0, 70.0), TimingStatus::OnBeat);
        assert_eq!(classify_offset(-70.0, 70.0), TimingStatus::OnBeat);
        assert_eq!(classify_offset(0.0, 70.0), TimingStatus::OnBeat);
    }

    #[test]
    fn test_just_outside_threshold() {
        assert_eq!(classify_offset(70.0001, 70.0), TimingStatus::Dragging);
        assert_eq!(classify_offset(-70.0001, 70.0), TimingStatus::Rushing);
    }

    #[test]
    fn test_custom_threshold() {
        assert_eq!(classify_offset(40.0, 30.0), TimingStatus::Dragging);
        assert_eq!(classify_offset(-25.0, 30.0), TimingStatus::OnBeat);
    }

    #[test]
    fn test_nan_is_unknown() {
        assert_eq!(classify_offset(f64::NAN, 70.0), TimingStatus::Unknown);
    }
}
