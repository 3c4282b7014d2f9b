// Timing engine configuration
// Thresholds and limits, loadable from a JSON file with per-field defaults

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::feedback::SeverityBands;
use crate::timing::fallback::DEFAULT_FALLBACK_PADDING_SECS;
use crate::timing::{StrongMomentSettings, DEFAULT_ON_BEAT_THRESHOLD_MS};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config value: {0}")]
    InvalidValue(String),
}

/// Settings for building a timing report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Symmetric on-beat band for timeline classification (ms)
    pub on_beat_threshold_ms: f64,

    /// Strong moment band and minimum run length
    pub strong: StrongMomentSettings,

    /// Half-width of fallback windows (seconds); 0 is widened to 1 by the mapper
    pub fallback_padding_secs: u64,

    /// Cap on derived improvement items
    pub max_derived_improvements: usize,

    /// Severity bands for derived improvement items
    pub improvement_severity: SeverityBands,
}

impl Default for TimingConfig {
    fn default() -> Self {
        TimingConfig {
            on_beat_threshold_ms: DEFAULT_ON_BEAT_THRESHOLD_MS,
            strong: StrongMomentSettings::default(),
            fallback_padding_secs: DEFAULT_FALLBACK_PADDING_SECS,
            max_derived_improvements: 5,
            improvement_severity: SeverityBands::default(),
        }
    }
}

impl TimingConfig {
    /// Parse and validate a JSON config; missing fields keep their defaults
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: TimingConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&contents)?;
        log::info!("Loaded timing config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_non_negative("on_beat_threshold_ms", self.on_beat_threshold_ms)?;
        check_non_negative("strong.threshold_ms", self.strong.threshold_ms)?;
        check_non_negative("strong.min_run_secs", self.strong.min_run_secs)?;
        check_non_negative(
            "improvement_severity.high_above_ms",
            self.improvement_severity.high_above_ms,
        )?;
        check_non_negative(
            "improvement_severity.medium_above_ms",
            self.improvement_severity.medium_above_ms,
        )?;

        if self.improvement_severity.medium_above_ms > self.improvement_severity.high_above_ms {
            return Err(ConfigError::InvalidValue(
                "improvement_severity.medium_above_ms exceeds high_above_ms".to_string(),
            ));
        }

        Ok(())
    }
}

fn check_non_negative(name: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue(format!(
            "{} must be a finite, non-negative number (got {})",
            name, value
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = TimingConfig::default();
        assert_eq!(config.on_beat_threshold_ms, 70.0);
        assert_eq!(config.strong.threshold_ms, 30.0);
        assert_eq!(config.strong.min_run_secs, 1.0);
        assert_eq!(config.fallback_padding_secs, 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config =
            TimingConfig::from_json_str(r#"{"on_beat_threshold_ms": 50, "strong": {"threshold_ms": 20}}"#)
                .unwrap();

        assert_eq!(config.on_beat_threshold_ms, 50.0);
        assert_eq!(config.strong.threshold_ms, 20.0);
        assert_eq!(config.strong.min_run_secs, 1.0);
        assert_eq!(config.max_derived_improvements, 5);
    }

    #[test]
    fn test_rejects_negative_threshold() {
        let result = TimingConfig::from_json_str(r#"{"on_beat_threshold_ms": -1}"#);
        assert!(matches!(result, Err(ConfigError::InvalidValue(_))));
    }

    #[test]
    fn test_zero_padding_is_accepted() {
        let config = TimingConfig::from_json_str(r#"{"fallback_padding_secs": 0}"#).unwrap();
        assert_eq!(config.fallback_padding_secs, 0);
    }

    #[test]
    fn test_rejects_inverted_bands() {
        let result = TimingConfig::from_json_str(
            r#"{"improvement_severity": {"high_above_ms": 50, "medium_above_ms": 90}}"#,
        );
        assert!(matches!(result, Err(ConfigError::InvalidValue(_))));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"max_derived_improvements": 3}}"#).unwrap();

        let config = TimingConfig::load(file.path()).unwrap();
        assert_eq!(config.max_derived_improvements, 3);
    }

    #[test]
    fn test_malformed_json() {
        let result = TimingConfig::from_json_str("{not json");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }
}
