// Crate-level error for the command-line host
use thiserror::Error;

use crate::config::ConfigError;
use crate::report::PayloadError;
use crate::state::DbError;

#[derive(Debug, Error)]
pub enum BeatBuddyError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Payload error: {0}")]
    Payload(#[from] PayloadError),

    #[error("Cache error: {0}")]
    Cache(#[from] DbError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("No cached analysis found under {0:?}")]
    NoCachedAnalysis(String),

    #[error("{0}")]
    Usage(String),
}

pub type BeatBuddyResult<T> = Result<T, BeatBuddyError>;
