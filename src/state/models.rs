// Data models for the analysis cache
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Well-known key the upload step stores its latest analysis under
pub const ANALYSIS_CACHE_KEY: &str = "beatBuddyAnalysis";

/// A raw analysis payload as received from the service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedAnalysis {
    pub id: Uuid,
    pub cache_key: String,
    pub created_at: DateTime<Utc>,
    pub payload_sha256: String,
    pub payload_json: String,
}
