// State management module
// Host-side cache of the last received analysis payload

pub mod db;
pub mod models;
pub mod queries;
pub mod storage;

pub use db::{init_db, open_db, DbConnection, DbError};
pub use models::{CachedAnalysis, ANALYSIS_CACHE_KEY};
pub use queries::{count_analyses, load_latest_analysis, save_analysis};
pub use storage::StorageError;
