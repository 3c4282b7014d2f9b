// Analysis cache queries
use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Row};
use uuid::Uuid;

use super::db::{DbConnection, DbResult};
use super::models::CachedAnalysis;
use super::storage::calculate_sha256;

/// Store a raw payload under a cache key
pub fn save_analysis(
    db: &DbConnection,
    cache_key: &str,
    payload_json: &str,
) -> DbResult<CachedAnalysis> {
    let analysis = CachedAnalysis {
        id: Uuid::new_v4(),
        cache_key: cache_key.to_string(),
        created_at: Utc::now(),
        payload_sha256: calculate_sha256(payload_json.as_bytes()),
        payload_json: payload_json.to_string(),
    };

    let conn = db.lock();
    conn.execute(
        "INSERT INTO analyses (id, cache_key, created_at, payload_sha256, payload_json)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            analysis.id.to_string(),
            analysis.cache_key,
            analysis.created_at.to_rfc3339(),
            analysis.payload_sha256,
            analysis.payload_json,
        ],
    )?;

    log::info!(
        "Cached analysis {} under {:?} ({} bytes)",
        analysis.id,
        analysis.cache_key,
        analysis.payload_json.len()
    );

    Ok(analysis)
}

/// Get the most recently stored payload for a cache key
pub fn load_latest_analysis(db: &DbConnection, cache_key: &str) -> DbResult<Option<CachedAnalysis>> {
    let conn = db.lock();
    let mut stmt = conn.prepare(
        "SELECT id, cache_key, created_at, payload_sha256, payload_json
         FROM analyses WHERE cache_key = ?1
         ORDER BY created_at DESC, rowid DESC
         LIMIT 1",
    )?;

    let result = stmt.query_row([cache_key], row_to_analysis);

    match result {
        Ok(analysis) => Ok(Some(analysis)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Count stored payloads for a cache key
pub fn count_analyses(db: &DbConnection, cache_key: &str) -> DbResult<i64> {
    let conn = db.lock();
    let count = conn.query_row(
        "SELECT COUNT(*) FROM analyses WHERE cache_key = ?1",
        [cache_key],
        |row| row.get(0),
    )?;
    Ok(count)
}

fn row_to_analysis(row: &Row<'_>) -> rusqlite::Result<CachedAnalysis> {
    let id: String = row.get(0)?;
    let created_at: String = row.get(2)?;

    Ok(CachedAnalysis {
        id: Uuid::parse_str(&id)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(0, Type::Text, Box::new(e)))?,
        cache_key: row.get(1)?,
        created_at: created_at
            .parse::<DateTime<Utc>>()
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(2, Type::Text, Box::new(e)))?,
        payload_sha256: row.get(3)?,
        payload_json: row.get(4)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::db::open_db;
    use crate::state::models::ANALYSIS_CACHE_KEY;
    use tempfile::TempDir;

    fn temp_db() -> (TempDir, DbConnection) {
        let temp_dir = TempDir::new().unwrap();
        let db = open_db(&temp_dir.path().join("cache.db")).unwrap();
        (temp_dir, db)
    }

    #[test]
    fn test_empty_cache() {
        let (_dir, db) = temp_db();
        assert!(load_latest_analysis(&db, ANALYSIS_CACHE_KEY).unwrap().is_none());
        assert_eq!(count_analyses(&db, ANALYSIS_CACHE_KEY).unwrap(), 0);
    }

    #[test]
    fn test_save_and_load() {
        let (_dir, db) = temp_db();

        let saved = save_analysis(&db, ANALYSIS_CACHE_KEY, r#"{"overallScore": 80}"#).unwrap();
        let loaded = load_latest_analysis(&db, ANALYSIS_CACHE_KEY)
            .unwrap()
            .unwrap();

        assert_eq!(loaded.id, saved.id);
        assert_eq!(loaded.payload_json, r#"{"overallScore": 80}"#);
        assert_eq!(loaded.payload_sha256, calculate_sha256(br#"{"overallScore": 80}"#));
        assert_eq!(loaded.created_at, saved.created_at);
    }

    #[test]
    fn test_latest_wins() {
        let (_dir, db) = temp_db();

        save_analysis(&db, ANALYSIS_CACHE_KEY, r#"{"overallScore": 1}"#).unwrap();
        save_analysis(&db, ANALYSIS_CACHE_KEY, r#"{"overallScore": 2}"#).unwrap();

        let loaded = load_latest_analysis(&db, ANALYSIS_CACHE_KEY)
            .unwrap()
            .unwrap();
        assert_eq!(loaded.payload_json, r#"{"overallScore": 2}"#);
        assert_eq!(count_analyses(&db, ANALYSIS_CACHE_KEY).unwrap(), 2);
    }

    #[test]
    fn test_keys_are_isolated() {
        let (_dir, db) = temp_db();

        save_analysis(&db, "other", "{}").unwrap();
        assert!(load_latest_analysis(&db, ANALYSIS_CACHE_KEY).unwrap().is_none());
    }
}
