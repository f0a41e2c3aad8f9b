use crate::domain::error::DomainError;
use rusqlite::Connection;

/// Creates the collection table. `collection` must already be a validated identifier.
pub fn run_migrations(conn: &Connection, collection: &str) -> Result<(), DomainError> {
    conn.execute_batch(&format!(
        "
        CREATE TABLE IF NOT EXISTS {collection} (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            feature_vectors BLOB NOT NULL,
            vectors_shape TEXT NOT NULL,
            feature_vectors_count INTEGER NOT NULL,
            original_video_url TEXT NOT NULL,
            duration INTEGER NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_{collection}_name ON {collection}(name);
        "
    ))
    .map_err(|e| DomainError::StoreUnavailable(format!("Migration failed: {e}")))
}
