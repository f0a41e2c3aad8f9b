use crate::domain::entities::video_features::VideoFeatures;
use crate::domain::entities::video_summary::VideoSummary;
use crate::domain::error::DomainError;
use crate::domain::ports::video_features_repository::VideoFeaturesRepository;
use crate::domain::values::feature_vectors::{EncodedVectors, FeatureVectors, VectorsShape};
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::Mutex;
use tracing::warn;

const SELECT_COLS: &str = "id, name, feature_vectors, vectors_shape, original_video_url, duration";

/// A row as stored, before the payload is decoded.
struct StoredDocument {
    id: String,
    name: String,
    blob: Vec<u8>,
    shape: String,
    original_video_url: String,
    duration: i64,
}

pub struct SqliteVideoFeaturesRepo {
    conn: Mutex<Connection>,
    collection: String,
}

impl SqliteVideoFeaturesRepo {
    /// `collection` is interpolated into SQL and must be a validated identifier.
    pub fn new(conn: Connection, collection: impl Into<String>) -> Self {
        Self {
            conn: Mutex::new(conn),
            collection: collection.into(),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>, DomainError> {
        self.conn
            .lock()
            .map_err(|e| DomainError::StoreUnavailable(e.to_string()))
    }

    fn row_to_document(row: &rusqlite::Row) -> Result<StoredDocument, rusqlite::Error> {
        Ok(StoredDocument {
            id: row.get(0)?,
            name: row.get(1)?,
            blob: row.get(2)?,
            shape: row.get(3)?,
            original_video_url: row.get(4)?,
            duration: row.get(5)?,
        })
    }

    fn document_to_video(doc: StoredDocument) -> Result<VideoFeatures, DomainError> {
        let decoded = doc
            .shape
            .parse::<VectorsShape>()
            .map_err(DomainError::Decode)
            .and_then(|shape| EncodedVectors::from_blob(shape, doc.blob))
            .and_then(|encoded| FeatureVectors::decode(&encoded));
        let feature_vectors = match decoded {
            Ok(v) => v,
            Err(e) => {
                warn!(id = %doc.id, name = %doc.name, "Stored feature vectors are unreadable: {e}");
                return Err(e);
            }
        };
        Ok(VideoFeatures {
            id: Some(doc.id),
            name: doc.name,
            feature_vectors,
            original_video_url: doc.original_video_url,
            duration: doc.duration,
        })
    }
}

impl VideoFeaturesRepository for SqliteVideoFeaturesRepo {
    fn list_all(&self) -> Result<Vec<VideoFeatures>, DomainError> {
        let conn = self.lock()?;
        let sql = format!("SELECT {SELECT_COLS} FROM {} ORDER BY rowid", self.collection);
        let mut stmt = conn.prepare(&sql)?;
        let docs = stmt
            .query_map([], Self::row_to_document)?
            .collect::<Result<Vec<_>, _>>()?;
        docs.into_iter().map(Self::document_to_video).collect()
    }

    fn list_summaries(&self) -> Result<Vec<VideoSummary>, DomainError> {
        let conn = self.lock()?;
        let sql = format!(
            "SELECT name, original_video_url, duration, feature_vectors_count FROM {} ORDER BY rowid",
            self.collection
        );
        let mut stmt = conn.prepare(&sql)?;
        let summaries = stmt
            .query_map([], |row| {
                Ok(VideoSummary {
                    name: row.get(0)?,
                    original_video_url: row.get(1)?,
                    duration: row.get(2)?,
                    feature_vectors_count: row.get::<_, i64>(3)? as usize,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(summaries)
    }

    fn find_by_name(&self, name: &str) -> Result<Option<VideoFeatures>, DomainError> {
        let conn = self.lock()?;
        let sql = format!(
            "SELECT {SELECT_COLS} FROM {} WHERE name = ?1 ORDER BY rowid LIMIT 1",
            self.collection
        );
        let doc = conn
            .query_row(&sql, params![name], Self::row_to_document)
            .optional()?;
        doc.map(Self::document_to_video).transpose()
    }

    fn insert(&self, video: &VideoFeatures) -> Result<String, DomainError> {
        let encoded = video.feature_vectors.encode();
        let id = uuid::Uuid::new_v4().to_string();
        let conn = self.lock()?;
        conn.execute(
            &format!(
                "INSERT INTO {} (id, name, feature_vectors, vectors_shape, feature_vectors_count, original_video_url, duration)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                self.collection
            ),
            params![
                id,
                video.name,
                encoded.to_blob(),
                encoded.shape().to_string(),
                video.feature_vectors.count() as i64,
                video.original_video_url,
                video.duration,
            ],
        )
        .map_err(|e| DomainError::StoreUnavailable(format!("Failed to insert video: {e}")))?;
        Ok(id)
    }

    fn update(&self, id: &str, video: &VideoFeatures) -> Result<(), DomainError> {
        let encoded = video.feature_vectors.encode();
        let conn = self.lock()?;
        let rows = conn
            .execute(
                &format!(
                    "UPDATE {} SET name = ?1, feature_vectors = ?2, vectors_shape = ?3, feature_vectors_count = ?4,
                     original_video_url = ?5, duration = ?6 WHERE id = ?7",
                    self.collection
                ),
                params![
                    video.name,
                    encoded.to_blob(),
                    encoded.shape().to_string(),
                    video.feature_vectors.count() as i64,
                    video.original_video_url,
                    video.duration,
                    id,
                ],
            )
            .map_err(|e| DomainError::StoreUnavailable(format!("Failed to update video: {e}")))?;
        if rows == 0 {
            return Err(DomainError::NotFound(format!("Video not found: {id}")));
        }
        Ok(())
    }
}
