use serde::Serialize;

/// Listing view of a stored video: the vector count instead of the vectors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VideoSummary {
    pub name: String,
    pub original_video_url: String,
    pub duration: i64,
    pub feature_vectors_count: usize,
}
