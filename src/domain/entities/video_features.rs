use crate::domain::values::feature_vectors::FeatureVectors;
use serde::{Deserialize, Serialize};

/// A processed video and its extracted features.
///
/// `id` is `None` until the record has been inserted; the store assigns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoFeatures {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub feature_vectors: FeatureVectors,
    pub original_video_url: String,
    pub duration: i64,
}

impl VideoFeatures {
    pub fn new(
        name: String,
        feature_vectors: FeatureVectors,
        original_video_url: String,
        duration: i64,
    ) -> Self {
        Self {
            id: None,
            name,
            feature_vectors,
            original_video_url,
            duration,
        }
    }
}
