//! Shared test helpers.
#![allow(dead_code)]

use videofeatures::config::StoreConfig;
use videofeatures::domain::entities::video_features::VideoFeatures;
use videofeatures::domain::values::feature_array::FeatureArray;
use videofeatures::domain::values::feature_vectors::FeatureVectors;
use videofeatures::VideoFeaturesStore;

pub fn setup() -> VideoFeaturesStore {
    VideoFeaturesStore::open(&StoreConfig::in_memory()).unwrap()
}

pub fn make_video(name: &str, vectors: Vec<Vec<f64>>, duration: i64) -> VideoFeatures {
    VideoFeatures::new(
        name.to_string(),
        FeatureVectors::Sequence(vectors.into_iter().map(FeatureArray::from_f64).collect()),
        format!("http://x/{name}.mp4"),
        duration,
    )
}
