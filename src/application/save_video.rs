use crate::domain::entities::video_features::VideoFeatures;
use crate::domain::error::DomainError;
use crate::domain::ports::video_features_repository::VideoFeaturesRepository;
use std::sync::Arc;
use tracing::debug;

pub struct SaveVideoUseCase {
    repo: Arc<dyn VideoFeaturesRepository>,
}

impl SaveVideoUseCase {
    pub fn new(repo: Arc<dyn VideoFeaturesRepository>) -> Self {
        Self { repo }
    }

    /// Stores a new video and returns it with the identity the store assigned.
    /// The caller's record is left untouched.
    pub fn insert(&self, video: &VideoFeatures) -> Result<VideoFeatures, DomainError> {
        if let Some(id) = &video.id {
            return Err(DomainError::InvalidArgument(format!(
                "Video {:?} is already persisted as {id}; use update",
                video.name
            )));
        }
        debug!(
            name = %video.name,
            vectors = video.feature_vectors.count(),
            "Saving processed video"
        );
        let id = self.repo.insert(video)?;
        debug!(name = %video.name, %id, "Saved processed video");
        Ok(VideoFeatures {
            id: Some(id),
            ..video.clone()
        })
    }

    /// Overwrites the stored document with the same identity.
    pub fn update(&self, video: &VideoFeatures) -> Result<(), DomainError> {
        let id = video.id.as_deref().ok_or_else(|| {
            DomainError::InvalidArgument(format!(
                "Video {:?} has no identity; insert it first",
                video.name
            ))
        })?;
        debug!(name = %video.name, id, "Updating processed video");
        self.repo.update(id, video)
    }
}
