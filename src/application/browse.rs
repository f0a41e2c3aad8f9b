use crate::domain::entities::video_features::VideoFeatures;
use crate::domain::entities::video_summary::VideoSummary;
use crate::domain::error::DomainError;
use crate::domain::ports::video_features_repository::VideoFeaturesRepository;
use std::sync::Arc;
use tracing::debug;

pub struct BrowseUseCase {
    repo: Arc<dyn VideoFeaturesRepository>,
}

impl BrowseUseCase {
    pub fn new(repo: Arc<dyn VideoFeaturesRepository>) -> Self {
        Self { repo }
    }

    pub fn list_all(&self) -> Result<Vec<VideoFeatures>, DomainError> {
        debug!("Fetching all persisted video features");
        let videos = self.repo.list_all()?;
        debug!(count = videos.len(), "Fetched video features");
        Ok(videos)
    }

    pub fn list_summaries(&self) -> Result<Vec<VideoSummary>, DomainError> {
        debug!("Fetching all persisted video summaries");
        self.repo.list_summaries()
    }

    /// First stored video with exactly this name (earliest inserted wins).
    pub fn find_by_name(&self, name: &str) -> Result<VideoFeatures, DomainError> {
        debug!(name, "Searching persisted video by name");
        self.repo
            .find_by_name(name)?
            .ok_or_else(|| DomainError::NotFound(format!("No video named {name:?}")))
    }
}
