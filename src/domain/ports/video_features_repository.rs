use crate::domain::entities::video_features::VideoFeatures;
use crate::domain::entities::video_summary::VideoSummary;
use crate::domain::error::DomainError;

pub trait VideoFeaturesRepository: Send + Sync {
    fn list_all(&self) -> Result<Vec<VideoFeatures>, DomainError>;
    fn list_summaries(&self) -> Result<Vec<VideoSummary>, DomainError>;
    fn find_by_name(&self, name: &str) -> Result<Option<VideoFeatures>, DomainError>;
    /// Writes a new document and returns the identity the store assigned.
    fn insert(&self, video: &VideoFeatures) -> Result<String, DomainError>;
    /// Overwrites every stored field of the document whose identity is `id`.
    fn update(&self, id: &str, video: &VideoFeatures) -> Result<(), DomainError>;
}
