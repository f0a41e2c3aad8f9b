pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod logging;

use crate::application::browse::BrowseUseCase;
use crate::application::save_video::SaveVideoUseCase;
use crate::config::StoreConfig;
use crate::domain::entities::video_features::VideoFeatures;
use crate::domain::entities::video_summary::VideoSummary;
use crate::domain::error::DomainError;
use crate::domain::ports::video_features_repository::VideoFeaturesRepository;
use crate::infrastructure::sqlite::migrations::run_migrations;
use crate::infrastructure::sqlite::video_features_repo::SqliteVideoFeaturesRepo;
use rusqlite::Connection;
use std::sync::Arc;
use tracing::info;

pub struct VideoFeaturesStore {
    browse_uc: BrowseUseCase,
    save_uc: SaveVideoUseCase,
}

impl VideoFeaturesStore {
    /// Opens the configured database once; every call reuses that connection.
    pub fn open(config: &StoreConfig) -> Result<Self, DomainError> {
        config.validate()?;
        let target = config.connection_target();
        let conn = Connection::open(&target)
            .map_err(|e| DomainError::StoreUnavailable(format!("Cannot open {target}: {e}")))?;
        conn.pragma_update(None, "journal_mode", "WAL")
            .map_err(|e| DomainError::StoreUnavailable(format!("WAL error: {e}")))?;

        run_migrations(&conn, &config.collection_name)?;
        info!(
            database = %target,
            collection = %config.collection_name,
            "Opened video features store"
        );

        let repo: Arc<dyn VideoFeaturesRepository> =
            Arc::new(SqliteVideoFeaturesRepo::new(conn, config.collection_name.clone()));
        Ok(Self::with_repository(repo))
    }

    pub fn with_repository(repo: Arc<dyn VideoFeaturesRepository>) -> Self {
        Self {
            browse_uc: BrowseUseCase::new(repo.clone()),
            save_uc: SaveVideoUseCase::new(repo),
        }
    }

    pub fn list_all(&self) -> Result<Vec<VideoFeatures>, DomainError> {
        self.browse_uc.list_all()
    }

    pub fn list_summaries(&self) -> Result<Vec<VideoSummary>, DomainError> {
        self.browse_uc.list_summaries()
    }

    pub fn find_by_name(&self, name: &str) -> Result<VideoFeatures, DomainError> {
        self.browse_uc.find_by_name(name)
    }

    pub fn insert(&self, video: &VideoFeatures) -> Result<VideoFeatures, DomainError> {
        self.save_uc.insert(video)
    }

    pub fn update(&self, video: &VideoFeatures) -> Result<(), DomainError> {
        self.save_uc.update(video)
    }
}
