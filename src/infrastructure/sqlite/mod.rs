pub mod migrations;
pub mod video_features_repo;
