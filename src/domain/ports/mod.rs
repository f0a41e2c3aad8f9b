pub mod video_features_repository;
