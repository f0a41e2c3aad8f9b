pub mod video_features;
pub mod video_summary;
