pub mod browse;
pub mod save_video;
