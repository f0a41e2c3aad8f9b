use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "videofeatures", about = "Store and browse processed video features")]
pub struct Cli {
    /// Directory holding the database file, or :memory:
    #[arg(long, global = true)]
    pub dir: Option<String>,
    /// Database name (file stem)
    #[arg(long, global = true)]
    pub database: Option<String>,
    /// Collection (table) name
    #[arg(long, global = true)]
    pub collection: Option<String>,
    /// Trace every store call
    #[arg(short, long, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print every stored video with its decoded feature vectors
    List,
    /// Print name, url, duration and vector count of every stored video
    Summaries,
    /// Print the first video with this exact name
    Show { name: String },
    /// Insert a video: JSON with name, feature_vectors, original_video_url, duration
    Insert { json: String },
    /// Overwrite a stored video: same JSON as insert plus its _id
    Update { json: String },
}
