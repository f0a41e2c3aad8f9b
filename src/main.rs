use clap::Parser;
use videofeatures::cli::commands::{Cli, Commands};
use videofeatures::config::{StoreConfig, StoreLocation};
use videofeatures::domain::entities::video_features::VideoFeatures;
use videofeatures::logging::init_tracing;
use videofeatures::VideoFeaturesStore;

fn main() {
    let cli = Cli::parse();

    let mut config = StoreConfig::from_env();
    if let Some(dir) = &cli.dir {
        config.location = StoreLocation::parse(dir);
    }
    if let Some(database) = cli.database.clone() {
        config.database_name = database;
    }
    if let Some(collection) = cli.collection.clone() {
        config.collection_name = collection;
    }
    config.verbose |= cli.verbose;
    init_tracing(config.verbose);

    let store = match VideoFeaturesStore::open(&config) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("Error opening video features store: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = run_command(&store, cli.command) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run_command(store: &VideoFeaturesStore, cmd: Commands) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        Commands::List => {
            let videos = store.list_all()?;
            println!("{}", serde_json::to_string_pretty(&videos)?);
        }
        Commands::Summaries => {
            let summaries = store.list_summaries()?;
            println!("{}", serde_json::to_string_pretty(&summaries)?);
        }
        Commands::Show { name } => {
            let video = store.find_by_name(&name)?;
            println!("{}", serde_json::to_string_pretty(&video)?);
        }
        Commands::Insert { json } => {
            let video: VideoFeatures = serde_json::from_str(&json)?;
            let saved = store.insert(&video)?;
            println!("{}", serde_json::to_string_pretty(&saved)?);
        }
        Commands::Update { json } => {
            let video: VideoFeatures = serde_json::from_str(&json)?;
            store.update(&video)?;
            println!("{}", serde_json::to_string_pretty(&video)?);
        }
    }
    Ok(())
}
