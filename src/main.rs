use std::error::Error;

use log::info;

use spotify_data_cleaner::{clean_spotify_data, CleanConfig, CleanOutcome};

fn main() -> Result<(), Box<dyn Error>> {
    // Initialize the logger
    pretty_env_logger::formatted_builder()
        .filter(None, log::LevelFilter::Info)
        .init();

    // Run with the stock settings: scan `data/`, strip the PII columns,
    // split the cleaned records at 65MB per file
    let config = CleanConfig::default();
    if let CleanOutcome::Written(artifacts) = clean_spotify_data(&config)? {
        info!("Cleaning finished: {} files written", artifacts.len());
    }

    Ok(())
}
