pub mod chunk_writer;
pub mod config;
pub mod error;
pub mod sanitizer;
pub mod source;

use std::fs;
use std::path::Path;

use log::info;

pub use chunk_writer::ArtifactSummary;
pub use config::CleanConfig;
pub use error::CleanError;
pub use source::Record;

use chunk_writer::ChunkWriter;

/// Result of a cleaning run: either nothing usable was found, or the list
/// of artifacts that were written.
#[derive(Debug)]
pub enum CleanOutcome {
    /// No `*.json` file matched, or every record was filtered out. Nothing
    /// was written; this is not an error.
    NoData,
    Written(Vec<ArtifactSummary>),
}

/// Load every export file under `input_folder`, strip the configured
/// columns, drop records without a track URI, and write the survivors as
/// size-bounded JSON artifacts under `output_folder`.
///
/// All input is parsed before anything is written, so a parse failure never
/// leaves partial output behind.
pub fn clean_spotify_data(config: &CleanConfig) -> Result<CleanOutcome, CleanError> {
    if same_folder(&config.input_folder, &config.output_folder) {
        return Err(CleanError::Config(format!(
            "output folder '{}' must differ from the input folder",
            config.output_folder.display()
        )));
    }

    // Load and flatten every export file
    let records = source::load_records(&config.input_folder)?;
    let loaded = records.len();

    // Strip PII columns and drop unusable rows
    let records = sanitizer::sanitize(records, &config.columns_to_remove);
    if loaded > records.len() {
        info!(
            "Dropped {} records without a track URI",
            loaded - records.len()
        );
    }

    if records.is_empty() {
        info!("No usable records found; nothing written.");
        return Ok(CleanOutcome::NoData);
    }

    fs::create_dir_all(&config.output_folder).map_err(|source| CleanError::Write {
        path: config.output_folder.clone(),
        source,
    })?;

    // Split into size-bounded artifacts
    let mut writer = ChunkWriter::new(
        &config.output_folder,
        config.artifact_stem(),
        config.max_bytes,
    );
    for record in records {
        writer.push(record)?;
    }

    Ok(CleanOutcome::Written(writer.finish()?))
}

/// Compare folders by canonical path when both exist, falling back to the
/// literal paths otherwise.
fn same_folder(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}
