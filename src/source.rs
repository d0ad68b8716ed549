use std::fs;
use std::path::Path;

use log::info;
use serde_json::{Map, Value};

use crate::error::CleanError;

/// One listening-history entry as a field-to-value mapping.
pub type Record = Map<String, Value>;

/// Load every `*.json` file in `folder` and concatenate their records.
///
/// Files are parsed in file-name order so the record sequence is
/// deterministic across platforms. Any file that is not a JSON array of
/// objects aborts the whole run; nothing has been written at that point.
pub fn load_records(folder: &Path) -> Result<Vec<Record>, CleanError> {
    let entries = fs::read_dir(folder).map_err(|source| CleanError::Discovery {
        path: folder.to_path_buf(),
        source,
    })?;

    // Collect the matching files first
    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| CleanError::Discovery {
            path: folder.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if path.is_file() && path.extension().map_or(false, |ext| ext == "json") {
            files.push(path);
        }
    }
    // Directory iteration order is platform-dependent
    files.sort();

    // Parse each file and flatten into one ordered sequence
    let mut records = Vec::new();
    for path in files {
        let contents = fs::read_to_string(&path).map_err(|source| CleanError::Discovery {
            path: path.clone(),
            source,
        })?;
        let mut file_records: Vec<Record> =
            serde_json::from_str(&contents).map_err(|source| CleanError::Parse {
                path: path.clone(),
                source,
            })?;
        info!(
            "Loaded {} records from {}",
            file_records.len(),
            path.display()
        );
        records.append(&mut file_records);
    }

    Ok(records)
}
