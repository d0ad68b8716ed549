use std::path::PathBuf;

/// Controls where records are read from, which columns are stripped, and
/// how the cleaned output is split.
#[derive(Clone, Debug)]
pub struct CleanConfig {
    /// Directory scanned for `*.json` export files.
    pub input_folder: PathBuf,
    /// Directory artifacts are written to. Must differ from `input_folder`,
    /// otherwise a later run would re-ingest its own output.
    pub output_folder: PathBuf,
    /// Base name for artifacts; the extension is stripped and each artifact
    /// is named `{stem}_{index}.json`.
    pub output_file: String,
    /// Field names deleted from every record. Absent fields are skipped.
    pub columns_to_remove: Vec<String>,
    /// Soft ceiling on each artifact's serialized size, in bytes. Only a
    /// single record bigger than the ceiling may push an artifact past it.
    pub max_bytes: usize,
}

impl Default for CleanConfig {
    fn default() -> Self {
        Self {
            input_folder: PathBuf::from("data"),
            output_folder: PathBuf::from("cleaned"),
            output_file: "cleaned_spotify_data.json".to_string(),
            // PII columns of the Spotify extended streaming history export
            columns_to_remove: [
                "ip_addr",
                "conn_country",
                "platform",
                "device_info",
                "offline_timestamp",
            ]
            .iter()
            .map(|column| column.to_string())
            .collect(),
            max_bytes: 65 * 1024 * 1024,
        }
    }
}

impl CleanConfig {
    /// Base name used for artifacts: `output_file` with its extension
    /// stripped.
    pub fn artifact_stem(&self) -> &str {
        self.output_file
            .rsplit_once('.')
            .map_or(self.output_file.as_str(), |(stem, _)| stem)
    }
}
