use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Error type for input discovery, parsing, and artifact write failures.
#[derive(Debug, Error)]
pub enum CleanError {
    #[error("cannot read input folder '{path}': {source}")]
    Discovery { path: PathBuf, source: io::Error },
    #[error("'{path}' is not a valid JSON array of records: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("cannot write '{path}': {source}")]
    Write { path: PathBuf, source: io::Error },
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("failed to serialize records: {0}")]
    Serialize(#[from] serde_json::Error),
}
