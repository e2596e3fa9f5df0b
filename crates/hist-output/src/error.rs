//! Error types for JSON output.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OutputError {
    /// Output directory could not be created.
    #[error("failed to create {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Output file could not be created.
    #[error("failed to create {path}: {source}")]
    CreateFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing to the sink failed.
    #[error("write failed: {0}")]
    Write(#[from] std::io::Error),

    /// A record could not be serialized.
    #[error("failed to serialize record: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The hist path has no file name to derive an output name from.
    #[error("cannot derive output name from {path}")]
    NoFileStem { path: PathBuf },
}

pub type Result<T> = std::result::Result<T, OutputError>;
