use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the region sales dashboard.
#[derive(Error, Debug)]
pub enum SalesError {
    /// A record's date could not be parsed. Fatal to the whole load.
    #[error("Invalid date in row {row}: {value:?}")]
    DataFormat { row: usize, value: String },

    /// The dataset file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A CSV row was malformed or a field had the wrong type.
    #[error("CSV error: {0}")]
    Csv(String),

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Views could not be serialized to JSON.
    #[error("Failed to serialize JSON: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the sales crates.
pub type Result<T> = std::result::Result<T, SalesError>;
