use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the Bikeshare Explorer.
#[derive(Error, Debug)]
pub enum ExplorerError {
    /// A data file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The resolved city data file does not exist.
    #[error("Data file not found: {0}")]
    DataFileNotFound(PathBuf),

    /// A CSV document could not be parsed.
    #[error("Failed to parse CSV: {0}")]
    CsvParse(#[from] csv::Error),

    /// A required column is missing from the CSV header.
    #[error("Missing column in {path}: {column}")]
    MissingColumn { path: PathBuf, column: String },

    /// A start-time string did not match any recognised format.
    #[error("Invalid timestamp format: {0}")]
    TimestampParse(String),

    /// A filter value is not one of the recognised city/month/day names.
    #[error("Invalid filter value: {0}")]
    InvalidFilter(String),

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience alias used throughout the explorer crates.
pub type Result<T> = std::result::Result<T, ExplorerError>;
