//! Error types for the cleaning pipeline.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by pipeline stages. Every variant aborts the run.
#[derive(Debug, Error)]
pub enum CleanError {
    /// Input file does not exist.
    #[error("input file not found: {path}")]
    NotFound { path: PathBuf },

    /// Input exists but could not be parsed as CSV.
    #[error("failed to load {path}: {message}")]
    Load { path: PathBuf, message: String },

    /// A stage needs a column the table does not have (or has no usable values in).
    #[error("required column '{column}' is missing or has no usable values")]
    MissingColumn { column: String },

    /// A numeric value could not be represented as an integer.
    #[error("cannot cast {value} in column '{column}' to integer")]
    IntegerCast { column: String, value: f64 },

    /// Output could not be written.
    #[error("failed to save {path}: {source}")]
    Save {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}
