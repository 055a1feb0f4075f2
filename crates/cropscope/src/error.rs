//! Error types for the cropscope library.

use std::path::PathBuf;
use thiserror::Error;

use crate::types::{Footprint, Region};

/// Main error type for cropscope operations.
///
/// Every variant carries enough context (region, year, stratum, footprint,
/// key path) to diagnose a failure without re-running the pipeline. The only
/// soft condition in the system, an undersampled stratum, is deliberately not
/// an error: it surfaces as the `low_confidence` flag on an estimate.
#[derive(Debug, Error)]
pub enum CropscopeError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A cell in an input table could not be interpreted.
    #[error("Parse error in '{path}' at line {line}: {message}")]
    Parse {
        path: PathBuf,
        line: usize,
        message: String,
    },

    /// An input table is missing required columns.
    #[error("Missing required columns in '{path}': {columns:?}")]
    MissingColumns {
        path: PathBuf,
        columns: Vec<String>,
    },

    /// Invalid region configuration (proportion sum, stratum mismatch).
    /// Fatal; surfaced before any estimate is computed.
    #[error("Configuration error for region '{region}': {message}")]
    Config { region: Region, message: String },

    /// Year sets disagree, either between the observed-area table and the
    /// configured years or between regions during combination.
    #[error(
        "Alignment error for {footprint} footprint, region '{region}': missing years {missing_years:?}"
    )]
    Alignment {
        footprint: Footprint,
        region: String,
        missing_years: Vec<i32>,
    },

    /// Failure writing or reading the persisted result document.
    #[error("Persistence error for '{path}': {message}")]
    Persistence { path: PathBuf, message: String },

    /// A loaded result document is structurally invalid.
    #[error("Malformed result document at '{key_path}': {message}")]
    Malformed { key_path: String, message: String },
}

/// Result type alias for cropscope operations.
pub type Result<T> = std::result::Result<T, CropscopeError>;
