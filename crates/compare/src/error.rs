use std::path::PathBuf;
use thiserror::Error;
use xlsim_sheet::SheetError;

/// Errors raised while discovering, loading, or comparing workbooks
#[derive(Error, Debug)]
pub enum CompareError {
    #[error("Failed to load {path}: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: SheetError,
    },

    #[error("Unknown metric '{name}'. Supported: meta, exact, string, geo")]
    UnknownMetric { name: String },

    #[error("Invalid glob pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("Failed to walk {path}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("Invalid similarity thresholds: low {low}, high {high} (need 0 <= low <= high <= 1)")]
    InvalidThresholds { low: f64, high: f64 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CompareError>;
