use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the processing pipeline.
///
/// Out-of-range pixel and wavelength lookups are not errors; they return the
/// sentinel values documented on the conversion functions (-1, -1.0, NaN).
/// Only structural failures land here.
#[derive(Error, Debug)]
pub enum HabError {
    #[error("parse error: {0}")]
    Parse(String),

    #[error("malformed capture file {}: {reason}", .path.display())]
    MalformedCapture { path: PathBuf, reason: String },

    #[error("invalid calibration: {0}")]
    InvalidCalibration(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),
}

pub type Result<T> = std::result::Result<T, HabError>;
