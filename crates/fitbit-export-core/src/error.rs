use std::path::PathBuf;

use fitbit_export_parser::ParseError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("no files matching '{pattern}' under {dir}")]
    NoMatchingFiles { pattern: &'static str, dir: PathBuf },

    #[error("{path}: document contains no records")]
    EmptyDocument { path: PathBuf },

    #[error("CSV is missing required column '{column}'")]
    MissingColumn { column: &'static str },

    #[error("timestamp '{value}' is not in a supported format")]
    Timestamp { value: String },

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON decoding failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("polars operation failed: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("ZIP archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("invalid glob pattern: {0}")]
    Pattern(#[from] glob::PatternError),
}

pub type Result<T> = std::result::Result<T, ExportError>;
