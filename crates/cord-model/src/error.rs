use std::path::PathBuf;

use thiserror::Error;

/// Fatal pipeline errors.
///
/// Recoverable conditions (a malformed row, an unparseable date, a record
/// dropped by a cleaning policy) are never represented here: they are
/// tallied in the loader and cleaner reports instead. An error from this
/// enum means no table was produced.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("metadata file not found: {path}")]
    MissingFile { path: PathBuf },
    #[error("required column `{column}` is missing from the header row")]
    MissingColumn { column: String },
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
