// src/error.rs
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("input file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("no matching data for village code prefix {prefix:?}")]
    NoMatchingData { prefix: String },

    #[error("required column {field} not found (headers: {headers:?})")]
    MissingColumn {
        field: &'static str,
        headers: Vec<String>,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("Parquet write error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("XLSX write error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
}

impl PipelineError {
    /// True for the two conditions that end a run early without output
    /// and without counting as a failure.
    pub fn is_graceful(&self) -> bool {
        matches!(
            self,
            PipelineError::InputNotFound(_) | PipelineError::NoMatchingData { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;
