use std::path::PathBuf;

use thiserror::Error;

/// Context for a failed fetch
pub fn fetch_context(url: &str) -> String {
    format!("Failed to fetch from: {}", url)
}

/// Any of these fails the fallback schedule as a whole; no partial results
#[derive(Debug, Error)]
pub enum FallbackError {
    #[error("fallback schedule not found at {}", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read fallback schedule: {0}")]
    Csv(#[from] csv::Error),

    #[error("fallback schedule is missing required column '{column}'")]
    MissingColumn { column: &'static str },

    #[error("row {row}: required field '{column}' is empty")]
    EmptyField { row: usize, column: &'static str },

    #[error("row {row}: invalid {column} '{value}' (expected {expected})")]
    InvalidValue {
        row: usize,
        column: &'static str,
        value: String,
        expected: &'static str,
    },
}
