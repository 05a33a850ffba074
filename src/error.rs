//! Error types for tabcmp operations

use crate::schema::SchemaMismatch;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CompareError>;

#[derive(Error, Debug)]
pub enum CompareError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Schema mismatch: {0}")]
    SchemaMismatch(SchemaMismatch),

    #[error("Malformed input at line {line}, column '{column}': {message}")]
    MalformedInput {
        line: usize,
        column: String,
        message: String,
    },

    #[error("Invalid tolerance {value}: must be a non-negative number")]
    InvalidTolerance { value: f64 },

    #[error("Cannot find reference data (looked for {})", path.display())]
    ReferenceNotFound { path: PathBuf },

    #[error("Unknown flavor: ({os}, {machine})")]
    UnknownFlavor { os: String, machine: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Generic error: {0}")]
    Generic(#[from] anyhow::Error),
}

impl CompareError {
    pub fn malformed(line: usize, column: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::MalformedInput {
            line,
            column: column.into(),
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: msg.into(),
        }
    }
}

impl From<SchemaMismatch> for CompareError {
    fn from(mismatch: SchemaMismatch) -> Self {
        Self::SchemaMismatch(mismatch)
    }
}
