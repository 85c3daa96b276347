//! Error types for the ktmine pipeline

use std::process::ExitCode;
use thiserror::Error;

/// Result type alias using KtMineError
pub type Result<T> = std::result::Result<T, KtMineError>;

/// Errors that can occur during corpus mining
#[derive(Debug, Error)]
pub enum KtMineError {
    /// Path does not exist or is not accessible
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    /// The corpus root directory could not be read
    #[error("Cannot read corpus directory: {path}")]
    CorpusUnreadable { path: String },

    /// A file could not be decoded under any configured encoding
    #[error("Cannot decode {path} with any supported encoding")]
    DecodeFailure { path: String },

    /// Tree-sitter failed to produce a syntax tree
    #[error("Parse failure: {message}")]
    ParseFailure { message: String },

    /// The golden table did not match the extracted records
    #[error("Golden table mismatch: {message}")]
    GoldenMismatch { message: String },

    /// Failure while writing an output table
    #[error("Failed to write table: {message}")]
    TableWrite { message: String },

    /// Underlying I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV encoding or decoding error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl KtMineError {
    /// Map each error class to a stable process exit code
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::FileNotFound { .. } | Self::CorpusUnreadable { .. } => ExitCode::from(2),
            Self::DecodeFailure { .. } => ExitCode::from(3),
            Self::ParseFailure { .. } => ExitCode::from(4),
            Self::GoldenMismatch { .. } => ExitCode::from(5),
            Self::TableWrite { .. } | Self::Io(_) | Self::Csv(_) => ExitCode::from(6),
        }
    }
}
