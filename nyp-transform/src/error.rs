//! Error types for nyp-transform
//!
//! Content problems in the archive are not errors (see `loader::LoadIssue`).
//! These cover the file system and CSV output.

use thiserror::Error;

/// Main error type for nyp-transform
#[derive(Error, Debug)]
pub enum TransformError {
    /// File I/O errors (reading the archive, creating outputs)
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV serialisation errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Errors from shared configuration/logging code
    #[error(transparent)]
    Common(#[from] nyp_common::Error),
}

/// Convenience Result type using TransformError
pub type Result<T> = std::result::Result<T, TransformError>;
