//! Error types for tasktrack
//!
//! Centralized error handling using thiserror.

use thiserror::Error;

/// All error types that can occur in tasktrack
#[derive(Debug, Error)]
pub enum TaskError {
    /// A line of the task file could not be parsed
    #[error("Malformed record on line {line}: {reason}")]
    MalformedRecord { line: usize, reason: String },

    /// A label that cannot be stored in the task file
    #[error("Invalid label: {0}")]
    InvalidLabel(String),

    /// Storage/persistence error
    #[error("Storage error: {0}")]
    Storage(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for tasktrack operations
pub type Result<T> = std::result::Result<T, TaskError>;
