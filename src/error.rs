//! Error types for the triage task system
//!
//! Structured error definitions with thiserror; anyhow is used at the
//! binary edge for propagation.

use thiserror::Error;

/// Main error type for triage operations
#[derive(Error, Debug)]
pub enum TriageError {
    /// Database operation failed
    #[error("Database error: {0}")]
    Database(String),

    /// Task not found
    #[error("Task not found: {0}")]
    TaskNotFound(String),

    /// Priority outside {1, 2, 3} or an unknown name
    #[error("Invalid priority: {0}")]
    InvalidPriority(String),

    /// Invalid task ID format
    #[error("Invalid task ID: {0}")]
    InvalidTaskId(#[from] uuid::Error),

    /// Input rejected before reaching storage or the model
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Model artifact could not be encoded or decoded
    #[error("Model encoding error: {0}")]
    ModelEncoding(#[from] bincode::Error),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

/// Result type alias for triage operations
pub type Result<T> = std::result::Result<T, TriageError>;

impl From<anyhow::Error> for TriageError {
    fn from(err: anyhow::Error) -> Self {
        TriageError::Other(err.to_string())
    }
}

impl From<libsql::Error> for TriageError {
    fn from(err: libsql::Error) -> Self {
        TriageError::Database(err.to_string())
    }
}
