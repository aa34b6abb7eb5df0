/// StudentDb Error Module
///
/// This module defines the error type shared by every database operation,
/// the configuration loader and the report renderer.
use thiserror::Error;

/// Error type for the studentdb crate.
///
/// Covers:
/// - SQLite failures surfaced by rusqlite (constraint violations, I/O, locking)
/// - Statement preparation and execution failures with context
/// - Connection lifecycle misuse
/// - Configuration loading
/// - File system and JSON output errors
#[derive(Error, Debug)]
pub enum StudentDbError {
    /// Database-related errors from SQLite operations
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// SQL statement errors (syntax, missing tables, bad parameters)
    #[error("Query error: {0}")]
    Query(String),

    /// Using a manager that is not connected, or failing to close one
    #[error("Connection error: {0}")]
    Connection(String),

    /// Configuration loading and validation errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File system and I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON rendering errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Type alias for Result to use StudentDbError as the error type.
pub type Result<T> = std::result::Result<T, StudentDbError>;
