/// Core Module for studentdb
///
/// Shared infrastructure: the connection manager, query results, schema
/// management and the crate-wide error type.

pub mod db;
pub mod error;

// Re-export commonly used types for convenience
pub use error::{Result, StudentDbError};
