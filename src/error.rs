//! Error types for boardtree.

use thiserror::Error;

/// Common error type for boardtree.
///
/// Domain decisions (cycles, slugs, ordering) have their own error enums in
/// their modules; this type covers the surrounding plumbing.
#[derive(Error, Debug)]
pub enum BoardTreeError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Board snapshot could not be decoded.
    #[error("snapshot error: {0}")]
    Snapshot(#[from] serde_json::Error),

    /// Validation error for user input.
    #[error("validation error: {0}")]
    Validation(String),

    /// Resource not found.
    #[error("{0} not found")]
    NotFound(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Board management error.
    #[error("admin error: {0}")]
    Admin(#[from] crate::admin::AdminError),
}

/// Result type alias for boardtree operations.
pub type Result<T> = std::result::Result<T, BoardTreeError>;
