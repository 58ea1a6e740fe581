//! Error types for buracos-core

use thiserror::Error;

use crate::models::MarkerId;

/// Result type alias using buracos-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in buracos-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// A vote addressed a position past the end of the collection.
    ///
    /// This means a rendered popup and the collection went out of sync.
    #[error("Marker index {index} out of range (collection has {len} markers)")]
    OutOfRange { index: usize, len: usize },

    /// Marker not found
    #[error("Marker not found: {0}")]
    MarkerNotFound(MarkerId),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Key-value storage error
    #[error("Storage error: {0}")]
    Storage(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Map widget error
    #[error("Map error: {0}")]
    Map(String),
}
