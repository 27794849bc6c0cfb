//! Error types for whatson-core.

use thiserror::Error;

/// Result type alias for whatson-core operations.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors that can occur in whatson-core operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// JSON serialization/deserialization error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Manifest parsed but does not describe a supported container.
    #[error("invalid manifest: {0}")]
    InvalidManifest(String),
}
