//! Error types for the turntable viewer

use thiserror::Error;

/// Main error type for turntable operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Failed to load asset '{path}': {reason}")]
    Asset { path: String, reason: String },

    #[error("Projection error: {0}")]
    Projection(String),
}

/// Result type alias for turntable operations
pub type Result<T> = std::result::Result<T, Error>;
