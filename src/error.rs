//! Error types for the packing engine.

use thiserror::Error;

/// Errors that can occur during packing operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid configuration (circle count, radius range, schedule parameters).
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Invalid circle geometry (non-positive radius, non-finite coordinates).
    #[error("Invalid circle: {0}")]
    InvalidCircle(String),
}

/// Result type for packing operations.
pub type Result<T> = std::result::Result<T, Error>;
