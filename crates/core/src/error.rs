//! Error types for fds-core
//!
//! A single error enum shared by every crate in the workspace. The CLI
//! catches these at top level, prints them to stderr, and exits 1.

use thiserror::Error;

/// Result type alias for fds operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for fds operations
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration file or credential error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid command-line input
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Malformed metadata string
    #[error("Invalid metadata: {0}")]
    Metadata(String),

    /// Endpoint could not be parsed into a URL
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(#[from] url::ParseError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Bucket or object does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Error raised by the storage service or its SDK
    #[error("Service error: {0}")]
    Service(String),
}
