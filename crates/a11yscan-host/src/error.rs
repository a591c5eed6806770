//! Error types for source-host operations

use thiserror::Error;

/// Errors that can occur talking to the source host
#[derive(Error, Debug)]
pub enum HostError {
    /// Transport-level failure (connection, TLS, timeout at the OS level)
    #[error("HTTP error: {0}")]
    Http(String),

    /// The host answered with a non-success status
    #[error("{operation} returned unexpected status {status}")]
    UnexpectedStatus { operation: String, status: u16 },

    /// The host answered 2xx but the body did not match the documented shape
    #[error("Malformed {operation} response: {message}")]
    MalformedResponse { operation: String, message: String },

    /// File content could not be decoded from its transport encoding
    #[error("Could not decode content of {path}: {message}")]
    ContentDecode { path: String, message: String },

    /// File content decoded to bytes that are not valid UTF-8 text
    #[error("Content of {path} is not valid UTF-8 text")]
    ContentNotText { path: String },
}

impl From<reqwest::Error> for HostError {
    fn from(err: reqwest::Error) -> Self {
        HostError::Http(err.to_string())
    }
}

/// Result type for source-host operations
pub type HostResult<T> = std::result::Result<T, HostError>;
