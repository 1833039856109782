//! Common error types for the lesson-path crates

use thiserror::Error;

/// Common result type for lesson-path operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across lesson-path crates
#[derive(Error, Debug)]
pub enum Error {
    /// Transport-level HTTP failure (wraps reqwest::Error)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API answered with a non-success status
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Request needs a bearer token and none was accepted
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Requested resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid user input or request parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}
