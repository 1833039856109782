//! Error types for lpath-player
//!
//! Defines crate-specific error types using thiserror for clear error propagation.

use thiserror::Error;

/// Main error type for lpath-player
#[derive(Error, Debug)]
pub enum Error {
    /// Errors from the shared crate (API, config file, I/O)
    #[error(transparent)]
    Common(#[from] lpath_common::Error),

    /// Invalid player settings
    #[error("Configuration error: {0}")]
    Config(String),

    /// Seek target outside `[0, duration]` under the reject policy
    #[error("Seek to {requested}s outside 0..={duration}s")]
    SeekOutOfRange { requested: f64, duration: f64 },

    /// Seek target is NaN or infinite
    #[error("Invalid seek target: {0}")]
    InvalidSeek(f64),

    /// Simulated video length that is negative, not finite or too long
    #[error("Invalid video duration: {0}s")]
    InvalidDuration(f64),

    /// Lesson is locked and cannot be opened
    #[error("Lesson {0} is locked")]
    LessonLocked(u64),

    /// Lesson id not present in the current path
    #[error("Lesson not found: {0}")]
    LessonNotFound(u64),
}

/// Convenience Result type using lpath-player Error
pub type Result<T> = std::result::Result<T, Error>;
