//! Row source error types

use thiserror::Error;

/// Error returned by an asynchronous row source.
///
/// The engine hands this back to the caller unchanged when it belongs to
/// the most recent search request, and drops it otherwise.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct SourceError {
    /// Error message
    pub message: String,
}

impl SourceError {
    /// Create a new source error
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for SourceError {
    fn from(err: std::io::Error) -> Self {
        Self::new(err.to_string())
    }
}

impl From<String> for SourceError {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

impl From<&str> for SourceError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}
