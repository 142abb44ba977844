//! Error types for the Pagecraft core library.

use thiserror::Error;

/// Result type alias using `CoreError`.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Core error types for Pagecraft.
///
/// Structural configuration errors are fatal: they abort a build run and fail
/// navigator initialization. Per-page and per-record failures are modeled
/// separately in [`crate::render`] so callers can isolate them.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration loading or parsing error.
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Malformed route tree (missing wildcard, ambiguous params, bad keys).
    #[error("Route tree error: {message}")]
    Tree { message: String },
}

impl CoreError {
    /// Create a new configuration error with a message.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            source: None,
        }
    }

    /// Create a new configuration error with source.
    pub fn config_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Config {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new route tree error.
    pub fn tree(message: impl Into<String>) -> Self {
        Self::Tree {
            message: message.into(),
        }
    }
}
