//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

// Re-export library error type
pub use mnlove_provider::ProviderError;

/// Core layer error type
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// Configuration file unreadable or invalid
    #[error("Configuration error: {0}")]
    Config(String),

    /// Map access token absent; the map cannot start
    #[error("Map access token is not configured")]
    MissingAccessToken,

    /// Input rejected before reaching the backend
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Storage layer error (config file I/O)
    #[error("Storage error: {0}")]
    Storage(String),

    /// A newer request replaced this one before it finished
    #[error("Request superseded by a newer one")]
    Superseded,

    /// Provider error (converted from the data library)
    #[error("{0}")]
    Provider(#[from] ProviderError),
}

impl CoreError {
    /// Whether it is expected behavior (user input, missing resource, ...)
    /// rather than a fault; used for log classification.
    ///
    /// Log at `warn` when `true`, at `error` when `false`.
    /// **Update this when adding variants.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::Validation(_) | Self::MissingAccessToken | Self::Superseded => true,
            Self::Provider(e) => e.is_expected(),
            _ => false,
        }
    }

    /// Log at the level matching [`is_expected`](Self::is_expected).
    pub fn log(&self, context: &str) {
        if self.is_expected() {
            log::warn!("{context}: {self}");
        } else {
            log::error!("{context}: {self}");
        }
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;
