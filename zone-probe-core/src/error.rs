//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

// Re-export library error type
pub use zone_probe_provider::ProviderError;

/// Core layer error type
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// The seed collaborator could not produce a candidate list (missing directory or file)
    #[error("Seed source unavailable: {0}")]
    SeedUnavailable(String),

    /// Stage cache or ledger I/O failure
    #[error("Storage error: {0}")]
    StorageError(String),

    /// Configuration is missing or malformed
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Provider error (converting from library)
    #[error("{0}")]
    Provider(#[from] ProviderError),
}

impl CoreError {
    /// Whether it is expected behavior (operator input, missing resources), used for log classification.
    ///
    /// Level `warn` should be used when returning `true` and level `error` when returning `false`.
    /// **Please update this method simultaneously when new variants are added.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::SeedUnavailable(_) | Self::ConfigError(_) => true,
            Self::Provider(e) => e.is_expected(),
            Self::StorageError(_) => false,
        }
    }

    pub(crate) fn storage(context: &str, err: &std::io::Error) -> Self {
        Self::StorageError(format!("{context}: {err}"))
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;
