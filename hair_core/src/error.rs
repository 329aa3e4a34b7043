//! Error types for the hair_core library.

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for hair_core operations
///
/// Unmatched profiles and malformed wash-day counts are not errors; they
/// come back as ordinary values from the matcher and the distributor.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Catalog validation error
    #[error("Catalog validation error: {0}")]
    CatalogValidation(String),

    /// Routine state error
    #[error("State error: {0}")]
    State(String),

    /// Unrecognized intake value
    #[error("Parse error: {0}")]
    Parse(String),

    /// Profile id not present in the catalog
    #[error("Unknown profile '{0}'")]
    UnknownProfile(String),
}
