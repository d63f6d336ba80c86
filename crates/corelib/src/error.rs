//! Error types for the core library.

use thiserror::Error;

/// Result type alias for the core library.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the core library.
///
/// Ring mutation never fails; lookups report an empty ring as `None`.
/// These variants cover the configuration layer and callers that prefer
/// `?` over matching on `Option`.
#[derive(Debug, Error)]
pub enum Error {
    /// Lookup on a ring with no entries
    #[error("hash ring is empty")]
    EmptyRing,
    /// Hash algorithm name not recognized
    #[error("unknown hash algorithm: {0}")]
    UnknownHash(String),
    /// Configuration rejected by validation
    #[error("invalid ring configuration: {0}")]
    InvalidConfig(String),
    /// Configuration file could not be read
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
    /// Configuration file could not be parsed
    #[error("failed to parse configuration: {0}")]
    Json(#[from] serde_json::Error),
}
