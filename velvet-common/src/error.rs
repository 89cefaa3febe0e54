//! Common error types for the Velvet Room crates

use thiserror::Error;

/// Common result type for Velvet Room operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across the library and the fusion resolver service
///
/// Note that "cannot fuse" is not an error: it is an ordinary outcome
/// reported through [`crate::chart::Fusion::NotFusable`].
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Reference data or config file is not valid TOML for its schema
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Reference data violates a catalog or chart invariant
    #[error("Invalid reference data: {0}")]
    InvalidData(String),

    /// Arcana name outside the loaded catalog
    #[error("Unknown arcana: {0}")]
    UnknownArcana(String),

    /// Requested resource not found
    #[error("Not found: {0}")]
    NotFound(String),
}
