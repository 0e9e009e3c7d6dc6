//! Error types for beadtree

use thiserror::Error;

/// Result type alias for beadtree operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for beadtree operations
///
/// These are the fatal errors that can happen before a provisioning run
/// starts. Failures of individual creation calls are reported through
/// [`crate::CreateError`] and never abort a run.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Plan file could not be parsed as TOML
    #[error("Plan parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Plan parsed but failed validation
    #[error("Invalid plan: {0}")]
    Plan(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
