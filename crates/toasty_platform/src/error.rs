//! Platform error types

use thiserror::Error;

/// Platform-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlatformError {
    /// No presented surface to attach to
    #[error("No container available: the host has no presented surface")]
    NoContainer,

    /// Capability not supported by this host
    #[error("Platform capability not supported: {0}")]
    Unsupported(String),
}

/// Result type for platform operations
pub type Result<T> = std::result::Result<T, PlatformError>;
