//! Error types for toasty

use thiserror::Error;
use toasty_platform::PlatformError;

use crate::toast::ToastState;

/// Errors surfaced by toast operations
///
/// Only `show` and configuration loading can fail. Close, gesture and timer
/// events outside their valid states are ignored rather than reported.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ToastError {
    /// Neither a configured container nor a presented host surface exists
    #[error("No container to attach the toast to")]
    NoContainer,

    /// `show` called on a toast that already left `Idle`
    #[error("Toast cannot be shown from state {0:?}")]
    InvalidState(ToastState),

    /// The scheduler driving the toast has been dropped
    #[error("UI scheduler is no longer running")]
    SchedulerUnavailable,

    /// Configuration could not be read, parsed or validated
    #[error("Invalid toast configuration: {0}")]
    Config(String),

    /// Platform error other than a missing container
    #[error("Platform error: {0}")]
    Platform(PlatformError),
}

impl From<PlatformError> for ToastError {
    fn from(err: PlatformError) -> Self {
        match err {
            PlatformError::NoContainer => ToastError::NoContainer,
            other => ToastError::Platform(other),
        }
    }
}

impl From<toml::de::Error> for ToastError {
    fn from(err: toml::de::Error) -> Self {
        ToastError::Config(err.to_string())
    }
}

/// Result type for toasty operations
pub type Result<T> = std::result::Result<T, ToastError>;
