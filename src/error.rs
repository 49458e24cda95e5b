//! Error types for the edge navigator.

use thiserror::Error;

/// Result type alias for mousenav operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while tracking the pointer or driving the overlay.
#[derive(Debug, Error)]
pub enum Error {
    /// Runner is already running.
    #[error("runner is already running")]
    AlreadyRunning,

    /// Runner is not running.
    #[error("runner is not running")]
    NotRunning,

    /// The primary display could not be determined.
    #[error("primary display not found")]
    NoPrimaryDisplay,

    /// Platform-specific error.
    #[error("platform error: {0}")]
    Platform(String),

    /// The requested feature is not supported on this platform.
    #[error("not supported: {0}")]
    NotSupported(String),

    /// Thread-related error.
    #[error("thread error: {0}")]
    ThreadError(String),

    /// A settings value is outside the range the settings dialog accepts.
    #[error("invalid setting `{name}`: {reason}")]
    InvalidSetting {
        /// Field name.
        name: &'static str,
        /// What is wrong with the value.
        reason: String,
    },

    /// The overlay surface rejected an operation. Returned by
    /// [`OverlaySurface`](crate::OverlaySurface) implementations.
    #[error("surface error: {0}")]
    Surface(String),

    /// Other errors.
    #[error("{0}")]
    Other(String),
}
