//! Error types for `pullcord`
//!
//! This module defines all error types used throughout the crate.
//! Most of them never reach a user: the toggle and the snow effect degrade
//! silently, so these errors end up in the log. Only the binary's startup
//! path turns them into messages.
//!
//! Error variants use `#[source]` to preserve error chains.

use thiserror::Error;

/// Simple error type for wrapping string messages while implementing `std::error::Error`
#[derive(Debug, Error)]
#[error("{0}")]
pub struct StringError(pub String);

impl StringError {
    /// Create a new `StringError` from a string message
    pub fn new(msg: impl Into<String>) -> Box<Self> {
        Box::new(Self(msg.into()))
    }
}

/// Main error type for `pullcord`
#[derive(Debug, Error)]
pub enum PullcordError {
    /// Preference store read or write failed
    #[error("Preference storage error: {0}")]
    StorageError(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Title mask could not be built
    #[error("Title mask error: {0}")]
    MaskError(String),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Image decoding error
    #[error("Image error: {0}")]
    ImageError(#[from] image::ImageError),
}

/// Result type alias for `pullcord` operations
pub type Result<T> = std::result::Result<T, PullcordError>;

/// Convert an error to a user-friendly message
///
/// Used by the binary when startup fails before the window is shown.
pub fn get_user_friendly_error(error: &PullcordError) -> String {
    match error {
        PullcordError::StorageError(_) => "Your theme preference could not be saved.\n\n\
             The toggle still works, but the choice will be forgotten on restart."
            .to_string(),
        PullcordError::ConfigError(_) => "Failed to load or save configuration.\n\n\
             Default settings will be used.\n\
             Check that the configuration directory is writable."
            .to_string(),
        PullcordError::MaskError(reason) => {
            format!(
                "The title mask could not be prepared:\n\n{reason}\n\n\
                 Snow will fall without settling on the title."
            )
        }
        PullcordError::IoError(e) => {
            format!(
                "A file system error occurred:\n\n{e}\n\n\
                 Please check file permissions and disk space."
            )
        }
        PullcordError::JsonError(e) => {
            format!(
                "Configuration file is corrupted:\n\n{e}\n\n\
                 The application will use default settings."
            )
        }
        PullcordError::ImageError(e) => {
            format!(
                "An image could not be decoded:\n\n{e}\n\n\
                 Check the image paths in the configuration file."
            )
        }
    }
}
