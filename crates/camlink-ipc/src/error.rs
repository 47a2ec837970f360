//! Error types for the boundary codecs.

use thiserror::Error;

/// Errors that can occur while decoding host-supplied settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The settings object was absent entirely.
    #[error("Missing value for the settings object")]
    Missing,

    /// The settings were present but not a mapping.
    #[error("Settings must be a mapping, got: {0}")]
    Malformed(String),
}

/// Errors that can occur while converting values across the boundary.
#[derive(Debug, Error)]
pub enum CodecError {
    /// A metadata value outside the supported closed set.
    #[error("Unsupported metadata value: {0}")]
    UnsupportedType(String),

    /// A payload whose shape matches no known form.
    #[error("Malformed {0} payload: {1}")]
    InvalidShape(&'static str, String),
}
