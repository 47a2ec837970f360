//! Host-facing error taxonomy.

use camlink_ipc::SettingsError;
use camlink_session::LaunchError;
use thiserror::Error;

/// Errors surfaced to the host as promise rejections.
///
/// Cancellation is never one of these; a cancelled session resolves with
/// no result.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// A required argument was absent.
    #[error("Unable to find required argument(s): {0}")]
    MissingArguments(&'static str),

    /// An argument was present but could not be parsed.
    #[error("Unable to parse the argument(s): {0}")]
    Parsing(String),

    /// The session captured but its artifact could not be delivered.
    #[error("Failed to export the artifact due to: {0}")]
    ExportFailed(String),

    /// A capture session is already in flight.
    #[error("A capture session is already in flight")]
    SessionActive,
}

impl BridgeError {
    /// Stable code identifying the rejection class to the host.
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingArguments(_) => "E_MISSING_ARGUMENTS",
            Self::Parsing(_) => "E_PARSING",
            Self::ExportFailed(_) => "E_EXPORT_FAILED",
            Self::SessionActive => "E_SESSION_ACTIVE",
        }
    }
}

impl From<SettingsError> for BridgeError {
    fn from(err: SettingsError) -> Self {
        match err {
            SettingsError::Missing => Self::MissingArguments("settings"),
            malformed @ SettingsError::Malformed(_) => Self::Parsing(malformed.to_string()),
        }
    }
}

impl From<LaunchError> for BridgeError {
    fn from(err: LaunchError) -> Self {
        match err {
            LaunchError::SessionActive => Self::SessionActive,
        }
    }
}
