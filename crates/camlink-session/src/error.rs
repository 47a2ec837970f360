//! Error types for the session layer.

use thiserror::Error;

/// Errors from the single-slot session correlator.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CorrelatorError {
    /// A completion channel is already registered for an in-flight
    /// session.
    #[error("A capture session is already pending")]
    AlreadyPending,
}

/// Errors from launching a capture session.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LaunchError {
    /// The previous session has not resolved yet.
    #[error("A capture session is already in flight")]
    SessionActive,
}

impl From<CorrelatorError> for LaunchError {
    fn from(err: CorrelatorError) -> Self {
        match err {
            CorrelatorError::AlreadyPending => Self::SessionActive,
        }
    }
}

/// Terminal failure of a session that captured but could not deliver.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The surface finished but could not finalize its artifact.
    #[error("Failed to export the artifact: {0:#}")]
    ExportFailed(anyhow::Error),
}
