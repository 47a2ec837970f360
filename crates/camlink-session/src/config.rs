//! Engine configuration and the per-session capture request.

use camlink_ipc::{CameraSettings, MetadataMap};
use serde::{Deserialize, Serialize};
use url::Url;

/// Configuration handed to the underlying capture engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfiguration {
    /// The license key. Absent runs the engine in evaluation mode with a
    /// watermark.
    pub license: Option<String>,

    /// Id of the host application's user, used for monthly-active-user
    /// accounting.
    pub user_id: Option<String>,
}

impl EngineConfiguration {
    /// Creates a configuration from a license and user id.
    pub fn new(license: Option<String>, user_id: Option<String>) -> Self {
        Self { license, user_id }
    }

    /// Derives the configuration for a validated settings record.
    pub fn from_settings(settings: &CameraSettings) -> Self {
        Self::new(settings.license.clone(), settings.user_id.clone())
    }

    /// True when no license is set and the engine will watermark output.
    pub fn is_evaluation(&self) -> bool {
        self.license.is_none()
    }
}

/// How a session records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureMode {
    /// Plain capture with no reference video.
    Standard,

    /// Capture while the referenced video plays.
    Reaction {
        /// Absolute reference to the video being reacted to.
        source: Url,
    },
}

/// Everything the capture surface needs to run one session.
///
/// Built once per host call by the launcher.
#[derive(Debug, Clone)]
pub struct CaptureRequest {
    /// Engine configuration derived from the host settings.
    pub engine: EngineConfiguration,

    /// The capture mode.
    pub mode: CaptureMode,

    /// Opaque host metadata, forwarded to the surface untouched.
    pub metadata: MetadataMap,
}
