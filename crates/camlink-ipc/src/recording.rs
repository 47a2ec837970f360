//! Recorded media units produced by a capture session.

use serde::{Deserialize, Serialize};
use url::Url;

/// Placement of a video on the camera preview canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// The x coordinate of the top-left corner.
    pub x: f64,

    /// The y coordinate of the top-left corner.
    pub y: f64,

    /// The width.
    pub width: f64,

    /// The height.
    pub height: f64,
}

/// An individual recorded video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Video {
    /// Location of the video file, typically in temporary storage.
    pub uri: Url,

    /// Preview placement. Only present for multi-video capture, where
    /// each video occupies part of the canvas.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rect: Option<Rect>,
}

/// A group of videos produced in one take.
///
/// One video for single camera output, two for dual camera output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recording {
    /// The individual videos of the recording.
    pub videos: Vec<Video>,

    /// Aggregate duration over all videos, in whole milliseconds.
    pub duration: u64,
}
