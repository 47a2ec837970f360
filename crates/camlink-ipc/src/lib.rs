//! Typed host<->native models for the camlink camera bridge.
//!
//! This crate defines the data that crosses the JavaScript boundary in
//! both directions, plus the codecs translating between the untyped host
//! representation (`serde_json::Value`) and the typed records the capture
//! side works with. Everything here is a pure transform; no state.

mod error;
mod metadata;
mod recording;
mod result;
mod settings;

pub use error::{CodecError, SettingsError};
pub use metadata::{map_from_json, map_to_json, MetadataMap, MetadataValue};
pub use recording::{Recording, Rect, Video};
pub use result::{CameraResult, CaptureOutput};
pub use settings::CameraSettings;
