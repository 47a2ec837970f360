//! The outcome record of a completed capture session.

use serde_json::{Map, Value};

use crate::error::CodecError;
use crate::metadata::{self, MetadataMap};
use crate::recording::Recording;

/// What a capture session produced.
///
/// A session yields exactly one of these two shapes; representing them as
/// a tagged union makes "both" and "neither" impossible to construct.
#[derive(Debug, Clone, PartialEq)]
pub enum CaptureOutput {
    /// Standard (or dual-camera) capture.
    Recording {
        /// The recordings of the session, in capture order.
        recordings: Vec<Recording>,
    },

    /// Reaction capture: recorded while a reference video was playing.
    Reaction {
        /// The video that was reacted to.
        video: Recording,

        /// The recordings of the session, in capture order.
        recordings: Vec<Recording>,
    },
}

/// The result of a camera session, as delivered to the host.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraResult {
    /// The captured output.
    pub output: CaptureOutput,

    /// Metadata attached to the originating request.
    pub metadata: MetadataMap,
}

impl CameraResult {
    /// Encodes the result into the untyped host shape.
    ///
    /// Standard capture yields `{"recordings": [...], "metadata": {...}}`;
    /// reaction capture adds the reference recording under `"video"`.
    pub fn to_value(&self) -> Result<Value, CodecError> {
        let mut entries = Map::new();
        match &self.output {
            CaptureOutput::Recording { recordings } => {
                entries.insert("recordings".to_owned(), recordings_to_value(recordings)?);
            }
            CaptureOutput::Reaction { video, recordings } => {
                entries.insert("video".to_owned(), recording_to_value(video)?);
                entries.insert("recordings".to_owned(), recordings_to_value(recordings)?);
            }
        }
        entries.insert("metadata".to_owned(), metadata::map_to_json(&self.metadata)?);
        Ok(Value::Object(entries))
    }

    /// Decodes a previously encoded result, e.g. one persisted by the
    /// host. Fails closed: a payload matching neither known shape is
    /// rejected rather than guessed at.
    pub fn from_value(value: &Value) -> Result<Self, CodecError> {
        let entries = value
            .as_object()
            .ok_or_else(|| CodecError::InvalidShape("camera result", value.to_string()))?;

        let recordings = entries.get("recordings").ok_or_else(|| {
            CodecError::InvalidShape("camera result", "missing recordings".to_owned())
        })?;
        let recordings: Vec<Recording> = serde_json::from_value(recordings.clone())
            .map_err(|err| CodecError::InvalidShape("recordings", err.to_string()))?;

        let output = match entries.get("video") {
            Some(video) => CaptureOutput::Reaction {
                video: serde_json::from_value(video.clone())
                    .map_err(|err| CodecError::InvalidShape("reaction video", err.to_string()))?,
                recordings,
            },
            None => CaptureOutput::Recording { recordings },
        };

        let metadata = match entries.get("metadata") {
            Some(value) => metadata::map_from_json(value)?,
            None => MetadataMap::new(),
        };

        Ok(Self { output, metadata })
    }
}

fn recording_to_value(recording: &Recording) -> Result<Value, CodecError> {
    serde_json::to_value(recording)
        .map_err(|err| CodecError::UnsupportedType(err.to_string()))
}

fn recordings_to_value(recordings: &[Recording]) -> Result<Value, CodecError> {
    serde_json::to_value(recordings)
        .map_err(|err| CodecError::UnsupportedType(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::MetadataValue;
    use crate::recording::Video;
    use serde_json::json;
    use url::Url;

    fn clip(uri: &str) -> Video {
        Video {
            uri: Url::parse(uri).unwrap(),
            rect: None,
        }
    }

    #[test]
    fn test_standard_result_shape() {
        let result = CameraResult {
            output: CaptureOutput::Recording {
                recordings: vec![Recording {
                    videos: vec![clip("file:///tmp/a.mp4"), clip("file:///tmp/b.mp4")],
                    duration: 4321,
                }],
            },
            metadata: MetadataMap::new(),
        };

        let encoded = result.to_value().unwrap();
        assert_eq!(
            encoded,
            json!({
                "recordings": [{
                    "videos": [
                        { "uri": "file:///tmp/a.mp4" },
                        { "uri": "file:///tmp/b.mp4" },
                    ],
                    "duration": 4321,
                }],
                "metadata": {},
            })
        );
    }

    #[test]
    fn test_reaction_result_shape() {
        let result = CameraResult {
            output: CaptureOutput::Reaction {
                video: Recording {
                    videos: vec![clip("file:///tmp/source.mp4")],
                    duration: 9000,
                },
                recordings: vec![Recording {
                    videos: vec![clip("file:///tmp/take.mp4")],
                    duration: 8700,
                }],
            },
            metadata: MetadataMap::from([(
                "take".to_owned(),
                MetadataValue::Number(2.0),
            )]),
        };

        let encoded = result.to_value().unwrap();
        assert_eq!(encoded["video"]["duration"], json!(9000));
        assert_eq!(encoded["recordings"][0]["duration"], json!(8700));
        assert_eq!(encoded["metadata"], json!({ "take": 2 }));
    }

    #[test]
    fn test_round_trip_preserves_the_variant() {
        let result = CameraResult {
            output: CaptureOutput::Reaction {
                video: Recording {
                    videos: vec![clip("https://example.com/v.mp4")],
                    duration: 100,
                },
                recordings: vec![],
            },
            metadata: MetadataMap::from([("k".to_owned(), MetadataValue::Null)]),
        };

        let decoded = CameraResult::from_value(&result.to_value().unwrap()).unwrap();
        assert_eq!(decoded, result);
    }

    #[test]
    fn test_unknown_shape_fails_closed() {
        let err = CameraResult::from_value(&json!({ "metadata": {} })).unwrap_err();
        assert!(matches!(err, CodecError::InvalidShape("camera result", _)));

        let err = CameraResult::from_value(&json!([1, 2, 3])).unwrap_err();
        assert!(matches!(err, CodecError::InvalidShape("camera result", _)));
    }

    #[test]
    fn test_unsupported_metadata_propagates_on_encode() {
        let result = CameraResult {
            output: CaptureOutput::Recording { recordings: vec![] },
            metadata: MetadataMap::from([(
                "bad".to_owned(),
                MetadataValue::Number(f64::INFINITY),
            )]),
        };
        assert!(matches!(
            result.to_value(),
            Err(CodecError::UnsupportedType(_))
        ));
    }
}
