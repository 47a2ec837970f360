//! Host-supplied capture configuration.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::SettingsError;

/// Validated configuration for one capture session.
///
/// Both fields are independently optional. Without a license the
/// underlying engine runs in evaluation mode with a watermark.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraSettings {
    /// The license key of the camera SDK.
    pub license: Option<String>,

    /// Unique id tied to the host application's user.
    pub user_id: Option<String>,
}

impl CameraSettings {
    /// Decodes settings from the untyped host object.
    ///
    /// JSON `null` and an absent argument both count as missing. A field
    /// holding a non-string value reads as absent rather than failing the
    /// call, so loosely typed hosts degrade gracefully.
    pub fn from_value(raw: Option<&Value>) -> Result<Self, SettingsError> {
        let raw = match raw {
            Some(value) if !value.is_null() => value,
            _ => return Err(SettingsError::Missing),
        };
        let entries = raw
            .as_object()
            .ok_or_else(|| SettingsError::Malformed(raw.to_string()))?;
        Ok(Self {
            license: string_field(entries, "license"),
            user_id: string_field(entries, "userId"),
        })
    }
}

fn string_field(entries: &Map<String, Value>, key: &str) -> Option<String> {
    entries.get(key).and_then(Value::as_str).map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_full_settings() {
        let raw = json!({ "license": "abc", "userId": "u1" });
        let settings = CameraSettings::from_value(Some(&raw)).unwrap();
        assert_eq!(settings.license.as_deref(), Some("abc"));
        assert_eq!(settings.user_id.as_deref(), Some("u1"));
    }

    #[test]
    fn test_empty_settings_decode_to_evaluation_mode() {
        let raw = json!({});
        let settings = CameraSettings::from_value(Some(&raw)).unwrap();
        assert_eq!(settings, CameraSettings::default());
    }

    #[test]
    fn test_absent_settings_are_missing() {
        assert!(matches!(
            CameraSettings::from_value(None),
            Err(SettingsError::Missing)
        ));
        assert!(matches!(
            CameraSettings::from_value(Some(&Value::Null)),
            Err(SettingsError::Missing)
        ));
    }

    #[test]
    fn test_non_mapping_settings_are_malformed() {
        let raw = json!("license");
        assert!(matches!(
            CameraSettings::from_value(Some(&raw)),
            Err(SettingsError::Malformed(_))
        ));
    }

    #[test]
    fn test_wrongly_typed_fields_read_as_absent() {
        let raw = json!({ "license": 7, "userId": { "id": "u1" } });
        let settings = CameraSettings::from_value(Some(&raw)).unwrap();
        assert_eq!(settings.license, None);
        assert_eq!(settings.user_id, None);
    }

    #[test]
    fn test_serde_round_trip_uses_camel_case() {
        let settings = CameraSettings {
            license: Some("abc".into()),
            user_id: Some("u1".into()),
        };
        let encoded = serde_json::to_value(&settings).unwrap();
        assert_eq!(encoded, json!({ "license": "abc", "userId": "u1" }));
        let decoded: CameraSettings = serde_json::from_value(encoded).unwrap();
        assert_eq!(decoded, settings);
    }
}
