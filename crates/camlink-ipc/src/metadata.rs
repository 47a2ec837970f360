//! Recursive metadata values carried across the host boundary.
//!
//! Metadata is opaque pass-through data attached to a capture request and
//! returned verbatim with the result. The set of value shapes is closed;
//! anything outside it is rejected instead of being coerced or silently
//! dropped.

use std::collections::BTreeMap;

use serde_json::{Map, Number, Value};

use crate::error::CodecError;

/// A string-keyed metadata mapping.
pub type MetadataMap = BTreeMap<String, MetadataValue>;

/// Largest magnitude at which every whole number is still exactly
/// representable as an IEEE 754 double (2^53).
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// A single metadata value.
#[derive(Debug, Clone, PartialEq)]
pub enum MetadataValue {
    /// An explicit null.
    Null,

    /// A boolean.
    Bool(bool),

    /// A number. Host numbers are always IEEE 754 doubles.
    Number(f64),

    /// A string.
    String(String),

    /// An ordered sequence of values.
    Sequence(Vec<MetadataValue>),

    /// A nested string-keyed mapping.
    Mapping(MetadataMap),
}

impl MetadataValue {
    /// Decodes a host value. Fails closed: an integer that cannot be held
    /// in a double without loss is rejected rather than truncated.
    pub fn from_json(value: &Value) -> Result<Self, CodecError> {
        match value {
            Value::Null => Ok(Self::Null),
            Value::Bool(flag) => Ok(Self::Bool(*flag)),
            Value::Number(number) => number_from_json(number).map(Self::Number),
            Value::String(text) => Ok(Self::String(text.clone())),
            Value::Array(items) => items
                .iter()
                .map(Self::from_json)
                .collect::<Result<Vec<_>, _>>()
                .map(Self::Sequence),
            Value::Object(entries) => map_from_entries(entries).map(Self::Mapping),
        }
    }

    /// Encodes the value back into the host representation.
    pub fn to_json(&self) -> Result<Value, CodecError> {
        match self {
            Self::Null => Ok(Value::Null),
            Self::Bool(flag) => Ok(Value::Bool(*flag)),
            Self::Number(number) => number_to_json(*number).map(Value::Number),
            Self::String(text) => Ok(Value::String(text.clone())),
            Self::Sequence(items) => items
                .iter()
                .map(MetadataValue::to_json)
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array),
            Self::Mapping(entries) => map_to_json(entries),
        }
    }
}

/// Decodes a full metadata mapping from a host value.
pub fn map_from_json(value: &Value) -> Result<MetadataMap, CodecError> {
    match value {
        Value::Object(entries) => map_from_entries(entries),
        other => Err(CodecError::InvalidShape("metadata", other.to_string())),
    }
}

/// Encodes a metadata mapping into a host value.
pub fn map_to_json(map: &MetadataMap) -> Result<Value, CodecError> {
    let mut entries = Map::with_capacity(map.len());
    for (key, value) in map {
        entries.insert(key.clone(), value.to_json()?);
    }
    Ok(Value::Object(entries))
}

fn map_from_entries(entries: &Map<String, Value>) -> Result<MetadataMap, CodecError> {
    entries
        .iter()
        .map(|(key, value)| Ok((key.clone(), MetadataValue::from_json(value)?)))
        .collect()
}

fn number_from_json(number: &Number) -> Result<f64, CodecError> {
    if let Some(signed) = number.as_i64() {
        let double = signed as f64;
        if double as i64 != signed {
            return Err(CodecError::UnsupportedType(format!(
                "integer {signed} exceeds double precision"
            )));
        }
        return Ok(double);
    }
    if let Some(unsigned) = number.as_u64() {
        let double = unsigned as f64;
        if double as u64 != unsigned {
            return Err(CodecError::UnsupportedType(format!(
                "integer {unsigned} exceeds double precision"
            )));
        }
        return Ok(double);
    }
    number
        .as_f64()
        .ok_or_else(|| CodecError::UnsupportedType(format!("number {number} is not representable")))
}

fn number_to_json(value: f64) -> Result<Number, CodecError> {
    if !value.is_finite() {
        return Err(CodecError::UnsupportedType(format!(
            "non-finite number {value}"
        )));
    }
    // Whole numbers re-encode as integers, matching how the host wrote them.
    if value.fract() == 0.0 && value.abs() <= MAX_EXACT_INTEGER {
        return Ok(Number::from(value as i64));
    }
    Number::from_f64(value)
        .ok_or_else(|| CodecError::UnsupportedType(format!("number {value} is not representable")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scalars_round_trip() {
        let raw = json!({
            "none": null,
            "flag": true,
            "count": 3,
            "ratio": 0.25,
            "name": "clip",
        });

        let decoded = map_from_json(&raw).unwrap();
        assert_eq!(decoded["none"], MetadataValue::Null);
        assert_eq!(decoded["flag"], MetadataValue::Bool(true));
        assert_eq!(decoded["count"], MetadataValue::Number(3.0));
        assert_eq!(decoded["ratio"], MetadataValue::Number(0.25));
        assert_eq!(decoded["name"], MetadataValue::String("clip".into()));

        assert_eq!(map_to_json(&decoded).unwrap(), raw);
    }

    #[test]
    fn test_nested_collections_round_trip() {
        let raw = json!({
            "tags": ["a", "b", ["nested", null]],
            "payload": {
                "inner": { "depth": 2 },
                "values": [1, 2.5, false],
            },
        });

        let decoded = map_from_json(&raw).unwrap();
        assert_eq!(map_to_json(&decoded).unwrap(), raw);
    }

    #[test]
    fn test_value_level_identity() {
        let original = MetadataValue::Mapping(MetadataMap::from([
            ("seq".to_owned(), MetadataValue::Sequence(vec![
                MetadataValue::Number(-4.5),
                MetadataValue::Null,
            ])),
            ("ok".to_owned(), MetadataValue::Bool(false)),
        ]));

        let encoded = original.to_json().unwrap();
        assert_eq!(MetadataValue::from_json(&encoded).unwrap(), original);
    }

    #[test]
    fn test_imprecise_integer_rejected() {
        // 2^53 + 1 has no exact double representation.
        let raw = json!(9_007_199_254_740_993_i64);
        let err = MetadataValue::from_json(&raw).unwrap_err();
        assert!(matches!(err, CodecError::UnsupportedType(_)));
    }

    #[test]
    fn test_large_unsigned_rejected() {
        let raw = json!(u64::MAX);
        let err = MetadataValue::from_json(&raw).unwrap_err();
        assert!(matches!(err, CodecError::UnsupportedType(_)));
    }

    #[test]
    fn test_non_finite_number_rejected_on_encode() {
        let err = MetadataValue::Number(f64::NAN).to_json().unwrap_err();
        assert!(matches!(err, CodecError::UnsupportedType(_)));
    }

    #[test]
    fn test_non_mapping_metadata_rejected() {
        let err = map_from_json(&json!("not a map")).unwrap_err();
        assert!(matches!(err, CodecError::InvalidShape("metadata", _)));
    }

    #[test]
    fn test_whole_doubles_encode_as_integers() {
        let encoded = MetadataValue::Number(4321.0).to_json().unwrap();
        assert_eq!(encoded, json!(4321));
    }
}
