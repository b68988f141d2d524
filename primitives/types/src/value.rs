use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Number, Value};
use thiserror::Error;

use crate::{BYTES_LITERAL_MARKER, ENUM_VALUE_LITERAL_MARKER};

/// Errors raised while normalizing a JSON option value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueError {
    /// A bytes marker held something other than integers in `0..=255`.
    #[error("json bytes must be an array of numbers in the 0 to 255 range")]
    InvalidBytes,
    /// An enum literal marker did not carry a string `name`.
    #[error("enum value literal must carry a string name")]
    InvalidEnumLiteral,
}

/// A custom option value.
///
/// Mappings are ordered by key so that every rendering of the same value is identical.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum OptionValue {
    /// JSON `null`. Only survives at the top level of a value.
    #[default]
    Null,
    /// Boolean literal.
    Bool(bool),
    /// Numeric literal, integral or floating point.
    Number(Number),
    /// String literal.
    String(String),
    /// Byte-string literal.
    Bytes(Vec<u8>),
    /// Bare enum value identifier, rendered unquoted.
    EnumLiteral(String),
    /// Message literal.
    Mapping(BTreeMap<String, OptionValue>),
    /// Repeated value.
    Sequence(Vec<OptionValue>),
}

impl OptionValue {
    /// Borrow the entries of a message literal.
    pub fn as_mapping(&self) -> Option<&BTreeMap<String, OptionValue>> {
        match self {
            OptionValue::Mapping(map) => Some(map),
            _ => None,
        }
    }

    /// Short name of the value shape, used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            OptionValue::Null => "null",
            OptionValue::Bool(_) => "bool",
            OptionValue::Number(_) => "number",
            OptionValue::String(_) => "string",
            OptionValue::Bytes(_) => "bytes",
            OptionValue::EnumLiteral(_) => "enum literal",
            OptionValue::Mapping(_) => "mapping",
            OptionValue::Sequence(_) => "sequence",
        }
    }

    /// Build a value from JSON, rewriting bytes and enum literal markers.
    ///
    /// `null` entries inside mappings and sequences are dropped.
    pub fn from_json(value: Value) -> Result<Self, ValueError> {
        match value {
            Value::Null => Ok(OptionValue::Null),
            Value::Bool(b) => Ok(OptionValue::Bool(b)),
            Value::Number(n) => Ok(OptionValue::Number(n)),
            Value::String(s) => Ok(OptionValue::String(s)),
            Value::Array(items) => items
                .into_iter()
                .filter(|item| !item.is_null())
                .map(OptionValue::from_json)
                .collect::<Result<Vec<_>, _>>()
                .map(OptionValue::Sequence),
            Value::Object(map) => Self::from_json_object(map),
        }
    }

    fn from_json_object(mut map: Map<String, Value>) -> Result<Self, ValueError> {
        match map.get("reserved").and_then(Value::as_str) {
            Some(ENUM_VALUE_LITERAL_MARKER) => {
                return match map.remove("name") {
                    Some(Value::String(name)) => Ok(OptionValue::EnumLiteral(name)),
                    _ => Err(ValueError::InvalidEnumLiteral),
                };
            }
            Some(BYTES_LITERAL_MARKER) => {
                let items = match map.remove("value") {
                    Some(Value::Array(items)) => items,
                    _ => return Err(ValueError::InvalidBytes),
                };
                return items
                    .iter()
                    .map(json_byte)
                    .collect::<Result<Vec<_>, _>>()
                    .map(OptionValue::Bytes);
            }
            _ => {}
        }

        let mut entries = BTreeMap::new();
        for (key, value) in map {
            if value.is_null() {
                continue;
            }
            entries.insert(key, OptionValue::from_json(value)?);
        }
        Ok(OptionValue::Mapping(entries))
    }

    /// Encode the value back to JSON, using the marker objects for bytes and enum literals.
    pub fn to_json(&self) -> Value {
        match self {
            OptionValue::Null => Value::Null,
            OptionValue::Bool(b) => Value::Bool(*b),
            OptionValue::Number(n) => Value::Number(n.clone()),
            OptionValue::String(s) => Value::String(s.clone()),
            OptionValue::Bytes(bytes) => serde_json::json!({
                "reserved": BYTES_LITERAL_MARKER,
                "value": bytes,
            }),
            OptionValue::EnumLiteral(name) => serde_json::json!({
                "reserved": ENUM_VALUE_LITERAL_MARKER,
                "name": name,
            }),
            OptionValue::Mapping(map) =>
                Value::Object(map.iter().map(|(k, v)| (k.clone(), v.to_json())).collect()),
            OptionValue::Sequence(items) => Value::Array(items.iter().map(Self::to_json).collect()),
        }
    }
}

fn json_byte(value: &Value) -> Result<u8, ValueError> {
    let number = value.as_f64().ok_or(ValueError::InvalidBytes)?;
    if number.fract() != 0.0 || !(0.0..=255.0).contains(&number) {
        return Err(ValueError::InvalidBytes);
    }
    Ok(number as u8)
}

impl TryFrom<Value> for OptionValue {
    type Error = ValueError;

    fn try_from(value: Value) -> Result<Self, Self::Error> { OptionValue::from_json(value) }
}

impl<'de> Deserialize<'de> for OptionValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Value::deserialize(deserializer)?;
        OptionValue::from_json(raw).map_err(serde::de::Error::custom)
    }
}

impl Serialize for OptionValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}
