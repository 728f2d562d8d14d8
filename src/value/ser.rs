use std::borrow::Cow;

use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use serde_json::{Map, Number};

use super::write::write_quoted;
use super::{sorted_entries, Value};

/// Resolve the escapes in stored string text, so serde sees the characters
/// the source literal denotes rather than its spelling. Text whose escapes do
/// not form valid JSON is passed through unchanged.
pub(crate) fn unescape(text: &str) -> Cow<'_, str> {
    if !text.bytes().any(|byte| byte == b'\\' || byte < 0x20) {
        return Cow::Borrowed(text);
    }
    let mut literal = String::with_capacity(text.len() + 2);
    write_quoted(text, &mut literal);
    match serde_json::from_str::<String>(&literal) {
        Ok(decoded) => Cow::Owned(decoded),
        Err(_) => Cow::Borrowed(text),
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(value) => serializer.serialize_bool(*value),
            Value::Integer(value) => serializer.serialize_i64(*value),
            Value::Float(value) => serializer.serialize_f64(*value),
            Value::String(value) => serializer.serialize_str(&unescape(value)),
            Value::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Object(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in sorted_entries(entries) {
                    map.serialize_entry(&*unescape(key), value)?;
                }
                map.end()
            }
        }
    }
}

impl From<Value> for serde_json::Value {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => serde_json::Value::Null,
            Value::Bool(value) => serde_json::Value::Bool(value),
            Value::Integer(value) => serde_json::Value::Number(Number::from(value)),
            Value::Float(value) => Number::from_f64(value)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::String(value) => {
                let decoded = match unescape(&value) {
                    Cow::Owned(decoded) => Some(decoded),
                    Cow::Borrowed(_) => None,
                };
                serde_json::Value::String(decoded.unwrap_or(value))
            }
            Value::Array(items) => {
                serde_json::Value::Array(items.into_iter().map(Into::into).collect())
            }
            Value::Object(entries) => {
                // Keys come out of a hash map; sort them so output is stable.
                let mut entries: Vec<_> = entries.into_iter().collect();
                entries.sort_by(|(a, _), (b, _)| a.cmp(b));
                let map: Map<String, serde_json::Value> = entries
                    .into_iter()
                    .map(|(key, value)| (unescape(&key).into_owned(), value.into()))
                    .collect();
                serde_json::Value::Object(map)
            }
        }
    }
}

impl From<&Value> for serde_json::Value {
    fn from(value: &Value) -> Self {
        value.clone().into()
    }
}
