//! `serde` support so a [`Value`] can sit inside any serde data structure.

use serde::de::{Deserialize, Deserializer};
use serde::ser::{Error as _, Serialize, SerializeMap, SerializeSeq, Serializer};

use super::Value;

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Object(map) => {
                let mut out = serializer.serialize_map(Some(map.len()))?;
                for (key, val) in map {
                    out.serialize_entry(key, val)?;
                }
                out.end()
            }
            Value::Array(items) => {
                let mut out = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    out.serialize_element(item)?;
                }
                out.end()
            }
            Value::String(s) => serializer.serialize_str(s),
            Value::Number(n) => n.serialize(serializer),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Null => serializer.serialize_unit(),
            Value::Error(err) => Err(S::Error::custom(err)),
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        serde_json::Value::deserialize(deserializer).map(Value::from_raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::JsonError;
    use crate::json;

    #[test]
    fn test_serialize_matches_render() {
        let v = json!({"a": [1, "x", null, true]});
        assert_eq!(serde_json::to_string(&v).unwrap(), v.render().unwrap());
    }

    #[test]
    fn test_serialize_error_fails() {
        let v = Value::Array(vec![Value::Error(JsonError::message("nope"))]);
        let err = serde_json::to_string(&v).unwrap_err();
        assert!(err.to_string().contains("nope"));
    }

    #[test]
    fn test_deserialize_from_text() {
        let v: Value = serde_json::from_str(r#"{"k": [1.5]}"#).unwrap();
        assert_eq!(v, json!({"k": [1.5]}));
    }
}
