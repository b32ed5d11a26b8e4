//! The closed JSON value type.
//!
//! A `Value` is one of seven variants: the six JSON shapes plus `Error`,
//! which carries a failure as data so that navigation and conversion chains
//! short-circuit without raising until a typed result is requested.

mod raw;
mod serialize;

use std::fmt;

use indexmap::IndexMap;
pub use serde_json::Number;

use crate::error::JsonError;

/// Object payload. Keeps insertion order; equality ignores order.
pub type Object = IndexMap<String, Value>;

/// Array payload.
pub type Array = Vec<Value>;

#[derive(Debug, Clone, Default)]
pub enum Value {
    Object(Object),
    Array(Array),
    String(String),
    /// Preserves the integer/float distinction of the source.
    Number(Number),
    Bool(bool),
    #[default]
    Null,
    Error(JsonError),
}

impl Value {
    /// An empty object, the starting point for building documents.
    pub fn object() -> Self {
        Value::Object(Object::new())
    }

    /// An empty array.
    pub fn array() -> Self {
        Value::Array(Array::new())
    }

    /// Name of the active variant, used in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Object(_) => "object",
            Value::Array(_) => "array",
            Value::String(_) => "string",
            Value::Number(_) => "number",
            Value::Bool(_) => "bool",
            Value::Null => "null",
            Value::Error(_) => "error",
        }
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    pub fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Value::Error(_))
    }

    /// The carried error, only for the `Error` variant.
    pub fn error_value(&self) -> Option<&JsonError> {
        match self {
            Value::Error(err) => Some(err),
            _ => None,
        }
    }

    /// Turn the carried error (if any) into an `Err`.
    pub fn into_result(self) -> Result<Value, JsonError> {
        match self {
            Value::Error(err) => Err(err),
            other => Ok(other),
        }
    }

    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_object_mut(&mut self) -> Option<&mut Object> {
        match self {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_array_mut(&mut self) -> Option<&mut Array> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<&Number> {
        match self {
            Value::Number(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        self.as_number().and_then(Number::as_i64)
    }

    pub fn as_u64(&self) -> Option<u64> {
        self.as_number().and_then(Number::as_u64)
    }

    pub fn as_f64(&self) -> Option<f64> {
        self.as_number().and_then(Number::as_f64)
    }

    /// Number of children for containers, `0` for everything else.
    pub fn len(&self) -> usize {
        match self {
            Value::Object(map) => map.len(),
            Value::Array(items) => items.len(),
            _ => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ── Equality ──────────────────────────────────────────────────────────────

/// Structural equality over the data-bearing variants.
///
/// `Error` is never equal to anything, itself included.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Object(a), Value::Object(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Null, Value::Null) => true,
            _ => false,
        }
    }
}

// ── Textual description ───────────────────────────────────────────────────

impl fmt::Display for Value {
    /// Compact JSON for data; `<error: ...>` for a carried error.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Object(map) => {
                f.write_str("{")?;
                for (i, (key, val)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write_json_string(f, key)?;
                    write!(f, ":{val}")?;
                }
                f.write_str("}")
            }
            Value::Array(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Value::String(s) => write_json_string(f, s),
            Value::Number(n) => write!(f, "{n}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Null => f.write_str("null"),
            Value::Error(err) => write!(f, "<error: {err}>"),
        }
    }
}

fn write_json_string(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    let quoted = serde_json::to_string(s).map_err(|_| fmt::Error)?;
    f.write_str(&quoted)
}

// ── Conversions from native literals ──────────────────────────────────────

impl From<JsonError> for Value {
    fn from(err: JsonError) -> Self {
        Value::Error(err)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

macro_rules! from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(n: $ty) -> Self {
                    Value::Number(Number::from(n))
                }
            }
        )*
    };
}

from_integer!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl From<f64> for Value {
    /// Non-finite floats have no JSON form and become `Null`.
    fn from(f: f64) -> Self {
        Number::from_f64(f).map_or(Value::Null, Value::Number)
    }
}

impl From<f32> for Value {
    fn from(f: f32) -> Self {
        Value::from(f64::from(f))
    }
}

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        Value::Number(n)
    }
}

impl From<Array> for Value {
    fn from(items: Array) -> Self {
        Value::Array(items)
    }
}

impl From<Object> for Value {
    fn from(map: Object) -> Self {
        Value::Object(map)
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Null
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::Null, Into::into)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Value {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Value::Object(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::json;

    #[test]
    fn test_type_names() {
        assert_eq!(Value::object().type_name(), "object");
        assert_eq!(Value::array().type_name(), "array");
        assert_eq!(Value::from("s").type_name(), "string");
        assert_eq!(Value::from(1).type_name(), "number");
        assert_eq!(Value::from(true).type_name(), "bool");
        assert_eq!(Value::Null.type_name(), "null");
        assert_eq!(
            Value::Error(JsonError::message("x")).type_name(),
            "error"
        );
    }

    #[test]
    fn test_error_never_equal() {
        let err = Value::Error(JsonError::message("x"));
        assert_ne!(err, err.clone());
        assert_ne!(err, Value::Null);
    }

    #[test]
    fn test_object_equality_ignores_key_order() {
        assert_eq!(json!({"a": 1, "b": [true]}), json!({"b": [true], "a": 1}));
        assert_ne!(json!({"a": 1}), json!({"a": 1.0}));
    }

    #[test]
    fn test_display_is_compact_json() {
        let v = json!({"a": [1, 2.5, null], "b": "q\"t"});
        assert_eq!(v.to_string(), r#"{"a":[1,2.5,null],"b":"q\"t"}"#);
        let e = Value::Error(JsonError::message("bad"));
        assert_eq!(e.to_string(), "<error: bad>");
    }

    #[test]
    fn test_error_value_accessor() {
        assert!(Value::Null.error_value().is_none());
        let e = Value::from(JsonError::message("bad"));
        assert!(e.is_error());
        assert_eq!(e.error_value().map(JsonError::kind), Some("message"));
        assert!(e.into_result().is_err());
    }

    #[test]
    fn test_accessors() {
        let v = json!({"n": 3, "f": 1.5, "s": "x", "b": false, "a": [1]});
        let map = v.as_object().unwrap();
        assert_eq!(map["n"].as_i64(), Some(3));
        assert_eq!(map["n"].as_u64(), Some(3));
        assert_eq!(map["f"].as_i64(), None);
        assert_eq!(map["f"].as_f64(), Some(1.5));
        assert_eq!(map["s"].as_str(), Some("x"));
        assert_eq!(map["b"].as_bool(), Some(false));
        assert_eq!(map["a"].len(), 1);
        assert_eq!(v.len(), 5);
        assert!(Value::from(1).is_empty());
    }

    #[test]
    fn test_from_literals() {
        assert_eq!(Value::from(f64::NAN), Value::Null);
        assert_eq!(Value::from(Some(2u8)), json!(2));
        assert_eq!(Value::from(None::<i32>), Value::Null);
        let built: Value = vec![("k", 1)].into_iter().collect();
        assert_eq!(built, json!({"k": 1}));
    }
}
