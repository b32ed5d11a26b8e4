use super::{DecodeTransform, EncodeTransform, Transform};
use crate::error::JsonError;
use crate::value::Value;

/// Enum variants stored as raw string or number values.
///
/// ```
/// use jsonmap::{EnumTransform, Value};
///
/// #[derive(Debug, Clone, PartialEq)]
/// enum Role { Admin, Guest }
///
/// let roles = EnumTransform::new([("admin", Role::Admin), ("guest", Role::Guest)]);
/// assert_eq!(Value::from("guest").transform(&roles).unwrap(), Role::Guest);
/// assert!(Value::from("root").transform(&roles).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct EnumTransform<T> {
    table: Vec<(Value, T)>,
}

impl<T> EnumTransform<T> {
    pub fn new<R, I>(table: I) -> Self
    where
        R: Into<Value>,
        I: IntoIterator<Item = (R, T)>,
    {
        Self {
            table: table
                .into_iter()
                .map(|(raw, variant)| (raw.into(), variant))
                .collect(),
        }
    }
}

impl<T> Transform for EnumTransform<T> {
    type Json = Value;
    type Target = T;
}

impl<T: Clone> DecodeTransform for EnumTransform<T> {
    fn decode(&self, json: &Value) -> Result<T, JsonError> {
        self.table
            .iter()
            .find(|(raw, _)| raw == json)
            .map(|(_, variant)| variant.clone())
            .ok_or_else(|| JsonError::Transform {
                value: json.to_string(),
                reason: "no matching variant".to_string(),
            })
    }
}

impl<T: PartialEq + std::fmt::Debug> EncodeTransform for EnumTransform<T> {
    fn encode(&self, target: &T) -> Result<Value, JsonError> {
        self.table
            .iter()
            .find(|(_, variant)| variant == target)
            .map(|(raw, _)| raw.clone())
            .ok_or_else(|| JsonError::Transform {
                value: format!("{target:?}"),
                reason: "variant has no raw value".to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::json;

    #[derive(Debug, Clone, Copy, PartialEq, Default)]
    enum Level {
        #[default]
        Low,
        High,
        Unmapped,
    }

    fn levels() -> EnumTransform<Level> {
        EnumTransform::new([(1, Level::Low), (5, Level::High)])
    }

    #[test]
    fn test_numeric_raw_values() {
        assert_eq!(json!(5).transform(&levels()).unwrap(), Level::High);
        assert_eq!(json!(2).transform_or_default(&levels()), Level::Low);
        assert_eq!(
            Value::encode_transformed(&Level::High, &levels()).unwrap(),
            json!(5)
        );
    }

    #[test]
    fn test_unmapped_variant() {
        let err = Value::encode_transformed(&Level::Unmapped, &levels()).unwrap_err();
        assert!(matches!(err, JsonError::Transform { ref value, .. } if value == "Unmapped"));
    }

    #[test]
    fn test_error_input_propagates() {
        let err = Value::parse("{").transform(&levels()).unwrap_err();
        assert!(matches!(err, JsonError::Init(_)));
    }
}
