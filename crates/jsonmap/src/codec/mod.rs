//! Decode/encode contracts and the three extraction modes.
//!
//! [`FromJson`] is the throwing conversion every other mode delegates to:
//!
//! | mode      | entry point                     | on failure          |
//! |-----------|---------------------------------|---------------------|
//! | throwing  | [`Value::decode`]               | `Err(JsonError)`    |
//! | optional  | [`Value::try_decode`]           | `None`              |
//! | defaulted | [`Value::decode_or_default`]    | `T::default()`      |
//!
//! Each has a `*_with` twin taking an explicit [`Config`].

mod container;
mod external;
mod fields;
mod scalar;

pub use fields::{encode_fields, JsonFields};

use jsonmap_path::Path;

use crate::config::Config;
use crate::error::JsonError;
use crate::value::Value;

/// Throwing conversion out of a [`Value`].
///
/// Implementations match the single variant they accept and fail with
/// [`JsonError::mismatch`] otherwise, which also passes a carried error
/// through unchanged.
pub trait FromJson: Sized {
    fn from_json(value: &Value, config: &Config) -> Result<Self, JsonError>;
}

/// Projection into a [`Value`].
pub trait ToJson {
    fn to_json(&self, config: &Config) -> Result<Value, JsonError>;
}

impl<T: ToJson + ?Sized> ToJson for &T {
    fn to_json(&self, config: &Config) -> Result<Value, JsonError> {
        (**self).to_json(config)
    }
}

impl Value {
    /// Throwing mode with the shared defaults.
    ///
    /// ```
    /// use jsonmap::{JsonError, Value};
    ///
    /// let doc = Value::parse(r#"{"id": "x"}"#);
    /// let err = doc.at("id").decode::<i64>().unwrap_err();
    /// assert!(matches!(err, JsonError::TypeMismatch { expected: "number", actual: "string", .. }));
    /// assert_eq!(doc.at("id").try_decode::<i64>(), None);
    /// assert_eq!(doc.at("id").decode_or_default::<i64>(), 0);
    /// ```
    ///
    /// # Errors
    ///
    /// Whatever `T::from_json` reports.
    pub fn decode<T: FromJson>(&self) -> Result<T, JsonError> {
        T::from_json(self, Config::shared())
    }

    /// Throwing mode.
    ///
    /// # Errors
    ///
    /// Whatever `T::from_json` reports.
    pub fn decode_with<T: FromJson>(&self, config: &Config) -> Result<T, JsonError> {
        T::from_json(self, config)
    }

    /// Optional mode: every failure becomes `None`.
    pub fn try_decode<T: FromJson>(&self) -> Option<T> {
        self.try_decode_with(Config::shared())
    }

    pub fn try_decode_with<T: FromJson>(&self, config: &Config) -> Option<T> {
        T::from_json(self, config).ok()
    }

    /// Defaulted mode: every failure becomes `T::default()`.
    pub fn decode_or_default<T: FromJson + Default>(&self) -> T {
        self.decode_or_default_with(Config::shared())
    }

    pub fn decode_or_default_with<T: FromJson + Default>(&self, config: &Config) -> T {
        T::from_json(self, config).unwrap_or_default()
    }

    /// Navigate to `path` and decode in throwing mode.
    ///
    /// A failed lookup is handed to `T` as an `Error` value, so an
    /// `Option<T>` target reads a missing key as `None`.
    ///
    /// # Errors
    ///
    /// The navigation error, or whatever `T::from_json` reports.
    pub fn decode_at<T: FromJson>(&self, path: impl Into<Path>) -> Result<T, JsonError> {
        self.decode_at_with(path, Config::shared())
    }

    /// # Errors
    ///
    /// See [`Value::decode_at`].
    pub fn decode_at_with<T: FromJson>(
        &self,
        path: impl Into<Path>,
        config: &Config,
    ) -> Result<T, JsonError> {
        match self.lookup(&path.into()) {
            Ok(child) => T::from_json(child, config),
            Err(err) => T::from_json(&Value::Error(err), config),
        }
    }

    /// Project a typed value with the shared defaults.
    ///
    /// # Errors
    ///
    /// Whatever `T::to_json` reports.
    pub fn encode<T: ToJson + ?Sized>(item: &T) -> Result<Value, JsonError> {
        item.to_json(Config::shared())
    }

    /// # Errors
    ///
    /// Whatever `T::to_json` reports.
    pub fn encode_with<T: ToJson + ?Sized>(item: &T, config: &Config) -> Result<Value, JsonError> {
        item.to_json(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::json;

    #[test]
    fn test_three_modes_on_mismatch() {
        let doc = json!({"id": "x"});
        let id = doc.at("id");
        let err = id.decode::<u32>().unwrap_err();
        match err {
            JsonError::TypeMismatch {
                expected,
                actual,
                value,
            } => {
                assert_eq!(expected, "number");
                assert_eq!(actual, "string");
                assert_eq!(*value, Value::from("x"));
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(id.try_decode::<u32>(), None);
        assert_eq!(id.decode_or_default::<u32>(), 0);
        assert_eq!(id.decode_or_default::<String>(), "x");
    }

    #[test]
    fn test_decode_at_missing_key() {
        let doc = json!({"a": 1});
        assert_eq!(doc.decode_at::<Option<i32>>("b").unwrap(), None);
        assert_eq!(doc.decode_at::<Option<i32>>("a").unwrap(), Some(1));
        let err = doc.decode_at::<i32>("b").unwrap_err();
        assert!(err.is_missing());
    }

    #[test]
    fn test_decode_at_wrong_container_is_not_absent() {
        let doc = json!({"a": 1});
        let err = doc.decode_at::<Option<i32>>(jsonmap_path::path!["a", "b"]).unwrap_err();
        assert!(matches!(err, JsonError::WrongContainer { .. }));
    }

    #[test]
    fn test_encode_reference() {
        let name = String::from("a");
        assert_eq!(Value::encode(&&name).unwrap(), Value::from("a"));
        assert_eq!(Value::encode("b").unwrap(), Value::from("b"));
    }
}
