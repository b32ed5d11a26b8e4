//! Transforms from plain functions.

use std::fmt::{Debug, Display};
use std::marker::PhantomData;

use super::{DecodeTransform, EncodeTransform, Transform};
use crate::codec::{FromJson, ToJson};
use crate::error::JsonError;

/// Placeholder for a direction that was never supplied.
#[derive(Debug, Clone, Copy, Default)]
pub struct Missing;

/// A transform assembled from a decode function, an encode function, or
/// both.
///
/// A failing function is reported as [`JsonError::Transform`] carrying the
/// offending input.
///
/// ```
/// use jsonmap::{CustomTransform, Value};
///
/// let cents = CustomTransform::<f64, i64>::new()
///     .decoding(|dollars: &f64| Ok::<_, String>((dollars * 100.0).round() as i64))
///     .encoding(|cents: &i64| Ok::<_, String>(*cents as f64 / 100.0));
///
/// assert_eq!(Value::from(1.25).transform(&cents).unwrap(), 125);
/// assert_eq!(Value::encode_transformed(&250, &cents).unwrap(), Value::from(2.5));
/// ```
pub struct CustomTransform<J, T, D = Missing, E = Missing> {
    decode: D,
    encode: E,
    _marker: PhantomData<fn(&J) -> T>,
}

impl<J, T> CustomTransform<J, T> {
    pub fn new() -> Self {
        Self {
            decode: Missing,
            encode: Missing,
            _marker: PhantomData,
        }
    }
}

impl<J, T> Default for CustomTransform<J, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<J, T, E> CustomTransform<J, T, Missing, E> {
    pub fn decoding<D, Er>(self, decode: D) -> CustomTransform<J, T, D, E>
    where
        D: Fn(&J) -> Result<T, Er>,
    {
        CustomTransform {
            decode,
            encode: self.encode,
            _marker: PhantomData,
        }
    }
}

impl<J, T, D> CustomTransform<J, T, D, Missing> {
    pub fn encoding<E, Er>(self, encode: E) -> CustomTransform<J, T, D, E>
    where
        E: Fn(&T) -> Result<J, Er>,
    {
        CustomTransform {
            decode: self.decode,
            encode,
            _marker: PhantomData,
        }
    }
}

impl<J: FromJson + ToJson, T, D, E> Transform for CustomTransform<J, T, D, E> {
    type Json = J;
    type Target = T;
}

impl<J, T, D, E, Er> DecodeTransform for CustomTransform<J, T, D, E>
where
    J: FromJson + ToJson + Debug,
    D: Fn(&J) -> Result<T, Er>,
    Er: Display,
{
    fn decode(&self, json: &J) -> Result<T, JsonError> {
        (self.decode)(json).map_err(|err| JsonError::Transform {
            value: format!("{json:?}"),
            reason: err.to_string(),
        })
    }
}

impl<J, T, D, E, Er> EncodeTransform for CustomTransform<J, T, D, E>
where
    J: FromJson + ToJson,
    T: Debug,
    E: Fn(&T) -> Result<J, Er>,
    Er: Display,
{
    fn encode(&self, target: &T) -> Result<J, JsonError> {
        (self.encode)(target).map_err(|err| JsonError::Transform {
            value: format!("{target:?}"),
            reason: err.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Value;

    fn upper() -> CustomTransform<String, String, impl Fn(&String) -> Result<String, String>> {
        CustomTransform::new().decoding(|s: &String| {
            if s.is_empty() {
                Err("empty".to_string())
            } else {
                Ok(s.to_uppercase())
            }
        })
    }

    #[test]
    fn test_decode_only() {
        let t = upper();
        assert_eq!(Value::from("ab").transform(&t).unwrap(), "AB");
    }

    #[test]
    fn test_failure_carries_source() {
        let err = Value::from("").transform(&upper()).unwrap_err();
        match err {
            JsonError::Transform { value, reason } => {
                assert_eq!(value, "\"\"");
                assert_eq!(reason, "empty");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_json_side_mismatch_is_not_a_transform_error() {
        let err = Value::from(1).transform(&upper()).unwrap_err();
        assert!(matches!(err, JsonError::TypeMismatch { expected: "string", .. }));
    }

    #[test]
    fn test_modes() {
        let t = upper();
        assert_eq!(Value::from("").try_transform(&t), None);
        assert_eq!(Value::from("").transform_or_default(&t), "");
    }

    #[test]
    fn test_encode_only() {
        let csv = CustomTransform::<String, Vec<u8>>::new().encoding(|bytes: &Vec<u8>| {
            Ok::<_, std::fmt::Error>(
                bytes
                    .iter()
                    .map(u8::to_string)
                    .collect::<Vec<_>>()
                    .join(","),
            )
        });
        assert_eq!(
            Value::encode_transformed(&vec![1, 2], &csv).unwrap(),
            Value::from("1,2")
        );
    }
}
