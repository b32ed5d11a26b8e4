//! Scalar conformances: one accepted variant each.

use super::{FromJson, ToJson};
use crate::config::Config;
use crate::error::JsonError;
use crate::value::{Number, Value};

impl FromJson for Value {
    /// Any data variant; a carried error is returned as `Err`.
    fn from_json(value: &Value, _config: &Config) -> Result<Self, JsonError> {
        value.clone().into_result()
    }
}

impl ToJson for Value {
    fn to_json(&self, _config: &Config) -> Result<Value, JsonError> {
        self.clone().into_result()
    }
}

impl FromJson for bool {
    fn from_json(value: &Value, _config: &Config) -> Result<Self, JsonError> {
        value
            .as_bool()
            .ok_or_else(|| JsonError::mismatch("bool", value))
    }
}

impl ToJson for bool {
    fn to_json(&self, _config: &Config) -> Result<Value, JsonError> {
        Ok(Value::Bool(*self))
    }
}

impl FromJson for String {
    fn from_json(value: &Value, _config: &Config) -> Result<Self, JsonError> {
        value
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| JsonError::mismatch("string", value))
    }
}

impl ToJson for String {
    fn to_json(&self, _config: &Config) -> Result<Value, JsonError> {
        Ok(Value::String(self.clone()))
    }
}

impl ToJson for str {
    fn to_json(&self, _config: &Config) -> Result<Value, JsonError> {
        Ok(Value::from(self))
    }
}

impl FromJson for char {
    fn from_json(value: &Value, _config: &Config) -> Result<Self, JsonError> {
        let text = value
            .as_str()
            .ok_or_else(|| JsonError::mismatch("string", value))?;
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(c),
            _ => Err(JsonError::unsupported(
                "char",
                format!("{text:?} is not a single character"),
            )),
        }
    }
}

impl ToJson for char {
    fn to_json(&self, _config: &Config) -> Result<Value, JsonError> {
        Ok(Value::String(self.to_string()))
    }
}

impl FromJson for () {
    fn from_json(value: &Value, _config: &Config) -> Result<Self, JsonError> {
        if value.is_null() {
            Ok(())
        } else {
            Err(JsonError::mismatch("null", value))
        }
    }
}

impl ToJson for () {
    fn to_json(&self, _config: &Config) -> Result<Value, JsonError> {
        Ok(Value::Null)
    }
}

// ── Numbers ───────────────────────────────────────────────────────────────

/// Widen any JSON number to `i128`. Floats qualify only when integral.
fn integral(number: &Number, type_name: &'static str) -> Result<i128, JsonError> {
    if let Some(n) = number.as_i64() {
        return Ok(i128::from(n));
    }
    if let Some(n) = number.as_u64() {
        return Ok(i128::from(n));
    }
    match number.as_f64() {
        Some(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e38 => Ok(f as i128),
        _ => Err(JsonError::unsupported(
            type_name,
            format!("{number} is not an integer"),
        )),
    }
}

macro_rules! integer_codec {
    ($($ty:ty),*) => {
        $(
            impl FromJson for $ty {
                fn from_json(value: &Value, _config: &Config) -> Result<Self, JsonError> {
                    let number = value
                        .as_number()
                        .ok_or_else(|| JsonError::mismatch("number", value))?;
                    let wide = integral(number, stringify!($ty))?;
                    <$ty>::try_from(wide).map_err(|_| {
                        JsonError::unsupported(stringify!($ty), format!("{number} is out of range"))
                    })
                }
            }

            impl ToJson for $ty {
                fn to_json(&self, _config: &Config) -> Result<Value, JsonError> {
                    Ok(Value::from(*self))
                }
            }
        )*
    };
}

integer_codec!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl FromJson for f64 {
    fn from_json(value: &Value, _config: &Config) -> Result<Self, JsonError> {
        value
            .as_f64()
            .ok_or_else(|| JsonError::mismatch("number", value))
    }
}

impl ToJson for f64 {
    fn to_json(&self, _config: &Config) -> Result<Value, JsonError> {
        Number::from_f64(*self)
            .map(Value::Number)
            .ok_or_else(|| JsonError::unsupported("f64", format!("{self} has no JSON form")))
    }
}

impl FromJson for f32 {
    fn from_json(value: &Value, config: &Config) -> Result<Self, JsonError> {
        let wide = f64::from_json(value, config)?;
        let narrow = wide as f32;
        if narrow.is_finite() {
            Ok(narrow)
        } else {
            Err(JsonError::unsupported("f32", format!("{wide} is out of range")))
        }
    }
}

impl ToJson for f32 {
    fn to_json(&self, config: &Config) -> Result<Value, JsonError> {
        if self.is_finite() {
            f64::from(*self).to_json(config)
        } else {
            Err(JsonError::unsupported("f32", format!("{self} has no JSON form")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::json;

    #[test]
    fn test_bool_and_string() {
        assert!(json!(true).decode::<bool>().unwrap());
        assert_eq!(json!("s").decode::<String>().unwrap(), "s");
        let err = json!(1).decode::<bool>().unwrap_err();
        assert!(matches!(err, JsonError::TypeMismatch { expected: "bool", actual: "number", .. }));
    }

    #[test]
    fn test_char() {
        assert_eq!(json!("é").decode::<char>().unwrap(), 'é');
        assert!(matches!(
            json!("ab").decode::<char>().unwrap_err(),
            JsonError::Unsupported { type_name: "char", .. }
        ));
        assert_eq!(Value::encode(&'x').unwrap(), json!("x"));
    }

    #[test]
    fn test_integer_ranges() {
        assert_eq!(json!(255).decode::<u8>().unwrap(), 255);
        assert!(matches!(
            json!(256).decode::<u8>().unwrap_err(),
            JsonError::Unsupported { type_name: "u8", .. }
        ));
        assert!(json!(-1).decode::<u32>().is_err());
        assert_eq!(json!(u64::MAX).decode::<u64>().unwrap(), u64::MAX);
        assert_eq!(json!(i64::MIN).decode::<i64>().unwrap(), i64::MIN);
    }

    #[test]
    fn test_integral_floats() {
        assert_eq!(json!(3.0).decode::<i32>().unwrap(), 3);
        assert!(json!(3.5).decode::<i32>().is_err());
    }

    #[test]
    fn test_floats() {
        assert_eq!(json!(2).decode::<f64>().unwrap(), 2.0);
        assert_eq!(json!(1.5).decode::<f32>().unwrap(), 1.5);
        assert!(json!(1e300).decode::<f32>().is_err());
        assert!(Value::encode(&f64::NAN).is_err());
        assert_eq!(Value::encode(&0.25f32).unwrap(), json!(0.25));
    }

    #[test]
    fn test_unit() {
        assert!(Value::Null.decode::<()>().is_ok());
        assert!(json!(0).decode::<()>().is_err());
    }

    #[test]
    fn test_value_passthrough() {
        let v = json!({"a": [1]});
        assert_eq!(v.decode::<Value>().unwrap(), v);
        let failed = Value::parse("{");
        assert!(matches!(failed.decode::<Value>().unwrap_err(), JsonError::Init(_)));
    }

    #[test]
    fn test_carried_error_surfaces_in_throwing_mode() {
        let missing = json!({}).at("code");
        assert!(missing.decode::<i32>().unwrap_err().is_missing());
        assert_eq!(missing.decode_or_default::<i32>(), 0);
    }
}
