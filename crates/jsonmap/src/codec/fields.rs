//! Opt-in field enumeration for plain structs.

use crate::config::Config;
use crate::error::JsonError;
use crate::value::{Object, Value};

/// Ordered `(name, value)` pairs of an aggregate.
///
/// Usually implemented through [`json_fields!`](crate::json_fields), which
/// also derives a [`ToJson`](super::ToJson) that writes the pairs into an
/// object.
pub trait JsonFields {
    /// # Errors
    ///
    /// The first field whose projection fails.
    fn json_fields(&self, config: &Config) -> Result<Vec<(&'static str, Value)>, JsonError>;
}

/// Build an object from the fields of `item`, in declaration order.
///
/// Null fields are skipped when [`Config::omit_null`] is set.
///
/// # Errors
///
/// Whatever [`JsonFields::json_fields`] reports.
pub fn encode_fields<T: JsonFields + ?Sized>(item: &T, config: &Config) -> Result<Value, JsonError> {
    let mut object = Object::new();
    for (name, value) in item.json_fields(config)? {
        if config.omit_null && value.is_null() {
            continue;
        }
        object.insert(name.to_string(), value);
    }
    Ok(Value::Object(object))
}

/// Implement [`JsonFields`] and [`ToJson`](crate::ToJson) for a struct by
/// listing the fields to emit.
///
/// ```
/// use jsonmap::{json_fields, Value};
///
/// struct User {
///     name: String,
///     age: Option<u8>,
/// }
///
/// json_fields!(User { name, age });
///
/// let user = User { name: "a".into(), age: None };
/// assert_eq!(Value::encode(&user).unwrap().render().unwrap(), r#"{"name":"a","age":null}"#);
/// ```
#[macro_export]
macro_rules! json_fields {
    ($ty:ty { $($field:ident),* $(,)? }) => {
        impl $crate::JsonFields for $ty {
            fn json_fields(
                &self,
                config: &$crate::Config,
            ) -> ::std::result::Result<
                ::std::vec::Vec<(&'static str, $crate::Value)>,
                $crate::JsonError,
            > {
                ::std::result::Result::Ok(::std::vec![
                    $((
                        ::std::stringify!($field),
                        $crate::ToJson::to_json(&self.$field, config)?,
                    )),*
                ])
            }
        }

        impl $crate::ToJson for $ty {
            fn to_json(
                &self,
                config: &$crate::Config,
            ) -> ::std::result::Result<$crate::Value, $crate::JsonError> {
                $crate::encode_fields(self, config)
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::{json, Config, Value};

    struct Point {
        x: i32,
        y: i32,
        label: Option<String>,
    }

    json_fields!(Point { x, y, label });

    #[test]
    fn test_fields_in_declaration_order() {
        let p = Point {
            x: 1,
            y: 2,
            label: None,
        };
        let value = Value::encode(&p).unwrap();
        assert_eq!(value.render().unwrap(), r#"{"x":1,"y":2,"label":null}"#);
    }

    #[test]
    fn test_omit_null() {
        let p = Point {
            x: 1,
            y: 2,
            label: None,
        };
        let config = Config::new().with_omit_null(true);
        assert_eq!(Value::encode_with(&p, &config).unwrap(), json!({"x": 1, "y": 2}));
    }

    #[test]
    fn test_nested_in_containers() {
        let points = vec![Point {
            x: 0,
            y: 0,
            label: Some("origin".into()),
        }];
        assert_eq!(
            Value::encode(&points).unwrap(),
            json!([{"x": 0, "y": 0, "label": "origin"}])
        );
    }
}
