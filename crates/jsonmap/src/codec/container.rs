//! Container conformances.
//!
//! The container variant is checked strictly: a non-array source fails the
//! whole conversion. Elements are lenient: one that fails to decode is
//! dropped (and logged) and the survivors keep their order.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::hash::Hash;

use indexmap::IndexMap;
use tracing::debug;

use super::{FromJson, ToJson};
use crate::config::Config;
use crate::error::JsonError;
use crate::value::{Array, Object, Value};

fn decode_items<T, C>(value: &Value, config: &Config) -> Result<C, JsonError>
where
    T: FromJson,
    C: FromIterator<T>,
{
    let items = value
        .as_array()
        .ok_or_else(|| JsonError::mismatch("array", value))?;
    Ok(items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| match T::from_json(item, config) {
            Ok(decoded) => Some(decoded),
            Err(err) => {
                debug!(index, error = %err, "dropping array element");
                None
            }
        })
        .collect())
}

fn decode_entries<T, C>(value: &Value, config: &Config) -> Result<C, JsonError>
where
    T: FromJson,
    C: FromIterator<(String, T)>,
{
    let map = value
        .as_object()
        .ok_or_else(|| JsonError::mismatch("object", value))?;
    Ok(map
        .iter()
        .filter_map(|(key, item)| match T::from_json(item, config) {
            Ok(decoded) => Some((key.clone(), decoded)),
            Err(err) => {
                debug!(key = %key, error = %err, "dropping object entry");
                None
            }
        })
        .collect())
}

fn encode_items<'a, T, I>(items: I, config: &Config) -> Result<Value, JsonError>
where
    T: ToJson + 'a,
    I: IntoIterator<Item = &'a T>,
{
    items
        .into_iter()
        .map(|item| item.to_json(config))
        .collect::<Result<Array, _>>()
        .map(Value::Array)
}

fn encode_entries<'a, T, I>(entries: I, config: &Config) -> Result<Value, JsonError>
where
    T: ToJson + 'a,
    I: IntoIterator<Item = (&'a String, &'a T)>,
{
    let mut object = Object::new();
    for (key, item) in entries {
        object.insert(key.clone(), item.to_json(config)?);
    }
    Ok(Value::Object(object))
}

// ── Wrappers ──────────────────────────────────────────────────────────────

impl<T: FromJson> FromJson for Option<T> {
    /// `null` and "nothing at this address" read as `None`; any other
    /// failure of `T` is still reported.
    fn from_json(value: &Value, config: &Config) -> Result<Self, JsonError> {
        match value {
            Value::Null => Ok(None),
            Value::Error(err) if err.is_missing() => Ok(None),
            other => T::from_json(other, config).map(Some),
        }
    }
}

impl<T: ToJson> ToJson for Option<T> {
    fn to_json(&self, config: &Config) -> Result<Value, JsonError> {
        match self {
            Some(item) => item.to_json(config),
            None => Ok(Value::Null),
        }
    }
}

impl<T: FromJson> FromJson for Box<T> {
    fn from_json(value: &Value, config: &Config) -> Result<Self, JsonError> {
        T::from_json(value, config).map(Box::new)
    }
}

impl<T: ToJson + ?Sized> ToJson for Box<T> {
    fn to_json(&self, config: &Config) -> Result<Value, JsonError> {
        (**self).to_json(config)
    }
}

// ── Sequences ─────────────────────────────────────────────────────────────

impl<T: FromJson> FromJson for Vec<T> {
    fn from_json(value: &Value, config: &Config) -> Result<Self, JsonError> {
        decode_items(value, config)
    }
}

impl<T: ToJson> ToJson for Vec<T> {
    fn to_json(&self, config: &Config) -> Result<Value, JsonError> {
        encode_items(self, config)
    }
}

impl<T: ToJson> ToJson for [T] {
    fn to_json(&self, config: &Config) -> Result<Value, JsonError> {
        encode_items(self, config)
    }
}

impl<T: ToJson, const N: usize> ToJson for [T; N] {
    fn to_json(&self, config: &Config) -> Result<Value, JsonError> {
        encode_items(self, config)
    }
}

impl<T: FromJson> FromJson for VecDeque<T> {
    fn from_json(value: &Value, config: &Config) -> Result<Self, JsonError> {
        decode_items(value, config)
    }
}

impl<T: ToJson> ToJson for VecDeque<T> {
    fn to_json(&self, config: &Config) -> Result<Value, JsonError> {
        encode_items(self, config)
    }
}

impl<T: FromJson + Eq + Hash> FromJson for HashSet<T> {
    fn from_json(value: &Value, config: &Config) -> Result<Self, JsonError> {
        decode_items(value, config)
    }
}

impl<T: ToJson> ToJson for HashSet<T> {
    fn to_json(&self, config: &Config) -> Result<Value, JsonError> {
        encode_items(self, config)
    }
}

impl<T: FromJson + Ord> FromJson for BTreeSet<T> {
    fn from_json(value: &Value, config: &Config) -> Result<Self, JsonError> {
        decode_items(value, config)
    }
}

impl<T: ToJson> ToJson for BTreeSet<T> {
    fn to_json(&self, config: &Config) -> Result<Value, JsonError> {
        encode_items(self, config)
    }
}

// ── Mappings ──────────────────────────────────────────────────────────────

impl<T: FromJson> FromJson for HashMap<String, T> {
    fn from_json(value: &Value, config: &Config) -> Result<Self, JsonError> {
        decode_entries(value, config)
    }
}

impl<T: ToJson> ToJson for HashMap<String, T> {
    fn to_json(&self, config: &Config) -> Result<Value, JsonError> {
        encode_entries(self, config)
    }
}

impl<T: FromJson> FromJson for BTreeMap<String, T> {
    fn from_json(value: &Value, config: &Config) -> Result<Self, JsonError> {
        decode_entries(value, config)
    }
}

impl<T: ToJson> ToJson for BTreeMap<String, T> {
    fn to_json(&self, config: &Config) -> Result<Value, JsonError> {
        encode_entries(self, config)
    }
}

impl<T: FromJson> FromJson for IndexMap<String, T> {
    fn from_json(value: &Value, config: &Config) -> Result<Self, JsonError> {
        decode_entries(value, config)
    }
}

impl<T: ToJson> ToJson for IndexMap<String, T> {
    fn to_json(&self, config: &Config) -> Result<Value, JsonError> {
        encode_entries(self, config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::json;

    #[test]
    fn test_vec_drops_failing_elements() {
        let v = json!([1, "two", 3, null, 4.5]);
        assert_eq!(v.decode::<Vec<i32>>().unwrap(), vec![1, 3]);
    }

    #[test]
    fn test_vec_requires_array() {
        let err = json!({"a": 1}).decode::<Vec<i32>>().unwrap_err();
        assert!(matches!(err, JsonError::TypeMismatch { expected: "array", actual: "object", .. }));
        assert_eq!(json!("x").try_decode::<Vec<i32>>(), None);
        assert!(json!(7).decode_or_default::<Vec<i32>>().is_empty());
    }

    #[test]
    fn test_vec_of_options_keeps_nulls() {
        let v = json!([1, null, 2]);
        assert_eq!(
            v.decode::<Vec<Option<i32>>>().unwrap(),
            vec![Some(1), None, Some(2)]
        );
    }

    #[test]
    fn test_option_reports_non_missing_failures() {
        assert_eq!(json!(null).decode::<Option<i32>>().unwrap(), None);
        assert!(json!("x").decode::<Option<i32>>().is_err());
        assert_eq!(json!("x").try_decode::<Option<i32>>(), None);
    }

    #[test]
    fn test_sets() {
        let v = json!([3, 1, 3, "x", 2]);
        let set: BTreeSet<u8> = v.decode().unwrap();
        assert_eq!(set.into_iter().collect::<Vec<_>>(), vec![1, 2, 3]);
        let hashed: HashSet<u8> = v.decode().unwrap();
        assert_eq!(hashed.len(), 3);
        let deque: VecDeque<u8> = v.decode().unwrap();
        assert_eq!(deque.len(), 4);
    }

    #[test]
    fn test_maps_keep_order_and_drop_failures() {
        let v = json!({"b": 1, "a": "bad", "c": 3});
        let map: IndexMap<String, i64> = v.decode().unwrap();
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["b", "c"]);
        let sorted: BTreeMap<String, i64> = v.decode().unwrap();
        assert_eq!(sorted.len(), 2);
        assert!(json!([1]).decode::<HashMap<String, i64>>().is_err());
    }

    #[test]
    fn test_encode_containers() {
        let nested = vec![Some(1), None];
        assert_eq!(Value::encode(&nested).unwrap(), json!([1, null]));
        assert_eq!(Value::encode(&[true, false]).unwrap(), json!([true, false]));

        let mut map = BTreeMap::new();
        map.insert("k".to_string(), vec!["v".to_string()]);
        assert_eq!(Value::encode(&map).unwrap(), json!({"k": ["v"]}));
    }

    #[test]
    fn test_encode_is_strict() {
        let err = Value::encode(&vec![1.0, f64::INFINITY]).unwrap_err();
        assert!(matches!(err, JsonError::Unsupported { type_name: "f64", .. }));
    }
}
