//! A closed JSON value type with path navigation and a
//! bidirectional typed codec layer.
//!
//! - [`Value`] holds any document, plus an `Error` variant that carries a
//!   failure through chained navigation until a typed result is requested.
//! - [`Path`] (from `jsonmap-path`) addresses nested children.
//! - [`FromJson`] / [`ToJson`] convert typed data, in throwing, optional or
//!   defaulted mode.
//! - [`Mapper`] transfers fields one by one in either direction.
//! - Transforms ([`DateTransform`], [`CustomTransform`], ...) replace the
//!   leaf conversion of a single field.
//!
//! # Example
//!
//! ```
//! use jsonmap::{path, Value};
//!
//! let doc = Value::parse(r#"{"code": 0, "data": {"users": [{"name": "a"}, {"name": "b"}]}}"#);
//! let name: String = doc.at(path!["data", "users", 1, "name"]).decode().unwrap();
//! assert_eq!(name, "b");
//!
//! let users: Vec<String> = doc
//!     .at(path!["data", "users"])
//!     .iter()
//!     .filter_map(|user| user.at("name").try_decode())
//!     .collect();
//! assert_eq!(users, ["a", "b"]);
//! ```

pub mod codec;
pub mod config;
pub mod error;
pub mod mapper;
mod navigate;
pub mod transform;
pub mod value;

pub use codec::{encode_fields, FromJson, JsonFields, ToJson};
pub use config::Config;
pub use error::JsonError;
pub use jsonmap_path::{path, Path, PathError, PathStep};
pub use mapper::{Mappable, Mapper};
pub use navigate::{Entries, Iter, MAX_INDEX_GAP};
pub use transform::{
    Base64Transform, CustomTransform, DatePattern, DateTransform, DecodeTransform,
    EncodeTransform, EnumTransform, Epoch, EpochUnit, Transform, UrlTransform,
};
pub use value::{Array, Number, Object, Value};

#[doc(hidden)]
pub mod __private {
    pub use serde_json;
}

/// Build a [`Value`] from JSON literal syntax.
///
/// ```
/// let v = jsonmap::json!({"a": [1, null]});
/// assert_eq!(v.render().unwrap(), r#"{"a":[1,null]}"#);
/// ```
#[macro_export]
macro_rules! json {
    ($($tt:tt)+) => {
        $crate::Value::from_raw($crate::__private::serde_json::json!($($tt)+))
    };
}

/// Decode a typed value with the shared defaults.
///
/// # Errors
///
/// Whatever `T::from_json` reports.
pub fn from_value<T: FromJson>(value: &Value) -> Result<T, JsonError> {
    value.decode()
}

/// Encode a typed value with the shared defaults.
///
/// # Errors
///
/// Whatever `T::to_json` reports.
pub fn to_value<T: ToJson + ?Sized>(item: &T) -> Result<Value, JsonError> {
    Value::encode(item)
}

/// Parse document text and decode it.
///
/// # Errors
///
/// [`JsonError::Init`] for malformed text, otherwise whatever
/// `T::from_json` reports.
pub fn from_str<T: FromJson>(text: &str) -> Result<T, JsonError> {
    Value::parse(text).decode()
}

/// Encode and render as compact document text.
///
/// # Errors
///
/// Encoding failures, or [`JsonError::InvalidRoot`] when `item` does not
/// encode to an object or array.
pub fn to_string<T: ToJson + ?Sized>(item: &T) -> Result<String, JsonError> {
    Value::encode(item)?.render()
}
