//! Pluggable leaf conversions applied in place of a type's own codec.
//!
//! A transform names a JSON-side type ([`Transform::Json`], read and written
//! with the regular codec) and a target type. Each direction is a separate
//! trait, so a transform built with one direction only cannot be used for
//! the other: the call does not compile.

mod base64;
mod custom;
mod date;
mod enum_map;
mod url;

pub use self::base64::Base64Transform;
pub use self::custom::{CustomTransform, Missing};
pub use self::date::{DatePattern, DateTransform, Epoch, EpochUnit};
pub use self::enum_map::EnumTransform;
pub use self::url::UrlTransform;

use tracing::debug;

use crate::codec::{FromJson, ToJson};
use crate::config::Config;
use crate::error::JsonError;
use crate::value::Value;

pub trait Transform {
    type Json: FromJson + ToJson;
    type Target;
}

/// JSON to target direction.
pub trait DecodeTransform: Transform {
    /// # Errors
    ///
    /// The transform's own failure, usually [`JsonError::Transform`] or
    /// [`JsonError::Format`].
    fn decode(&self, json: &Self::Json) -> Result<Self::Target, JsonError>;
}

/// Target to JSON direction.
pub trait EncodeTransform: Transform {
    /// # Errors
    ///
    /// The transform's own failure.
    fn encode(&self, target: &Self::Target) -> Result<Self::Json, JsonError>;
}

/// Read `value` as `T::Json`, then run the transform.
///
/// # Errors
///
/// The codec failure of the JSON side or the transform failure.
pub fn decode_value<T: DecodeTransform + ?Sized>(
    transform: &T,
    value: &Value,
    config: &Config,
) -> Result<T::Target, JsonError> {
    let json = T::Json::from_json(value, config)?;
    transform.decode(&json).inspect_err(|err| {
        debug!(error = %err, "transform rejected input");
    })
}

/// Run the transform, then project the JSON side into a [`Value`].
///
/// # Errors
///
/// The transform failure or the codec failure of the JSON side.
pub fn encode_value<T: EncodeTransform + ?Sized>(
    transform: &T,
    target: &T::Target,
    config: &Config,
) -> Result<Value, JsonError> {
    let json = transform.encode(target).inspect_err(|err| {
        debug!(error = %err, "transform rejected output");
    })?;
    json.to_json(config)
}

impl Value {
    /// Throwing mode through `transform`.
    ///
    /// ```
    /// use jsonmap::{DateTransform, Value};
    ///
    /// let slashes = DateTransform::pattern("[year]/[month]/[day]").unwrap();
    /// let date = Value::from("2021/01/02").transform(&slashes).unwrap();
    /// assert_eq!(date.day(), 2);
    /// assert!(Value::from("2021-01-02T00:00:00Z").transform(&slashes).is_err());
    /// ```
    ///
    /// # Errors
    ///
    /// See [`decode_value`].
    pub fn transform<T: DecodeTransform + ?Sized>(&self, transform: &T) -> Result<T::Target, JsonError> {
        decode_value(transform, self, Config::shared())
    }

    /// # Errors
    ///
    /// See [`decode_value`].
    pub fn transform_with<T: DecodeTransform + ?Sized>(
        &self,
        transform: &T,
        config: &Config,
    ) -> Result<T::Target, JsonError> {
        decode_value(transform, self, config)
    }

    /// Optional mode through `transform`.
    pub fn try_transform<T: DecodeTransform + ?Sized>(&self, transform: &T) -> Option<T::Target> {
        self.transform(transform).ok()
    }

    /// Defaulted mode through `transform`.
    pub fn transform_or_default<T>(&self, transform: &T) -> T::Target
    where
        T: DecodeTransform + ?Sized,
        T::Target: Default,
    {
        self.transform(transform).unwrap_or_default()
    }

    /// Project `target` through `transform`.
    ///
    /// # Errors
    ///
    /// See [`encode_value`].
    pub fn encode_transformed<T: EncodeTransform + ?Sized>(
        target: &T::Target,
        transform: &T,
    ) -> Result<Value, JsonError> {
        encode_value(transform, target, Config::shared())
    }
}
