//! Field-by-field conversion bound to one [`Value`].
//!
//! A [`Mapper`] is either decoding (bound to a source document) or encoding
//! (bound to an accumulator, initially an empty object). The three transfer
//! operations share one call shape:
//!
//! - [`Mapper::pull_into`] reads a field and ignores encoding,
//! - [`Mapper::push_from`] writes a field and ignores decoding,
//! - [`Mapper::sync`] does whichever the bound mode calls for.
//!
//! The first failure is recorded and every later transfer becomes a no-op.
//! [`Mapper::finish`] surfaces it.

use jsonmap_path::Path;
use tracing::debug;

use crate::codec::{FromJson, ToJson};
use crate::config::Config;
use crate::error::JsonError;
use crate::transform::{decode_value, encode_value, DecodeTransform, EncodeTransform};
use crate::value::Value;

enum Mode<'a> {
    Decode(&'a Value),
    Encode(Value),
}

pub struct Mapper<'a> {
    mode: Mode<'a>,
    config: &'a Config,
    error: Option<JsonError>,
}

impl<'a> Mapper<'a> {
    /// Bind to a document being read.
    pub fn decoding(source: &'a Value, config: &'a Config) -> Self {
        Self {
            mode: Mode::Decode(source),
            config,
            error: None,
        }
    }

    /// Bind to a fresh, empty object accumulator.
    pub fn encoding(config: &'a Config) -> Self {
        Self::encoding_into(Value::object(), config)
    }

    /// Bind to an existing accumulator; pushes write into it in place.
    pub fn encoding_into(initial: Value, config: &'a Config) -> Self {
        Self {
            mode: Mode::Encode(initial),
            config,
            error: None,
        }
    }

    pub fn is_decoding(&self) -> bool {
        matches!(self.mode, Mode::Decode(_))
    }

    pub fn config(&self) -> &'a Config {
        self.config
    }

    /// The bound document or the accumulator built so far.
    pub fn source(&self) -> &Value {
        match &self.mode {
            Mode::Decode(source) => source,
            Mode::Encode(acc) => acc,
        }
    }

    /// The first recorded failure.
    pub fn error(&self) -> Option<&JsonError> {
        self.error.as_ref()
    }

    fn record(&mut self, path: &Path, err: JsonError) {
        if self.error.is_none() {
            debug!(%path, error = %err, "mapper recorded first error");
            self.error = Some(err);
        }
    }

    // ── Field access ──────────────────────────────────────────────────────

    /// Throwing read of the field at `path`.
    ///
    /// A failure is recorded and returned. Once a failure is recorded, this
    /// returns it without reading.
    ///
    /// # Errors
    ///
    /// The recorded failure, the navigation failure, or whatever
    /// `T::from_json` reports.
    pub fn value<T: FromJson>(&mut self, path: impl Into<Path>) -> Result<T, JsonError> {
        if let Some(err) = &self.error {
            return Err(err.clone());
        }
        let path = path.into();
        match self.source().decode_at_with(&path, self.config) {
            Ok(item) => Ok(item),
            Err(err) => {
                self.record(&path, err.clone());
                Err(err)
            }
        }
    }

    /// Optional read: any failure is `None` and nothing is recorded.
    pub fn optional<T: FromJson>(&self, path: impl Into<Path>) -> Option<T> {
        if self.error.is_some() {
            return None;
        }
        self.source().decode_at_with(path, self.config).ok()
    }

    /// Defaulted read: any failure is `T::default()` and nothing is recorded.
    pub fn value_or_default<T: FromJson + Default>(&self, path: impl Into<Path>) -> T {
        self.optional(path).unwrap_or_default()
    }

    // ── Transfers ─────────────────────────────────────────────────────────

    /// Decode the field at `path` into `field`.
    ///
    /// On failure `field` keeps its value and the failure is recorded.
    /// Does nothing while encoding.
    pub fn pull_into<T: FromJson>(&mut self, path: impl Into<Path>, field: &mut T) -> &mut Self {
        let Mode::Decode(source) = self.mode else {
            return self;
        };
        if self.error.is_some() {
            return self;
        }
        let path = path.into();
        match source.decode_at_with(&path, self.config) {
            Ok(item) => *field = item,
            Err(err) => self.record(&path, err),
        }
        self
    }

    /// Like [`Mapper::pull_into`], but a failure is ignored instead of
    /// recorded.
    pub fn pull_or_keep<T: FromJson>(&mut self, path: impl Into<Path>, field: &mut T) -> &mut Self {
        if let (Mode::Decode(source), None) = (&self.mode, &self.error) {
            if let Ok(item) = source.decode_at_with(path, self.config) {
                *field = item;
            }
        }
        self
    }

    /// Decode the field at `path` through `transform`.
    pub fn pull_with<X>(&mut self, path: impl Into<Path>, field: &mut X::Target, transform: &X) -> &mut Self
    where
        X: DecodeTransform + ?Sized,
    {
        let Mode::Decode(source) = self.mode else {
            return self;
        };
        if self.error.is_some() {
            return self;
        }
        let path = path.into();
        let decoded = source
            .lookup(&path)
            .and_then(|child| decode_value(transform, child, self.config));
        match decoded {
            Ok(item) => *field = item,
            Err(err) => self.record(&path, err),
        }
        self
    }

    /// Encode `field` and write it at `path`, creating containers on the
    /// way. Null results are dropped when the path or the config asks for
    /// it. Does nothing while decoding.
    ///
    /// A bare string is a single key: `"data.users.0.name"` writes one key
    /// with that literal name. Nested writes need a parsed path.
    ///
    /// ```
    /// use jsonmap::{json, Config, Mapper, Path};
    ///
    /// let config = Config::new();
    /// let mut m = Mapper::encoding(&config);
    /// m.push_from(Path::dotted("data.users.0.name"), "a")
    ///     .push_from("data.flat", &1);
    /// assert_eq!(
    ///     m.finish().unwrap(),
    ///     json!({"data": {"users": [{"name": "a"}]}, "data.flat": 1})
    /// );
    /// ```
    pub fn push_from<T: ToJson + ?Sized>(&mut self, path: impl Into<Path>, field: &T) -> &mut Self {
        if self.is_decoding() || self.error.is_some() {
            return self;
        }
        let path = path.into();
        match field.to_json(self.config) {
            Ok(value) => self.write(path, value),
            Err(err) => self.record(&path, err),
        }
        self
    }

    /// Encode `field` through `transform` and write it at `path`.
    pub fn push_with<X>(&mut self, path: impl Into<Path>, field: &X::Target, transform: &X) -> &mut Self
    where
        X: EncodeTransform + ?Sized,
    {
        if self.is_decoding() || self.error.is_some() {
            return self;
        }
        let path = path.into();
        match encode_value(transform, field, self.config) {
            Ok(value) => self.write(path, value),
            Err(err) => self.record(&path, err),
        }
        self
    }

    fn write(&mut self, path: Path, value: Value) {
        if value.is_null() && (path.omits_null() || self.config.omit_null) {
            return;
        }
        let Mode::Encode(acc) = &mut self.mode else {
            return;
        };
        if let Err(err) = acc.set(&path, value) {
            self.record(&path, err);
        }
    }

    /// Pull while decoding, push while encoding.
    pub fn sync<T: FromJson + ToJson>(&mut self, path: impl Into<Path>, field: &mut T) -> &mut Self {
        if self.is_decoding() {
            self.pull_into(path, field)
        } else {
            self.push_from(path, &*field)
        }
    }

    /// [`Mapper::sync`] through a two-way transform.
    pub fn sync_with<X>(&mut self, path: impl Into<Path>, field: &mut X::Target, transform: &X) -> &mut Self
    where
        X: DecodeTransform + EncodeTransform + ?Sized,
    {
        if self.is_decoding() {
            self.pull_with(path, field, transform)
        } else {
            self.push_with(path, &*field, transform)
        }
    }

    /// Marks a field as intentionally excluded from both directions.
    pub fn skip(&mut self, _path: impl Into<Path>) -> &mut Self {
        self
    }

    // ── Read-out ──────────────────────────────────────────────────────────

    /// The accumulator (or the bound document while decoding).
    ///
    /// # Errors
    ///
    /// The first recorded failure.
    pub fn finish(self) -> Result<Value, JsonError> {
        if let Some(err) = self.error {
            return Err(err);
        }
        Ok(match self.mode {
            Mode::Decode(source) => source.clone(),
            Mode::Encode(acc) => acc,
        })
    }

    /// Like [`Mapper::finish`], with the failure carried as an `Error` value.
    pub fn into_value(self) -> Value {
        self.finish().unwrap_or_else(Value::Error)
    }
}

// ── Mapper-backed codecs ──────────────────────────────────────────────────

/// One `map` body serving both directions.
///
/// ```
/// use jsonmap::{mappable, path, Mappable, Mapper, Value};
///
/// #[derive(Debug, Default, Clone, PartialEq)]
/// struct User {
///     id: i64,
///     name: String,
///     email: Option<String>,
/// }
///
/// impl Mappable for User {
///     fn map(&mut self, m: &mut Mapper<'_>) {
///         m.sync("id", &mut self.id)
///             .sync(path!["profile", "name"], &mut self.name)
///             .sync(jsonmap::Path::from("email").omitting_null(), &mut self.email);
///     }
/// }
///
/// mappable!(User);
///
/// let doc = Value::parse(r#"{"id": 7, "profile": {"name": "a"}}"#);
/// let user: User = doc.decode().unwrap();
/// assert_eq!(user.name, "a");
/// assert_eq!(Value::encode(&user).unwrap(), doc);
/// ```
pub trait Mappable {
    fn map(&mut self, mapper: &mut Mapper<'_>);
}

/// Decode an object into `T::default()` through [`Mappable::map`].
///
/// # Errors
///
/// [`JsonError::TypeMismatch`] for a non-object source, otherwise the first
/// failure recorded by the mapper.
pub fn decode_mappable<T: Mappable + Default>(value: &Value, config: &Config) -> Result<T, JsonError> {
    if !value.is_object() {
        return Err(JsonError::mismatch("object", value));
    }
    let mut item = T::default();
    let mut mapper = Mapper::decoding(value, config);
    item.map(&mut mapper);
    mapper.finish()?;
    Ok(item)
}

/// Encode through [`Mappable::map`]. The item is cloned because `map`
/// takes `&mut self`.
///
/// # Errors
///
/// The first failure recorded by the mapper.
pub fn encode_mappable<T: Mappable + Clone>(item: &T, config: &Config) -> Result<Value, JsonError> {
    let mut copy = item.clone();
    let mut mapper = Mapper::encoding(config);
    copy.map(&mut mapper);
    mapper.finish()
}

/// Implement [`FromJson`] and [`ToJson`] for `Mappable + Default + Clone`
/// types.
#[macro_export]
macro_rules! mappable {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::FromJson for $ty {
                fn from_json(
                    value: &$crate::Value,
                    config: &$crate::Config,
                ) -> ::std::result::Result<Self, $crate::JsonError> {
                    $crate::mapper::decode_mappable(value, config)
                }
            }

            impl $crate::ToJson for $ty {
                fn to_json(
                    &self,
                    config: &$crate::Config,
                ) -> ::std::result::Result<$crate::Value, $crate::JsonError> {
                    $crate::mapper::encode_mappable(self, config)
                }
            }
        )+
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::{Base64Transform, DateTransform};
    use crate::{json, path};
    use time::macros::datetime;
    use time::OffsetDateTime;

    #[test]
    fn test_push_builds_nested_document() {
        let config = Config::new();
        let mut m = Mapper::encoding(&config);
        m.push_from("code", &0)
            .push_from(Path::dotted("data.users.0.name"), "a");
        let value = m.finish().unwrap();
        assert_eq!(
            value.render().unwrap(),
            r#"{"code":0,"data":{"users":[{"name":"a"}]}}"#
        );
    }

    #[test]
    fn test_throwing_optional_defaulted_reads() {
        let doc = json!({"id": "x"});
        let config = Config::new();
        let mut m = Mapper::decoding(&doc, &config);
        assert_eq!(m.optional::<i64>("id"), None);
        assert_eq!(m.value_or_default::<i64>("id"), 0);
        assert!(m.error().is_none());
        let err = m.value::<i64>("id").unwrap_err();
        assert!(matches!(err, JsonError::TypeMismatch { expected: "number", actual: "string", .. }));
        assert!(m.error().is_some());
    }

    #[test]
    fn test_first_error_wins_and_stops_reads() {
        let doc = json!({"a": "x", "b": 2});
        let config = Config::new();
        let mut m = Mapper::decoding(&doc, &config);
        let (mut a, mut b) = (0i32, 0i32);
        m.pull_into("missing", &mut a).pull_into("a", &mut a).pull_into("b", &mut b);
        assert_eq!((a, b), (0, 0));
        assert!(m.error().unwrap().is_missing());
        assert!(m.value::<i32>("b").unwrap_err().is_missing());
        assert!(m.finish().is_err());
    }

    #[test]
    fn test_pull_or_keep_ignores_failures() {
        let doc = json!({"b": 2});
        let config = Config::new();
        let mut m = Mapper::decoding(&doc, &config);
        let (mut a, mut b) = (9i32, 0i32);
        m.pull_or_keep("a", &mut a).pull_or_keep("b", &mut b);
        assert_eq!((a, b), (9, 2));
        assert!(m.finish().is_ok());
    }

    #[test]
    fn test_direction_guards() {
        let doc = json!({"a": 1});
        let config = Config::new();
        let mut m = Mapper::decoding(&doc, &config);
        m.push_from("b", &2);
        assert_eq!(m.finish().unwrap(), doc);

        let mut m = Mapper::encoding(&config);
        let mut a = 5;
        m.pull_into("a", &mut a);
        assert_eq!(a, 5);
        assert_eq!(m.finish().unwrap(), Value::object());
    }

    #[test]
    fn test_omit_null_qualifier_and_config() {
        let config = Config::new();
        let mut m = Mapper::encoding(&config);
        m.push_from(Path::from("gone").omitting_null(), &None::<i32>)
            .push_from("kept", &None::<i32>);
        assert_eq!(m.finish().unwrap(), json!({"kept": null}));

        let config = Config::new().with_omit_null(true);
        let mut m = Mapper::encoding(&config);
        m.push_from("kept", &None::<i32>);
        assert_eq!(m.finish().unwrap(), Value::object());
    }

    #[test]
    fn test_push_into_scalar_records_error() {
        let config = Config::new();
        let mut m = Mapper::encoding_into(json!({"a": 1}), &config);
        m.push_from(path!["a", "b"], &true);
        assert!(matches!(
            m.into_value().error_value(),
            Some(JsonError::WrongContainer { .. })
        ));
    }

    #[test]
    fn test_push_far_index_records_error() {
        let config = Config::new();
        let mut m = Mapper::encoding(&config);
        m.push_from(Path::pointer("/xs/18446744073709551615"), &1)
            .push_from("after", &2);
        assert!(matches!(
            m.error(),
            Some(JsonError::IndexOutOfBounds { index: usize::MAX, len: 0, .. })
        ));
        assert!(m.finish().is_err());
    }

    #[test]
    fn test_transforms_override_config_per_field() {
        let doc = json!({"at": "2021/01/01", "raw": "aGk="});
        let config = Config::new();
        let slashes = DateTransform::pattern("[year]/[month]/[day]").unwrap();
        let mut m = Mapper::decoding(&doc, &config);
        let mut at = OffsetDateTime::UNIX_EPOCH;
        let mut raw = Vec::new();
        m.pull_with("at", &mut at, &slashes)
            .pull_with("raw", &mut raw, &Base64Transform::Standard);
        assert!(m.error().is_none());
        assert_eq!(at, datetime!(2021-01-01 0:00 UTC));
        assert_eq!(raw, b"hi");

        let mut m = Mapper::encoding(&config);
        m.push_with("at", &at, &slashes).push_from("default", &at);
        assert_eq!(
            m.finish().unwrap(),
            json!({"at": "2021/01/01", "default": "2021-01-01T00:00:00Z"})
        );
    }

    #[derive(Debug, Default, Clone, PartialEq)]
    struct Account {
        id: u32,
        tags: Vec<String>,
        note: Option<String>,
        secret: String,
    }

    impl Mappable for Account {
        fn map(&mut self, m: &mut Mapper<'_>) {
            m.sync("id", &mut self.id)
                .sync(path!["meta", "tags"], &mut self.tags)
                .sync(Path::from("note").omitting_null(), &mut self.note)
                .skip("secret");
        }
    }

    mappable!(Account);

    #[test]
    fn test_mappable_both_directions() {
        let doc = json!({"id": 3, "meta": {"tags": ["x", 1, "y"]}, "secret": "s"});
        let account: Account = doc.decode().unwrap();
        assert_eq!(
            account,
            Account {
                id: 3,
                tags: vec!["x".into(), "y".into()],
                note: None,
                secret: String::new(),
            }
        );
        assert_eq!(
            Value::encode(&account).unwrap(),
            json!({"id": 3, "meta": {"tags": ["x", "y"]}})
        );
    }

    #[test]
    fn test_mappable_rejects_non_objects() {
        assert!(matches!(
            json!([1]).decode::<Account>().unwrap_err(),
            JsonError::TypeMismatch { expected: "object", .. }
        ));
        assert_eq!(json!({"id": "no"}).try_decode::<Account>(), None);
        assert_eq!(json!({"id": "no"}).decode_or_default::<Account>(), Account::default());
    }
}
