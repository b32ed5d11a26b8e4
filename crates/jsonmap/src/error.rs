//! Error type shared by navigation, decoding, encoding and transforms.

use std::sync::Arc;

use jsonmap_path::{PathError, PathStep};
use thiserror::Error;

use crate::value::Value;

/// Every failure the library reports.
///
/// The type is `Clone` because a failure is also carried as data inside
/// [`Value::Error`] and handed back unchanged by every later operation.
#[derive(Debug, Clone, Error)]
pub enum JsonError {
    /// The external parser rejected the document.
    #[error("failed to initialize value: {0}")]
    Init(#[source] Arc<serde_json::Error>),

    /// The value has a different variant (or type) than requested.
    #[error("type mismatch: expected {expected}, found {actual} `{value}`")]
    TypeMismatch {
        expected: &'static str,
        actual: &'static str,
        value: Box<Value>,
    },

    /// The value has the right variant but cannot be represented by the
    /// target type (out of range integer, non-finite float, ...).
    #[error("unsupported value for {type_name}: {reason}")]
    Unsupported {
        type_name: &'static str,
        reason: String,
    },

    #[error("key {key:?} not found in object `{object}`")]
    KeyNotFound { key: String, object: Box<Value> },

    #[error("cannot subscript {actual} with {step}")]
    WrongContainer { step: PathStep, actual: &'static str },

    #[error("index {index} out of bounds for array of length {len}")]
    IndexOutOfBounds {
        index: usize,
        len: usize,
        array: Box<Value>,
    },

    /// Text did not match a date/format pattern.
    #[error("text {text:?} does not match format {pattern:?}")]
    Format { pattern: String, text: String },

    /// A custom transform rejected its input.
    #[error("custom transform failed for {value}: {reason}")]
    Transform { value: String, reason: String },

    /// Only objects and arrays can be rendered as documents.
    #[error("invalid root for serialization: `{0}`")]
    InvalidRoot(Box<Value>),

    /// Malformed path text, from [`Value::pointer`] or `str::parse::<Path>()`.
    #[error(transparent)]
    Path(#[from] PathError),

    #[error("{0}")]
    Message(String),
}

impl JsonError {
    /// Mismatch between the `expected` variant name and `value`.
    ///
    /// A carried error is returned as-is so diagnostics keep pointing at the
    /// original failure.
    pub fn mismatch(expected: &'static str, value: &Value) -> Self {
        match value {
            Value::Error(err) => err.clone(),
            other => JsonError::TypeMismatch {
                expected,
                actual: other.type_name(),
                value: Box::new(other.clone()),
            },
        }
    }

    pub fn unsupported(type_name: &'static str, reason: impl Into<String>) -> Self {
        JsonError::Unsupported {
            type_name,
            reason: reason.into(),
        }
    }

    pub fn message(msg: impl Into<String>) -> Self {
        JsonError::Message(msg.into())
    }

    /// True for navigation failures that mean "nothing at this address".
    pub fn is_missing(&self) -> bool {
        matches!(
            self,
            JsonError::KeyNotFound { .. } | JsonError::IndexOutOfBounds { .. }
        )
    }

    /// Short kind name, stable across releases.
    pub fn kind(&self) -> &'static str {
        match self {
            JsonError::Init(_) => "init",
            JsonError::TypeMismatch { .. } => "type_mismatch",
            JsonError::Unsupported { .. } => "unsupported",
            JsonError::KeyNotFound { .. } => "key_not_found",
            JsonError::WrongContainer { .. } => "wrong_container",
            JsonError::IndexOutOfBounds { .. } => "index_out_of_bounds",
            JsonError::Format { .. } => "format",
            JsonError::Transform { .. } => "transform",
            JsonError::InvalidRoot(_) => "invalid_root",
            JsonError::Path(_) => "path",
            JsonError::Message(_) => "message",
        }
    }
}

impl From<serde_json::Error> for JsonError {
    fn from(err: serde_json::Error) -> Self {
        JsonError::Init(Arc::new(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mismatch_names_both_variants() {
        let err = JsonError::mismatch("number", &Value::from("x"));
        match &err {
            JsonError::TypeMismatch {
                expected, actual, ..
            } => {
                assert_eq!(*expected, "number");
                assert_eq!(*actual, "string");
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(
            err.to_string(),
            "type mismatch: expected number, found string `\"x\"`"
        );
    }

    #[test]
    fn test_mismatch_passes_carried_error_through() {
        let carried = JsonError::message("boom");
        let err = JsonError::mismatch("number", &Value::Error(carried));
        assert!(matches!(err, JsonError::Message(ref m) if m == "boom"));
    }

    #[test]
    fn test_is_missing() {
        let err = JsonError::KeyNotFound {
            key: "a".into(),
            object: Box::new(Value::object()),
        };
        assert!(err.is_missing());
        assert_eq!(err.kind(), "key_not_found");
        assert!(!JsonError::message("x").is_missing());
    }

    #[test]
    fn test_init_keeps_source() {
        use std::error::Error as _;
        let parse_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = JsonError::from(parse_err);
        assert_eq!(err.kind(), "init");
        assert!(err.source().is_some());
    }
}
