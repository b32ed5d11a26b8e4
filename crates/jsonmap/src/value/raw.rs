//! Boundary with the external parser/serializer (`serde_json`).
//!
//! Ingest classifies a generic object graph into [`Value`]; egress unwraps a
//! `Value` back into that graph and hands it to the serializer.

use std::sync::Arc;

use tracing::debug;

use super::Value;
use crate::error::JsonError;

impl Value {
    /// Classify a parsed object-graph node into the matching variant.
    ///
    /// `serde_json` already distinguishes booleans from numbers, so the
    /// bool check can never swallow a numeric node.
    pub fn from_raw(raw: serde_json::Value) -> Self {
        match raw {
            serde_json::Value::Object(map) => Value::Object(
                map.into_iter()
                    .map(|(key, val)| (key, Value::from_raw(val)))
                    .collect(),
            ),
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from_raw).collect())
            }
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(n),
            serde_json::Value::Null => Value::Null,
        }
    }

    /// Unwrap into the native object graph.
    ///
    /// # Errors
    ///
    /// A carried error anywhere in the tree is returned as-is.
    pub fn to_raw(&self) -> Result<serde_json::Value, JsonError> {
        Ok(match self {
            Value::Object(map) => {
                let mut out = serde_json::Map::with_capacity(map.len());
                for (key, val) in map {
                    out.insert(key.clone(), val.to_raw()?);
                }
                serde_json::Value::Object(out)
            }
            Value::Array(items) => serde_json::Value::Array(
                items
                    .iter()
                    .map(Value::to_raw)
                    .collect::<Result<_, _>>()?,
            ),
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::Number(n) => serde_json::Value::Number(n.clone()),
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Null => serde_json::Value::Null,
            Value::Error(err) => return Err(err.clone()),
        })
    }

    /// Parse document text. A parse failure becomes an `Error` value.
    ///
    /// ```
    /// use jsonmap::Value;
    ///
    /// let ok = Value::parse(r#"{"code": 0}"#);
    /// assert_eq!(ok.at("code").as_i64(), Some(0));
    ///
    /// let bad = Value::parse("{");
    /// assert!(bad.is_error());
    /// assert!(bad.at("code").is_error());
    /// ```
    pub fn parse(text: &str) -> Self {
        match serde_json::from_str::<serde_json::Value>(text) {
            Ok(raw) => Value::from_raw(raw),
            Err(err) => {
                debug!(error = %err, "document text failed to parse");
                Value::Error(JsonError::Init(Arc::new(err)))
            }
        }
    }

    /// Parse a document byte buffer. A parse failure becomes an `Error` value.
    pub fn from_slice(bytes: &[u8]) -> Self {
        match serde_json::from_slice::<serde_json::Value>(bytes) {
            Ok(raw) => Value::from_raw(raw),
            Err(err) => {
                debug!(error = %err, len = bytes.len(), "document bytes failed to parse");
                Value::Error(JsonError::Init(Arc::new(err)))
            }
        }
    }

    fn document_root(&self) -> Result<serde_json::Value, JsonError> {
        match self {
            Value::Object(_) | Value::Array(_) => self.to_raw(),
            other => Err(JsonError::InvalidRoot(Box::new(other.clone()))),
        }
    }

    /// Render as compact document text.
    ///
    /// # Errors
    ///
    /// Only `Object` and `Array` roots render; anything else fails with
    /// [`JsonError::InvalidRoot`] wrapping the offending value (or the
    /// carried error).
    pub fn render(&self) -> Result<String, JsonError> {
        let raw = self.document_root()?;
        serde_json::to_string(&raw).map_err(|err| JsonError::message(err.to_string()))
    }

    /// Render as indented document text.
    ///
    /// # Errors
    ///
    /// Same root rules as [`Value::render`].
    pub fn render_pretty(&self) -> Result<String, JsonError> {
        let raw = self.document_root()?;
        serde_json::to_string_pretty(&raw).map_err(|err| JsonError::message(err.to_string()))
    }

    /// Render as a compact document byte buffer.
    ///
    /// # Errors
    ///
    /// Same root rules as [`Value::render`].
    pub fn render_bytes(&self) -> Result<Vec<u8>, JsonError> {
        let raw = self.document_root()?;
        serde_json::to_vec(&raw).map_err(|err| JsonError::message(err.to_string()))
    }
}

impl From<serde_json::Value> for Value {
    fn from(raw: serde_json::Value) -> Self {
        Value::from_raw(raw)
    }
}

impl From<&serde_json::Value> for Value {
    fn from(raw: &serde_json::Value) -> Self {
        Value::from_raw(raw.clone())
    }
}

impl From<serde_json::Map<String, serde_json::Value>> for Value {
    fn from(map: serde_json::Map<String, serde_json::Value>) -> Self {
        Value::from_raw(serde_json::Value::Object(map))
    }
}
