use url::Url;

use super::{DecodeTransform, EncodeTransform, Transform};
use crate::error::JsonError;

/// URL text, optionally resolved against a base.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UrlTransform {
    base: Option<Url>,
}

impl UrlTransform {
    pub fn new() -> Self {
        Self::default()
    }

    /// Relative references are joined onto `base`.
    pub fn with_base(base: Url) -> Self {
        Self { base: Some(base) }
    }
}

impl Transform for UrlTransform {
    type Json = String;
    type Target = Url;
}

impl DecodeTransform for UrlTransform {
    fn decode(&self, json: &String) -> Result<Url, JsonError> {
        let parsed = match &self.base {
            Some(base) => base.join(json),
            None => Url::parse(json),
        };
        parsed.map_err(|err| JsonError::Transform {
            value: format!("{json:?}"),
            reason: err.to_string(),
        })
    }
}

impl EncodeTransform for UrlTransform {
    fn encode(&self, target: &Url) -> Result<String, JsonError> {
        Ok(target.to_string())
    }
}
