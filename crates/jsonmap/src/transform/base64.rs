use base64::engine::general_purpose::{STANDARD, URL_SAFE};
use base64::Engine;

use super::{DecodeTransform, EncodeTransform, Transform};
use crate::error::JsonError;

/// Bytes carried as base64 text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Base64Transform {
    /// RFC 4648 standard alphabet, padded.
    #[default]
    Standard,
    /// RFC 4648 URL-safe alphabet, padded.
    UrlSafe,
}

impl Base64Transform {
    fn engine(self) -> &'static base64::engine::GeneralPurpose {
        match self {
            Base64Transform::Standard => &STANDARD,
            Base64Transform::UrlSafe => &URL_SAFE,
        }
    }
}

impl Transform for Base64Transform {
    type Json = String;
    type Target = Vec<u8>;
}

impl DecodeTransform for Base64Transform {
    fn decode(&self, json: &String) -> Result<Vec<u8>, JsonError> {
        self.engine()
            .decode(json)
            .map_err(|err| JsonError::Transform {
                value: format!("{json:?}"),
                reason: err.to_string(),
            })
    }
}

impl EncodeTransform for Base64Transform {
    fn encode(&self, target: &Vec<u8>) -> Result<String, JsonError> {
        Ok(self.engine().encode(target))
    }
}
