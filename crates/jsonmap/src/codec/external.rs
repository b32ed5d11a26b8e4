//! Conformances for third-party types.

use time::OffsetDateTime;
use url::Url;

use super::{FromJson, ToJson};
use crate::config::Config;
use crate::error::JsonError;
use crate::value::Value;

impl FromJson for serde_json::Value {
    fn from_json(value: &Value, _config: &Config) -> Result<Self, JsonError> {
        value.to_raw()
    }
}

impl ToJson for serde_json::Value {
    fn to_json(&self, _config: &Config) -> Result<Value, JsonError> {
        Ok(Value::from(self))
    }
}

/// Dates follow [`Config::date`]; a field-level transform overrides it.
impl FromJson for OffsetDateTime {
    fn from_json(value: &Value, config: &Config) -> Result<Self, JsonError> {
        config.date.decode_date(value)
    }
}

impl ToJson for OffsetDateTime {
    fn to_json(&self, config: &Config) -> Result<Value, JsonError> {
        config.date.encode_date(self)
    }
}

impl FromJson for Url {
    fn from_json(value: &Value, _config: &Config) -> Result<Self, JsonError> {
        let text = value
            .as_str()
            .ok_or_else(|| JsonError::mismatch("string", value))?;
        Url::parse(text).map_err(|err| JsonError::unsupported("Url", format!("{text:?}: {err}")))
    }
}

impl ToJson for Url {
    fn to_json(&self, _config: &Config) -> Result<Value, JsonError> {
        Ok(Value::from(self.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::json;
    use crate::transform::{DateTransform, Epoch, EpochUnit};
    use time::macros::datetime;

    #[test]
    fn test_raw_value_roundtrip() {
        let raw = serde_json::json!({"a": [1, 2.5]});
        let value = Value::encode(&raw).unwrap();
        assert_eq!(value.decode::<serde_json::Value>().unwrap(), raw);
    }

    #[test]
    fn test_date_uses_config() {
        let value = json!("2021-01-01T00:00:00Z");
        let date: OffsetDateTime = value.decode().unwrap();
        assert_eq!(date, datetime!(2021-01-01 0:00 UTC));

        let config = Config::new().with_date(DateTransform::epoch(Epoch::Unix, EpochUnit::Seconds));
        assert!(value.decode_with::<OffsetDateTime>(&config).is_err());
        assert_eq!(Value::encode_with(&date, &config).unwrap(), json!(1_609_459_200));
    }

    #[test]
    fn test_url() {
        let url: Url = json!("https://example.com/a?b=c").decode().unwrap();
        assert_eq!(url.host_str(), Some("example.com"));
        assert_eq!(Value::encode(&url).unwrap(), json!("https://example.com/a?b=c"));
        assert!(matches!(
            json!("not a url").decode::<Url>().unwrap_err(),
            JsonError::Unsupported { type_name: "Url", .. }
        ));
    }
}
