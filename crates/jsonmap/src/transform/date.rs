//! Date strategies: formatter based (RFC 3339, ISO 8601, custom pattern) and
//! epoch-offset based.

use time::format_description::well_known::{Iso8601, Rfc3339};
use time::format_description::{self, OwnedFormatItem};
use time::{Date, OffsetDateTime, PrimitiveDateTime};

use super::{DecodeTransform, EncodeTransform, Transform};
use crate::error::JsonError;
use crate::value::Value;

const NANOS_PER_SECOND: i128 = 1_000_000_000;

/// Zero point for epoch-offset dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Epoch {
    /// 1970-01-01T00:00:00Z
    Unix,
    /// 2001-01-01T00:00:00Z
    Reference,
}

impl Epoch {
    /// Seconds from the Unix epoch to this epoch.
    pub const fn unix_offset(self) -> i64 {
        match self {
            Epoch::Unix => 0,
            Epoch::Reference => 978_307_200,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EpochUnit {
    Seconds,
    Milliseconds,
}

impl EpochUnit {
    const fn nanos(self) -> i128 {
        match self {
            EpochUnit::Seconds => NANOS_PER_SECOND,
            EpochUnit::Milliseconds => 1_000_000,
        }
    }
}

/// A format description compiled once and reused for every field.
///
/// Patterns use the `time` crate's description syntax, e.g.
/// `[year]/[month]/[day]` or `[year]-[month]-[day] [hour]:[minute]`.
#[derive(Debug, Clone, PartialEq)]
pub struct DatePattern {
    source: String,
    items: OwnedFormatItem,
}

impl DatePattern {
    /// Compile `pattern`.
    ///
    /// # Errors
    ///
    /// [`JsonError::Message`] when the description is malformed or holds
    /// no components (`yyyy/MM/dd` is plain literal text here).
    pub fn new(pattern: &str) -> Result<Self, JsonError> {
        let items = format_description::parse_owned::<2>(pattern).map_err(|err| {
            JsonError::message(format!("invalid date pattern {pattern:?}: {err}"))
        })?;
        if !has_component(&items) {
            return Err(JsonError::message(format!(
                "date pattern {pattern:?} has no components, expected e.g. [year]/[month]/[day]"
            )));
        }
        Ok(Self {
            source: pattern.to_string(),
            items,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Parse strictly. Patterns without an offset are read as UTC, and
    /// patterns without a time as midnight.
    fn parse(&self, text: &str) -> Result<OffsetDateTime, JsonError> {
        OffsetDateTime::parse(text, &self.items)
            .or_else(|_| PrimitiveDateTime::parse(text, &self.items).map(|dt| dt.assume_utc()))
            .or_else(|_| Date::parse(text, &self.items).map(|d| d.midnight().assume_utc()))
            .map_err(|_| JsonError::Format {
                pattern: self.source.clone(),
                text: text.to_string(),
            })
    }

    fn format(&self, date: &OffsetDateTime) -> Result<String, JsonError> {
        date.format(&self.items).map_err(|_| JsonError::Format {
            pattern: self.source.clone(),
            text: date.to_string(),
        })
    }
}

fn has_component(item: &OwnedFormatItem) -> bool {
    match item {
        OwnedFormatItem::Component(_) => true,
        OwnedFormatItem::Compound(items) | OwnedFormatItem::First(items) => {
            items.iter().any(has_component)
        }
        OwnedFormatItem::Optional(item) => has_component(item),
        _ => false,
    }
}

/// Default date strategy, selected through [`crate::Config::date`] or
/// applied to a single field as a transform.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DateTransform {
    #[default]
    Rfc3339,
    Iso8601,
    Pattern(DatePattern),
    Epoch { epoch: Epoch, unit: EpochUnit },
}

impl DateTransform {
    /// Formatter-based strategy for `pattern`.
    ///
    /// # Errors
    ///
    /// See [`DatePattern::new`].
    pub fn pattern(pattern: &str) -> Result<Self, JsonError> {
        DatePattern::new(pattern).map(DateTransform::Pattern)
    }

    pub const fn epoch(epoch: Epoch, unit: EpochUnit) -> Self {
        DateTransform::Epoch { epoch, unit }
    }

    /// Read a date out of `value`.
    ///
    /// # Errors
    ///
    /// - [`JsonError::TypeMismatch`] for a variant the strategy cannot read
    /// - [`JsonError::Format`] when text does not match the pattern
    /// - [`JsonError::Unsupported`] for an epoch offset outside the date range
    pub fn decode_date(&self, value: &Value) -> Result<OffsetDateTime, JsonError> {
        match self {
            DateTransform::Rfc3339 => {
                let text = date_text(value)?;
                OffsetDateTime::parse(text, &Rfc3339).map_err(|_| format_error("rfc3339", text))
            }
            DateTransform::Iso8601 => {
                let text = date_text(value)?;
                OffsetDateTime::parse(text, &Iso8601::DEFAULT)
                    .map_err(|_| format_error("iso8601", text))
            }
            DateTransform::Pattern(pattern) => pattern.parse(date_text(value)?),
            DateTransform::Epoch { epoch, unit } => decode_epoch(*epoch, *unit, value),
        }
    }

    /// Project `date` into a string or number.
    ///
    /// # Errors
    ///
    /// [`JsonError::Format`] when the date cannot be rendered with the
    /// strategy; [`JsonError::Unsupported`] for an offset that overflows.
    pub fn encode_date(&self, date: &OffsetDateTime) -> Result<Value, JsonError> {
        match self {
            DateTransform::Rfc3339 => date
                .format(&Rfc3339)
                .map(Value::from)
                .map_err(|_| format_error("rfc3339", &date.to_string())),
            DateTransform::Iso8601 => date
                .format(&Iso8601::DEFAULT)
                .map(Value::from)
                .map_err(|_| format_error("iso8601", &date.to_string())),
            DateTransform::Pattern(pattern) => pattern.format(date).map(Value::from),
            DateTransform::Epoch { epoch, unit } => encode_epoch(*epoch, *unit, date),
        }
    }
}

fn date_text(value: &Value) -> Result<&str, JsonError> {
    value
        .as_str()
        .ok_or_else(|| JsonError::mismatch("string", value))
}

fn format_error(pattern: &str, text: &str) -> JsonError {
    JsonError::Format {
        pattern: pattern.to_string(),
        text: text.to_string(),
    }
}

fn decode_epoch(epoch: Epoch, unit: EpochUnit, value: &Value) -> Result<OffsetDateTime, JsonError> {
    let number = value
        .as_number()
        .ok_or_else(|| JsonError::mismatch("number", value))?;
    let offset = match number.as_i64() {
        Some(whole) => i128::from(whole) * unit.nanos(),
        None => {
            let float = number
                .as_f64()
                .ok_or_else(|| JsonError::unsupported("OffsetDateTime", format!("offset {number}")))?;
            (float * unit.nanos() as f64) as i128
        }
    };
    let unix_nanos = offset + i128::from(epoch.unix_offset()) * NANOS_PER_SECOND;
    OffsetDateTime::from_unix_timestamp_nanos(unix_nanos)
        .map_err(|err| JsonError::unsupported("OffsetDateTime", err.to_string()))
}

/// Whole seconds stay integers; fractional seconds become floats.
/// Milliseconds are truncated towards negative infinity.
fn encode_epoch(epoch: Epoch, unit: EpochUnit, date: &OffsetDateTime) -> Result<Value, JsonError> {
    let nanos = date.unix_timestamp_nanos() - i128::from(epoch.unix_offset()) * NANOS_PER_SECOND;
    let per_unit = unit.nanos();
    if unit == EpochUnit::Seconds && nanos % per_unit != 0 {
        return Ok(Value::from(nanos as f64 / per_unit as f64));
    }
    i64::try_from(nanos.div_euclid(per_unit))
        .map(Value::from)
        .map_err(|err| JsonError::unsupported("OffsetDateTime", err.to_string()))
}

impl Transform for DateTransform {
    type Json = Value;
    type Target = OffsetDateTime;
}

impl DecodeTransform for DateTransform {
    fn decode(&self, json: &Value) -> Result<OffsetDateTime, JsonError> {
        self.decode_date(json)
    }
}

impl EncodeTransform for DateTransform {
    fn encode(&self, target: &OffsetDateTime) -> Result<Value, JsonError> {
        self.encode_date(target)
    }
}
