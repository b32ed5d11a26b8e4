//! Conversion options threaded through every `*_with` entry point.

use crate::transform::DateTransform;

static SHARED: Config = Config::new();

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Date strategy used when a field names no explicit transform.
    /// Default is RFC 3339.
    pub date: DateTransform,
    /// If true, pushes whose encoded value is null write nothing.
    /// Default is false (explicit nulls are written).
    pub omit_null: bool,
}

impl Config {
    pub const fn new() -> Self {
        Self {
            date: DateTransform::Rfc3339,
            omit_null: false,
        }
    }

    /// The built-in defaults, used by entry points that take no config.
    pub fn shared() -> &'static Config {
        &SHARED
    }

    pub fn with_date(mut self, date: DateTransform) -> Self {
        self.date = date;
        self
    }

    pub fn with_omit_null(mut self, omit_null: bool) -> Self {
        self.omit_null = omit_null;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
