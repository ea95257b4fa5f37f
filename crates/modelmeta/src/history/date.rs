//! W3CDTF timestamps.

use std::fmt;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{MetadataError, Result};
use crate::raw::{FromRaw, IntoValidated};

/// Accepted timestamp grammar: full date, time and numeric UTC offset.
pub const DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%z";

/// Validate that `text` is a W3CDTF timestamp such as `2020-01-01T00:00:00+0000`.
///
/// Fails with [`MetadataError::InvalidDate`] carrying chrono's parse error.
pub fn validate_date(text: &str) -> Result<()> {
    parse_datetime(text).map(|_| ())
}

fn parse_datetime(text: &str) -> Result<DateTime<FixedOffset>> {
    DateTime::parse_from_str(text, DATE_FORMAT).map_err(|source| MetadataError::InvalidDate {
        value: text.to_string(),
        source,
    })
}

/// A validated timestamp string.
///
/// Only constructible through validation, so holding a `DateStamp` means the
/// text is known to parse. The original text is kept as-is for serialization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DateStamp {
    text: String,
    parsed: DateTime<FixedOffset>,
}

impl DateStamp {
    /// Validate `text` and wrap it.
    pub fn parse(text: impl Into<String>) -> Result<Self> {
        let text = text.into();
        let parsed = parse_datetime(&text)?;
        Ok(DateStamp { text, parsed })
    }

    /// The timestamp as written.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// The parsed date and time with its offset.
    pub fn to_datetime(&self) -> DateTime<FixedOffset> {
        self.parsed
    }
}

impl fmt::Display for DateStamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl AsRef<str> for DateStamp {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

impl PartialEq<str> for DateStamp {
    fn eq(&self, other: &str) -> bool {
        self.text == other
    }
}

impl PartialEq<&str> for DateStamp {
    fn eq(&self, other: &&str) -> bool {
        self.text == *other
    }
}

impl TryFrom<String> for DateStamp {
    type Error = MetadataError;

    fn try_from(value: String) -> Result<Self> {
        DateStamp::parse(value)
    }
}

impl From<DateStamp> for String {
    fn from(value: DateStamp) -> Self {
        value.text
    }
}

impl FromRaw for DateStamp {
    fn from_raw(value: &Value) -> Result<Self> {
        match value {
            Value::String(text) => DateStamp::parse(text.as_str()),
            other => Err(MetadataError::type_mismatch("date", "string", other)),
        }
    }
}

impl IntoValidated<DateStamp> for DateStamp {
    fn into_validated(self) -> Result<DateStamp> {
        Ok(self)
    }
}

impl IntoValidated<DateStamp> for &str {
    fn into_validated(self) -> Result<DateStamp> {
        DateStamp::parse(self)
    }
}

impl IntoValidated<DateStamp> for String {
    fn into_validated(self) -> Result<DateStamp> {
        DateStamp::parse(self)
    }
}

impl IntoValidated<DateStamp> for &String {
    fn into_validated(self) -> Result<DateStamp> {
        DateStamp::parse(self.as_str())
    }
}
