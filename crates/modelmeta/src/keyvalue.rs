//! Free-form key/value entries that fit nowhere else in the metadata.

use std::fmt;
use std::ops::{Deref, DerefMut};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::{MetadataError, Result};
use crate::history::RestrictedList;
use crate::raw::{FromRaw, IntoValidated, deserialize_validated, expect_object, optional_string};

/// The five fields of a key/value entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyValueField {
    Id,
    Name,
    Key,
    Value,
    Uri,
}

impl KeyValueField {
    pub const ALL: [KeyValueField; 5] = [
        KeyValueField::Id,
        KeyValueField::Name,
        KeyValueField::Key,
        KeyValueField::Value,
        KeyValueField::Uri,
    ];

    pub const KEYS: &'static [&'static str] = &["id", "name", "key", "value", "uri"];

    pub fn key(&self) -> &'static str {
        match self {
            KeyValueField::Id => "id",
            KeyValueField::Name => "name",
            KeyValueField::Key => "key",
            KeyValueField::Value => "value",
            KeyValueField::Uri => "uri",
        }
    }
}

impl FromStr for KeyValueField {
    type Err = MetadataError;

    fn from_str(s: &str) -> Result<Self> {
        KeyValueField::ALL
            .into_iter()
            .find(|field| field.key() == s)
            .ok_or_else(|| MetadataError::KeyNotAllowed {
                key: s.to_string(),
                allowed: KeyValueField::KEYS,
            })
    }
}

impl fmt::Display for KeyValueField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A single key/value entry with optional id, name and uri.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct KeyValuePair {
    id: Option<String>,
    name: Option<String>,
    key: Option<String>,
    value: Option<String>,
    uri: Option<String>,
}

impl KeyValuePair {
    /// Create an entry holding `key` and `value`.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            value: Some(value.into()),
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_uri(mut self, uri: impl Into<String>) -> Self {
        self.uri = Some(uri.into());
        self
    }

    pub fn get(&self, field: KeyValueField) -> Option<&str> {
        match field {
            KeyValueField::Id => self.id.as_deref(),
            KeyValueField::Name => self.name.as_deref(),
            KeyValueField::Key => self.key.as_deref(),
            KeyValueField::Value => self.value.as_deref(),
            KeyValueField::Uri => self.uri.as_deref(),
        }
    }

    pub fn set(&mut self, field: KeyValueField, value: impl Into<String>) {
        let slot = match field {
            KeyValueField::Id => &mut self.id,
            KeyValueField::Name => &mut self.name,
            KeyValueField::Key => &mut self.key,
            KeyValueField::Value => &mut self.value,
            KeyValueField::Uri => &mut self.uri,
        };
        *slot = Some(value.into());
    }

    /// Read a field by key name.
    pub fn get_key(&self, key: &str) -> Result<Option<&str>> {
        let field: KeyValueField = key.parse()?;
        Ok(self.get(field))
    }

    /// Write a field by key name; the value must be a string.
    pub fn set_key(&mut self, key: &str, value: &Value) -> Result<()> {
        let field: KeyValueField = key.parse()?;
        match value {
            Value::String(s) => {
                self.set(field, s.as_str());
                Ok(())
            }
            other => Err(MetadataError::type_mismatch(
                format!("key-value field '{field}'"),
                "string",
                other,
            )),
        }
    }
}

impl FromRaw for KeyValuePair {
    fn from_raw(value: &Value) -> Result<Self> {
        let map = expect_object(value, "key-value pair")?;
        Ok(KeyValuePair {
            id: optional_string(map, "id")?,
            name: optional_string(map, "name")?,
            key: optional_string(map, "key")?,
            value: optional_string(map, "value")?,
            uri: optional_string(map, "uri")?,
        })
    }
}

impl IntoValidated<KeyValuePair> for KeyValuePair {
    fn into_validated(self) -> Result<KeyValuePair> {
        Ok(self)
    }
}

impl<'de> Deserialize<'de> for KeyValuePair {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserialize_validated(deserializer)
    }
}

/// Ordered key/value entries, validated on every insert.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ListOfKeyValue(RestrictedList<KeyValuePair>);

impl ListOfKeyValue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalize key/value data.
    ///
    /// Accepts a `ListOfKeyValue` (as-is), a list of entry mappings, a
    /// mapping of keys to string values (one entry per key), or `null`.
    pub fn parse_list_of_key_value(input: impl IntoValidated<ListOfKeyValue>) -> Result<Self> {
        input.into_validated()
    }

    /// Value of the first entry with the given key.
    pub fn value_of(&self, key: &str) -> Option<&str> {
        self.iter()
            .find(|pair| pair.get(KeyValueField::Key) == Some(key))
            .and_then(|pair| pair.get(KeyValueField::Value))
    }
}

impl Deref for ListOfKeyValue {
    type Target = RestrictedList<KeyValuePair>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for ListOfKeyValue {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl FromRaw for ListOfKeyValue {
    fn from_raw(value: &Value) -> Result<Self> {
        match value {
            Value::Null => Ok(Self::new()),
            Value::Array(_) => Ok(Self(RestrictedList::from_raw(value)?)),
            Value::Object(map) => {
                let pairs = map
                    .iter()
                    .map(|(key, value)| match value {
                        Value::String(s) => Ok(KeyValuePair::new(key.as_str(), s.as_str())),
                        other => Err(MetadataError::type_mismatch(
                            format!("value for key '{key}'"),
                            "string",
                            other,
                        )),
                    })
                    .collect::<Result<Vec<_>>>()?;
                Ok(Self(RestrictedList::from(pairs)))
            }
            other => Err(MetadataError::type_mismatch(
                "key-value list",
                "list, mapping or null",
                other,
            )),
        }
    }
}

impl IntoValidated<ListOfKeyValue> for ListOfKeyValue {
    fn into_validated(self) -> Result<ListOfKeyValue> {
        Ok(self)
    }
}

impl IntoValidated<ListOfKeyValue> for Vec<KeyValuePair> {
    fn into_validated(self) -> Result<ListOfKeyValue> {
        Ok(ListOfKeyValue(RestrictedList::from(self)))
    }
}

impl<'de> Deserialize<'de> for ListOfKeyValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserialize_validated(deserializer)
    }
}
