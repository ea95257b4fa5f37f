//! The history record: who created a component, when, and when it changed.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::error::{MetadataError, Result};
use crate::raw::{FromRaw, IntoValidated, deserialize_validated, expect_object};

use super::date::DateStamp;
use super::list::{ListOfCreators, ModifiedHistory};

/// The three fields of a history record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HistoryField {
    Creators,
    Created,
    Modified,
}

impl HistoryField {
    /// All history fields in canonical order.
    pub const ALL: [HistoryField; 3] = [
        HistoryField::Creators,
        HistoryField::Created,
        HistoryField::Modified,
    ];

    /// Canonical key names.
    pub const KEYS: &'static [&'static str] = &["creators", "created", "modified"];

    /// The key name of this field.
    pub fn key(&self) -> &'static str {
        match self {
            HistoryField::Creators => "creators",
            HistoryField::Created => "created",
            HistoryField::Modified => "modified",
        }
    }
}

impl FromStr for HistoryField {
    type Err = MetadataError;

    fn from_str(s: &str) -> Result<Self> {
        HistoryField::ALL
            .into_iter()
            .find(|field| field.key() == s)
            .ok_or_else(|| MetadataError::KeyNotAllowed {
                key: s.to_string(),
                allowed: HistoryField::KEYS,
            })
    }
}

impl fmt::Display for HistoryField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// History of a model component: its creators, creation date and
/// modification dates.
///
/// The record has exactly three fields. Typed accessors cover normal use;
/// [`History::get_key`] and [`History::set_key`] give the same access by key
/// name over plain data and reject any other key.
///
/// ```
/// use modelmeta::History;
/// use serde_json::json;
///
/// let history = History::parse_history(json!({
///     "creators": [{"first_name": "A"}],
///     "created": "2020-01-01T00:00:00+0000",
///     "modified": ["2020-02-01T00:00:00+0000"]
/// }))
/// .unwrap();
///
/// assert_eq!(history.creators()[0].first_name(), Some("A"));
/// assert_eq!(history.created().unwrap().as_str(), "2020-01-01T00:00:00+0000");
/// assert_eq!(history.modified()[0].as_str(), "2020-02-01T00:00:00+0000");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct History {
    creators: ListOfCreators,
    created: Option<DateStamp>,
    modified: ModifiedHistory,
}

impl History {
    /// Build a history from typed or plain parts.
    ///
    /// `created` is optional; `creators` and `modified` are validated like
    /// any other write to those fields.
    pub fn new(
        creators: impl IntoValidated<ListOfCreators>,
        created: Option<impl IntoValidated<DateStamp>>,
        modified: impl IntoValidated<ModifiedHistory>,
    ) -> Result<Self> {
        Ok(Self {
            creators: creators.into_validated()?,
            created: created.map(IntoValidated::into_validated).transpose()?,
            modified: modified.into_validated()?,
        })
    }

    /// Normalize a history from a `History` (returned as-is), a plain mapping,
    /// or `null` (an empty history).
    pub fn parse_history(input: impl IntoValidated<History>) -> Result<Self> {
        input.into_validated()
    }

    /// Parse a history from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_raw(&value)
    }

    pub fn creators(&self) -> &ListOfCreators {
        &self.creators
    }

    /// Mutable access to the creators; the list validates its own inserts.
    pub fn creators_mut(&mut self) -> &mut ListOfCreators {
        &mut self.creators
    }

    /// Replace the creators.
    pub fn set_creators(&mut self, creators: impl IntoValidated<ListOfCreators>) -> Result<()> {
        self.creators = creators.into_validated()?;
        Ok(())
    }

    pub fn created(&self) -> Option<&DateStamp> {
        self.created.as_ref()
    }

    /// Set or clear the creation date.
    pub fn set_created(&mut self, created: Option<impl IntoValidated<DateStamp>>) -> Result<()> {
        self.created = created.map(IntoValidated::into_validated).transpose()?;
        Ok(())
    }

    pub fn modified(&self) -> &ModifiedHistory {
        &self.modified
    }

    /// Mutable access to the modification dates.
    pub fn modified_mut(&mut self) -> &mut ModifiedHistory {
        &mut self.modified
    }

    /// Replace the modification dates.
    pub fn set_modified(&mut self, modified: impl IntoValidated<ModifiedHistory>) -> Result<()> {
        self.modified = modified.into_validated()?;
        Ok(())
    }

    /// Record a modification date at the end of the log.
    pub fn add_modified(&mut self, date: impl IntoValidated<DateStamp>) -> Result<()> {
        self.modified.append(date)
    }

    /// True when no creator, creation date or modification date is recorded.
    pub fn is_empty(&self) -> bool {
        self.creators.is_empty() && self.created.is_none() && self.modified.is_empty()
    }

    /// Read a field by key name as plain data.
    ///
    /// Fails with [`MetadataError::KeyNotAllowed`] unless `key` is one of
    /// `creators`, `created`, `modified`.
    pub fn get_key(&self, key: &str) -> Result<Value> {
        let field: HistoryField = key.parse()?;
        let value = match field {
            HistoryField::Creators => serde_json::to_value(&self.creators)?,
            HistoryField::Created => serde_json::to_value(&self.created)?,
            HistoryField::Modified => serde_json::to_value(&self.modified)?,
        };
        Ok(value)
    }

    /// Write a field by key name from plain data.
    ///
    /// `creators` and `modified` take a list; `created` takes a date string,
    /// or `null` to clear it.
    pub fn set_key(&mut self, key: &str, value: &Value) -> Result<()> {
        let field: HistoryField = key.parse()?;
        match field {
            HistoryField::Creators => self.set_creators(expect_list(value, field)?),
            HistoryField::Created => match value {
                Value::Null => self.set_created(None::<DateStamp>),
                Value::String(s) => self.set_created(Some(s.as_str())),
                other => Err(MetadataError::type_mismatch(
                    "history field 'created'",
                    "string or null",
                    other,
                )),
            },
            HistoryField::Modified => self.set_modified(expect_list(value, field)?),
        }
    }

    /// Field names, always the three history keys in canonical order.
    pub fn keys(&self) -> impl Iterator<Item = HistoryField> {
        HistoryField::ALL.into_iter()
    }

    /// Number of fields; always three.
    pub fn len(&self) -> usize {
        HistoryField::ALL.len()
    }
}

fn expect_list(value: &Value, field: HistoryField) -> Result<&Value> {
    if value.is_array() {
        Ok(value)
    } else {
        Err(MetadataError::type_mismatch(
            format!("history field '{field}'"),
            "list",
            value,
        ))
    }
}

/// Read a list-valued field, treating a missing key or `null` as empty.
fn list_field<T: FromRaw + Default>(map: &Map<String, Value>, key: &str) -> Result<T> {
    match map.get(key) {
        None | Some(Value::Null) => Ok(T::default()),
        Some(value @ Value::Array(_)) => T::from_raw(value),
        Some(other) => Err(MetadataError::type_mismatch(
            format!("history field '{key}'"),
            "list",
            other,
        )),
    }
}

impl FromRaw for History {
    fn from_raw(value: &Value) -> Result<Self> {
        if value.is_null() {
            return Ok(History::default());
        }
        let map = expect_object(value, "history")?;

        let created = match map.get("created") {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(DateStamp::parse(s.as_str())?),
            Some(other) => {
                return Err(MetadataError::type_mismatch(
                    "history field 'created'",
                    "string or null",
                    other,
                ));
            }
        };

        Ok(History {
            creators: list_field(map, "creators")?,
            created,
            modified: list_field(map, "modified")?,
        })
    }
}

impl IntoValidated<History> for History {
    fn into_validated(self) -> Result<History> {
        Ok(self)
    }
}

impl<'de> Deserialize<'de> for History {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserialize_validated(deserializer)
    }
}
