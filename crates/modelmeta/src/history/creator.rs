//! Creator records.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::{MetadataError, Result};
use crate::raw::{FromRaw, IntoValidated, deserialize_validated, expect_object, optional_string};

/// The four fields a creator record may hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CreatorField {
    FirstName,
    LastName,
    Email,
    OrganizationName,
}

impl CreatorField {
    /// All creator fields in canonical order.
    pub const ALL: [CreatorField; 4] = [
        CreatorField::FirstName,
        CreatorField::LastName,
        CreatorField::Email,
        CreatorField::OrganizationName,
    ];

    /// Canonical key names.
    pub const KEYS: &'static [&'static str] =
        &["first_name", "last_name", "email", "organization_name"];

    /// The key name of this field.
    pub fn key(&self) -> &'static str {
        match self {
            CreatorField::FirstName => "first_name",
            CreatorField::LastName => "last_name",
            CreatorField::Email => "email",
            CreatorField::OrganizationName => "organization_name",
        }
    }
}

impl FromStr for CreatorField {
    type Err = MetadataError;

    fn from_str(s: &str) -> Result<Self> {
        CreatorField::ALL
            .into_iter()
            .find(|field| field.key() == s)
            .ok_or_else(|| MetadataError::KeyNotAllowed {
                key: s.to_string(),
                allowed: CreatorField::KEYS,
            })
    }
}

impl fmt::Display for CreatorField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A contributor to a model component: name, email and organization.
///
/// Every field is optional. Unset fields serialize as `null`, so the plain
/// form always carries all four keys.
///
/// ```
/// use modelmeta::{Creator, CreatorField};
///
/// let creator = Creator::new().with_first_name("Ada").with_email("ada@example.org");
/// assert_eq!(creator.get(CreatorField::FirstName), Some("Ada"));
/// assert_eq!(creator.get(CreatorField::LastName), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Creator {
    first_name: Option<String>,
    last_name: Option<String>,
    email: Option<String>,
    organization_name: Option<String>,
}

impl Creator {
    /// Create a creator with all fields unset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the first name.
    pub fn with_first_name(mut self, value: impl Into<String>) -> Self {
        self.first_name = Some(value.into());
        self
    }

    /// Set the last name.
    pub fn with_last_name(mut self, value: impl Into<String>) -> Self {
        self.last_name = Some(value.into());
        self
    }

    /// Set the email address.
    pub fn with_email(mut self, value: impl Into<String>) -> Self {
        self.email = Some(value.into());
        self
    }

    /// Set the organization name.
    pub fn with_organization_name(mut self, value: impl Into<String>) -> Self {
        self.organization_name = Some(value.into());
        self
    }

    pub fn first_name(&self) -> Option<&str> {
        self.first_name.as_deref()
    }

    pub fn last_name(&self) -> Option<&str> {
        self.last_name.as_deref()
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn organization_name(&self) -> Option<&str> {
        self.organization_name.as_deref()
    }

    /// Read a field.
    pub fn get(&self, field: CreatorField) -> Option<&str> {
        self.slot(field).as_deref()
    }

    /// Write a field.
    pub fn set(&mut self, field: CreatorField, value: impl Into<String>) {
        *self.slot_mut(field) = Some(value.into());
    }

    /// Unset a field.
    pub fn clear(&mut self, field: CreatorField) {
        *self.slot_mut(field) = None;
    }

    /// Read a field by key name.
    ///
    /// Fails with [`MetadataError::KeyNotAllowed`] for any key other than the
    /// four creator fields.
    pub fn get_key(&self, key: &str) -> Result<Option<&str>> {
        let field: CreatorField = key.parse()?;
        Ok(self.get(field))
    }

    /// Write a field by key name from plain data.
    ///
    /// The key must be a creator field and the value must be a string.
    pub fn set_key(&mut self, key: &str, value: &Value) -> Result<()> {
        let field: CreatorField = key.parse()?;
        match value {
            Value::String(s) => {
                self.set(field, s.as_str());
                Ok(())
            }
            other => Err(MetadataError::type_mismatch(
                format!("creator field '{field}'"),
                "string",
                other,
            )),
        }
    }

    /// Iterate over `(field, value)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (CreatorField, Option<&str>)> + '_ {
        CreatorField::ALL
            .into_iter()
            .map(move |field| (field, self.get(field)))
    }

    /// Number of fields; always four.
    pub fn len(&self) -> usize {
        CreatorField::ALL.len()
    }

    /// Always false; a creator always carries its four fields.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// True if no field is set.
    pub fn is_blank(&self) -> bool {
        self.iter().all(|(_, value)| value.is_none())
    }

    fn slot(&self, field: CreatorField) -> &Option<String> {
        match field {
            CreatorField::FirstName => &self.first_name,
            CreatorField::LastName => &self.last_name,
            CreatorField::Email => &self.email,
            CreatorField::OrganizationName => &self.organization_name,
        }
    }

    fn slot_mut(&mut self, field: CreatorField) -> &mut Option<String> {
        match field {
            CreatorField::FirstName => &mut self.first_name,
            CreatorField::LastName => &mut self.last_name,
            CreatorField::Email => &mut self.email,
            CreatorField::OrganizationName => &mut self.organization_name,
        }
    }
}

impl FromRaw for Creator {
    /// Build a creator from a mapping. Missing fields stay unset and keys
    /// outside the four creator fields are ignored.
    fn from_raw(value: &Value) -> Result<Self> {
        let map = expect_object(value, "creator")?;
        Ok(Creator {
            first_name: optional_string(map, "first_name")?,
            last_name: optional_string(map, "last_name")?,
            email: optional_string(map, "email")?,
            organization_name: optional_string(map, "organization_name")?,
        })
    }
}

impl IntoValidated<Creator> for Creator {
    fn into_validated(self) -> Result<Creator> {
        Ok(self)
    }
}

impl<'de> Deserialize<'de> for Creator {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserialize_validated(deserializer)
    }
}
