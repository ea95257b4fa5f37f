//! Coercion from plain structural data into validated containers.
//!
//! Every validated type in this crate can be built from a `serde_json::Value`
//! (objects for records, arrays for sequences). Mutators take
//! `impl IntoValidated<T>` so callers may pass either the typed value or its
//! plain form; both go through the same validation before anything is stored.

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use crate::error::{MetadataError, Result};

/// Construction of a validated value from its plain structural form.
pub trait FromRaw: Sized {
    /// Validate `value` and build the typed container from it.
    fn from_raw(value: &Value) -> Result<Self>;
}

/// Conversion of typed or plain input into a validated `T`.
///
/// Implemented for `T` itself (pass-through) and for `Value` / `&Value`
/// whenever `T: FromRaw`.
pub trait IntoValidated<T> {
    fn into_validated(self) -> Result<T>;
}

impl<T: FromRaw> IntoValidated<T> for Value {
    fn into_validated(self) -> Result<T> {
        T::from_raw(&self)
    }
}

impl<T: FromRaw> IntoValidated<T> for &Value {
    fn into_validated(self) -> Result<T> {
        T::from_raw(self)
    }
}

/// Name of the JSON kind of `value`, for error messages.
pub fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "mapping",
    }
}

/// Require `value` to be a JSON object.
pub(crate) fn expect_object<'a>(value: &'a Value, context: &str) -> Result<&'a Map<String, Value>> {
    value
        .as_object()
        .ok_or_else(|| MetadataError::type_mismatch(context, "mapping", value))
}

/// Require `value` to be a JSON array.
pub(crate) fn expect_array<'a>(value: &'a Value, context: &str) -> Result<&'a [Value]> {
    value
        .as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| MetadataError::type_mismatch(context, "list", value))
}

/// Read an optional string field from a raw record.
///
/// Missing keys and explicit `null` both read as `None`.
pub(crate) fn optional_string(map: &Map<String, Value>, key: &str) -> Result<Option<String>> {
    match map.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(MetadataError::type_mismatch(
            format!("field '{key}'"),
            "string",
            other,
        )),
    }
}

/// Deserialize through [`FromRaw`], so serde input obeys the same rules.
pub(crate) fn deserialize_validated<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromRaw,
{
    let value = Value::deserialize(deserializer)?;
    T::from_raw(&value).map_err(serde::de::Error::custom)
}
