//! Error types for the modelmeta library.

use thiserror::Error;

/// Main error type for metadata operations.
///
/// Every variant is raised at the mutation or construction site that detected
/// it. The container being mutated is left unchanged.
#[derive(Debug, Error)]
pub enum MetadataError {
    /// A key outside the record's fixed field set was read or written.
    #[error("Key '{key}' is not allowed. Only allowed keys are: {}", allowed.join(", "))]
    KeyNotAllowed {
        key: String,
        allowed: &'static [&'static str],
    },

    /// A value of the wrong kind was supplied.
    #[error("Invalid type for {context}: expected {expected}, found {found}")]
    TypeMismatch {
        context: String,
        expected: &'static str,
        found: &'static str,
    },

    /// A date string does not follow `YYYY-MM-DDTHH:MM:SS±HHMM`.
    #[error("Invalid date '{value}': {source}")]
    InvalidDate {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    /// A sequence position outside the current bounds.
    #[error("Index {index} out of range for sequence of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// An annotation qualifier name that is not a known BioModels qualifier.
    #[error("Unknown qualifier: {0}")]
    UnknownQualifier(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl MetadataError {
    /// Build a type mismatch error for the given raw value.
    pub(crate) fn type_mismatch(
        context: impl Into<String>,
        expected: &'static str,
        found: &serde_json::Value,
    ) -> Self {
        MetadataError::TypeMismatch {
            context: context.into(),
            expected,
            found: crate::raw::kind_of(found),
        }
    }

    /// Returns true for schema violations (disallowed keys).
    pub fn is_key_not_allowed(&self) -> bool {
        matches!(self, MetadataError::KeyNotAllowed { .. })
    }

    /// Returns true for type violations.
    pub fn is_type_mismatch(&self) -> bool {
        matches!(self, MetadataError::TypeMismatch { .. })
    }

    /// Returns true for date format violations.
    pub fn is_invalid_date(&self) -> bool {
        matches!(self, MetadataError::InvalidDate { .. })
    }
}

/// Result type alias for metadata operations.
pub type Result<T> = std::result::Result<T, MetadataError>;
