//! The metadata facade attached to model components.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::annotation::{AnnotationStore, Annotations, CVTerm, CVTerms};
use crate::error::Result;
use crate::history::History;
use crate::keyvalue::ListOfKeyValue;
use crate::raw::{FromRaw, IntoValidated, deserialize_validated, expect_object};

/// Metadata of a model component: annotations, history and key/value data.
///
/// The mapping interface (`get`, `set`, `remove`, `iter`, `len`,
/// `contains_key`) is a view over the annotation store's provider index;
/// `MetaData` keeps no annotation data of its own.
///
/// ```
/// use modelmeta::MetaData;
/// use serde_json::json;
///
/// let mut meta = MetaData::from_parts(
///     json!({"bqb_is": [{"resources": ["https://identifiers.org/chebi/CHEBI:17234"]}]}),
///     json!({"created": "2020-01-01T00:00:00+0000"}),
///     json!(null),
/// )
/// .unwrap();
///
/// meta.set("kegg.compound", ["C00031"]).unwrap();
/// assert_eq!(meta.len(), 2);
/// assert_eq!(meta.get("chebi"), ["CHEBI:17234"]);
/// assert!(meta.history().created().is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetaData<S: AnnotationStore = CVTerms> {
    cvterms: S,
    history: History,
    key_values: ListOfKeyValue,
}

impl MetaData<CVTerms> {
    /// Create empty metadata backed by a default [`CVTerms`] store.
    pub fn new() -> Self {
        Self::with_store(CVTerms::new())
    }

    /// Build metadata from typed or plain parts; each part may be `null`.
    pub fn from_parts(
        cvterms: impl IntoValidated<CVTerms>,
        history: impl IntoValidated<History>,
        key_values: impl IntoValidated<ListOfKeyValue>,
    ) -> Result<Self> {
        let mut meta = Self::new();
        meta.add_cvterms(cvterms)?;
        meta.history = History::parse_history(history)?;
        meta.key_values = ListOfKeyValue::parse_list_of_key_value(key_values)?;
        Ok(meta)
    }

    /// Parse metadata from JSON text with optional `cvterms`, `history` and
    /// `key_values` members.
    pub fn from_json(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_raw(&value)
    }
}

impl Default for MetaData<CVTerms> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: AnnotationStore> MetaData<S> {
    /// Create empty metadata around an existing annotation store.
    pub fn with_store(cvterms: S) -> Self {
        Self {
            cvterms,
            history: History::default(),
            key_values: ListOfKeyValue::new(),
        }
    }

    /// Add one CV term to the store.
    pub fn add_cvterm(&mut self, term: CVTerm, index: usize) -> Result<()> {
        self.cvterms.add_cvterm(term, index)
    }

    /// Add a collection of CV terms, typed or plain; `null` adds nothing.
    pub fn add_cvterms(&mut self, terms: impl IntoValidated<CVTerms>) -> Result<()> {
        self.cvterms.add_cvterms(terms.into_validated()?)
    }

    /// The annotation store.
    pub fn cvterms(&self) -> &S {
        &self.cvterms
    }

    /// Replace the annotation store's contents with `terms`.
    ///
    /// A fresh store is built and indexed first; the current store is only
    /// swapped out once that succeeds.
    pub fn set_cvterms(&mut self, terms: impl IntoValidated<CVTerms>) -> Result<()> {
        let terms = terms.into_validated()?;
        let mut store = self.cvterms.empty();
        store.reset_index();
        store.add_cvterms(terms)?;
        self.cvterms = store;
        debug!(providers = self.cvterms.annotations().len(), "replaced annotation store");
        Ok(())
    }

    /// Provider to identifiers view of the annotation store.
    pub fn annotations(&self) -> &Annotations {
        self.cvterms.annotations()
    }

    /// Identifiers recorded for `provider`; empty when there are none.
    ///
    /// Compatibility shim: an `sbo` entry holding an empty list is removed
    /// from the store when read, so probing for an unset SBO term does not
    /// leave an empty entry behind.
    pub fn get(&mut self, provider: &str) -> &[String] {
        if provider == "sbo" && self.annotations().get("sbo").is_some_and(Vec::is_empty) {
            self.cvterms.remove_annotation("sbo");
            debug!("dropped empty sbo annotation");
            return &[];
        }
        self.annotations()
            .get(provider)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Annotate `provider` with `identifiers`, using the default qualifier.
    pub fn set<I>(&mut self, provider: &str, identifiers: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let identifiers = identifiers.into_iter().map(Into::into).collect();
        self.cvterms.add_simple_annotation(provider, identifiers)
    }

    /// Remove `provider` from the annotations, returning its identifiers.
    pub fn remove(&mut self, provider: &str) -> Option<Vec<String>> {
        self.cvterms.remove_annotation(provider)
    }

    pub fn contains_key(&self, provider: &str) -> bool {
        self.annotations().contains_key(provider)
    }

    /// Iterate over `(provider, identifiers)` in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Vec<String>> {
        self.annotations().iter()
    }

    /// Provider names in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, Vec<String>> {
        self.annotations().keys()
    }

    pub fn len(&self) -> usize {
        self.annotations().len()
    }

    pub fn is_empty(&self) -> bool {
        self.annotations().is_empty()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut History {
        &mut self.history
    }

    /// Replace the history from a `History`, a plain mapping, or `null`.
    pub fn set_history(&mut self, history: impl IntoValidated<History>) -> Result<()> {
        self.history = History::parse_history(history)?;
        Ok(())
    }

    pub fn key_values(&self) -> &ListOfKeyValue {
        &self.key_values
    }

    pub fn key_values_mut(&mut self) -> &mut ListOfKeyValue {
        &mut self.key_values
    }

    /// Replace the key/value data from a typed list, plain data, or `null`.
    pub fn set_key_values(&mut self, key_values: impl IntoValidated<ListOfKeyValue>) -> Result<()> {
        self.key_values = ListOfKeyValue::parse_list_of_key_value(key_values)?;
        Ok(())
    }
}

impl<'a, S: AnnotationStore> IntoIterator for &'a MetaData<S> {
    type Item = (&'a String, &'a Vec<String>);
    type IntoIter = indexmap::map::Iter<'a, String, Vec<String>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<S: AnnotationStore> fmt::Display for MetaData<S> {
    /// Renders the annotation mapping, e.g. `{"chebi": ["CHEBI:17234"]}`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (provider, identifiers)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{provider:?}: [")?;
            for (j, identifier) in identifiers.iter().enumerate() {
                if j > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{identifier:?}")?;
            }
            f.write_str("]")?;
        }
        f.write_str("}")
    }
}

impl FromRaw for MetaData<CVTerms> {
    fn from_raw(value: &Value) -> Result<Self> {
        if value.is_null() {
            return Ok(Self::new());
        }
        let map = expect_object(value, "metadata")?;
        Self::from_parts(
            map.get("cvterms").unwrap_or(&Value::Null),
            map.get("history").unwrap_or(&Value::Null),
            map.get("key_values").unwrap_or(&Value::Null),
        )
    }
}

impl<'de> Deserialize<'de> for MetaData<CVTerms> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserialize_validated(deserializer)
    }
}
