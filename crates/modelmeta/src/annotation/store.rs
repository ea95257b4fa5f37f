//! The annotation store: CV terms grouped by qualifier, plus a derived index
//! from provider name to identifiers.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{MetadataError, Result};
use crate::raw::{FromRaw, IntoValidated, deserialize_validated, expect_array, expect_object};

use super::cvterm::{CVTerm, split_provider};
use super::qualifier::Qualifier;

/// Provider name to ordered identifiers, e.g. `"chebi" -> ["CHEBI:17234"]`.
pub type Annotations = IndexMap<String, Vec<String>>;

/// The operations a metadata facade needs from an annotation store.
pub trait AnnotationStore {
    /// A new, empty store with the same configuration.
    fn empty(&self) -> Self
    where
        Self: Sized;

    /// Add one term to the resource group at `index` for its qualifier.
    fn add_cvterm(&mut self, term: CVTerm, index: usize) -> Result<()>;

    /// Add every term of `terms`, keeping their grouping.
    fn add_cvterms(&mut self, terms: CVTerms) -> Result<()>;

    /// The derived provider to identifiers index.
    fn annotations(&self) -> &Annotations;

    /// Annotate with `provider` identifiers using the default qualifier.
    ///
    /// An empty `identifiers` list still creates an (empty) index entry.
    fn add_simple_annotation(&mut self, provider: &str, identifiers: Vec<String>) -> Result<()>;

    /// Drop `provider` from the index, returning its identifiers.
    fn remove_annotation(&mut self, provider: &str) -> Option<Vec<String>>;

    /// Rebuild the index from the stored terms.
    fn reset_index(&mut self);
}

/// Configuration for a [`CVTerms`] store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationConfig {
    /// Base URI for resources created from simple annotations.
    pub resource_base: String,
    /// Skip identifiers already present under the same provider.
    pub deduplicate: bool,
}

impl Default for AnnotationConfig {
    fn default() -> Self {
        Self {
            resource_base: "https://identifiers.org".to_string(),
            deduplicate: true,
        }
    }
}

impl AnnotationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base URI for simple annotations.
    pub fn with_resource_base(mut self, base: impl Into<String>) -> Self {
        self.resource_base = base.into().trim_end_matches('/').to_string();
        self
    }

    /// Enable or disable identifier de-duplication.
    pub fn with_deduplicate(mut self, deduplicate: bool) -> Self {
        self.deduplicate = deduplicate;
        self
    }
}

/// One group of resources sharing a qualifier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalResources {
    pub resources: Vec<String>,
}

impl ExternalResources {
    pub fn new(resources: Vec<String>) -> Self {
        Self { resources }
    }
}

/// CV terms grouped by qualifier, with a derived annotation index.
///
/// The plain form is `{qualifier: [{"resources": [uri, ...]}, ...]}`:
///
/// ```
/// use modelmeta::{AnnotationStore, CVTerms};
///
/// let terms = CVTerms::from_json(r#"{
///     "bqb_is": [{"resources": ["https://identifiers.org/chebi/CHEBI:17234"]}]
/// }"#).unwrap();
///
/// assert_eq!(terms.annotations()["chebi"], vec!["CHEBI:17234".to_string()]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CVTerms {
    config: AnnotationConfig,
    terms: IndexMap<Qualifier, Vec<ExternalResources>>,
    annotations: Annotations,
}

impl CVTerms {
    /// Create an empty store with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store with custom configuration.
    pub fn with_config(config: AnnotationConfig) -> Self {
        Self {
            config,
            terms: IndexMap::new(),
            annotations: Annotations::new(),
        }
    }

    /// Parse terms from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_raw(&value)
    }

    pub fn config(&self) -> &AnnotationConfig {
        &self.config
    }

    /// Resource groups stored for `qualifier`.
    pub fn get(&self, qualifier: Qualifier) -> &[ExternalResources] {
        self.terms.get(&qualifier).map(Vec::as_slice).unwrap_or_default()
    }

    /// Qualifiers with at least one resource group, in insertion order.
    pub fn qualifiers(&self) -> impl Iterator<Item = Qualifier> + '_ {
        self.terms.keys().copied()
    }

    /// Every stored term, grouped by qualifier in insertion order.
    pub fn iter_terms(&self) -> impl Iterator<Item = CVTerm> + '_ {
        self.terms.iter().flat_map(|(qualifier, groups)| {
            groups.iter().flat_map(move |group| {
                group
                    .resources
                    .iter()
                    .map(move |resource| CVTerm::new(*qualifier, resource.as_str()))
            })
        })
    }

    /// Number of stored resources across all qualifiers.
    pub fn term_count(&self) -> usize {
        self.terms
            .values()
            .flatten()
            .map(|group| group.resources.len())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Add simple annotations from plain data.
    ///
    /// `data` maps provider names to an identifier or a list of identifiers.
    /// The whole mapping is checked before anything is added.
    pub fn add_simple_annotations(&mut self, data: &Value) -> Result<()> {
        let map = expect_object(data, "simple annotations")?;
        let mut parsed = Vec::with_capacity(map.len());
        for (provider, value) in map {
            let identifiers = match value {
                Value::String(id) => vec![id.clone()],
                Value::Array(items) => items
                    .iter()
                    .map(|item| match item {
                        Value::String(id) => Ok(id.clone()),
                        other => Err(MetadataError::type_mismatch(
                            format!("identifier for '{provider}'"),
                            "string",
                            other,
                        )),
                    })
                    .collect::<Result<Vec<_>>>()?,
                other => {
                    return Err(MetadataError::type_mismatch(
                        format!("annotation '{provider}'"),
                        "string or list",
                        other,
                    ));
                }
            };
            parsed.push((provider.clone(), identifiers));
        }

        for (provider, identifiers) in parsed {
            self.add_simple_annotation(&provider, identifiers)?;
        }
        Ok(())
    }

    /// Split a resource into `(provider, identifier)`, accepting both
    /// identifiers.org URIs and URIs under the configured resource base.
    fn resolve(&self, resource: &str) -> Option<(String, String)> {
        if let Some(pair) = CVTerm::is(resource).parse_provider_identifier() {
            return Some(pair);
        }
        let rest = resource
            .strip_prefix(self.config.resource_base.as_str())?
            .strip_prefix('/')?;
        let split = rest.find(['/', ':'])?;
        let (provider, identifier) = (&rest[..split], &rest[split + 1..]);
        if provider.is_empty() || identifier.is_empty() {
            return None;
        }
        Some(split_provider(provider, identifier))
    }

    fn index_identifier(&mut self, provider: String, identifier: String) {
        let entry = self.annotations.entry(provider).or_default();
        if !self.config.deduplicate || !entry.contains(&identifier) {
            entry.push(identifier);
        }
    }

    fn index_resource(&mut self, resource: &str) {
        match self.resolve(resource) {
            Some((provider, identifier)) => self.index_identifier(provider, identifier),
            None => warn!(resource, "resource is not a resolvable identifier URI; not indexed"),
        }
    }

    fn store_resource(&mut self, qualifier: Qualifier, resource: String, index: usize) {
        let groups = self.terms.entry(qualifier).or_default();
        match groups.get_mut(index) {
            Some(group) => group.resources.push(resource),
            None => groups.push(ExternalResources::new(vec![resource])),
        }
    }
}

impl AnnotationStore for CVTerms {
    fn empty(&self) -> Self {
        Self::with_config(self.config.clone())
    }

    /// Appends to the group at `index`; an index past the last group starts a
    /// new group.
    fn add_cvterm(&mut self, term: CVTerm, index: usize) -> Result<()> {
        self.index_resource(&term.resource);
        self.store_resource(term.qualifier, term.resource, index);
        Ok(())
    }

    fn add_cvterms(&mut self, terms: CVTerms) -> Result<()> {
        for (qualifier, groups) in terms.terms {
            for group in groups {
                for resource in &group.resources {
                    self.index_resource(resource);
                }
                self.terms.entry(qualifier).or_default().push(group);
            }
        }
        Ok(())
    }

    fn annotations(&self) -> &Annotations {
        &self.annotations
    }

    /// The index key comes from the stored resource, so an upper-case
    /// provider such as `CHEBI` is indexed as `chebi` with `CHEBI:`-prefixed
    /// identifiers, exactly as [`reset_index`](AnnotationStore::reset_index)
    /// would rebuild it.
    fn add_simple_annotation(&mut self, provider: &str, identifiers: Vec<String>) -> Result<()> {
        let (key, _) = split_provider(provider, "");
        self.annotations.entry(key).or_default();
        for identifier in identifiers {
            let resource = format!("{}/{}/{}", self.config.resource_base, provider, identifier);
            self.index_resource(&resource);
            self.store_resource(Qualifier::BqbIs, resource, 0);
        }
        Ok(())
    }

    /// Also drops the stored resources that resolve to `provider`, so a later
    /// [`reset_index`](AnnotationStore::reset_index) does not bring it back.
    fn remove_annotation(&mut self, provider: &str) -> Option<Vec<String>> {
        let removed = self.annotations.shift_remove(provider)?;

        let mut terms = std::mem::take(&mut self.terms);
        for groups in terms.values_mut() {
            for group in groups.iter_mut() {
                group
                    .resources
                    .retain(|resource| !matches!(self.resolve(resource), Some((p, _)) if p == provider));
            }
            groups.retain(|group| !group.resources.is_empty());
        }
        terms.retain(|_, groups| !groups.is_empty());
        self.terms = terms;

        debug!(provider, count = removed.len(), "removed annotation");
        Some(removed)
    }

    fn reset_index(&mut self) {
        self.annotations.clear();
        let resources: Vec<String> = self
            .terms
            .values()
            .flatten()
            .flat_map(|group| group.resources.iter().cloned())
            .collect();
        for resource in resources {
            self.index_resource(&resource);
        }
    }
}

impl FromRaw for CVTerms {
    /// Accepts `null` (no terms) or `{qualifier: [{"resources": [..]}, ..]}`.
    fn from_raw(value: &Value) -> Result<Self> {
        let mut cvterms = CVTerms::new();
        if value.is_null() {
            return Ok(cvterms);
        }

        let map = expect_object(value, "cvterms")?;
        for (name, groups) in map {
            let qualifier: Qualifier = name.parse()?;
            let context = format!("resources for '{qualifier}'");
            for group in expect_array(groups, &context)? {
                let group = expect_object(group, &context)?;
                let resources = match group.get("resources") {
                    None | Some(Value::Null) => Vec::new(),
                    Some(list) => expect_array(list, &context)?
                        .iter()
                        .map(|resource| match resource {
                            Value::String(uri) => Ok(uri.clone()),
                            other => Err(MetadataError::type_mismatch(&context, "string", other)),
                        })
                        .collect::<Result<Vec<_>>>()?,
                };
                cvterms
                    .terms
                    .entry(qualifier)
                    .or_default()
                    .push(ExternalResources::new(resources));
            }
        }
        cvterms.reset_index();
        Ok(cvterms)
    }
}

impl IntoValidated<CVTerms> for CVTerms {
    fn into_validated(self) -> Result<CVTerms> {
        Ok(self)
    }
}

impl IntoValidated<CVTerms> for Vec<CVTerm> {
    fn into_validated(self) -> Result<CVTerms> {
        let mut cvterms = CVTerms::new();
        for term in self {
            cvterms.add_cvterm(term, 0)?;
        }
        Ok(cvterms)
    }
}

impl Serialize for CVTerms {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.terms.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for CVTerms {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserialize_validated(deserializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn chebi() -> CVTerm {
        CVTerm::is("https://identifiers.org/chebi/CHEBI:17234")
    }

    #[test]
    fn test_add_cvterm_groups_by_index() {
        let mut terms = CVTerms::new();
        terms.add_cvterm(chebi(), 0).unwrap();
        terms
            .add_cvterm(CVTerm::is("https://identifiers.org/kegg.compound/C00031"), 0)
            .unwrap();
        terms
            .add_cvterm(CVTerm::is("https://identifiers.org/CHEBI:4167"), 5)
            .unwrap();

        let groups = terms.get(Qualifier::BqbIs);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].resources.len(), 2);
        assert_eq!(groups[1].resources.len(), 1);

        assert_eq!(terms.annotations()["chebi"], vec!["CHEBI:17234", "CHEBI:4167"]);
        assert_eq!(terms.annotations()["kegg.compound"], vec!["C00031"]);
        assert_eq!(terms.term_count(), 3);
    }

    #[test]
    fn test_unresolvable_resources_are_stored_not_indexed() {
        let mut terms = CVTerms::new();
        terms
            .add_cvterm(CVTerm::new(Qualifier::BqmIsDescribedBy, "urn:miriam:pubmed:123"), 0)
            .unwrap();
        assert_eq!(terms.term_count(), 1);
        assert!(terms.annotations().is_empty());
    }

    #[test]
    fn test_deduplicates_identifiers() {
        let mut terms = CVTerms::new();
        terms.add_cvterm(chebi(), 0).unwrap();
        terms.add_cvterm(chebi(), 1).unwrap();
        assert_eq!(terms.annotations()["chebi"].len(), 1);

        let mut terms = CVTerms::with_config(AnnotationConfig::new().with_deduplicate(false));
        terms.add_cvterm(chebi(), 0).unwrap();
        terms.add_cvterm(chebi(), 1).unwrap();
        assert_eq!(terms.annotations()["chebi"].len(), 2);
    }

    #[test]
    fn test_from_raw() {
        let terms = CVTerms::from_raw(&json!({
            "bqb_is": [
                {"resources": ["https://identifiers.org/chebi/CHEBI:17234"]},
                {"resources": ["https://identifiers.org/uniprot/P12345"]}
            ],
            "bqb_hasTaxon": [
                {"resources": ["https://identifiers.org/taxonomy/9606"]}
            ]
        }))
        .unwrap();

        assert_eq!(terms.get(Qualifier::BqbIs).len(), 2);
        let providers: Vec<_> = terms.annotations().keys().cloned().collect();
        assert_eq!(providers, vec!["chebi", "uniprot", "taxonomy"]);
    }

    #[test]
    fn test_from_raw_rejects_bad_input() {
        let err = CVTerms::from_raw(&json!({"bqb_isA": []})).unwrap_err();
        assert!(matches!(err, MetadataError::UnknownQualifier(_)));

        let err = CVTerms::from_raw(&json!({"bqb_is": [{"resources": [1]}]})).unwrap_err();
        assert!(err.is_type_mismatch());

        let err = CVTerms::from_raw(&json!(["bqb_is"])).unwrap_err();
        assert!(err.is_type_mismatch());

        assert!(CVTerms::from_raw(&Value::Null).unwrap().is_empty());
    }

    #[test]
    fn test_simple_annotations() {
        let mut terms = CVTerms::new();
        terms
            .add_simple_annotations(&json!({
                "chebi": ["CHEBI:17234", "CHEBI:4167"],
                "sbo": "SBO:0000247"
            }))
            .unwrap();

        assert_eq!(terms.annotations()["chebi"].len(), 2);
        assert_eq!(terms.annotations()["sbo"], vec!["SBO:0000247"]);
        assert_eq!(terms.get(Qualifier::BqbIs)[0].resources[0],
            "https://identifiers.org/chebi/CHEBI:17234");
    }

    #[test]
    fn test_simple_annotations_are_atomic() {
        let mut terms = CVTerms::new();
        let err = terms
            .add_simple_annotations(&json!({"chebi": "CHEBI:1", "kegg": [1, 2]}))
            .unwrap_err();
        assert!(err.is_type_mismatch());
        assert!(terms.annotations().is_empty());
        assert!(terms.is_empty());
    }

    #[test]
    fn test_custom_resource_base_survives_reset() {
        let config = AnnotationConfig::new().with_resource_base("https://example.org/ids/");
        let mut terms = CVTerms::with_config(config);
        terms
            .add_simple_annotation("local", vec!["A1".to_string()])
            .unwrap();
        assert_eq!(terms.get(Qualifier::BqbIs)[0].resources[0], "https://example.org/ids/local/A1");

        terms.reset_index();
        assert_eq!(terms.annotations()["local"], vec!["A1"]);
    }

    #[test]
    fn test_upper_case_provider_matches_rebuilt_index() {
        let mut terms = CVTerms::new();
        terms
            .add_simple_annotation("CHEBI", vec!["17234".to_string()])
            .unwrap();
        assert_eq!(terms.annotations()["chebi"], vec!["CHEBI:17234"]);
        assert!(!terms.annotations().contains_key("CHEBI"));

        let live = terms.annotations().clone();
        terms.reset_index();
        assert_eq!(terms.annotations(), &live);

        assert!(terms.remove_annotation("chebi").is_some());
        terms.reset_index();
        assert!(terms.annotations().is_empty());
        assert!(terms.is_empty());
    }

    #[test]
    fn test_remove_annotation_drops_resources() {
        let mut terms = CVTerms::new();
        terms.add_cvterm(chebi(), 0).unwrap();
        terms
            .add_cvterm(CVTerm::is("https://identifiers.org/uniprot/P12345"), 0)
            .unwrap();

        assert_eq!(terms.remove_annotation("chebi"), Some(vec!["CHEBI:17234".to_string()]));
        assert_eq!(terms.remove_annotation("chebi"), None);

        terms.reset_index();
        assert!(!terms.annotations().contains_key("chebi"));
        assert_eq!(terms.term_count(), 1);
    }

    #[test]
    fn test_add_cvterms_merges_groups() {
        let mut terms = CVTerms::new();
        terms.add_cvterm(chebi(), 0).unwrap();

        let other: CVTerms = vec![CVTerm::is("https://identifiers.org/uniprot/P12345")]
            .into_validated()
            .unwrap();
        terms.add_cvterms(other).unwrap();

        assert_eq!(terms.get(Qualifier::BqbIs).len(), 2);
        assert!(terms.annotations().contains_key("uniprot"));
    }

    #[test]
    fn test_serde_plain_form() {
        let mut terms = CVTerms::new();
        terms.add_cvterm(chebi(), 0).unwrap();
        let value = serde_json::to_value(&terms).unwrap();
        assert_eq!(
            value,
            json!({"bqb_is": [{"resources": ["https://identifiers.org/chebi/CHEBI:17234"]}]})
        );

        let back: CVTerms = serde_json::from_value(value).unwrap();
        assert_eq!(back, terms);
    }

    #[test]
    fn test_empty_keeps_config() {
        let config = AnnotationConfig::new().with_deduplicate(false);
        let mut terms = CVTerms::with_config(config.clone());
        terms.add_cvterm(chebi(), 0).unwrap();

        let fresh = terms.empty();
        assert!(fresh.is_empty());
        assert_eq!(fresh.config(), &config);
    }
}
