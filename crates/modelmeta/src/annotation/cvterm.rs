//! Controlled-vocabulary terms: a qualifier plus a resource URI.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::qualifier::Qualifier;

/// identifiers.org resource URIs, either `/<provider>/<id>` or `/<PREFIX>:<id>`.
static IDENTIFIERS_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^https?://identifiers\.org/(.+?)[:/](.+)$").unwrap());

/// A single annotation: `qualifier` relates the component to `resource`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CVTerm {
    pub qualifier: Qualifier,
    pub resource: String,
}

impl CVTerm {
    pub fn new(qualifier: Qualifier, resource: impl Into<String>) -> Self {
        Self {
            qualifier,
            resource: resource.into(),
        }
    }

    /// A `bqb_is` term.
    pub fn is(resource: impl Into<String>) -> Self {
        Self::new(Qualifier::BqbIs, resource)
    }

    /// Split an identifiers.org resource into `(provider, identifier)`.
    ///
    /// `https://identifiers.org/chebi/CHEBI:17234` gives
    /// `("chebi", "CHEBI:17234")`. For the compact form
    /// `https://identifiers.org/CHEBI:17234` the upper-case prefix stays on the
    /// identifier and the provider is lower-cased, giving the same pair.
    /// Returns `None` for resources outside identifiers.org.
    pub fn parse_provider_identifier(&self) -> Option<(String, String)> {
        let captures = IDENTIFIERS_PATTERN.captures(&self.resource)?;
        Some(split_provider(&captures[1], &captures[2]))
    }
}

/// Normalize a compact `PREFIX:id` pair to `(prefix, "PREFIX:id")`.
pub(crate) fn split_provider(provider: &str, identifier: &str) -> (String, String) {
    let is_upper = provider.chars().any(char::is_uppercase)
        && !provider.chars().any(char::is_lowercase);
    if is_upper {
        (provider.to_lowercase(), format!("{provider}:{identifier}"))
    } else {
        (provider.to_string(), identifier.to_string())
    }
}
