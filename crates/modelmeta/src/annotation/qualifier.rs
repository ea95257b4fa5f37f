//! BioModels qualifiers relating a component to an external resource.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::MetadataError;

/// Relationship between an annotated component and an external resource.
///
/// `bqb_*` qualifiers describe the biological entity, `bqm_*` qualifiers
/// describe the model itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Qualifier {
    #[default]
    #[serde(rename = "bqb_is")]
    BqbIs,
    #[serde(rename = "bqb_hasPart")]
    BqbHasPart,
    #[serde(rename = "bqb_isPartOf")]
    BqbIsPartOf,
    #[serde(rename = "bqb_isVersionOf")]
    BqbIsVersionOf,
    #[serde(rename = "bqb_hasVersion")]
    BqbHasVersion,
    #[serde(rename = "bqb_isHomologTo")]
    BqbIsHomologTo,
    #[serde(rename = "bqb_isDescribedBy")]
    BqbIsDescribedBy,
    #[serde(rename = "bqb_isEncodedBy")]
    BqbIsEncodedBy,
    #[serde(rename = "bqb_encodes")]
    BqbEncodes,
    #[serde(rename = "bqb_occursIn")]
    BqbOccursIn,
    #[serde(rename = "bqb_hasProperty")]
    BqbHasProperty,
    #[serde(rename = "bqb_isPropertyOf")]
    BqbIsPropertyOf,
    #[serde(rename = "bqb_hasTaxon")]
    BqbHasTaxon,
    #[serde(rename = "bqb_unknown")]
    BqbUnknown,
    #[serde(rename = "bqm_is")]
    BqmIs,
    #[serde(rename = "bqm_isDescribedBy")]
    BqmIsDescribedBy,
    #[serde(rename = "bqm_isDerivedFrom")]
    BqmIsDerivedFrom,
    #[serde(rename = "bqm_isInstanceOf")]
    BqmIsInstanceOf,
    #[serde(rename = "bqm_hasInstance")]
    BqmHasInstance,
    #[serde(rename = "bqm_unknown")]
    BqmUnknown,
}

impl Qualifier {
    pub const ALL: [Qualifier; 20] = [
        Qualifier::BqbIs,
        Qualifier::BqbHasPart,
        Qualifier::BqbIsPartOf,
        Qualifier::BqbIsVersionOf,
        Qualifier::BqbHasVersion,
        Qualifier::BqbIsHomologTo,
        Qualifier::BqbIsDescribedBy,
        Qualifier::BqbIsEncodedBy,
        Qualifier::BqbEncodes,
        Qualifier::BqbOccursIn,
        Qualifier::BqbHasProperty,
        Qualifier::BqbIsPropertyOf,
        Qualifier::BqbHasTaxon,
        Qualifier::BqbUnknown,
        Qualifier::BqmIs,
        Qualifier::BqmIsDescribedBy,
        Qualifier::BqmIsDerivedFrom,
        Qualifier::BqmIsInstanceOf,
        Qualifier::BqmHasInstance,
        Qualifier::BqmUnknown,
    ];

    /// The qualifier name as written in annotations (e.g. `bqb_is`).
    pub fn name(&self) -> &'static str {
        match self {
            Qualifier::BqbIs => "bqb_is",
            Qualifier::BqbHasPart => "bqb_hasPart",
            Qualifier::BqbIsPartOf => "bqb_isPartOf",
            Qualifier::BqbIsVersionOf => "bqb_isVersionOf",
            Qualifier::BqbHasVersion => "bqb_hasVersion",
            Qualifier::BqbIsHomologTo => "bqb_isHomologTo",
            Qualifier::BqbIsDescribedBy => "bqb_isDescribedBy",
            Qualifier::BqbIsEncodedBy => "bqb_isEncodedBy",
            Qualifier::BqbEncodes => "bqb_encodes",
            Qualifier::BqbOccursIn => "bqb_occursIn",
            Qualifier::BqbHasProperty => "bqb_hasProperty",
            Qualifier::BqbIsPropertyOf => "bqb_isPropertyOf",
            Qualifier::BqbHasTaxon => "bqb_hasTaxon",
            Qualifier::BqbUnknown => "bqb_unknown",
            Qualifier::BqmIs => "bqm_is",
            Qualifier::BqmIsDescribedBy => "bqm_isDescribedBy",
            Qualifier::BqmIsDerivedFrom => "bqm_isDerivedFrom",
            Qualifier::BqmIsInstanceOf => "bqm_isInstanceOf",
            Qualifier::BqmHasInstance => "bqm_hasInstance",
            Qualifier::BqmUnknown => "bqm_unknown",
        }
    }

    /// Returns true for biology qualifiers (`bqb_*`).
    pub fn is_biological(&self) -> bool {
        self.name().starts_with("bqb_")
    }

    /// Returns true for model qualifiers (`bqm_*`).
    pub fn is_model(&self) -> bool {
        self.name().starts_with("bqm_")
    }
}

impl FromStr for Qualifier {
    type Err = MetadataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Qualifier::ALL
            .into_iter()
            .find(|q| q.name() == s)
            .ok_or_else(|| MetadataError::UnknownQualifier(s.to_string()))
    }
}

impl fmt::Display for Qualifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for qualifier in Qualifier::ALL {
            assert_eq!(qualifier.name().parse::<Qualifier>().unwrap(), qualifier);
            let json = serde_json::to_string(&qualifier).unwrap();
            assert_eq!(json, format!("\"{}\"", qualifier.name()));
        }
    }

    #[test]
    fn test_unknown_name() {
        assert!(matches!(
            "bqb_isA".parse::<Qualifier>(),
            Err(MetadataError::UnknownQualifier(_))
        ));
    }

    #[test]
    fn test_families() {
        assert!(Qualifier::BqbHasTaxon.is_biological());
        assert!(Qualifier::BqmIsDerivedFrom.is_model());
        assert!(!Qualifier::BqmIs.is_biological());
    }

    #[test]
    fn test_default_is_bqb_is() {
        assert_eq!(Qualifier::default(), Qualifier::BqbIs);
    }
}
