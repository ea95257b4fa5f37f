//! Integration tests for the MetaData facade.

use serde_json::json;

use modelmeta::{
    AnnotationConfig, AnnotationStore, CVTerm, CVTerms, History, KeyValuePair, ListOfKeyValue,
    MetaData, Qualifier,
};

/// Route store logs to the test harness; `RUST_LOG=modelmeta=debug` shows them.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Metadata with two providers, a history and one key/value entry.
fn sample_metadata() -> MetaData {
    init_tracing();
    MetaData::from_parts(
        json!({
            "bqb_is": [
                {"resources": [
                    "https://identifiers.org/chebi/CHEBI:17234",
                    "https://identifiers.org/kegg.compound/C00031"
                ]}
            ],
            "bqb_isDescribedBy": [
                {"resources": ["https://identifiers.org/pubmed/12345678"]}
            ]
        }),
        json!({"creators": [{"first_name": "A"}], "created": "2020-01-01T00:00:00+0000"}),
        json!([{"key": "source", "value": "manual curation"}]),
    )
    .expect("sample metadata is valid")
}

// =============================================================================
// Construction
// =============================================================================

#[test]
fn test_from_parts() {
    let meta = sample_metadata();

    assert_eq!(meta.len(), 3);
    let providers: Vec<&str> = meta.keys().map(String::as_str).collect();
    assert_eq!(providers, ["chebi", "kegg.compound", "pubmed"]);

    assert_eq!(meta.history().creators()[0].first_name(), Some("A"));
    assert_eq!(meta.key_values().value_of("source"), Some("manual curation"));
}

#[test]
fn test_from_parts_accepts_nulls_and_typed_values() {
    let meta = MetaData::from_parts(json!(null), json!(null), json!(null)).unwrap();
    assert!(meta.is_empty());
    assert!(meta.history().is_empty());
    assert!(meta.key_values().is_empty());

    let history = History::parse_history(json!({"modified": ["2020-02-01T00:00:00+0000"]}))
        .unwrap();
    let key_values =
        ListOfKeyValue::parse_list_of_key_value(vec![KeyValuePair::new("a", "b")]).unwrap();
    let meta = MetaData::from_parts(CVTerms::new(), history.clone(), key_values).unwrap();
    assert_eq!(meta.history(), &history);
    assert_eq!(meta.key_values().len(), 1);
}

#[test]
fn test_from_parts_propagates_errors() {
    let err = MetaData::from_parts(json!({"bqb_is": "oops"}), json!(null), json!(null))
        .unwrap_err();
    assert!(err.is_type_mismatch());

    let err = MetaData::from_parts(json!(null), json!({"unknown": 1, "created": 5}), json!(null))
        .unwrap_err();
    assert!(err.is_type_mismatch());

    let err = MetaData::from_parts(json!(null), json!(null), json!("k=v")).unwrap_err();
    assert!(err.is_type_mismatch());
}

// =============================================================================
// Mapping view
// =============================================================================

#[test]
fn test_mapping_operations() {
    let mut meta = sample_metadata();

    meta.set("uniprot", ["P12345", "P67890"]).unwrap();
    assert!(meta.contains_key("uniprot"));
    assert_eq!(meta.get("uniprot"), ["P12345", "P67890"]);
    assert_eq!(meta.len(), 4);

    assert_eq!(meta.remove("kegg.compound"), Some(vec!["C00031".to_string()]));
    assert!(!meta.contains_key("kegg.compound"));
    assert_eq!(meta.remove("kegg.compound"), None);

    // Absent providers read as empty without being created
    assert!(meta.get("go").is_empty());
    assert!(!meta.contains_key("go"));

    let seen: Vec<(&String, usize)> = meta.iter().map(|(k, v)| (k, v.len())).collect();
    assert_eq!(seen.len(), meta.len());
}

#[test]
fn test_iteration_matches_annotations() {
    let meta = sample_metadata();
    let from_view: Vec<_> = (&meta).into_iter().collect();
    let from_store: Vec<_> = meta.cvterms().annotations().iter().collect();
    assert_eq!(from_view, from_store);
}

#[test]
fn test_set_merges_into_existing_provider() {
    let mut meta = sample_metadata();
    meta.set("chebi", ["CHEBI:4167", "CHEBI:17234"]).unwrap();
    assert_eq!(meta.get("chebi"), ["CHEBI:17234", "CHEBI:4167"]);
}

#[test]
fn test_upper_case_provider_stays_removed() {
    init_tracing();
    let mut meta = MetaData::new();
    meta.set("CHEBI", ["17234"]).unwrap();
    assert_eq!(meta.get("chebi"), ["CHEBI:17234"]);

    // The live index already matches a JSON round trip
    let text = serde_json::to_string(&meta).unwrap();
    let back = MetaData::from_json(&text).unwrap();
    assert_eq!(back.annotations(), meta.annotations());

    assert_eq!(meta.remove("chebi"), Some(vec!["CHEBI:17234".to_string()]));
    let stored = meta.cvterms().clone();
    meta.set_cvterms(stored).unwrap();
    assert!(meta.is_empty());
    assert_eq!(meta.cvterms().term_count(), 0);
}

#[test]
fn test_sbo_probe_leaves_no_entry() {
    init_tracing();
    let mut meta = MetaData::new();
    assert!(meta.get("sbo").is_empty());
    assert!(!meta.annotations().contains_key("sbo"));

    meta.set("sbo", Vec::<String>::new()).unwrap();
    assert!(meta.annotations().contains_key("sbo"));
    assert!(meta.get("sbo").is_empty());
    assert!(!meta.annotations().contains_key("sbo"));

    meta.set("sbo", ["SBO:0000176"]).unwrap();
    assert_eq!(meta.get("sbo"), ["SBO:0000176"]);
    assert!(meta.contains_key("sbo"));
}

// =============================================================================
// Store replacement
// =============================================================================

#[test]
fn test_set_cvterms_reflects_only_new_store() {
    let mut meta = sample_metadata();

    let mut replacement = CVTerms::new();
    replacement
        .add_cvterm(CVTerm::is("https://identifiers.org/uniprot/P12345"), 0)
        .unwrap();
    meta.set_cvterms(replacement).unwrap();

    let providers: Vec<&String> = meta.keys().collect();
    assert_eq!(providers, ["uniprot"]);
    assert!(meta.get("chebi").is_empty());
    assert_eq!(meta.cvterms().term_count(), 1);
}

#[test]
fn test_set_cvterms_with_empty_data() {
    let mut meta = sample_metadata();
    meta.set_cvterms(json!(null)).unwrap();
    assert!(meta.is_empty());
    assert!(meta.cvterms().is_empty());

    // History and key/values are untouched
    assert!(!meta.history().is_empty());
    assert_eq!(meta.key_values().len(), 1);
}

#[test]
fn test_set_cvterms_keeps_store_config() {
    let config = AnnotationConfig::new().with_deduplicate(false);
    let mut meta = MetaData::with_store(CVTerms::with_config(config.clone()));
    meta.set_cvterms(vec![
        CVTerm::is("https://identifiers.org/chebi/CHEBI:1"),
        CVTerm::is("https://identifiers.org/chebi/CHEBI:1"),
    ])
    .unwrap();

    assert_eq!(meta.cvterms().config(), &config);
    assert_eq!(meta.get("chebi").len(), 2);
}

#[test]
fn test_add_cvterm_with_qualifiers() {
    let mut meta = MetaData::new();
    meta.add_cvterm(
        CVTerm::new(Qualifier::BqbHasTaxon, "https://identifiers.org/taxonomy/9606"),
        0,
    )
    .unwrap();
    meta.add_cvterm(
        CVTerm::new(Qualifier::BqmIsDerivedFrom, "https://identifiers.org/biomodels.db/BIOMD0000000001"),
        0,
    )
    .unwrap();
    meta.add_cvterms(json!({
        "bqb_hasTaxon": [{"resources": ["https://identifiers.org/taxonomy/10090"]}]
    }))
    .unwrap();

    assert_eq!(meta.get("taxonomy"), ["9606", "10090"]);
    assert_eq!(meta.cvterms().get(Qualifier::BqbHasTaxon).len(), 2);
    let qualifiers: Vec<_> = meta.cvterms().qualifiers().collect();
    assert_eq!(qualifiers, [Qualifier::BqbHasTaxon, Qualifier::BqmIsDerivedFrom]);
}

// =============================================================================
// History and key/value parts
// =============================================================================

#[test]
fn test_history_and_key_value_replacement() {
    let mut meta = sample_metadata();

    meta.set_history(json!(null)).unwrap();
    assert!(meta.history().is_empty());

    assert!(meta.set_history(json!({"created": "01/01/2020"})).is_err());
    assert!(meta.history().is_empty());

    meta.set_key_values(json!({"color": "red", "shape": "round"})).unwrap();
    assert_eq!(meta.key_values().len(), 2);
    assert_eq!(meta.key_values().value_of("shape"), Some("round"));

    meta.key_values_mut()
        .append(KeyValuePair::new("size", "large").with_id("kv3"))
        .unwrap();
    assert_eq!(meta.key_values().len(), 3);
}

#[test]
fn test_display_renders_annotations() {
    let meta = sample_metadata();
    assert_eq!(
        meta.to_string(),
        r#"{"chebi": ["CHEBI:17234"], "kegg.compound": ["C00031"], "pubmed": ["12345678"]}"#
    );
}

#[test]
fn test_json_round_trip() {
    let meta = sample_metadata();
    let text = serde_json::to_string(&meta).unwrap();
    let back = MetaData::from_json(&text).unwrap();
    assert_eq!(back, meta);
}
