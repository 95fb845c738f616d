use openbis2rdf::error::ConvertError;
use openbis2rdf::model::iri::{resolve_namespace, IriMinter};
use openbis2rdf::model::ontology::{dcat, obis, standard};

const BASE: &str = "https://openbismantic.matolab.org/";

fn minter() -> IriMinter {
    IriMinter::new(BASE).expect("valid base URL")
}

// --- Namespace resolution ---

#[test]
fn namespace_extends_trailing_slash() {
    assert_eq!(
        resolve_namespace("https://openbismantic.matolab.org/").unwrap(),
        "https://openbismantic.matolab.org/openbismantic"
    );
}

#[test]
fn namespace_without_path() {
    assert_eq!(
        resolve_namespace("https://openbis.example.org").unwrap(),
        "https://openbis.example.org/openbismantic"
    );
}

#[test]
fn namespace_replaces_last_segment() {
    assert_eq!(
        resolve_namespace("https://example.org/lab/index").unwrap(),
        "https://example.org/lab/openbismantic"
    );
    assert_eq!(
        resolve_namespace("https://example.org/lab/").unwrap(),
        "https://example.org/lab/openbismantic"
    );
}

#[test]
fn namespace_drops_query_and_fragment() {
    assert_eq!(
        resolve_namespace("https://host/a?x=/y").unwrap(),
        "https://host/openbismantic"
    );
    assert_eq!(
        resolve_namespace("https://host/lab/#section").unwrap(),
        "https://host/lab/openbismantic"
    );
}

#[test]
fn relative_base_is_rejected() {
    let err = resolve_namespace("local/").unwrap_err();
    assert!(matches!(err, ConvertError::BaseUrl { .. }), "got {err:?}");
    assert!(IriMinter::new("not a url").is_err());
}

// --- Entity IRIs ---

#[test]
fn entity_iri_basic() {
    assert_eq!(
        minter().entity_iri("object", "20231114000000-7"),
        "https://openbismantic.matolab.org/openbismantic/object/20231114000000-7"
    );
}

#[test]
fn entity_iri_escapes_path_label() {
    assert_eq!(
        minter().entity_iri("object", "/SPACE/SAMPLE-1"),
        "https://openbismantic.matolab.org/openbismantic/object/%2FSPACE%2FSAMPLE-1"
    );
}

#[test]
fn distribution_iri_includes_dataset() {
    assert_eq!(
        minter().distribution_iri("distribution", "DS-1", "original/a.csv"),
        "https://openbismantic.matolab.org/openbismantic/distribution/DS-1/original%2Fa.csv"
    );
}

#[test]
fn code_iri_is_flat() {
    assert_eq!(
        minter().code_iri("NOTES"),
        "https://openbismantic.matolab.org/openbismantic/NOTES"
    );
}

#[test]
fn permanent_identifier_iri() {
    assert_eq!(
        minter().permanent_identifier_iri("DSS1"),
        "https://openbismantic.matolab.org/openbismantic/permanent_identifier/DSS1"
    );
}

#[test]
fn provisional_iri_under_example_namespace() {
    assert_eq!(IriMinter::provisional_iri("7"), "https://example.com/7");
}

#[test]
fn escape_special_chars() {
    assert_eq!(
        minter().code_iri("a b#c?d"),
        "https://openbismantic.matolab.org/openbismantic/a%20b%23c%3Fd"
    );
}

// --- Class segments ---

#[test]
fn class_segment_special_cases() {
    assert_eq!(IriMinter::class_segment(standard::OWL_CLASS), "class");
    assert_eq!(
        IriMinter::class_segment(standard::OWL_OBJECT_PROPERTY),
        "object_property"
    );
}

#[test]
fn class_segment_uses_local_name() {
    assert_eq!(IriMinter::class_segment(obis::DATA_SET), "dataset");
    assert_eq!(IriMinter::class_segment(obis::OBJECT), "object");
    assert_eq!(IriMinter::class_segment(dcat::DISTRIBUTION_CLASS), "distribution");
}
