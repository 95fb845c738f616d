use openbis2rdf::conversion::builder::{add_identifier, build, find_custom_property};
use openbis2rdf::conversion::{ConversionOptions, TimestampZone};
use openbis2rdf::error::ConvertError;
use openbis2rdf::model::graph::{Graph, Literal, Node, Term, Triple};
use openbis2rdf::model::ontology::{dcat, obis, qudt, standard};
use openbis2rdf::model::vocabulary::Vocabulary;
use serde_json::{json, Value};

fn utc_options() -> ConversionOptions {
    ConversionOptions {
        timestamp_zone: TimestampZone::Utc,
        ..ConversionOptions::default()
    }
}

/// Build `document` with the built-in vocabulary and UTC timestamps.
fn build_graph(document: Value) -> Graph {
    let mut graph = Graph::new();
    build(&document, &mut graph, &Vocabulary::openbis(), None, &utc_options())
        .expect("build should succeed");
    graph
}

fn has_triple(graph: &Graph, s: &Node, p: &str, o: impl Into<Term>) -> bool {
    graph.contains(&Triple::new(s.clone(), Node::iri(p), o))
}

fn sample(id: u64) -> Node {
    Node::provisional(id.to_string())
}

// ---------------------------------------------------------------------------
// Entities
// ---------------------------------------------------------------------------

#[test]
fn typed_object_becomes_entity() {
    let g = build_graph(json!({"@type": "as.dto.sample.Sample", "@id": 7, "code": "S1"}));
    assert!(g.has_type(&sample(7), obis::OBJECT));
    assert!(has_triple(&g, &sample(7), obis::CODE, Literal::plain("S1")));
}

#[test]
fn untyped_and_unknown_objects_are_skipped() {
    let g = build_graph(json!([
        {"@id": 1, "code": "X"},
        {"@type": "as.dto.unknown.Thing", "@id": 2, "code": "Y"}
    ]));
    assert!(g.is_empty());
}

#[test]
fn scalar_document_contributes_nothing() {
    assert!(build_graph(json!("just a string")).is_empty());
    assert!(build_graph(json!(42)).is_empty());
}

#[test]
fn missing_local_id_fails() {
    let mut graph = Graph::new();
    let err = build(
        &json!({"@type": "as.dto.sample.Sample", "code": "S1"}),
        &mut graph,
        &Vocabulary::openbis(),
        None,
        &utc_options(),
    )
    .unwrap_err();
    assert!(matches!(err, ConvertError::MissingLocalId { ref type_key } if type_key == "as.dto.sample.Sample"));
}

#[test]
fn directory_listing_contributes_nothing() {
    let g = build_graph(json!({
        "@type": "dss.dto.datasetfile.DataSetFile",
        "@id": 17,
        "path": "original",
        "directory": true,
        "properties": {"NOTES": "42"},
        "sample": {"@type": "as.dto.sample.Sample", "@id": 7, "code": "S1"}
    }));
    assert!(g.is_empty(), "directory produced {} triples", g.len());
}

#[test]
fn search_result_recurses_without_entity() {
    let g = build_graph(json!({
        "@type": "as.dto.common.search.SearchResult",
        "@id": 1,
        "objects": [
            {"@type": "as.dto.sample.Sample", "@id": 2, "code": "A"},
            {"@type": "as.dto.sample.Sample", "@id": 3, "code": "B"}
        ],
        "totalCount": 2
    }));
    assert_eq!(g.instances_of(obis::OBJECT), vec![sample(2), sample(3)]);
    assert!(g.triples_with(&sample(1)).next().is_none());
}

#[test]
fn fetch_options_are_ignored() {
    let g = build_graph(json!({
        "@type": "as.dto.sample.Sample",
        "@id": 7,
        "fetchOptions": {"@type": "as.dto.space.Space", "@id": 50, "code": "NOPE"}
    }));
    assert!(g.triples_with(&sample(50)).next().is_none());
}

#[test]
fn type_entity_gets_superclass_hint() {
    let g = build_graph(json!({"@type": "as.dto.sample.SampleType", "@id": 4, "code": "CHEM"}));
    assert!(g.has_type(&sample(4), standard::OWL_CLASS));
    assert!(has_triple(&g, &sample(4), standard::RDFS_SUBCLASS_OF, Node::iri(obis::OBJECT)));
}

// ---------------------------------------------------------------------------
// Scalars
// ---------------------------------------------------------------------------

#[test]
fn timestamp_becomes_date_time_stamp() {
    let g = build_graph(json!({
        "@type": "as.dto.sample.Sample",
        "@id": 7,
        "registrationDate": 1700000000000_i64
    }));
    assert!(has_triple(
        &g,
        &sample(7),
        obis::REGISTRATION_DATE,
        Literal::typed("2023-11-14T22:13:20", standard::XSD_DATE_TIME_STAMP)
    ));
}

#[test]
fn email_becomes_mailto_reference() {
    let g = build_graph(json!({"@type": "as.dto.person.Person", "@id": 3, "email": "ada@example.org"}));
    assert!(has_triple(&g, &sample(3), obis::EMAIL, Node::iri("mailto:ada@example.org")));
}

#[test]
fn relates_to_scalar_is_a_reference() {
    let g = build_graph(json!({"@type": "as.dto.sample.Sample", "@id": 7, "experiment": 99}));
    assert!(has_triple(&g, &sample(7), obis::RELATES_TO, Node::provisional("99")));
}

#[test]
fn falsy_and_unknown_scalars_are_dropped() {
    let g = build_graph(json!({
        "@type": "as.dto.sample.Sample",
        "@id": 7,
        "code": "",
        "description": null,
        "frozen": false,
        "somethingElse": "value"
    }));
    assert_eq!(g.len(), 1, "only the class triple should remain");
}

#[test]
fn scalar_perm_id_is_recorded_as_value() {
    let g = build_graph(json!({"@type": "as.dto.space.Space", "@id": 1, "permId": "LAB"}));
    assert!(has_triple(&g, &sample(1), standard::RDF_VALUE, Literal::plain("LAB")));
}

// ---------------------------------------------------------------------------
// Nested entities
// ---------------------------------------------------------------------------

#[test]
fn nested_objects_are_linked_after_creation() {
    let g = build_graph(json!({
        "@type": "as.dto.sample.Sample",
        "@id": 7,
        "parents": [
            {"@type": "as.dto.sample.Sample", "@id": 20},
            {"@type": "as.dto.sample.Sample", "@id": 21}
        ],
        "space": {"@type": "as.dto.space.Space", "@id": 30, "code": "LAB"}
    }));
    assert!(g.has_type(&sample(20), obis::OBJECT));
    assert!(has_triple(&g, &sample(7), obis::HAS_PARENT, sample(20)));
    assert!(has_triple(&g, &sample(7), obis::HAS_PARENT, sample(21)));
    assert!(has_triple(&g, &sample(7), obis::RELATES_TO, sample(30)));
}

#[test]
fn identifier_object_becomes_record() {
    let g = build_graph(json!({
        "@type": "as.dto.sample.Sample",
        "@id": 7,
        "permId": {"@type": "as.dto.sample.id.SamplePermId", "@id": 8, "permId": "2023:1$"}
    }));
    let record = sample(8);
    assert!(g.has_type(&record, obis::PERMANENT_IDENTIFIER));
    assert!(has_triple(&g, &record, standard::RDF_VALUE, Literal::plain("20231")));
    assert!(has_triple(&g, &sample(7), obis::HAS_IDENTIFIER, record.clone()));
    assert!(has_triple(&g, &record, obis::IS_IDENTIFIER_OF, sample(7)));
}

#[test]
fn identifier_without_owner_is_skipped() {
    let g = build_graph(json!({"@type": "as.dto.sample.id.SamplePermId", "@id": 8, "permId": "X"}));
    assert!(g.is_empty());
}

#[test]
fn file_id_wrapper_records_dataset_and_path() {
    let g = build_graph(json!({
        "@type": "dss.dto.datasetfile.DataSetFile",
        "@id": 11,
        "permId": {
            "@type": "dss.dto.datasetfile.id.DataSetFilePermId",
            "@id": 12,
            "dataSetId": {"@type": "as.dto.dataset.id.DataSetPermId", "@id": 13, "permId": "DS-1"},
            "filePath": "original/data.csv"
        }
    }));
    let file = sample(11);
    assert!(g.has_type(&file, dcat::DISTRIBUTION_CLASS));
    assert!(has_triple(&g, &file, obis::DATASET_PERMID, Literal::plain("DS-1")));
    let record = g
        .value(&file, obis::HAS_IDENTIFIER)
        .and_then(Term::as_node)
        .cloned()
        .expect("file path record");
    assert!(record.is_blank());
    assert_eq!(g.literal_value(&record, standard::RDF_VALUE), Some("original/data.csv"));
    assert!(g.triples_with(&sample(13)).next().is_none());
}

// ---------------------------------------------------------------------------
// Free-form properties
// ---------------------------------------------------------------------------

#[test]
fn numeric_property_gets_quantity_wrapper() {
    let g = build_graph(json!({
        "@type": "as.dto.sample.Sample",
        "@id": 7,
        "properties": {"NOTES": "42"}
    }));
    let property = find_custom_property(&g, "NOTES").expect("minted property");
    let body = g
        .triples_with(&property)
        .find(|t| t.subject == sample(7) && t.predicate == property)
        .and_then(|t| t.object.as_node())
        .cloned()
        .expect("wrapper node");
    assert!(g.has_type(&body, qudt::QUANTITY_VALUE));
    assert!(has_triple(&g, &body, qudt::VALUE, Literal::typed("42", standard::XSD_INTEGER)));
}

#[test]
fn repeated_property_key_reuses_property() {
    let g = build_graph(json!([
        {"@type": "as.dto.sample.Sample", "@id": 1, "properties": {"COLOR": "red"}},
        {"@type": "as.dto.sample.Sample", "@id": 2, "properties": {"COLOR": "blue"}}
    ]));
    let properties: Vec<Node> = g
        .instances_of(standard::OWL_OBJECT_PROPERTY)
        .into_iter()
        .filter(|p| g.literal_value(p, obis::CODE) == Some("COLOR"))
        .collect();
    assert_eq!(properties.len(), 1);
    let property = &properties[0];
    let uses = g.triples().filter(|t| &t.predicate == property).count();
    assert_eq!(uses, 2);
}

#[test]
fn blank_property_value_mints_nothing() {
    let g = build_graph(json!({
        "@type": "as.dto.sample.Sample",
        "@id": 7,
        "properties": {"EMPTY": "  "}
    }));
    assert!(find_custom_property(&g, "EMPTY").is_none());
}

#[test]
fn custom_property_carries_permanent_record() {
    let g = build_graph(json!({
        "@type": "as.dto.sample.Sample",
        "@id": 7,
        "properties": {"NOTES": "text"}
    }));
    let property = find_custom_property(&g, "NOTES").expect("minted property");
    let record = g
        .value(&property, obis::HAS_IDENTIFIER)
        .and_then(Term::as_node)
        .cloned()
        .expect("record");
    assert!(g.has_type(&record, obis::PERMANENT_IDENTIFIER));
    assert_eq!(g.literal_value(&record, standard::RDF_VALUE), Some("NOTES"));
}

#[test]
fn add_identifier_skips_empty_label() {
    let mut g = Graph::new();
    let owner = Node::iri("http://example.org/o");
    let record = g.fresh_blank();
    add_identifier(&mut g, &owner, &record, obis::IDENTIFIER, "$:");
    assert!(g.literal_value(&record, standard::RDF_VALUE).is_none());
    assert!(has_triple(&g, &owner, obis::HAS_IDENTIFIER, record.clone()));
}
