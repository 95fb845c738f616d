//! The conversion pipeline: build → canonicalize → attach.

pub mod builder;
pub mod canonicalize;
pub mod derive;
pub mod loader;
pub mod value;

use serde_json::Value;
use tracing::info;

use crate::error::Result;
use crate::model::graph::Graph;
use crate::model::ontology::{dcat, oa, obis, qudt, standard};
use crate::model::vocabulary::OntologyLookup;

/// Base address used when none is configured.
pub const DEFAULT_BASE_URL: &str = "https://openbismantic.matolab.org/";

/// Zone epoch-millisecond timestamps are rendered in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TimestampZone {
    /// The zone of the converting machine.
    #[default]
    Local,
    Utc,
}

/// Controls what a conversion produces.
#[derive(Debug, Clone)]
pub struct ConversionOptions {
    /// Root every permanent identity is anchored under.
    pub base_url: String,
    pub timestamp_zone: TimestampZone,
}

impl Default for ConversionOptions {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timestamp_zone: TimestampZone::default(),
        }
    }
}

/// Convert one openBIS JSON document into a canonical graph.
pub fn convert<L: OntologyLookup + ?Sized>(
    document: &Value,
    lookup: &L,
    options: &ConversionOptions,
) -> Result<Graph> {
    let mut graph = Graph::new();
    graph.add_prefix("rdf", standard::RDF);
    graph.add_prefix("rdfs", standard::RDFS);
    graph.add_prefix("owl", standard::OWL);
    graph.add_prefix("xsd", standard::XSD);
    graph.add_prefix(obis::PREFIX, obis::NS);
    graph.add_prefix(qudt::PREFIX, qudt::NS);
    graph.add_prefix(oa::PREFIX, oa::NS);
    graph.add_prefix(dcat::PREFIX, dcat::NS);

    builder::build(document, &mut graph, lookup, None, options)?;
    info!(triples = graph.len(), "built provisional graph");

    let report = canonicalize::canonicalize(&mut graph, &options.base_url)?;
    info!(
        promoted = report.promoted,
        properties = report.properties,
        erased = report.erased_identifiers,
        dropped = report.dropped,
        triples = graph.len(),
        "canonicalized identities"
    );

    let derived = derive::attach(&mut graph);
    info!(derived, triples = graph.len(), "attached derived relations");
    Ok(graph)
}
