pub mod graph;
pub mod iri;
pub mod ontology;
pub mod vocabulary;
