//! JSON-LD emitter.
//!
//! Triples are grouped into one node object per subject and written as
//! `{"@context": {...}, "@graph": [...]}` when the emitter is flushed.
//! `rdf:type` becomes `@type`; predicates and types are compacted against
//! the registered prefixes, node identifiers stay expanded.

use std::collections::{BTreeMap, HashMap};
use std::io::{self, Write};

use serde_json::{json, Map, Value};

use super::{qualified_name, TriplesEmitter};
use crate::model::graph::{Literal, Node, Term, Triple};
use crate::model::iri::IriMinter;
use crate::model::ontology::standard;

pub struct JsonLdEmitter<W: Write> {
    writer: W,
    count: u64,
    prefixes: HashMap<String, String>,
    /// Node objects keyed by `@id`, in order of first appearance.
    nodes: Map<String, Value>,
    written: bool,
}

impl<W: Write> JsonLdEmitter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            count: 0,
            prefixes: HashMap::new(),
            nodes: Map::new(),
            written: false,
        }
    }

    fn compact(&self, iri: &str) -> String {
        match qualified_name(&self.prefixes, iri) {
            Some((prefix, local)) => format!("{prefix}:{local}"),
            None => iri.to_string(),
        }
    }

    fn node_id(node: &Node) -> String {
        match node {
            Node::Iri(iri) => iri.clone(),
            Node::Blank(n) => format!("_:b{n}"),
            Node::Provisional(id) => IriMinter::provisional_iri(id),
        }
    }

    fn literal(&self, lit: &Literal) -> Value {
        match &lit.datatype {
            Some(dt) => json!({ "@value": lit.value, "@type": self.compact(dt) }),
            None => Value::String(lit.value.clone()),
        }
    }

    fn object(&self, term: &Term) -> Value {
        match term {
            Term::Node(node) => json!({ "@id": Self::node_id(node) }),
            Term::Literal(lit) => self.literal(lit),
        }
    }

    fn write_document(&mut self) -> io::Result<()> {
        let context: BTreeMap<&String, &String> = self.prefixes.iter().collect();
        let mut document = Map::new();
        if !context.is_empty() {
            document.insert("@context".to_string(), json!(context));
        }
        let graph: Vec<Value> = std::mem::take(&mut self.nodes)
            .into_iter()
            .map(|(_, node)| node)
            .collect();
        document.insert("@graph".to_string(), Value::Array(graph));
        serde_json::to_writer_pretty(&mut self.writer, &Value::Object(document))?;
        writeln!(self.writer)
    }
}

/// Add `value` under `key`, turning the entry into an array on the second
/// value.
fn add_property(node: &mut Map<String, Value>, key: String, value: Value) {
    match node.get_mut(&key) {
        None => {
            node.insert(key, value);
        }
        Some(Value::Array(values)) => values.push(value),
        Some(existing) => {
            let first = existing.take();
            *existing = Value::Array(vec![first, value]);
        }
    }
}

impl<W: Write> TriplesEmitter for JsonLdEmitter<W> {
    fn emit(&mut self, triple: &Triple) -> io::Result<()> {
        let (key, value) = match (&triple.predicate, &triple.object) {
            (Node::Iri(p), Term::Node(class)) if p == standard::RDF_TYPE => {
                let class = match class {
                    Node::Iri(iri) => self.compact(iri),
                    other => Self::node_id(other),
                };
                ("@type".to_string(), Value::String(class))
            }
            (predicate, object) => (
                self.compact(&Self::node_id(predicate)),
                self.object(object),
            ),
        };
        let id = Self::node_id(&triple.subject);
        let node = self
            .nodes
            .entry(id.clone())
            .or_insert_with(|| json!({ "@id": id }));
        if let Value::Object(node) = node {
            add_property(node, key, value);
        }
        self.count += 1;
        Ok(())
    }

    fn add_prefix(&mut self, prefix: &str, iri: &str) -> io::Result<()> {
        self.prefixes.insert(prefix.to_string(), iri.to_string());
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        if !self.written {
            self.written = true;
            self.write_document()?;
        }
        self.writer.flush()
    }

    fn triple_count(&self) -> u64 {
        self.count
    }
}
