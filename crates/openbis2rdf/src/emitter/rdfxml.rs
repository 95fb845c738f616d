//! RDF/XML emitter.
//!
//! Consecutive triples sharing a subject share one `rdf:Description`.
//! Predicates become qualified element names from the registered prefixes;
//! a predicate outside every prefix declares its namespace on the element
//! itself.

use std::collections::HashMap;
use std::io::{self, Write};

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use super::{qualified_name, TriplesEmitter};
use crate::model::graph::{Node, Term, Triple};
use crate::model::iri::IriMinter;
use crate::model::ontology::standard;

const ROOT: &str = "rdf:RDF";
const DESCRIPTION: &str = "rdf:Description";
const LOCAL_PREFIX: &str = "ns0";

pub struct RdfXmlEmitter<W: Write> {
    writer: Writer<W>,
    count: u64,
    prefixes: HashMap<String, String>,
    started: bool,
    finished: bool,
    /// Subject of the currently open `rdf:Description`.
    open_subject: Option<Node>,
}

impl<W: Write> RdfXmlEmitter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Writer::new_with_indent(writer, b' ', 2),
            count: 0,
            prefixes: HashMap::new(),
            started: false,
            finished: false,
            open_subject: None,
        }
    }

    fn write(&mut self, event: Event<'_>) -> io::Result<()> {
        self.writer.write_event(event).map_err(io::Error::other)
    }

    /// Write the XML declaration and the root element with every prefix.
    fn start(&mut self) -> io::Result<()> {
        if self.started {
            return Ok(());
        }
        self.started = true;
        self.write(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;

        let mut root = BytesStart::new(ROOT);
        root.push_attribute(("xmlns:rdf", standard::RDF));
        let mut prefixes: Vec<_> = self
            .prefixes
            .iter()
            .filter(|(prefix, _)| prefix.as_str() != "rdf")
            .map(|(prefix, ns)| (format!("xmlns:{prefix}"), ns.clone()))
            .collect();
        prefixes.sort();
        for (name, ns) in &prefixes {
            root.push_attribute((name.as_str(), ns.as_str()));
        }
        self.write(Event::Start(root))
    }

    fn close_description(&mut self) -> io::Result<()> {
        if self.open_subject.take().is_some() {
            self.write(Event::End(BytesEnd::new(DESCRIPTION)))?;
        }
        Ok(())
    }

    /// Qualified element name for `predicate`, plus the namespace to declare
    /// locally when no registered prefix covers it.
    fn element_name(&self, predicate: &Node) -> io::Result<(String, Option<String>)> {
        let iri = match predicate {
            Node::Iri(iri) => iri.clone(),
            Node::Provisional(id) => IriMinter::provisional_iri(id),
            Node::Blank(_) => return Err(unnamed(&predicate.to_string())),
        };
        if let Some((prefix, local)) = qualified_name(&self.prefixes, &iri) {
            if is_ncname(&local) {
                return Ok((format!("{prefix}:{local}"), None));
            }
        }
        let split = iri
            .rfind(|c: char| c == '#' || c == '/')
            .map_or(0, |i| i + 1);
        let (ns, local) = iri.split_at(split);
        if ns.is_empty() || !is_ncname(local) {
            return Err(unnamed(&iri));
        }
        Ok((format!("{LOCAL_PREFIX}:{local}"), Some(ns.to_string())))
    }
}

/// `rdf:nodeID` for blank nodes, `iri_attribute` otherwise.
fn node_attribute(node: &Node, iri_attribute: &'static str) -> (&'static str, String) {
    match node {
        Node::Iri(iri) => (iri_attribute, iri.clone()),
        Node::Blank(n) => ("rdf:nodeID", format!("b{n}")),
        Node::Provisional(id) => (iri_attribute, IriMinter::provisional_iri(id)),
    }
}

fn is_ncname(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_')
        && chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'))
}

fn unnamed(predicate: &str) -> io::Error {
    io::Error::new(
        io::ErrorKind::InvalidData,
        format!("predicate {predicate} has no RDF/XML element name"),
    )
}

impl<W: Write> TriplesEmitter for RdfXmlEmitter<W> {
    fn emit(&mut self, triple: &Triple) -> io::Result<()> {
        self.start()?;
        let (name, local_ns) = self.element_name(&triple.predicate)?;

        if self.open_subject.as_ref() != Some(&triple.subject) {
            self.close_description()?;
            let (attr, value) = node_attribute(&triple.subject, "rdf:about");
            let mut description = BytesStart::new(DESCRIPTION);
            description.push_attribute((attr, value.as_str()));
            self.write(Event::Start(description))?;
            self.open_subject = Some(triple.subject.clone());
        }

        let mut element = BytesStart::new(name.as_str());
        if let Some(ns) = &local_ns {
            element.push_attribute((format!("xmlns:{LOCAL_PREFIX}").as_str(), ns.as_str()));
        }
        match &triple.object {
            Term::Node(node) => {
                let (attr, value) = node_attribute(node, "rdf:resource");
                element.push_attribute((attr, value.as_str()));
                self.write(Event::Empty(element))?;
            }
            Term::Literal(lit) => {
                if let Some(dt) = &lit.datatype {
                    element.push_attribute(("rdf:datatype", dt.as_str()));
                }
                self.write(Event::Start(element))?;
                self.write(Event::Text(BytesText::new(&lit.value)))?;
                self.write(Event::End(BytesEnd::new(name.as_str())))?;
            }
        }
        self.count += 1;
        Ok(())
    }

    fn add_prefix(&mut self, prefix: &str, iri: &str) -> io::Result<()> {
        self.prefixes.insert(prefix.to_string(), iri.to_string());
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        if !self.finished {
            self.start()?;
            self.close_description()?;
            self.write(Event::End(BytesEnd::new(ROOT)))?;
            self.writer.get_mut().write_all(b"\n")?;
            self.finished = true;
        }
        self.writer.get_mut().flush()
    }

    fn triple_count(&self) -> u64 {
        self.count
    }
}
