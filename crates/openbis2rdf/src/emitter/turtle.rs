use std::collections::HashMap;
use std::io::{self, Write};

use super::{escape_iri, escape_literal, qualified_name, TriplesEmitter};
use crate::model::graph::{Node, Term, Triple};
use crate::model::iri::IriMinter;

/// Turtle format emitter with prefix support.
pub struct TurtleEmitter<W: Write> {
    writer: W,
    count: u64,
    prefixes: HashMap<String, String>,
    prefix_written: bool,
}

impl<W: Write> TurtleEmitter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            count: 0,
            prefixes: HashMap::new(),
            prefix_written: false,
        }
    }

    /// Write all registered prefixes (called before first triple).
    fn write_prefixes(&mut self) -> io::Result<()> {
        if self.prefix_written {
            return Ok(());
        }
        self.prefix_written = true;
        // Sort for deterministic output
        let mut prefixes: Vec<_> = self.prefixes.iter().collect();
        prefixes.sort_by_key(|(k, _)| (*k).clone());
        for (prefix, iri) in prefixes {
            writeln!(self.writer, "@prefix {prefix}: <{iri}> .")?;
        }
        if !self.prefixes.is_empty() {
            writeln!(self.writer)?;
        }
        Ok(())
    }

    /// Try to compact an IRI using registered prefixes.
    fn compact_iri(&self, iri: &str) -> String {
        match qualified_name(&self.prefixes, iri) {
            Some((prefix, local)) => format!("{prefix}:{local}"),
            None => format!("<{}>", escape_iri(iri)),
        }
    }

    fn node(&self, node: &Node) -> String {
        match node {
            Node::Iri(iri) => self.compact_iri(iri),
            Node::Blank(n) => format!("_:b{n}"),
            Node::Provisional(id) => self.compact_iri(&IriMinter::provisional_iri(id)),
        }
    }

    fn term(&self, term: &Term) -> String {
        match term {
            Term::Node(node) => self.node(node),
            Term::Literal(lit) => {
                let escaped = escape_literal(&lit.value, false);
                match &lit.datatype {
                    Some(dt) => format!("\"{escaped}\"^^{}", self.compact_iri(dt)),
                    None => format!("\"{escaped}\""),
                }
            }
        }
    }
}

impl<W: Write> TriplesEmitter for TurtleEmitter<W> {
    fn emit(&mut self, triple: &Triple) -> io::Result<()> {
        self.write_prefixes()?;
        let s = self.node(&triple.subject);
        let p = self.node(&triple.predicate);
        let o = self.term(&triple.object);
        writeln!(self.writer, "{s} {p} {o} .")?;
        self.count += 1;
        Ok(())
    }

    fn add_prefix(&mut self, prefix: &str, iri: &str) -> io::Result<()> {
        self.prefixes.insert(prefix.to_string(), iri.to_string());
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.write_prefixes()?;
        self.writer.flush()
    }

    fn triple_count(&self) -> u64 {
        self.count
    }
}
