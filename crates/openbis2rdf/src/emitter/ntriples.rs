use std::io::{self, Write};

use super::{escape_iri, escape_literal, TriplesEmitter};
use crate::model::graph::{Node, Term, Triple};
use crate::model::iri::IriMinter;

/// N-Triples format emitter. Streams triples as `<s> <p> <o> .` lines.
///
/// Every line is also a valid N-Quads statement in the default graph.
pub struct NTriplesEmitter<W: Write> {
    writer: W,
    count: u64,
}

impl<W: Write> NTriplesEmitter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, count: 0 }
    }

    fn node(node: &Node) -> String {
        match node {
            Node::Iri(iri) => format!("<{}>", escape_iri(iri)),
            Node::Blank(n) => format!("_:b{n}"),
            Node::Provisional(id) => format!("<{}>", escape_iri(&IriMinter::provisional_iri(id))),
        }
    }

    fn term(term: &Term) -> String {
        match term {
            Term::Node(node) => Self::node(node),
            Term::Literal(lit) => {
                let escaped = escape_literal(&lit.value, true);
                match &lit.datatype {
                    Some(dt) => format!("\"{escaped}\"^^<{}>", escape_iri(dt)),
                    None => format!("\"{escaped}\""),
                }
            }
        }
    }
}

impl<W: Write> TriplesEmitter for NTriplesEmitter<W> {
    fn emit(&mut self, triple: &Triple) -> io::Result<()> {
        writeln!(
            self.writer,
            "{} {} {} .",
            Self::node(&triple.subject),
            Self::node(&triple.predicate),
            Self::term(&triple.object)
        )?;
        self.count += 1;
        Ok(())
    }

    fn add_prefix(&mut self, prefix: &str, iri: &str) -> io::Result<()> {
        // N-Triples doesn't use prefixes, but emit as comment for readability
        writeln!(self.writer, "# @prefix {prefix}: <{iri}> .")
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }

    fn triple_count(&self) -> u64 {
        self.count
    }
}
