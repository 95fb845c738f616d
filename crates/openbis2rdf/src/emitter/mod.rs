pub mod jsonld;
pub mod ntriples;
pub mod rdfxml;
pub mod turtle;

use std::collections::HashMap;
use std::io;

use crate::model::graph::{Graph, Triple};

/// Trait for emitting RDF triples in different serialization formats.
pub trait TriplesEmitter {
    /// Write one triple.
    fn emit(&mut self, triple: &Triple) -> io::Result<()>;
    /// Register a namespace prefix (used by Turtle format).
    fn add_prefix(&mut self, prefix: &str, iri: &str) -> io::Result<()>;
    /// Flush any buffered output.
    fn flush(&mut self) -> io::Result<()>;
    /// Return the number of triples emitted so far.
    fn triple_count(&self) -> u64;
}

/// Write every triple of `graph`, in insertion order, preceded by its
/// prefix bindings. Returns the number of triples written.
pub fn emit_graph<E: TriplesEmitter + ?Sized>(emitter: &mut E, graph: &Graph) -> io::Result<u64> {
    for (prefix, iri) in graph.prefixes() {
        emitter.add_prefix(prefix, iri)?;
    }
    let before = emitter.triple_count();
    for triple in graph.triples() {
        emitter.emit(triple)?;
    }
    emitter.flush()?;
    Ok(emitter.triple_count() - before)
}

/// Split `iri` into a registered prefix and a local name, using the longest
/// matching namespace. Local names are limited to alphanumerics and `_`.
pub(crate) fn qualified_name<'p>(
    prefixes: &'p HashMap<String, String>,
    iri: &str,
) -> Option<(&'p str, String)> {
    let (prefix, ns) = prefixes
        .iter()
        .filter(|(_, ns)| iri.starts_with(ns.as_str()))
        .max_by_key(|(_, ns)| ns.len())?;
    let local = &iri[ns.len()..];
    if local.is_empty() || !local.chars().all(|c| c.is_alphanumeric() || c == '_') {
        return None;
    }
    Some((prefix.as_str(), local.to_string()))
}

/// Escape a string for a quoted literal. Control characters other than
/// the named escapes become `\uXXXX` when `escape_controls` is set.
pub(crate) fn escape_literal(s: &str, escape_controls: bool) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if escape_controls && (c as u32) < 0x20 => {
                out.push_str(&format!("\\u{:04X}", c as u32));
            }
            _ => out.push(c),
        }
    }
    out
}

/// Escape characters not allowed between `<` and `>` as `\uXXXX`.
pub(crate) fn escape_iri(iri: &str) -> String {
    let mut out = String::with_capacity(iri.len());
    for c in iri.chars() {
        match c {
            '<' | '>' | '"' | '{' | '}' | '|' | '^' | '`' | '\\' => {
                out.push_str(&format!("\\u{:04X}", c as u32));
            }
            c if (c as u32) <= 0x20 => out.push_str(&format!("\\u{:04X}", c as u32)),
            _ => out.push(c),
        }
    }
    out
}
