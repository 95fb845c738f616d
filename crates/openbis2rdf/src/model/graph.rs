//! Indexed triple store shared by every conversion phase.
//!
//! Triples live in an insertion-ordered arena. A secondary index maps every
//! node to the ids of the triples mentioning it (as subject, predicate or
//! object), so renaming a node touches only its incident triples.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::fmt;

use super::iri::IriMinter;
use super::ontology::standard;

/// Arena slot of a triple. Renamed triples keep their slot.
pub type TripleId = usize;

/// A graph node: anything that can stand in subject or predicate position.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Node {
    /// A named resource.
    Iri(String),
    /// An anonymous node, only meaningful inside this graph.
    Blank(u64),
    /// A source-local record id, valid until canonicalization.
    Provisional(String),
}

impl Node {
    pub fn iri(iri: impl Into<String>) -> Self {
        Node::Iri(iri.into())
    }

    pub fn provisional(local_id: impl Into<String>) -> Self {
        Node::Provisional(local_id.into())
    }

    pub fn as_iri(&self) -> Option<&str> {
        match self {
            Node::Iri(iri) => Some(iri),
            _ => None,
        }
    }

    pub fn is_provisional(&self) -> bool {
        matches!(self, Node::Provisional(_))
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, Node::Blank(_))
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Iri(iri) => write!(f, "<{iri}>"),
            Node::Blank(n) => write!(f, "_:b{n}"),
            Node::Provisional(id) => write!(f, "<{}>", IriMinter::provisional_iri(id)),
        }
    }
}

/// A literal value with an optional datatype IRI (`None` = plain string).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Literal {
    pub value: String,
    pub datatype: Option<String>,
}

impl Literal {
    pub fn plain(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            datatype: None,
        }
    }

    pub fn typed(value: impl Into<String>, datatype: &str) -> Self {
        Self {
            value: value.into(),
            datatype: Some(datatype.to_string()),
        }
    }
}

/// Object position of a triple.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Term {
    Node(Node),
    Literal(Literal),
}

impl Term {
    pub fn as_node(&self) -> Option<&Node> {
        match self {
            Term::Node(node) => Some(node),
            Term::Literal(_) => None,
        }
    }

    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Term::Literal(lit) => Some(lit),
            Term::Node(_) => None,
        }
    }
}

impl From<Node> for Term {
    fn from(node: Node) -> Self {
        Term::Node(node)
    }
}

impl From<Literal> for Term {
    fn from(lit: Literal) -> Self {
        Term::Literal(lit)
    }
}

/// A (subject, predicate, object) statement.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Triple {
    pub subject: Node,
    pub predicate: Node,
    pub object: Term,
}

impl Triple {
    pub fn new(subject: Node, predicate: Node, object: impl Into<Term>) -> Self {
        Self {
            subject,
            predicate,
            object: object.into(),
        }
    }

    /// Nodes appearing in any position (repeats possible).
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        [Some(&self.subject), Some(&self.predicate), self.object.as_node()]
            .into_iter()
            .flatten()
    }

    pub fn mentions(&self, node: &Node) -> bool {
        self.nodes().any(|n| n == node)
    }

    /// Copy of this triple with every occurrence of `old` replaced by `new`.
    fn substitute(&self, old: &Node, new: &Node) -> Triple {
        let swap = |n: &Node| if n == old { new.clone() } else { n.clone() };
        Triple {
            subject: swap(&self.subject),
            predicate: swap(&self.predicate),
            object: match &self.object {
                Term::Node(n) => Term::Node(swap(n)),
                lit @ Term::Literal(_) => lit.clone(),
            },
        }
    }
}

/// Set of triples with node-incidence index.
#[derive(Debug, Default)]
pub struct Graph {
    slots: Vec<Option<Triple>>,
    ids: HashMap<Triple, TripleId>,
    incident: HashMap<Node, BTreeSet<TripleId>>,
    next_blank: u64,
    prefixes: BTreeMap<String, String>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a namespace prefix for serializers.
    pub fn add_prefix(&mut self, prefix: &str, namespace: &str) {
        self.prefixes
            .insert(prefix.to_string(), namespace.to_string());
    }

    pub fn prefixes(&self) -> &BTreeMap<String, String> {
        &self.prefixes
    }

    /// Allocate an anonymous node not used anywhere in this graph yet.
    pub fn fresh_blank(&mut self) -> Node {
        self.next_blank += 1;
        Node::Blank(self.next_blank)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, triple: &Triple) -> bool {
        self.ids.contains_key(triple)
    }

    /// Insert a triple. Returns `false` if it was already present.
    pub fn insert(&mut self, triple: Triple) -> bool {
        if self.ids.contains_key(&triple) {
            return false;
        }
        let id = self.slots.len();
        self.slots.push(None);
        self.place(id, triple);
        true
    }

    /// Insert `(subject, predicate, object)`.
    pub fn add(&mut self, subject: Node, predicate: &str, object: impl Into<Term>) -> bool {
        self.insert(Triple::new(subject, Node::iri(predicate), object))
    }

    pub fn remove(&mut self, triple: &Triple) -> bool {
        match self.ids.get(triple).copied() {
            Some(id) => self.take(id).is_some(),
            None => false,
        }
    }

    /// Delete every triple mentioning `node`. Returns how many were removed.
    pub fn remove_node(&mut self, node: &Node) -> usize {
        let Some(ids) = self.incident.remove(node) else {
            return 0;
        };
        ids.into_iter().filter(|id| self.take(*id).is_some()).count()
    }

    /// Replace `old` with `new` in every position of every triple.
    ///
    /// Runs in O(degree of `old`). Rewritten triples that already exist under
    /// `new` are merged rather than duplicated, so repeating the call is a
    /// no-op. Returns the number of triples touched.
    pub fn rename(&mut self, old: &Node, new: &Node) -> usize {
        if old == new {
            return 0;
        }
        let Some(ids) = self.incident.remove(old) else {
            return 0;
        };
        let mut touched = 0;
        for id in ids {
            if let Some(triple) = self.take(id) {
                self.place(id, triple.substitute(old, new));
                touched += 1;
            }
        }
        touched
    }

    /// All triples in insertion order.
    pub fn triples(&self) -> impl Iterator<Item = &Triple> {
        self.slots.iter().flatten()
    }

    /// Triples mentioning `node`, in insertion order.
    pub fn triples_with(&self, node: &Node) -> impl Iterator<Item = &Triple> {
        self.incident
            .get(node)
            .into_iter()
            .flatten()
            .filter_map(|id| self.slots[*id].as_ref())
    }

    /// Every distinct node, in order of first appearance.
    pub fn nodes(&self) -> Vec<Node> {
        let mut seen = HashSet::new();
        let mut nodes = Vec::new();
        for triple in self.triples() {
            for node in triple.nodes() {
                if seen.insert(node) {
                    nodes.push(node.clone());
                }
            }
        }
        nodes
    }

    /// Objects of `(subject, predicate, ?)`.
    pub fn objects(&self, subject: &Node, predicate: &str) -> impl Iterator<Item = &Term> {
        let wanted = subject.clone();
        let predicate = predicate.to_string();
        self.triples_with(subject)
            .filter(move |t| t.subject == wanted && t.predicate.as_iri() == Some(predicate.as_str()))
            .map(|t| &t.object)
    }

    /// First object of `(subject, predicate, ?)`.
    pub fn value(&self, subject: &Node, predicate: &str) -> Option<&Term> {
        self.objects(subject, predicate).next()
    }

    /// Lexical form of the first literal object of `(subject, predicate, ?)`.
    pub fn literal_value(&self, subject: &Node, predicate: &str) -> Option<&str> {
        self.objects(subject, predicate)
            .find_map(Term::as_literal)
            .map(|lit| lit.value.as_str())
    }

    /// Subjects of `(?, predicate, object)`.
    pub fn subjects(&self, predicate: &str, object: &Term) -> impl Iterator<Item = &Node> {
        let pivot = match object {
            Term::Node(node) => node.clone(),
            Term::Literal(_) => Node::iri(predicate),
        };
        let predicate = predicate.to_string();
        let object = object.clone();
        self.triples_with(&pivot)
            .filter(move |t| {
                t.predicate.as_iri() == Some(predicate.as_str()) && t.object == object
            })
            .map(|t| &t.subject)
    }

    /// Subjects typed `class`, in insertion order.
    pub fn instances_of(&self, class: &str) -> Vec<Node> {
        let class = Term::Node(Node::iri(class));
        self.subjects(standard::RDF_TYPE, &class).cloned().collect()
    }

    pub fn has_type(&self, node: &Node, class: &str) -> bool {
        self.objects(node, standard::RDF_TYPE)
            .any(|o| o.as_node().and_then(Node::as_iri) == Some(class))
    }

    /// First declared class of `node`.
    pub fn first_type(&self, node: &Node) -> Option<&str> {
        self.objects(node, standard::RDF_TYPE)
            .find_map(|o| o.as_node().and_then(Node::as_iri))
    }

    /// Put `triple` into slot `id`, unless an equal triple lives elsewhere.
    fn place(&mut self, id: TripleId, triple: Triple) {
        if self.ids.contains_key(&triple) {
            return;
        }
        for node in triple.nodes() {
            self.incident.entry(node.clone()).or_default().insert(id);
        }
        self.ids.insert(triple.clone(), id);
        self.slots[id] = Some(triple);
    }

    /// Empty slot `id` and drop it from every index.
    fn take(&mut self, id: TripleId) -> Option<Triple> {
        let triple = self.slots.get_mut(id)?.take()?;
        self.ids.remove(&triple);
        for node in triple.nodes() {
            if let Some(set) = self.incident.get_mut(node) {
                set.remove(&id);
                if set.is_empty() {
                    self.incident.remove(node);
                }
            }
        }
        Some(triple)
    }
}
