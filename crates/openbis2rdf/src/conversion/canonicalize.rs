//! Identifier canonicalization.
//!
//! The builder names every entity by its source-local `@id`. Once the whole
//! document has been walked, [`canonicalize`] renames entities after the
//! permanent identifiers recorded for them and drops every entity that
//! never received one.

use std::collections::HashSet;

use tracing::debug;

use crate::error::Result;
use crate::model::graph::{Graph, Node, Term};
use crate::model::iri::IriMinter;
use crate::model::ontology::{dcat, obis, standard};

/// What a canonicalization run changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CanonicalizeReport {
    /// Entities renamed after a permanent identifier.
    pub promoted: usize,
    /// Object properties renamed after their code.
    pub properties: usize,
    /// Transient identifier records turned anonymous.
    pub erased_identifiers: usize,
    /// Permanent identifier records given their uniform name.
    pub records: usize,
    /// Leftover entities renamed after their code.
    pub renamed_by_code: usize,
    /// Leftover entities removed along with their triples.
    pub dropped: usize,
}

/// Rewrite provisional identities into permanent ones, in place.
///
/// Phases run in order, each over a snapshot taken when it starts:
///
/// 1. owners of permanent identifier records become
///    `{ns}/{class segment}/{label}` (data-set files also carry the owning
///    data set's permanent id);
/// 2. object properties with a code become `{ns}/{code}`;
/// 3. transient identifier records become anonymous;
/// 4. permanent identifier records become `{ns}/permanent_identifier/{label}`;
/// 5. remaining provisional entities are renamed after their code, or
///    removed with every triple mentioning them and the anonymous value
///    wrappers only they referenced.
///
/// Fails only when `base_url` is not an absolute URL.
pub fn canonicalize(graph: &mut Graph, base_url: &str) -> Result<CanonicalizeReport> {
    let minter = IriMinter::new(base_url)?;
    let promoted = promote_owners(graph, &minter);
    let properties = rename_properties(graph, &minter);
    let erased_identifiers = erase_transient_identifiers(graph);
    let records = rename_permanent_records(graph, &minter);
    let (renamed_by_code, dropped) = sweep_provisional(graph, &minter);
    Ok(CanonicalizeReport {
        promoted,
        properties,
        erased_identifiers,
        records,
        renamed_by_code,
        dropped,
    })
}

// ---------------------------------------------------------------------------
// Phases
// ---------------------------------------------------------------------------

fn promote_owners(graph: &mut Graph, minter: &IriMinter) -> usize {
    let mut promoted: HashSet<Node> = HashSet::new();
    for record in graph.instances_of(obis::PERMANENT_IDENTIFIER) {
        let Some(label) = graph
            .literal_value(&record, standard::RDF_VALUE)
            .map(str::to_string)
        else {
            continue;
        };
        let owners: Vec<Node> = graph
            .subjects(obis::HAS_IDENTIFIER, &Term::Node(record.clone()))
            .cloned()
            .collect();
        for owner in owners {
            // An entity keeps the name from its first permanent record.
            if promoted.contains(&owner) {
                continue;
            }
            let Some(target) = owner_iri(graph, minter, &owner, &label) else {
                debug!(%owner, "identifier owner has no class, leaving it");
                continue;
            };
            let target = Node::iri(target);
            debug!(%owner, %target, "promoting entity");
            graph.rename(&owner, &target);
            promoted.insert(target);
        }
    }
    promoted.len()
}

/// Permanent name for `owner` labelled `label`, derived from its class.
fn owner_iri(graph: &Graph, minter: &IriMinter, owner: &Node, label: &str) -> Option<String> {
    let class = graph.first_type(owner)?;
    let segment = IriMinter::class_segment(class);
    if graph.has_type(owner, dcat::DISTRIBUTION_CLASS) {
        if let Some(dataset) = graph.literal_value(owner, obis::DATASET_PERMID) {
            return Some(minter.distribution_iri(&segment, dataset, label));
        }
    }
    Some(minter.entity_iri(&segment, label))
}

fn rename_properties(graph: &mut Graph, minter: &IriMinter) -> usize {
    let mut renamed = 0;
    for property in graph.instances_of(standard::OWL_OBJECT_PROPERTY) {
        let Some(code) = graph.literal_value(&property, obis::CODE) else {
            continue;
        };
        let target = Node::iri(minter.code_iri(code));
        if graph.rename(&property, &target) > 0 {
            debug!(%property, %target, "renamed object property");
            renamed += 1;
        }
    }
    renamed
}

fn erase_transient_identifiers(graph: &mut Graph) -> usize {
    let records = graph.instances_of(obis::IDENTIFIER);
    for record in &records {
        let anonymous = graph.fresh_blank();
        graph.rename(record, &anonymous);
    }
    records.len()
}

fn rename_permanent_records(graph: &mut Graph, minter: &IriMinter) -> usize {
    let mut renamed = 0;
    for record in graph.instances_of(obis::PERMANENT_IDENTIFIER) {
        let Some(label) = graph.literal_value(&record, standard::RDF_VALUE) else {
            continue;
        };
        let target = Node::iri(minter.permanent_identifier_iri(label));
        if graph.rename(&record, &target) > 0 {
            renamed += 1;
        }
    }
    renamed
}

fn sweep_provisional(graph: &mut Graph, minter: &IriMinter) -> (usize, usize) {
    let (mut renamed, mut dropped) = (0, 0);
    let leftovers: Vec<Node> = graph
        .nodes()
        .into_iter()
        .filter(Node::is_provisional)
        .collect();
    for node in leftovers {
        // A numeric code would mint a name indistinguishable from a raw id.
        let target = graph
            .literal_value(&node, obis::CODE)
            .map(|code| minter.code_iri(code))
            .filter(|iri| !has_numeric_tail(iri));
        match target {
            Some(target) => {
                let target = Node::iri(target);
                debug!(%node, %target, "renaming unpromoted entity after its code");
                graph.rename(&node, &target);
                renamed += 1;
            }
            None => {
                let removed = drop_entity(graph, &node);
                debug!(%node, removed, "dropping unreferenceable entity");
                dropped += 1;
            }
        }
    }
    (renamed, dropped)
}

/// True when the last path segment of `iri` is empty or all digits.
fn has_numeric_tail(iri: &str) -> bool {
    let last = iri.rsplit('/').next().unwrap_or(iri);
    last.chars().all(|c| c.is_ascii_digit())
}

/// Remove `node` and, transitively, every anonymous node it pointed to
/// that nothing else references. Returns the number of triples removed.
fn drop_entity(graph: &mut Graph, node: &Node) -> usize {
    let mut removed = 0;
    let mut pending = vec![node.clone()];
    while let Some(current) = pending.pop() {
        let owned: Vec<Node> = graph
            .triples_with(&current)
            .filter(|t| t.subject == current)
            .filter_map(|t| t.object.as_node())
            .filter(|n| n.is_blank())
            .cloned()
            .collect();
        removed += graph.remove_node(&current);
        for blank in owned {
            let referenced = graph
                .triples_with(&blank)
                .any(|t| t.object.as_node() == Some(&blank));
            if !referenced {
                pending.push(blank);
            }
        }
    }
    removed
}
