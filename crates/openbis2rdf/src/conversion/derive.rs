//! Relations only computable once identities are final.

use tracing::debug;

use crate::model::graph::{Graph, Literal, Node, Term};
use crate::model::ontology::{dcat, obis, standard};

/// Link every data-set file to its data set and give it a download URL.
///
/// Returns the number of triples added.
pub fn attach(graph: &mut Graph) -> usize {
    let mut added = 0;
    for distribution in graph.instances_of(dcat::DISTRIBUTION_CLASS) {
        let dataset_ids: Vec<String> = graph
            .objects(&distribution, obis::DATASET_PERMID)
            .filter_map(Term::as_literal)
            .map(|lit| lit.value.clone())
            .collect();
        for perm_id in dataset_ids {
            let Some(dataset) = owner_of(graph, &perm_id) else {
                debug!(%distribution, perm_id = perm_id.as_str(), "no data set carries this permanent id");
                continue;
            };
            if graph.add(dataset.clone(), dcat::DISTRIBUTION, distribution.clone()) {
                added += 1;
            }
            let Some(download) = download_url(graph, &dataset, &distribution, &perm_id) else {
                continue;
            };
            if graph.add(distribution.clone(), dcat::DOWNLOAD_URL, Node::iri(download)) {
                added += 1;
            }
        }
    }
    added
}

/// The entity owning the permanent identifier record labelled `label`.
fn owner_of(graph: &Graph, label: &str) -> Option<Node> {
    let label = Term::Literal(Literal::plain(label));
    let record = graph
        .subjects(standard::RDF_VALUE, &label)
        .find(|node| graph.has_type(node, obis::PERMANENT_IDENTIFIER))?;
    graph
        .objects(record, obis::IS_IDENTIFIER_OF)
        .find_map(Term::as_node)
        .cloned()
}

/// `{endpoint}/datastore_server/{perm_id}/{path}` for `distribution`.
fn download_url(
    graph: &Graph,
    dataset: &Node,
    distribution: &Node,
    perm_id: &str,
) -> Option<String> {
    // The first related data store wins when several are linked.
    let store = graph
        .objects(dataset, obis::RELATES_TO)
        .filter_map(Term::as_node)
        .find(|node| graph.has_type(node, obis::DATA_STORE))?;
    let endpoint = endpoint_url(graph, store)?;
    let path = graph.literal_value(distribution, obis::FILE_PATH)?;
    Some(format!(
        "{}/datastore_server/{perm_id}/{}",
        endpoint.trim_end_matches('/'),
        path.trim_start_matches('/')
    ))
}

fn endpoint_url<'g>(graph: &'g Graph, store: &Node) -> Option<&'g str> {
    graph
        .objects(store, dcat::ENDPOINT_URL)
        .find_map(|term| match term {
            Term::Literal(lit) => Some(lit.value.as_str()),
            Term::Node(node) => node.as_iri(),
        })
}
