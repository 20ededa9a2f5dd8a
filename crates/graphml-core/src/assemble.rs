//! Hierarchy assembly and namespace setup dispatch.
//!
//! Assembly runs in two stages. Subgraphs are attached first, so that every
//! graph a leaf element may name already sits in the containment tree; then
//! nodes, edges and hyperedges join their containers. Containers come from
//! the `::` id convention and unresolvable ones fall back to the root.

use log::{debug, info, warn};

use crate::error::{LoadError, LoadResult};
use crate::factory::{Elements, NamespaceUsage};
use crate::model::{Document, Element, ElementKind, container_id};
use crate::parse::RawElement;

/// Build the document tree from detached elements.
///
/// The first graph becomes the root. Fails only when there is no graph.
pub fn assemble(elements: Elements, usage: NamespaceUsage) -> LoadResult<Document> {
    let Elements {
        graphs,
        nodes,
        edges,
        hyperedges,
    } = elements;

    let mut graphs = graphs.into_iter();
    let root = graphs.next().ok_or(LoadError::NoGraph)?;
    let mut document = Document::new(root);
    document.set_namespaces(usage.into_inner());

    // Stage 1: subgraphs
    for mut graph in graphs {
        if document.contains_graph(graph.id()) {
            warn!(graph = graph.id(); "Duplicate graph id, keeping the first");
            continue;
        }
        let parent = resolve_container(&document, ElementKind::Graph, graph.id());
        graph.set_parent(&parent);
        if let Some(container) = document.graph_mut(&parent) {
            container.add_member(ElementKind::Graph, graph.id());
        }
        document.insert_graph(graph);
    }

    // Stage 2: leaves, nodes then edges then hyperedges
    for node in nodes {
        if document.get_node(node.id()).is_some() {
            warn!(node = node.id(); "Duplicate node id, keeping the first");
            continue;
        }
        attach(&mut document, ElementKind::Node, node.id());
        document.insert_node(node);
    }

    for mut edge in edges {
        if document.get_edge(edge.id()).is_some() {
            warn!(edge = edge.id(); "Duplicate edge id, keeping the first");
            continue;
        }
        let container = attach(&mut document, ElementKind::Edge, edge.id());
        if let Some(graph) = document.get_subgraph(&container) {
            edge.resolve_direction(graph.edge_default());
        }
        document.insert_edge(edge);
    }

    for hyperedge in hyperedges {
        if document.get_hyperedge(hyperedge.id()).is_some() {
            warn!(hyperedge = hyperedge.id(); "Duplicate hyperedge id, keeping the first");
            continue;
        }
        attach(&mut document, ElementKind::Hyperedge, hyperedge.id());
        document.insert_hyperedge(hyperedge);
    }

    info!(
        graphs = document.graphs().count(),
        nodes = document.nodes().count(),
        edges = document.edges().count(),
        hyperedges = document.hyperedges().count();
        "Document hierarchy assembled"
    );
    Ok(document)
}

/// Run every used namespace's setup hook once, in first-use order.
pub fn run_setup_hooks(document: &mut Document, raw: &RawElement) {
    for descriptor in document.namespace_descriptors() {
        if !descriptor.has_setup() {
            continue;
        }
        debug!(uri = descriptor.uri(); "Running namespace setup");
        descriptor.setup(document, raw);
    }
}

fn attach(document: &mut Document, kind: ElementKind, id: &str) -> String {
    let container = resolve_container(document, kind, id);
    if let Some(graph) = document.graph_mut(&container) {
        graph.add_member(kind, id);
    }
    container
}

/// Containing graph id for `id`, the root when it cannot be resolved.
fn resolve_container(document: &Document, kind: ElementKind, id: &str) -> String {
    let root = document.root_graph_id();
    match container_id(id) {
        None => root.to_string(),
        Some(container) if document.contains_graph(container) => container.to_string(),
        Some(container) => {
            warn!(
                kind:? = kind,
                id = id,
                container = container;
                "Container graph not found, falling back to root"
            );
            root.to_string()
        }
    }
}
