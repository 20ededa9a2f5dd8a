//! Element construction from flat records.
//!
//! Every record becomes a container element (or is dropped with a warning
//! when it has no usable id). When the record's namespace offers a
//! constructor for its type, the representation is built right away; a
//! failing constructor only costs the element its representation.

use indexmap::IndexMap;
use log::{trace, warn};
use std::sync::Arc;

use crate::extract::{FlatRecord, FlatRecords};
use crate::model::{Edge, Element, Graph, Hyperedge, Node};
use crate::namespace::{NamespaceDescriptor, NamespaceRegistry};

const ANONYMOUS_GRAPH_PREFIX: &str = "graph#";

/// Namespaces exercised while building elements, in first-use order.
#[derive(Debug, Default, Clone)]
pub struct NamespaceUsage {
    used: IndexMap<String, Arc<NamespaceDescriptor>>,
}

impl NamespaceUsage {
    pub fn record(&mut self, descriptor: &Arc<NamespaceDescriptor>) {
        if !self.used.contains_key(descriptor.uri()) {
            trace!(uri = descriptor.uri(); "First use of namespace");
            self.used
                .insert(descriptor.uri().to_string(), Arc::clone(descriptor));
        }
    }

    pub fn uris(&self) -> impl Iterator<Item = &str> {
        self.used.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.used.is_empty()
    }

    pub fn into_inner(self) -> IndexMap<String, Arc<NamespaceDescriptor>> {
        self.used
    }
}

/// Elements built from one document, still detached from each other.
#[derive(Debug, Default)]
pub struct Elements {
    pub graphs: Vec<Graph>,
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    pub hyperedges: Vec<Hyperedge>,
}

pub struct ElementFactory<'r> {
    registry: &'r NamespaceRegistry,
}

impl<'r> ElementFactory<'r> {
    pub fn new(registry: &'r NamespaceRegistry) -> Self {
        Self { registry }
    }

    /// Build all elements, graphs first, recording namespace use as it goes.
    pub fn build(&self, records: &FlatRecords<'_>, usage: &mut NamespaceUsage) -> Elements {
        let mut elements = Elements::default();

        for (index, record) in records.graphs.iter().enumerate() {
            self.mark_used(record, usage);
            let id = record
                .id
                .clone()
                .unwrap_or_else(|| format!("{ANONYMOUS_GRAPH_PREFIX}{index}"));
            let mut graph = Graph::new(id);
            graph.read_markup(record.raw);
            elements.graphs.push(graph);
        }

        for record in &records.nodes {
            let Some(id) = self.require_id(record) else {
                continue;
            };
            let mut node = Node::new(id);
            node.read_markup(record.raw);
            self.attach_representation(&mut node, record, usage);
            elements.nodes.push(node);
        }

        for record in &records.edges {
            let Some(id) = self.require_id(record) else {
                continue;
            };
            let source = record.raw.attr("source");
            let target = record.raw.attr("target");
            let (Some(source), Some(target)) = (source, target) else {
                warn!(edge = id.as_str(); "Skipping edge without source or target");
                continue;
            };
            let mut edge = Edge::new(id, source, target);
            edge.read_markup(record.raw);
            self.attach_representation(&mut edge, record, usage);
            elements.edges.push(edge);
        }

        for record in &records.hyperedges {
            let Some(id) = self.require_id(record) else {
                continue;
            };
            let mut hyperedge = Hyperedge::new(id);
            hyperedge.read_markup(record.raw);
            self.attach_representation(&mut hyperedge, record, usage);
            elements.hyperedges.push(hyperedge);
        }

        elements
    }

    fn require_id(&self, record: &FlatRecord<'_>) -> Option<String> {
        if record.id.is_none() {
            warn!(kind:? = record.kind; "Skipping element without an id");
        }
        record.id.clone()
    }

    fn mark_used(&self, record: &FlatRecord<'_>, usage: &mut NamespaceUsage) {
        if let Some(descriptor) = record.namespace_uri().and_then(|uri| self.registry.lookup(uri)) {
            usage.record(descriptor);
        }
    }

    fn attach_representation<E: Element>(
        &self,
        element: &mut E,
        record: &FlatRecord<'_>,
        usage: &mut NamespaceUsage,
    ) {
        let Some(resolved) = record.resolved.as_ref() else {
            warn!(
                kind:? = record.kind,
                id = element.id();
                "No registered type found, keeping bare container"
            );
            return;
        };
        let Some(descriptor) = self.registry.lookup(&resolved.uri) else {
            return;
        };
        usage.record(descriptor);

        let Some(constructor) = descriptor.get_constructor(&resolved.type_name) else {
            warn!(
                id = element.id(),
                uri = resolved.uri.as_str(),
                type_name = resolved.type_name.as_str();
                "Namespace has no constructor for type"
            );
            return;
        };

        match constructor(resolved.element) {
            Ok(representation) => {
                if let Err(err) = element.set_representation(representation) {
                    warn!(id = element.id(), error:% = err; "Representation rejected");
                }
            }
            Err(err) => {
                warn!(
                    id = element.id(),
                    type_name = resolved.type_name.as_str(),
                    error:% = err;
                    "Failed to build representation"
                );
            }
        }
    }
}
