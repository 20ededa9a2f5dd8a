//! Flat extraction of structural elements.
//!
//! One walk per element kind collects every `graph`, `node`, `edge` and
//! `hyperedge` in document order together with its resolved foreign type.
//! Containment is not resolved here; records only borrow the markup.

use log::{debug, trace};

use crate::model::ElementKind;
use crate::namespace::{ResolvedType, TypeResolver};
use crate::parse::RawElement;

#[derive(Debug, Clone)]
pub struct FlatRecord<'a> {
    pub kind: ElementKind,
    pub id: Option<String>,
    pub resolved: Option<ResolvedType<'a>>,
    pub raw: &'a RawElement,
}

impl FlatRecord<'_> {
    pub fn namespace_uri(&self) -> Option<&str> {
        self.resolved.as_ref().map(|r| r.uri.as_str())
    }

    pub fn type_name(&self) -> Option<&str> {
        self.resolved.as_ref().map(|r| r.type_name.as_str())
    }
}

#[derive(Debug, Clone, Default)]
pub struct FlatRecords<'a> {
    pub graphs: Vec<FlatRecord<'a>>,
    pub nodes: Vec<FlatRecord<'a>>,
    pub edges: Vec<FlatRecord<'a>>,
    pub hyperedges: Vec<FlatRecord<'a>>,
}

impl<'a> FlatRecords<'a> {
    pub fn of_kind(&self, kind: ElementKind) -> &[FlatRecord<'a>] {
        match kind {
            ElementKind::Graph => &self.graphs,
            ElementKind::Node => &self.nodes,
            ElementKind::Edge => &self.edges,
            ElementKind::Hyperedge => &self.hyperedges,
        }
    }

    fn of_kind_mut(&mut self, kind: ElementKind) -> &mut Vec<FlatRecord<'a>> {
        match kind {
            ElementKind::Graph => &mut self.graphs,
            ElementKind::Node => &mut self.nodes,
            ElementKind::Edge => &mut self.edges,
            ElementKind::Hyperedge => &mut self.hyperedges,
        }
    }
}

pub fn extract<'a>(root: &'a RawElement, resolver: &TypeResolver<'_>) -> FlatRecords<'a> {
    let mut records = FlatRecords::default();
    for kind in ElementKind::ALL {
        let out = records.of_kind_mut(kind);
        collect(root, kind, resolver, out);
        debug!(kind:? = kind, count = out.len(); "Extracted flat records");
    }
    records
}

fn collect<'a>(
    element: &'a RawElement,
    kind: ElementKind,
    resolver: &TypeResolver<'_>,
    out: &mut Vec<FlatRecord<'a>>,
) {
    for child in &element.children {
        // foreign markup never holds structural GraphML elements
        if !resolver.is_core(child) {
            continue;
        }
        if child.local_name() == kind.tag() {
            let resolved = resolver.resolve(child);
            let record = FlatRecord {
                kind,
                id: child.attr("id").map(str::to_string),
                resolved,
                raw: child,
            };
            trace!(
                kind:? = kind,
                id:? = record.id,
                type_name:? = record.type_name();
                "Flat record"
            );
            out.push(record);
        }
        collect(child, kind, resolver, out);
    }
}
