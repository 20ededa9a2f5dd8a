use indexmap::{IndexMap, IndexSet};
use log::warn;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::error::{ModelError, RepresentationError, RepresentationResult};
use crate::geometry::{BoundsBuilder, Point, Rect};
use crate::namespace::NamespaceDescriptor;
use crate::parse::RawElement;

/// Separator between a container id and the local part of a hierarchical id.
pub const HIERARCHY_SEPARATOR: &str = "::";

/// Id of the graph containing `id`: everything before the last `::`.
///
/// `None` means the element belongs to the root graph.
pub fn container_id(id: &str) -> Option<&str> {
    id.rfind(HIERARCHY_SEPARATOR).map(|at| &id[..at])
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Graph,
    Node,
    Edge,
    Hyperedge,
}

impl ElementKind {
    pub const ALL: [ElementKind; 4] = [
        ElementKind::Graph,
        ElementKind::Node,
        ElementKind::Edge,
        ElementKind::Hyperedge,
    ];

    /// Tag name of the element in the GraphML core vocabulary.
    pub fn tag(self) -> &'static str {
        match self {
            ElementKind::Graph => "graph",
            ElementKind::Node => "node",
            ElementKind::Edge => "edge",
            ElementKind::Hyperedge => "hyperedge",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeDefault {
    Directed,
    #[default]
    Undirected,
}

// =============================================================================
// Representations
// =============================================================================

/// Type-specific geometry and style attached to an element by a namespace
/// constructor.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Representation {
    Node(NodeShape),
    Edge(EdgePath),
}

impl Representation {
    pub fn type_name(&self) -> &str {
        match self {
            Representation::Node(shape) => &shape.type_name,
            Representation::Edge(path) => &path.type_name,
        }
    }

    /// Node rectangle, or the box around an edge's intermediate points.
    pub fn bounds(&self) -> Option<Rect> {
        match self {
            Representation::Node(shape) => Some(shape.bounds),
            Representation::Edge(path) => path.points_bounds(),
        }
    }

    /// Move (and for nodes, resize) the representation.
    ///
    /// Incremental updates add `delta` to the current bounds; otherwise
    /// `delta` is the new absolute bounds. Labels and edge points follow the
    /// origin. Edges have no size, so only the origin part is used for them.
    pub fn set_bounds(&mut self, delta: Rect, incremental: bool) {
        match self {
            Representation::Node(shape) => {
                let (dx, dy) = if incremental {
                    (delta.x, delta.y)
                } else {
                    (delta.x - shape.bounds.x, delta.y - shape.bounds.y)
                };
                shape.bounds = if incremental {
                    Rect::new(
                        shape.bounds.x + delta.x,
                        shape.bounds.y + delta.y,
                        shape.bounds.width + delta.width,
                        shape.bounds.height + delta.height,
                    )
                } else {
                    delta
                };
                for label in &mut shape.labels {
                    label.translate(dx, dy);
                }
            }
            Representation::Edge(path) => {
                let (dx, dy) = match (incremental, path.points_bounds()) {
                    (true, _) => (delta.x, delta.y),
                    (false, Some(current)) => (delta.x - current.x, delta.y - current.y),
                    (false, None) => (0.0, 0.0),
                };
                path.translate(dx, dy);
            }
        }
    }

    /// Re-read the representation from its typed markup element.
    pub fn read_markup(&mut self, raw: &RawElement) -> RepresentationResult<()> {
        match self {
            Representation::Node(shape) => shape.read_markup(raw),
            Representation::Edge(path) => path.read_markup(raw),
        }
    }

    pub fn as_node(&self) -> Option<&NodeShape> {
        match self {
            Representation::Node(shape) => Some(shape),
            Representation::Edge(_) => None,
        }
    }

    pub fn as_node_mut(&mut self) -> Option<&mut NodeShape> {
        match self {
            Representation::Node(shape) => Some(shape),
            Representation::Edge(_) => None,
        }
    }

    pub fn as_edge(&self) -> Option<&EdgePath> {
        match self {
            Representation::Edge(path) => Some(path),
            Representation::Node(_) => None,
        }
    }

    pub fn as_edge_mut(&mut self) -> Option<&mut EdgePath> {
        match self {
            Representation::Edge(path) => Some(path),
            Representation::Node(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Label {
    pub text: String,

    /// Absolute label box, when the markup gives one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounds: Option<Rect>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, String>,
}

impl Label {
    pub fn translate(&mut self, dx: f64, dy: f64) {
        if let Some(bounds) = self.bounds.as_mut() {
            *bounds = bounds.translate(dx, dy);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Fill {
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color2: Option<String>,
    pub transparent: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stroke {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeShape {
    pub type_name: String,
    pub bounds: Rect,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shape: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<Fill>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border: Option<Stroke>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<Label>,

    /// Attributes of the typed element that have no dedicated field.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, String>,
}

impl NodeShape {
    pub fn new(type_name: impl Into<String>, bounds: Rect) -> Self {
        Self {
            type_name: type_name.into(),
            bounds,
            shape: None,
            fill: None,
            border: None,
            labels: Vec::new(),
            extra: BTreeMap::new(),
        }
    }

    /// Read `Geometry` (required), `Fill`, `BorderStyle`, `Shape` and
    /// `NodeLabel` children. Label offsets in the markup are relative to the
    /// node and are stored absolute.
    pub fn read_markup(&mut self, raw: &RawElement) -> RepresentationResult<()> {
        let geometry = raw
            .child("Geometry")
            .ok_or_else(|| RepresentationError::MissingChild {
                element: raw.name.clone(),
                child: "Geometry",
            })?;
        let bounds = Rect::new(
            parse_f64_opt(geometry.attr("x"), "Geometry@x")?.unwrap_or(0.0),
            parse_f64_opt(geometry.attr("y"), "Geometry@y")?.unwrap_or(0.0),
            parse_f64_opt(geometry.attr("width"), "Geometry@width")?.unwrap_or(0.0),
            parse_f64_opt(geometry.attr("height"), "Geometry@height")?.unwrap_or(0.0),
        );

        let fill = raw.child("Fill").map(|fill| Fill {
            color: fill.attr("color").map(str::to_string),
            color2: fill.attr("color2").map(str::to_string),
            transparent: parse_bool_opt(fill.attr("transparent")).unwrap_or(false),
        });
        let border = raw.child("BorderStyle").map(read_stroke).transpose()?;
        let shape = raw
            .child("Shape")
            .and_then(|s| s.attr("type"))
            .map(str::to_string);

        let mut labels = Vec::new();
        for label in raw.children_named("NodeLabel") {
            labels.push(read_label(label, Some(Point::new(bounds.x, bounds.y)))?);
        }

        self.bounds = bounds;
        self.fill = fill;
        self.border = border;
        self.shape = shape;
        self.labels = labels;
        self.extra = raw.attributes.clone();
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EdgePath {
    pub type_name: String,

    /// Offset of the source anchor from the source node's center.
    pub source_offset: Point,

    /// Offset of the target anchor from the target node's center.
    pub target_offset: Point,

    /// Intermediate bend points, source side first.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub points: Vec<Point>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<Stroke>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_arrow: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_arrow: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<Label>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, String>,
}

impl EdgePath {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            source_offset: Point::default(),
            target_offset: Point::default(),
            points: Vec::new(),
            line: None,
            source_arrow: None,
            target_arrow: None,
            labels: Vec::new(),
            extra: BTreeMap::new(),
        }
    }

    /// Box around the intermediate points, `None` for a straight edge.
    pub fn points_bounds(&self) -> Option<Rect> {
        if self.points.is_empty() {
            return None;
        }
        let mut builder = BoundsBuilder::default();
        self.points.iter().for_each(|p| builder.include_point(*p));
        Some(builder.build())
    }

    pub fn translate(&mut self, dx: f64, dy: f64) {
        for point in &mut self.points {
            *point = point.translate(dx, dy);
        }
    }

    /// Read `Path` (offsets and `Point` children), `LineStyle`, `Arrows` and
    /// `EdgeLabel` children. All of them are optional.
    pub fn read_markup(&mut self, raw: &RawElement) -> RepresentationResult<()> {
        let mut source_offset = Point::default();
        let mut target_offset = Point::default();
        let mut points = Vec::new();
        if let Some(path) = raw.child("Path") {
            source_offset = Point::new(
                parse_f64_opt(path.attr("sx"), "Path@sx")?.unwrap_or(0.0),
                parse_f64_opt(path.attr("sy"), "Path@sy")?.unwrap_or(0.0),
            );
            target_offset = Point::new(
                parse_f64_opt(path.attr("tx"), "Path@tx")?.unwrap_or(0.0),
                parse_f64_opt(path.attr("ty"), "Path@ty")?.unwrap_or(0.0),
            );
            for point in path.children_named("Point") {
                points.push(Point::new(
                    parse_f64_req(point.attr("x"), "Point@x")?,
                    parse_f64_req(point.attr("y"), "Point@y")?,
                ));
            }
        }

        let line = raw.child("LineStyle").map(read_stroke).transpose()?;
        let arrows = raw.child("Arrows");

        let mut labels = Vec::new();
        for label in raw.children_named("EdgeLabel") {
            let mut label = read_label(label, None)?;
            // edge label boxes are relative to the path, not positioned here
            label.bounds = None;
            labels.push(label);
        }

        self.source_offset = source_offset;
        self.target_offset = target_offset;
        self.points = points;
        self.line = line;
        self.source_arrow = arrows.and_then(|a| a.attr("source")).map(str::to_string);
        self.target_arrow = arrows.and_then(|a| a.attr("target")).map(str::to_string);
        self.labels = labels;
        self.extra = raw.attributes.clone();
        Ok(())
    }
}

fn read_stroke(raw: &RawElement) -> RepresentationResult<Stroke> {
    Ok(Stroke {
        color: raw.attr("color").map(str::to_string),
        line_type: raw.attr("type").map(str::to_string),
        width: parse_f64_opt(raw.attr("width"), "stroke width")?,
    })
}

fn read_label(raw: &RawElement, origin: Option<Point>) -> RepresentationResult<Label> {
    let x = parse_f64_opt(raw.attr("x"), "label x")?;
    let y = parse_f64_opt(raw.attr("y"), "label y")?;
    let width = parse_f64_opt(raw.attr("width"), "label width")?;
    let height = parse_f64_opt(raw.attr("height"), "label height")?;
    let bounds = match (x, y, width, height) {
        (Some(x), Some(y), Some(width), Some(height)) => {
            let origin = origin.unwrap_or_default();
            Some(Rect::new(origin.x + x, origin.y + y, width, height))
        }
        _ => None,
    };

    let mut extra = BTreeMap::new();
    for (k, v) in &raw.attributes {
        if !matches!(k.as_str(), "x" | "y" | "width" | "height") {
            extra.insert(k.clone(), v.clone());
        }
    }

    Ok(Label {
        text: raw.text.as_deref().map(str::trim).unwrap_or_default().to_string(),
        bounds,
        extra,
    })
}

pub(crate) fn parse_bool_opt(v: Option<&str>) -> Option<bool> {
    match v? {
        "1" | "true" | "TRUE" | "True" => Some(true),
        "0" | "false" | "FALSE" | "False" => Some(false),
        _ => None,
    }
}

pub(crate) fn parse_f64_opt(
    v: Option<&str>,
    field: &'static str,
) -> RepresentationResult<Option<f64>> {
    let Some(s) = v else { return Ok(None) };
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let parsed = trimmed
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| RepresentationError::InvalidNumber {
            field,
            value: s.to_string(),
        })?;
    Ok(Some(parsed))
}

fn parse_f64_req(v: Option<&str>, field: &'static str) -> RepresentationResult<f64> {
    parse_f64_opt(v, field)?.ok_or(RepresentationError::InvalidNumber {
        field,
        value: String::new(),
    })
}

// =============================================================================
// Elements
// =============================================================================

/// State shared by nodes, edges and hyperedges.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ElementCore {
    id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    representation: Option<Representation>,

    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    raw_attributes: BTreeMap<String, String>,
}

impl ElementCore {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            representation: None,
            raw_attributes: BTreeMap::new(),
        }
    }
}

/// Capabilities common to every leaf element of the model.
pub trait Element {
    fn core(&self) -> &ElementCore;

    fn core_mut(&mut self) -> &mut ElementCore;

    fn kind(&self) -> ElementKind;

    /// Refresh the element from its structural markup element.
    fn read_markup(&mut self, raw: &RawElement);

    fn id(&self) -> &str {
        &self.core().id
    }

    fn representation(&self) -> Option<&Representation> {
        self.core().representation.as_ref()
    }

    /// Mutable node geometry. The representation itself is never swapped.
    fn node_shape_mut(&mut self) -> Option<&mut NodeShape> {
        self.core_mut()
            .representation
            .as_mut()
            .and_then(Representation::as_node_mut)
    }

    fn edge_path_mut(&mut self) -> Option<&mut EdgePath> {
        self.core_mut()
            .representation
            .as_mut()
            .and_then(Representation::as_edge_mut)
    }

    /// Move or resize the representation in place, see
    /// [`Representation::set_bounds`]. Returns `false` when there is none.
    fn set_bounds(&mut self, delta: Rect, incremental: bool) -> bool {
        match self.core_mut().representation.as_mut() {
            Some(representation) => {
                representation.set_bounds(delta, incremental);
                true
            }
            None => false,
        }
    }

    /// Attach a representation. An element keeps its first one for life.
    fn set_representation(&mut self, representation: Representation) -> Result<(), ModelError> {
        let core = self.core_mut();
        if core.representation.is_some() {
            return Err(ModelError::RepresentationAlreadySet {
                id: core.id.clone(),
            });
        }
        core.representation = Some(representation);
        Ok(())
    }

    fn raw_attributes(&self) -> &BTreeMap<String, String> {
        &self.core().raw_attributes
    }

    fn bounds(&self) -> Option<Rect> {
        self.representation().and_then(Representation::bounds)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    #[serde(flatten)]
    core: ElementCore,

    #[serde(skip_serializing_if = "Option::is_none")]
    subgraph: Option<String>,
}

impl Node {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            core: ElementCore::new(id),
            subgraph: None,
        }
    }

    /// Id of the graph nested in this node, if any.
    pub fn subgraph(&self) -> Option<&str> {
        self.subgraph.as_deref()
    }
}

impl Element for Node {
    fn core(&self) -> &ElementCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ElementCore {
        &mut self.core
    }

    fn kind(&self) -> ElementKind {
        ElementKind::Node
    }

    fn read_markup(&mut self, raw: &RawElement) {
        self.core.raw_attributes = raw.attributes.clone();
        self.subgraph = raw
            .children
            .iter()
            .find(|c| c.prefix().is_none() && c.local_name() == ElementKind::Graph.tag())
            .and_then(|graph| graph.attr("id"))
            .map(str::to_string);
    }
}

/// Rendered endpoints of an edge after clipping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EdgeEndpoints {
    pub source: Point,
    pub target: Point,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Edge {
    #[serde(flatten)]
    core: ElementCore,
    source: String,
    target: String,
    directed: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    endpoints: Option<EdgeEndpoints>,
}

impl Edge {
    pub fn new(
        id: impl Into<String>,
        source: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Self {
            core: ElementCore::new(id),
            source: source.into(),
            target: target.into(),
            directed: None,
            endpoints: None,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    /// Explicit `directed` attribute, else the containing graph's default.
    pub fn is_directed(&self) -> bool {
        self.directed.unwrap_or(false)
    }

    pub fn endpoints(&self) -> Option<EdgeEndpoints> {
        self.endpoints
    }

    pub fn set_endpoints(&mut self, endpoints: EdgeEndpoints) {
        self.endpoints = Some(endpoints);
    }

    pub(crate) fn resolve_direction(&mut self, default: EdgeDefault) {
        if self.directed.is_none() {
            self.directed = Some(default == EdgeDefault::Directed);
        }
    }
}

impl Element for Edge {
    fn core(&self) -> &ElementCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ElementCore {
        &mut self.core
    }

    fn kind(&self) -> ElementKind {
        ElementKind::Edge
    }

    fn read_markup(&mut self, raw: &RawElement) {
        self.core.raw_attributes = raw.attributes.clone();
        if let Some(source) = raw.attr("source") {
            self.source = source.to_string();
        }
        if let Some(target) = raw.attr("target") {
            self.target = target.to_string();
        }
        self.directed = parse_bool_opt(raw.attr("directed"));
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hyperedge {
    #[serde(flatten)]
    core: ElementCore,
    endpoints: Vec<String>,
}

impl Hyperedge {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            core: ElementCore::new(id),
            endpoints: Vec::new(),
        }
    }

    /// Node ids of the endpoints, in document order.
    pub fn endpoints(&self) -> &[String] {
        &self.endpoints
    }
}

impl Element for Hyperedge {
    fn core(&self) -> &ElementCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ElementCore {
        &mut self.core
    }

    fn kind(&self) -> ElementKind {
        ElementKind::Hyperedge
    }

    fn read_markup(&mut self, raw: &RawElement) {
        self.core.raw_attributes = raw.attributes.clone();
        self.endpoints.clear();
        for endpoint in raw
            .children
            .iter()
            .filter(|c| c.prefix().is_none() && c.local_name() == "endpoint")
        {
            match endpoint.attr("node") {
                Some(node) => self.endpoints.push(node.to_string()),
                None => warn!(
                    hyperedge = self.core.id.as_str();
                    "Skipping hyperedge endpoint without a node attribute"
                ),
            }
        }
    }
}

// =============================================================================
// Graphs and the document
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Graph {
    id: String,
    parent: Option<String>,
    edge_default: EdgeDefault,
    nodes: IndexSet<String>,
    edges: IndexSet<String>,
    hyperedges: IndexSet<String>,

    subgraphs: IndexSet<String>,
}

impl Graph {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            parent: None,
            edge_default: EdgeDefault::default(),
            nodes: IndexSet::new(),
            edges: IndexSet::new(),
            hyperedges: IndexSet::new(),
            subgraphs: IndexSet::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Containing graph, `None` only for the root graph.
    pub fn parent(&self) -> Option<&str> {
        self.parent.as_deref()
    }

    pub fn edge_default(&self) -> EdgeDefault {
        self.edge_default
    }

    pub fn nodes(&self) -> &IndexSet<String> {
        &self.nodes
    }

    pub fn edges(&self) -> &IndexSet<String> {
        &self.edges
    }

    pub fn hyperedges(&self) -> &IndexSet<String> {
        &self.hyperedges
    }

    /// Ids of the graphs directly contained in this one.
    pub fn subgraphs(&self) -> &IndexSet<String> {
        &self.subgraphs
    }

    /// Read `edgedefault`, defaulting to undirected with a warning.
    pub fn read_markup(&mut self, raw: &RawElement) {
        self.edge_default = match raw.attr("edgedefault") {
            Some("directed") => EdgeDefault::Directed,
            Some("undirected") => EdgeDefault::Undirected,
            Some(other) => {
                warn!(
                    graph = self.id.as_str(), edgedefault = other;
                    "Unknown edgedefault, using undirected"
                );
                EdgeDefault::Undirected
            }
            None => {
                warn!(graph = self.id.as_str(); "Missing edgedefault, using undirected");
                EdgeDefault::Undirected
            }
        };
    }

    pub(crate) fn set_parent(&mut self, parent: &str) {
        self.parent = Some(parent.to_string());
    }

    pub(crate) fn add_subgraph(&mut self, graph_id: &str) {
        self.subgraphs.insert(graph_id.to_string());
    }

    pub(crate) fn add_member(&mut self, kind: ElementKind, id: &str) {
        let set = match kind {
            ElementKind::Node => &mut self.nodes,
            ElementKind::Edge => &mut self.edges,
            ElementKind::Hyperedge => &mut self.hyperedges,
            ElementKind::Graph => return self.add_subgraph(id),
        };
        set.insert(id.to_string());
    }
}

/// Shift and size recorded by normalization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Viewport {
    /// Offset added to every coordinate.
    pub shift: Point,
    pub width: f64,
    pub height: f64,
}

/// A loaded GraphML document.
#[derive(Debug, Clone, Serialize)]
pub struct Document {
    root_graph: String,
    graphs: IndexMap<String, Graph>,
    nodes: IndexMap<String, Node>,
    edges: IndexMap<String, Edge>,
    hyperedges: IndexMap<String, Hyperedge>,

    /// Namespaces in first-use order.
    #[serde(serialize_with = "serialize_namespace_uris")]
    namespaces: IndexMap<String, Arc<NamespaceDescriptor>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    viewport: Option<Viewport>,
}

fn serialize_namespace_uris<S>(
    namespaces: &IndexMap<String, Arc<NamespaceDescriptor>>,
    s: S,
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    s.collect_seq(namespaces.keys())
}

impl Document {
    /// An empty document around its root graph.
    pub fn new(root: Graph) -> Self {
        let root_graph = root.id.clone();
        let mut graphs = IndexMap::new();
        graphs.insert(root_graph.clone(), root);
        Self {
            root_graph,
            graphs,
            nodes: IndexMap::new(),
            edges: IndexMap::new(),
            hyperedges: IndexMap::new(),
            namespaces: IndexMap::new(),
            viewport: None,
        }
    }

    pub fn root_graph(&self) -> &Graph {
        // the root is inserted in `new` and graphs are never removed
        &self.graphs[&self.root_graph]
    }

    pub fn root_graph_id(&self) -> &str {
        &self.root_graph
    }

    pub fn get_node(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn get_node_mut(&mut self, id: &str) -> Option<&mut Node> {
        self.nodes.get_mut(id)
    }

    pub fn get_edge(&self, id: &str) -> Option<&Edge> {
        self.edges.get(id)
    }

    pub fn get_edge_mut(&mut self, id: &str) -> Option<&mut Edge> {
        self.edges.get_mut(id)
    }

    pub fn get_hyperedge(&self, id: &str) -> Option<&Hyperedge> {
        self.hyperedges.get(id)
    }

    pub fn get_hyperedge_mut(&mut self, id: &str) -> Option<&mut Hyperedge> {
        self.hyperedges.get_mut(id)
    }

    /// Any graph of the document by id, the root included.
    pub fn get_subgraph(&self, id: &str) -> Option<&Graph> {
        self.graphs.get(id)
    }

    pub fn graphs(&self) -> impl Iterator<Item = &Graph> {
        self.graphs.values()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn nodes_mut(&mut self) -> impl Iterator<Item = &mut Node> {
        self.nodes.values_mut()
    }

    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.values()
    }

    pub fn edges_mut(&mut self) -> impl Iterator<Item = &mut Edge> {
        self.edges.values_mut()
    }

    pub fn hyperedges(&self) -> impl Iterator<Item = &Hyperedge> {
        self.hyperedges.values()
    }

    /// URIs of the namespaces exercised by this document, in first-use order.
    pub fn used_namespaces(&self) -> impl Iterator<Item = &str> {
        self.namespaces.keys().map(String::as_str)
    }

    pub fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }

    pub(crate) fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = Some(viewport);
    }

    pub(crate) fn namespace_descriptors(&self) -> Vec<Arc<NamespaceDescriptor>> {
        self.namespaces.values().cloned().collect()
    }

    pub(crate) fn set_namespaces(
        &mut self,
        namespaces: IndexMap<String, Arc<NamespaceDescriptor>>,
    ) {
        self.namespaces = namespaces;
    }

    pub(crate) fn contains_graph(&self, id: &str) -> bool {
        self.graphs.contains_key(id)
    }

    pub(crate) fn graph_mut(&mut self, id: &str) -> Option<&mut Graph> {
        self.graphs.get_mut(id)
    }

    pub(crate) fn insert_graph(&mut self, graph: Graph) {
        self.graphs.insert(graph.id.clone(), graph);
    }

    pub(crate) fn insert_node(&mut self, node: Node) {
        self.nodes.insert(node.id().to_string(), node);
    }

    pub(crate) fn insert_edge(&mut self, edge: Edge) {
        self.edges.insert(edge.id().to_string(), edge);
    }

    pub(crate) fn insert_hyperedge(&mut self, hyperedge: Hyperedge) {
        self.hyperedges.insert(hyperedge.id().to_string(), hyperedge);
    }
}
