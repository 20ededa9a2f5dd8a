//! The yWorks (yEd) GraphML vocabulary.
//!
//! Node realizers become [`NodeShape`]s, edge realizers become
//! [`EdgePath`]s. Group nodes arrive wrapped in a `ProxyAutoBoundsNode`
//! whose `Realizers` element lists one realizer per state; the active one
//! is used. The namespace's setup hook is the geometry finalizer.

use crate::error::{RepresentationError, RepresentationResult};
use crate::finalize;
use crate::geometry::Rect;
use crate::model::{EdgePath, NodeShape, Representation};
use crate::namespace::NamespaceDescriptor;
use crate::parse::RawElement;

pub const YWORKS_NAMESPACE: &str = "http://www.yworks.com/xml/graphml";

const NODE_TYPES: &[&str] = &[
    "ShapeNode",
    "GenericNode",
    "GroupNode",
    "GenericGroupNode",
    "ImageNode",
    "SVGNode",
    "TableNode",
];

const EDGE_TYPES: &[&str] = &[
    "PolyLineEdge",
    "BezierEdge",
    "SplineEdge",
    "ArcEdge",
    "QuadCurveEdge",
    "GenericEdge",
];

pub fn descriptor() -> NamespaceDescriptor {
    let mut descriptor = NamespaceDescriptor::new(YWORKS_NAMESPACE)
        .with_constructor("ProxyAutoBoundsNode", proxy_auto_bounds_node)
        .with_constructor("UMLClassNode", uml_class_node)
        .with_setup(finalize::finalize);
    for tag in NODE_TYPES {
        descriptor = descriptor.with_constructor(*tag, node_shape);
    }
    for tag in EDGE_TYPES {
        descriptor = descriptor.with_constructor(*tag, edge_path);
    }
    descriptor
}

fn node_shape(raw: &RawElement) -> RepresentationResult<Representation> {
    let mut shape = NodeShape::new(raw.local_name(), Rect::default());
    shape.read_markup(raw)?;
    Ok(Representation::Node(shape))
}

fn edge_path(raw: &RawElement) -> RepresentationResult<Representation> {
    let mut path = EdgePath::new(raw.local_name());
    path.read_markup(raw)?;
    Ok(Representation::Edge(path))
}

fn proxy_auto_bounds_node(raw: &RawElement) -> RepresentationResult<Representation> {
    let realizers = raw
        .child("Realizers")
        .ok_or_else(|| RepresentationError::MissingChild {
            element: raw.name.clone(),
            child: "Realizers",
        })?;
    let active = match realizers.attr("active") {
        Some(value) => value
            .trim()
            .parse::<usize>()
            .map_err(|_| RepresentationError::InvalidValue {
                field: "Realizers@active",
                value: value.to_string(),
            })?,
        None => 0,
    };
    let realizer = realizers
        .children
        .get(active)
        .ok_or_else(|| RepresentationError::InvalidValue {
            field: "Realizers@active",
            value: active.to_string(),
        })?;

    let mut representation = node_shape(realizer)?;
    if let Representation::Node(shape) = &mut representation {
        if let Some(closed) = realizer.child("State").and_then(|s| s.attr("closed")) {
            shape.extra.insert("closed".to_string(), closed.to_string());
        }
        shape
            .extra
            .insert("realizers".to_string(), realizers.children.len().to_string());
    }
    Ok(representation)
}

fn uml_class_node(raw: &RawElement) -> RepresentationResult<Representation> {
    let mut representation = node_shape(raw)?;
    if let (Representation::Node(shape), Some(uml)) = (&mut representation, raw.child("UML")) {
        for key in ["stereotype", "constraint", "use3DEffect"] {
            if let Some(value) = uml.attr(key) {
                shape.extra.insert(format!("uml.{key}"), value.to_string());
            }
        }
        let lists = [
            ("AttributeLabel", "uml.attributes"),
            ("MethodLabel", "uml.methods"),
        ];
        for (child, key) in lists {
            if let Some(text) = uml.child(child).and_then(|c| c.text.as_deref()) {
                shape.extra.insert(key.to_string(), text.to_string());
            }
        }
    }
    Ok(representation)
}
