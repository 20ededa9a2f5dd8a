//! Geometry finalization of a loaded document.
//!
//! Three passes over representations, never over markup:
//!
//! 1. [`document_bounds`] - union of node boxes, node label boxes and edge
//!    bend points.
//! 2. [`normalize`] - shift everything so that union starts at `(0, 0)`.
//! 3. [`clip_edges`] - cut each edge's rendered ends back to the outline of
//!    the nodes it connects.

use log::{debug, trace, warn};

use crate::geometry::{BoundsBuilder, Clip, Point, Rect, clip_to_rect};
use crate::model::{Document, EdgeEndpoints, Element, Viewport};
use crate::parse::RawElement;

/// Setup hook entry point: all three passes in order.
pub fn finalize(document: &mut Document, _raw: &RawElement) {
    let viewport = normalize(document);
    debug!(
        shift_x = viewport.shift.x,
        shift_y = viewport.shift.y,
        width = viewport.width,
        height = viewport.height;
        "Document normalized"
    );
    clip_edges(document);
}

/// Union of everything that has a position; the zero rectangle when empty.
pub fn document_bounds(document: &Document) -> Rect {
    let mut builder = BoundsBuilder::default();
    for node in document.nodes() {
        let Some(shape) = node.representation().and_then(|r| r.as_node()) else {
            continue;
        };
        builder.include_rect(shape.bounds);
        for label in &shape.labels {
            if let Some(bounds) = label.bounds {
                builder.include_rect(bounds);
            }
        }
    }
    for edge in document.edges() {
        let Some(path) = edge.representation().and_then(|r| r.as_edge()) else {
            continue;
        };
        for point in &path.points {
            builder.include_point(*point);
        }
    }
    builder.build()
}

/// Shift the model into non-negative space and record the viewport.
///
/// Running it again on a normalized document shifts by zero.
pub fn normalize(document: &mut Document) -> Viewport {
    let bounds = document_bounds(document);
    let shift = Point::new(-bounds.x, -bounds.y);
    let viewport = Viewport {
        shift,
        width: bounds.width,
        height: bounds.height,
    };

    if shift.x != 0.0 || shift.y != 0.0 {
        let delta = Rect::new(shift.x, shift.y, 0.0, 0.0);
        for node in document.nodes_mut() {
            node.set_bounds(delta, true);
        }
        for edge in document.edges_mut() {
            edge.set_bounds(delta, true);
        }
    }

    document.set_viewport(viewport);
    viewport
}

/// Resolve both rendered endpoints of every edge.
///
/// Anchors are node centers plus the edge's path offsets. Each side is
/// clipped against its node along the segment towards the nearest bend
/// point (or the opposite anchor for a straight edge). Sides whose clip
/// misses or is ambiguous keep the anchor.
pub fn clip_edges(document: &mut Document) {
    let mut resolved: Vec<(String, EdgeEndpoints)> = Vec::new();

    for edge in document.edges() {
        let Some(source_rect) = node_rect(document, edge.source()) else {
            warn!(
                edge = edge.id(),
                node = edge.source();
                "Source node has no geometry, not clipping"
            );
            continue;
        };
        let Some(target_rect) = node_rect(document, edge.target()) else {
            warn!(
                edge = edge.id(),
                node = edge.target();
                "Target node has no geometry, not clipping"
            );
            continue;
        };

        let path = edge.representation().and_then(|r| r.as_edge());
        let (source_offset, target_offset, points) = match path {
            Some(path) => (path.source_offset, path.target_offset, path.points.as_slice()),
            None => (Point::default(), Point::default(), &[][..]),
        };

        let source_anchor = source_rect.center().offset_by(source_offset);
        let target_anchor = target_rect.center().offset_by(target_offset);
        let source_toward = points.first().copied().unwrap_or(target_anchor);
        let target_toward = points.last().copied().unwrap_or(source_anchor);

        let endpoints = EdgeEndpoints {
            source: clip_side(edge.id(), "source", source_anchor, source_toward, &source_rect),
            target: clip_side(edge.id(), "target", target_anchor, target_toward, &target_rect),
        };
        trace!(edge = edge.id(), endpoints:? = endpoints; "Edge clipped");
        resolved.push((edge.id().to_string(), endpoints));
    }

    for (id, endpoints) in resolved {
        if let Some(edge) = document.get_edge_mut(&id) {
            edge.set_endpoints(endpoints);
        }
    }
}

fn node_rect(document: &Document, id: &str) -> Option<Rect> {
    document
        .get_node(id)
        .and_then(|node| node.representation())
        .and_then(|r| r.as_node())
        .map(|shape| shape.bounds)
}

fn clip_side(edge: &str, side: &str, anchor: Point, toward: Point, rect: &Rect) -> Point {
    match clip_to_rect(anchor, toward, rect) {
        Clip::Point(point) => point,
        Clip::Miss => anchor,
        Clip::Ambiguous(hits) => {
            warn!(
                edge = edge,
                side = side,
                hits = hits.len();
                "Ambiguous clip against node outline, keeping anchor"
            );
            anchor
        }
    }
}
