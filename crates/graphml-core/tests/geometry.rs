mod helpers;

use float_cmp::approx_eq;
use proptest::prelude::*;

use graphml_core::finalize::{document_bounds, normalize};
use graphml_core::geometry::{Clip, Point, Rect, clip_to_rect, segment_intersection};
use graphml_core::load;
use graphml_core::model::{Element, Representation};

use helpers::{graphml, poly_line_edge, shape_node};

fn on_segment(p: Point, a: Point, b: Point) -> bool {
    let cross = (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x);
    let within_x = p.x >= a.x.min(b.x) && p.x <= a.x.max(b.x);
    let within_y = p.y >= a.y.min(b.y) && p.y <= a.y.max(b.y);
    approx_eq!(f64, cross, 0.0, epsilon = 1e-9) && within_x && within_y
}

fn on_outline(p: Point, rect: &Rect) -> bool {
    let on_vertical =
        (p.x == rect.x || p.x == rect.max_x()) && p.y >= rect.y && p.y <= rect.max_y();
    let on_horizontal =
        (p.y == rect.y || p.y == rect.max_y()) && p.x >= rect.x && p.x <= rect.max_x();
    on_vertical || on_horizontal
}

#[test]
fn clipped_point_lies_on_outline_and_segment() {
    let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
    let anchor = Point::new(25.0, 15.0);
    let center = rect.center();

    let Clip::Point(hit) = clip_to_rect(anchor, center, &rect) else {
        panic!("expected a single crossing");
    };
    assert_eq!(hit, Point::new(10.0, 7.5));
    assert!(on_outline(hit, &rect));
    assert!(on_segment(hit, anchor, center));
}

#[test]
fn segment_through_a_corner_yields_the_corner() {
    let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
    // two sides report the same corner, which counts once
    let clip = clip_to_rect(Point::new(5.0, 5.0), Point::new(15.0, 15.0), &rect);
    assert_eq!(clip, Clip::Point(Point::new(10.0, 10.0)));
}

#[test]
fn segment_along_a_side_is_ambiguous() {
    let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
    let clip = clip_to_rect(Point::new(-5.0, 0.0), Point::new(15.0, 0.0), &rect);
    let Clip::Ambiguous(hits) = clip else {
        panic!("expected ambiguous clip, got {clip:?}");
    };
    assert!(hits.contains(&Point::new(0.0, 0.0)));
    assert!(hits.contains(&Point::new(10.0, 0.0)));
}

#[test]
fn segment_inside_rect_misses_outline() {
    let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
    let clip = clip_to_rect(Point::new(2.0, 2.0), Point::new(8.0, 3.0), &rect);
    assert_eq!(clip, Clip::Miss);
}

#[test]
fn parallel_segments_meet_only_at_a_shared_endpoint() {
    let a = Point::new(0.0, 0.0);
    let b = Point::new(4.0, 0.0);
    let c = Point::new(4.0, 0.0);
    let d = Point::new(9.0, 0.0);
    assert_eq!(segment_intersection(a, b, c, d), Some(b));

    // overlapping collinear runs without a shared endpoint are not reported
    let e = Point::new(2.0, 0.0);
    assert_eq!(segment_intersection(a, b, e, d), None);

    // identical segments share both endpoints
    assert_eq!(segment_intersection(a, b, b, a), None);
}

#[test]
fn general_intersection_matches_known_point() {
    let hit = segment_intersection(
        Point::new(0.0, 0.0),
        Point::new(4.0, 4.0),
        Point::new(0.0, 4.0),
        Point::new(4.0, 0.0),
    )
    .expect("diagonals cross");
    assert!(approx_eq!(f64, hit.x, 2.0, ulps = 2));
    assert!(approx_eq!(f64, hit.y, 2.0, ulps = 2));

    let miss = segment_intersection(
        Point::new(0.0, 0.0),
        Point::new(1.0, 1.0),
        Point::new(0.0, 4.0),
        Point::new(4.0, 0.0),
    );
    assert_eq!(miss, None);
}

#[test]
fn oblique_intersection_is_identical_in_both_orders() {
    let c = Point::new(-3.7, 2.9);
    let d = Point::new(4.1, -3.3);
    let steps: Vec<f64> = (-6..=5).map(|i| f64::from(i) * 0.9 + 0.35).collect();

    let mut crossings = 0;
    for &ax in &steps {
        for &ay in &steps {
            let a = Point::new(ax, ay);
            let b = Point::new(-ay, ax + 0.6);
            let forward = segment_intersection(a, b, c, d);
            assert_eq!(forward, segment_intersection(c, d, a, b), "a={a:?} b={b:?}");
            crossings += usize::from(forward.is_some());
        }
    }
    assert!(crossings > 0);
}

#[test]
fn straight_edge_is_clipped_on_both_sides() {
    let body = format!(
        r#"<graph id="G" edgedefault="directed">{}{}{}</graph>"#,
        shape_node("n1", 0.0, 0.0, 30.0, 30.0),
        shape_node("n2", 100.0, 0.0, 30.0, 30.0),
        poly_line_edge("e1", "n1", "n2", &[]),
    );
    let document = load(&graphml(&body)).expect("load");

    let edge = document.get_edge("e1").expect("edge");
    let endpoints = edge.endpoints().expect("clipped endpoints");

    let source_anchor = Point::new(15.0, 15.0);
    let target_anchor = Point::new(115.0, 15.0);
    assert_ne!(endpoints.source, source_anchor);
    assert_ne!(endpoints.target, target_anchor);
    assert_eq!(endpoints.source, Point::new(30.0, 15.0));
    assert_eq!(endpoints.target, Point::new(100.0, 15.0));
}

#[test]
fn bent_edge_is_clipped_towards_its_nearest_points() {
    let body = format!(
        r#"<graph id="G" edgedefault="directed">{}{}{}</graph>"#,
        shape_node("n1", 0.0, 0.0, 30.0, 30.0),
        shape_node("n2", 100.0, 100.0, 30.0, 30.0),
        poly_line_edge("e1", "n1", "n2", &[(15.0, 115.0)]),
    );
    let document = load(&graphml(&body)).expect("load");

    let endpoints = document
        .get_edge("e1")
        .and_then(|e| e.endpoints())
        .expect("clipped endpoints");
    // leaves n1 downwards, enters n2 from the left
    assert_eq!(endpoints.source, Point::new(15.0, 30.0));
    assert_eq!(endpoints.target, Point::new(100.0, 115.0));
}

#[test]
fn normalization_moves_model_to_origin_and_is_idempotent() {
    let body = format!(
        r#"<graph id="G" edgedefault="directed">{}{}{}</graph>"#,
        shape_node("n1", -50.0, -20.0, 30.0, 30.0),
        shape_node("n2", 40.0, 60.0, 30.0, 30.0),
        poly_line_edge("e1", "n1", "n2", &[(-80.0, 75.0)]),
    );
    let mut document = load(&graphml(&body)).expect("load");

    let viewport = document.viewport().expect("viewport recorded");
    assert_eq!(viewport.shift, Point::new(80.0, 20.0));
    assert_eq!(viewport.width, 150.0);
    assert_eq!(viewport.height, 110.0);

    let n1 = document
        .get_node("n1")
        .and_then(|n| n.representation())
        .and_then(Representation::as_node)
        .expect("n1 shape");
    assert_eq!((n1.bounds.x, n1.bounds.y), (30.0, 0.0));
    let label = n1.labels[0].bounds.expect("label bounds");
    assert_eq!((label.x, label.y), (34.0, 6.0));

    let before = document_bounds(&document);
    assert_eq!((before.x, before.y), (0.0, 0.0));

    let second = normalize(&mut document);
    assert_eq!(second.shift, Point::new(0.0, 0.0));
    assert_eq!(document_bounds(&document), before);
}

#[test]
fn empty_document_normalizes_to_zero_rect() {
    let markup = graphml(r#"<graph id="G" edgedefault="directed"><node id="a"/></graph>"#);
    let mut document = load(&markup).expect("load");
    // no yWorks markup, so no finalizer ran
    assert!(document.viewport().is_none());

    assert_eq!(document_bounds(&document), Rect::default());
    let viewport = normalize(&mut document);
    assert_eq!(viewport.shift, Point::new(0.0, 0.0));
    assert_eq!((viewport.width, viewport.height), (0.0, 0.0));
    assert_eq!(document.viewport(), Some(viewport));
}

fn coord() -> impl Strategy<Value = f64> {
    (-200i32..200).prop_map(f64::from)
}

fn point() -> impl Strategy<Value = Point> {
    (coord(), coord()).prop_map(|(x, y)| Point::new(x, y))
}

fn fine_point() -> impl Strategy<Value = Point> {
    ((-2000i32..2000), (-2000i32..2000))
        .prop_map(|(x, y)| Point::new(f64::from(x) / 10.0, f64::from(y) / 10.0))
}

/// A horizontal or vertical segment, like the sides of a node outline.
fn axis_segment() -> impl Strategy<Value = (Point, Point)> {
    (point(), coord(), any::<bool>()).prop_map(|(start, end, horizontal)| {
        if horizontal {
            (start, Point::new(end, start.y))
        } else {
            (start, Point::new(start.x, end))
        }
    })
}

proptest! {
    #[test]
    fn intersection_ignores_segment_order(
        a in fine_point(),
        b in fine_point(),
        c in fine_point(),
        d in fine_point(),
    ) {
        let forward = segment_intersection(a, b, c, d);
        let swapped = segment_intersection(c, d, a, b);
        prop_assert_eq!(forward, swapped);
    }

    #[test]
    fn intersection_with_outline_side_ignores_segment_order(
        a in point(),
        b in point(),
        (c, d) in axis_segment(),
    ) {
        prop_assert_eq!(segment_intersection(a, b, c, d), segment_intersection(c, d, a, b));
    }

    #[test]
    fn normalizing_twice_shifts_by_zero(
        nodes in prop::collection::vec((coord(), coord(), 1u8..80, 1u8..80), 1..8),
    ) {
        let body: String = nodes
            .iter()
            .enumerate()
            .map(|(i, (x, y, w, h))| {
                shape_node(&format!("n{i}"), *x, *y, f64::from(*w), f64::from(*h))
            })
            .collect();
        let markup = graphml(&format!(r#"<graph id="G" edgedefault="directed">{body}</graph>"#));
        let mut document = load(&markup).expect("load");

        let bounds = document_bounds(&document);
        prop_assert_eq!((bounds.x, bounds.y), (0.0, 0.0));

        let again = normalize(&mut document);
        prop_assert_eq!(again.shift, Point::new(0.0, 0.0));
        prop_assert_eq!(document_bounds(&document), bounds);
    }
}
