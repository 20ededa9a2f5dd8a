//! Plane geometry used by the geometry finalizer.
//!
//! Coordinates follow the GraphML/yEd convention: origin at the top-left,
//! x growing to the right and y growing downward.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn translate(self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    pub fn offset_by(self, offset: Point) -> Self {
        self.translate(offset.x, offset.y)
    }
}

/// Axis-aligned rectangle stored as origin plus size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn max_x(&self) -> f64 {
        self.x + self.width
    }

    pub fn max_y(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn translate(self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..self
        }
    }

    /// The four boundary segments: top, right, bottom, left.
    pub fn sides(&self) -> [(Point, Point); 4] {
        let top_left = Point::new(self.x, self.y);
        let top_right = Point::new(self.max_x(), self.y);
        let bottom_right = Point::new(self.max_x(), self.max_y());
        let bottom_left = Point::new(self.x, self.max_y());
        [
            (top_left, top_right),
            (top_right, bottom_right),
            (bottom_right, bottom_left),
            (bottom_left, top_left),
        ]
    }
}

/// Running min/max accumulator.
#[derive(Debug, Clone, Copy)]
pub struct BoundsBuilder {
    min_x: f64,
    min_y: f64,
    max_x: f64,
    max_y: f64,
    empty: bool,
}

impl Default for BoundsBuilder {
    fn default() -> Self {
        Self {
            min_x: f64::MAX,
            min_y: f64::MAX,
            max_x: f64::MIN,
            max_y: f64::MIN,
            empty: true,
        }
    }
}

impl BoundsBuilder {
    pub fn include_point(&mut self, point: Point) {
        self.min_x = self.min_x.min(point.x);
        self.min_y = self.min_y.min(point.y);
        self.max_x = self.max_x.max(point.x);
        self.max_y = self.max_y.max(point.y);
        self.empty = false;
    }

    pub fn include_rect(&mut self, rect: Rect) {
        self.include_point(Point::new(rect.x, rect.y));
        self.include_point(Point::new(rect.max_x(), rect.max_y()));
    }

    /// The union rectangle, or the zero rectangle when nothing was included.
    pub fn build(&self) -> Rect {
        if self.empty {
            return Rect::default();
        }
        Rect::new(
            self.min_x,
            self.min_y,
            self.max_x - self.min_x,
            self.max_y - self.min_y,
        )
    }
}

/// Intersection point of segments `a-b` and `c-d`.
///
/// Parallel segments (including collinear and zero-length ones) only
/// intersect when exactly one endpoint of one coincides with an endpoint of
/// the other; overlapping collinear runs are not reported.
///
/// Identical segments, in either direction, share both endpoints and yield
/// `None` rather than one of them.
///
/// When either segment is vertical or horizontal the shared coordinate is
/// taken from that segment as-is, so clipping against an axis-aligned
/// rectangle lands exactly on its boundary. The segments are solved in a
/// fixed order, so swapping them yields the same point bit for bit.
pub fn segment_intersection(a: Point, b: Point, c: Point, d: Point) -> Option<Point> {
    let (a, b, c, d) = if segment_order(a, b, c, d).is_gt() {
        (c, d, a, b)
    } else {
        (a, b, c, d)
    };
    let (bax, bay) = (b.x - a.x, b.y - a.y);
    let (dcx, dcy) = (d.x - c.x, d.y - c.y);

    if bax * dcy == bay * dcx {
        return parallel_touch(a, b, c, d);
    }

    // (point, parameter of the segment the point was solved along)
    let (point, solved_on_cd) = if bax == 0.0 && dcy == 0.0 {
        (Point::new(a.x, c.y), None)
    } else if bay == 0.0 && dcx == 0.0 {
        (Point::new(c.x, a.y), None)
    } else if bax == 0.0 {
        let t = (a.x - c.x) / dcx;
        (Point::new(a.x, c.y + t * dcy), Some((t, true)))
    } else if bay == 0.0 {
        let t = (a.y - c.y) / dcy;
        (Point::new(c.x + t * dcx, a.y), Some((t, true)))
    } else if dcx == 0.0 {
        let s = (c.x - a.x) / bax;
        (Point::new(c.x, a.y + s * bay), Some((s, false)))
    } else if dcy == 0.0 {
        let s = (c.y - a.y) / bay;
        (Point::new(a.x + s * bax, c.y), Some((s, false)))
    } else {
        let rn = bax / bay;
        let rx = c.x - a.x;
        let ry = c.y - a.y;
        let t = (rx - ry * rn) / (dcy * rn - dcx);
        (Point::new(c.x + t * dcx, c.y + t * dcy), Some((t, true)))
    };

    let (t, s) = match solved_on_cd {
        Some((t, true)) => (t, parameter_along(a, b, point)),
        Some((s, false)) => (parameter_along(c, d, point), s),
        None => (parameter_along(c, d, point), parameter_along(a, b, point)),
    };

    if !unit_interval(t) || !unit_interval(s) {
        return None;
    }
    Some(point)
}

fn parallel_touch(a: Point, b: Point, c: Point, d: Point) -> Option<Point> {
    // TODO: collinear overlaps that share no endpoint are reported as a miss
    let mut shared = [a, b].into_iter().filter(|p| *p == c || *p == d);
    let first = shared.next()?;
    match shared.next() {
        // both endpoints shared: the segments coincide, no single crossing
        Some(second) if second != first => None,
        _ => Some(first),
    }
}

/// Lexicographic order of `a-b` against `c-d` by endpoint coordinates.
fn segment_order(a: Point, b: Point, c: Point, d: Point) -> Ordering {
    [a.x, a.y, b.x, b.y]
        .iter()
        .zip([c.x, c.y, d.x, d.y].iter())
        .map(|(left, right)| left.total_cmp(right))
        .find(|order| order.is_ne())
        .unwrap_or(Ordering::Equal)
}

fn parameter_along(from: Point, to: Point, point: Point) -> f64 {
    let (dx, dy) = (to.x - from.x, to.y - from.y);
    if dx.abs() >= dy.abs() {
        (point.x - from.x) / dx
    } else {
        (point.y - from.y) / dy
    }
}

fn unit_interval(value: f64) -> bool {
    (0.0..=1.0).contains(&value)
}

/// Outcome of clipping a segment against a rectangle outline.
#[derive(Debug, Clone, PartialEq)]
pub enum Clip {
    /// The segment crosses the outline at exactly one point.
    Point(Point),
    /// The segment never reaches the outline.
    Miss,
    /// Several distinct crossings; the caller keeps its unclipped point.
    Ambiguous(Vec<Point>),
}

/// Clip the segment `anchor -> toward` against the outline of `rect`.
pub fn clip_to_rect(anchor: Point, toward: Point, rect: &Rect) -> Clip {
    let mut hits: Vec<Point> = Vec::new();
    for (start, end) in rect.sides() {
        if let Some(hit) = segment_intersection(anchor, toward, start, end)
            && !hits.contains(&hit)
        {
            hits.push(hit);
        }
    }
    match hits.len() {
        0 => Clip::Miss,
        1 => Clip::Point(hits[0]),
        _ => Clip::Ambiguous(hits),
    }
}
