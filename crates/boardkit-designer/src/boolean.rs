//! Polygon boolean operations on shapes.
//!
//! Union and difference delegate to `cavalier_contours` polyline clipping;
//! shapes convert to closed polylines at the boundary and back. On
//! multi-polygon results only the first outer loop is kept — a documented
//! simplification; disjoint unions are not supported and are gated off by
//! the AABB pre-check before the clipper ever runs.

use cavalier_contours::polyline::{
    BooleanOp, PlineSource, PlineSourceMut, PlineVertex, Polyline,
};
use tracing::debug;

use crate::geometry::Point;
use crate::model::Shape;

/// World-unit tolerance for duplicate-vertex removal.
const DEDUPE_TOLERANCE: f64 = 1e-3;

/// O(1) bounding-box overlap test.
///
/// Conservative by design: used to gate whether a boolean operation is
/// even offered after a drag, not to prove intersection.
pub fn bounds_overlap(a: &Shape, b: &Shape) -> bool {
    let (ax1, ay1, ax2, ay2) = a.bounds();
    let (bx1, by1, bx2, by2) = b.bounds();
    ax1 <= bx2 && bx1 <= ax2 && ay1 <= by2 && by1 <= ay2
}

/// Union of two shapes. Returns `None` when the shapes don't overlap or
/// the clipper yields no geometry; callers must leave both inputs
/// untouched in that case.
pub fn union(a: &Shape, b: &Shape, scale: f64) -> Option<Shape> {
    combine(a, b, BooleanOp::Or, scale)
}

/// Difference `a - b`. Returns `None` for disjoint inputs and for a
/// fully-contained subtraction that leaves no geometry.
pub fn difference(a: &Shape, b: &Shape, scale: f64) -> Option<Shape> {
    combine(a, b, BooleanOp::Not, scale)
}

fn combine(a: &Shape, b: &Shape, op: BooleanOp, scale: f64) -> Option<Shape> {
    if !bounds_overlap(a, b) {
        return None;
    }

    let pline_a = to_polyline(&a.points);
    let pline_b = to_polyline(&b.points);
    if pline_a.vertex_data.len() < 3 || pline_b.vertex_data.len() < 3 {
        return None;
    }

    let result = pline_a.boolean(&pline_b, op);
    let first = result.pos_plines.first()?;

    let points: Vec<Point> = first
        .pline
        .vertex_data
        .iter()
        .map(|v| Point::new(v.x, v.y))
        .collect();
    if points.len() < 3 {
        return None;
    }

    debug!(
        op = ?op,
        vertices = points.len(),
        loops_dropped = result.pos_plines.len() - 1,
        "boolean result"
    );
    Some(Shape::from_parent(a, points, scale))
}

/// Prepares a point loop for the clipper: drops duplicate and closing
/// vertices, enforces a consistent winding, and marks the polyline closed.
fn to_polyline(points: &[Point]) -> Polyline {
    let mut clean: Vec<Point> = Vec::new();
    if let Some(first) = points.first() {
        clean.push(*first);
        for p in points.iter().skip(1) {
            let last = clean.last().unwrap();
            if p.distance_to(last) > DEDUPE_TOLERANCE {
                clean.push(*p);
            }
        }
        if clean.len() > 1 {
            let (first, last) = (clean[0], *clean.last().unwrap());
            if last.distance_to(&first) < DEDUPE_TOLERANCE {
                clean.pop();
            }
        }
    }

    let mut signed_area = 0.0;
    for i in 0..clean.len() {
        let p1 = clean[i];
        let p2 = clean[(i + 1) % clean.len()];
        signed_area += p1.x * p2.y - p2.x * p1.y;
    }
    if signed_area < 0.0 {
        clean.reverse();
    }

    let mut polyline = Polyline::new();
    for p in clean {
        polyline.add_vertex(PlineVertex::new(p.x, p.y, 0.0));
    }
    polyline.set_is_closed(true);
    polyline
}
