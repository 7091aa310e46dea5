//! Chord-based polygon splitting.
//!
//! A slice cuts one closed loop into two along a chord. The interactive
//! workflow anchors the cut on a hovered edge, tilts it by a user angle
//! relative to that edge, extends it well past the shape, and keeps the
//! two most distant intersection points as the chord.

use tracing::debug;

use boardkit_core::constants::{EDGE_MATCH_EPSILON, SLICE_MAX_ANGLE_DEG, SLICE_MIN_ANGLE_DEG};

use crate::geometry::{self, Point};
use crate::model::Shape;

/// Splits a closed loop into two along the chord `cut_start..cut_end`.
///
/// Both cut points must lie on (distinct) polygon edges. Returns `None`
/// when either point matches no edge, or both match the same edge (a
/// degenerate cut that would not partition the loop).
pub fn split_polygon(
    points: &[Point],
    cut_start: Point,
    cut_end: Point,
) -> Option<(Vec<Point>, Vec<Point>)> {
    if points.len() < 3 {
        return None;
    }
    let idx1 = find_edge(points, &cut_start)?;
    let idx2 = find_edge(points, &cut_end)?;
    if idx1 == idx2 {
        return None;
    }

    let mut loop_a = vec![Point::new(cut_start.x, cut_start.y)];
    loop_a.extend(walk(points, idx1, idx2));
    loop_a.push(Point::new(cut_end.x, cut_end.y));

    let mut loop_b = vec![Point::new(cut_end.x, cut_end.y)];
    loop_b.extend(walk(points, idx2, idx1));
    loop_b.push(Point::new(cut_start.x, cut_start.y));

    Some((loop_a, loop_b))
}

/// Vertices strictly after edge `from` up to and including the start of
/// the edge after `to`, wrapping around the loop.
fn walk(points: &[Point], from: usize, to: usize) -> Vec<Point> {
    let n = points.len();
    let mut out = Vec::new();
    let mut i = (from + 1) % n;
    loop {
        out.push(Point::new(points[i].x, points[i].y));
        if i == to {
            break;
        }
        i = (i + 1) % n;
    }
    out
}

/// Index of the edge `p` lies on, within tolerance.
fn find_edge(points: &[Point], p: &Point) -> Option<usize> {
    let n = points.len();
    for i in 0..n {
        let a = &points[i];
        let b = &points[(i + 1) % n];
        let on_edge = geometry::closest_point_on_segment(p, a, b);
        if geometry::distance(p, &on_edge) < EDGE_MATCH_EPSILON {
            return Some(i);
        }
    }
    None
}

/// Computes the cut chord for a slice anchored on `edge_index` at `anchor`,
/// tilted `angle_deg` from the edge direction.
///
/// The angle is clamped to avoid a near-parallel cut. The cut line is
/// extended past the shape bounds in both directions and intersected with
/// every edge; the two intersection points with maximum mutual distance
/// become the chord. Returns `None` when fewer than two edges are hit.
pub fn plan_slice(
    shape: &Shape,
    edge_index: usize,
    anchor: Point,
    angle_deg: f64,
) -> Option<(Point, Point)> {
    let n = shape.points.len();
    if n < 3 || edge_index >= n {
        return None;
    }

    let a = shape.points[edge_index];
    let b = shape.points[(edge_index + 1) % n];
    let edge_dir = geometry::normalize(&Point::new(b.x - a.x, b.y - a.y));
    if edge_dir.x == 0.0 && edge_dir.y == 0.0 {
        return None;
    }

    let angle = angle_deg
        .clamp(SLICE_MIN_ANGLE_DEG, SLICE_MAX_ANGLE_DEG)
        .to_radians();
    let (sin, cos) = angle.sin_cos();
    let cut_dir = Point::new(
        edge_dir.x * cos - edge_dir.y * sin,
        edge_dir.x * sin + edge_dir.y * cos,
    );

    let (min_x, min_y, max_x, max_y) = shape.bounds();
    let reach = ((max_x - min_x).hypot(max_y - min_y)) * 2.0 + 1.0;
    let cut_a = Point::new(anchor.x - cut_dir.x * reach, anchor.y - cut_dir.y * reach);
    let cut_b = Point::new(anchor.x + cut_dir.x * reach, anchor.y + cut_dir.y * reach);

    let mut hits = Vec::new();
    for i in 0..n {
        let p1 = &shape.points[i];
        let p2 = &shape.points[(i + 1) % n];
        if let Some(hit) = geometry::line_intersection(&cut_a, &cut_b, p1, p2) {
            hits.push(hit);
        }
    }
    if hits.len() < 2 {
        return None;
    }

    // The chord spans the two most distant hits, so duplicate hits at
    // shared vertices fall out naturally.
    let mut best = (hits[0], hits[1], 0.0);
    for i in 0..hits.len() {
        for j in (i + 1)..hits.len() {
            let d = geometry::distance(&hits[i], &hits[j]);
            if d > best.2 {
                best = (hits[i], hits[j], d);
            }
        }
    }
    Some((best.0, best.1))
}

/// Slices a shape in two along the planned chord.
///
/// Both halves derive from the parent (name, thickness, FRONT/BACK
/// joinery); edge joinery does not survive since the edge indices no
/// longer correspond. The caller removes the original on commit.
pub fn slice_shape(
    shape: &Shape,
    edge_index: usize,
    anchor: Point,
    angle_deg: f64,
    scale: f64,
) -> Option<(Shape, Shape)> {
    let (cut_start, cut_end) = plan_slice(shape, edge_index, anchor, angle_deg)?;
    let (loop_a, loop_b) = split_polygon(&shape.points, cut_start, cut_end)?;
    debug!(
        edge = edge_index,
        angle = angle_deg,
        a_vertices = loop_a.len(),
        b_vertices = loop_b.len(),
        "slice committed"
    );
    Some((
        Shape::from_parent(shape, loop_a, scale),
        Shape::from_parent(shape, loop_b, scale),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::calculate_area;

    fn quad() -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
        ]
    }

    #[test]
    fn test_split_partitions_quad() {
        let (a, b) =
            split_polygon(&quad(), Point::new(5.0, 0.0), Point::new(5.0, 10.0)).unwrap();

        // Each loop holds both cut points plus the two corners on its side.
        assert_eq!(a.len(), 4);
        assert_eq!(b.len(), 4);
        assert!(a.iter().any(|p| (p.x, p.y) == (10.0, 0.0)));
        assert!(a.iter().any(|p| (p.x, p.y) == (10.0, 10.0)));
        assert!(b.iter().any(|p| (p.x, p.y) == (0.0, 0.0)));
        assert!(b.iter().any(|p| (p.x, p.y) == (0.0, 10.0)));

        // Areas partition the original 100.
        let sum = calculate_area(&a, 1.0) + calculate_area(&b, 1.0);
        assert!((sum - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_split_rejects_unmatched_point() {
        assert!(split_polygon(&quad(), Point::new(5.0, 5.0), Point::new(5.0, 10.0)).is_none());
    }

    #[test]
    fn test_split_rejects_same_edge_cut() {
        assert!(split_polygon(&quad(), Point::new(2.0, 0.0), Point::new(8.0, 0.0)).is_none());
    }

    #[test]
    fn test_plan_slice_perpendicular_chord() {
        let shape = Shape::new("Board", quad(), 1.0, 1.0);
        let (c1, c2) = plan_slice(&shape, 0, Point::new(5.0, 0.0), 90.0).unwrap();
        let (lo, hi) = if c1.y < c2.y { (c1, c2) } else { (c2, c1) };
        assert!((lo.x - 5.0).abs() < 1e-9 && lo.y.abs() < 1e-9);
        assert!((hi.x - 5.0).abs() < 1e-9 && (hi.y - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_plan_slice_clamps_angle() {
        let shape = Shape::new("Board", quad(), 1.0, 1.0);
        // 0 degrees would run along the edge; the clamp keeps a real cut.
        let chord = plan_slice(&shape, 0, Point::new(5.0, 0.0), 0.0);
        assert!(chord.is_some());
        let (c1, c2) = chord.unwrap();
        assert!(geometry::distance(&c1, &c2) > 0.0);
    }

    #[test]
    fn test_slice_shape_inherits_and_partitions() {
        let shape = Shape::new("Leg", quad(), 0.75, 1.0);
        let (a, b) = slice_shape(&shape, 0, Point::new(4.0, 0.0), 90.0, 1.0).unwrap();
        assert_eq!(a.name, "Leg");
        assert_eq!(b.thickness, 0.75);
        let sum = calculate_area(&a.points, 1.0) + calculate_area(&b.points, 1.0);
        assert!((sum - 100.0).abs() < 1e-6);
        assert!(a.is_valid() && b.is_valid());
    }
}
