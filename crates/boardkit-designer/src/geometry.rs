//! Pure geometry kernel for the drafting engine.
//!
//! Operates on [`Point`] values in world space (inches multiplied by the
//! document scale). Stateless; degenerate input yields sentinel values
//! (`None`, the zero vector) rather than panics.

use serde::{Deserialize, Serialize};

/// A 2D point in world space, with an optional cached edge length.
///
/// `length_to_next` is the distance in inches to the next point around the
/// polygon; [`recalculate_side_lengths`] owns it and must run after any
/// mutation of a shape's point array.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    #[serde(
        rename = "lengthToNext",
        skip_serializing_if = "Option::is_none",
        default
    )]
    pub length_to_next: Option<f64>,
}

impl Point {
    /// Creates a new point with no cached edge length.
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            length_to_next: None,
        }
    }

    /// Calculates the distance to another point.
    pub fn distance_to(&self, other: &Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// Euclidean distance between two points.
pub fn distance(p1: &Point, p2: &Point) -> f64 {
    p1.distance_to(p2)
}

/// Normalizes a vector to unit length.
///
/// Zero-magnitude input is returned unchanged (treated as magnitude 1)
/// so callers never divide by zero.
pub fn normalize(v: &Point) -> Point {
    let mag = (v.x * v.x + v.y * v.y).sqrt();
    if mag == 0.0 {
        return Point::new(v.x, v.y);
    }
    Point::new(v.x / mag, v.y / mag)
}

/// Standard dot product.
pub fn dot(v1: &Point, v2: &Point) -> f64 {
    v1.x * v2.x + v1.y * v2.y
}

/// Projects `p` onto segment `ab`, clamped to the segment.
///
/// A degenerate segment (`a == b`) returns `a`.
pub fn closest_point_on_segment(p: &Point, a: &Point, b: &Point) -> Point {
    let abx = b.x - a.x;
    let aby = b.y - a.y;
    let len_sq = abx * abx + aby * aby;
    if len_sq == 0.0 {
        return Point::new(a.x, a.y);
    }
    let t = (((p.x - a.x) * abx + (p.y - a.y) * aby) / len_sq).clamp(0.0, 1.0);
    Point::new(a.x + t * abx, a.y + t * aby)
}

/// Polygon area in square inches via the shoelace formula.
///
/// `scale` converts world pixels back to inches (area divides by scale²).
pub fn calculate_area(points: &[Point], scale: f64) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..points.len() {
        let p1 = &points[i];
        let p2 = &points[(i + 1) % points.len()];
        sum += p1.x * p2.y - p2.x * p1.y;
    }
    (sum / 2.0).abs() / (scale * scale)
}

/// Arithmetic mean of the vertices.
///
/// Deliberately not the area-weighted centroid; face mirroring and tenon
/// symmetry are defined against the vertex mean.
pub fn calculate_centroid(points: &[Point]) -> Point {
    if points.is_empty() {
        return Point::new(0.0, 0.0);
    }
    let n = points.len() as f64;
    let sx: f64 = points.iter().map(|p| p.x).sum();
    let sy: f64 = points.iter().map(|p| p.y).sum();
    Point::new(sx / n, sy / n)
}

/// Midpoint of the axis-aligned bounding box.
///
/// Anchors the external 3D transform; distinct from [`calculate_centroid`].
pub fn calculate_bounding_center(points: &[Point]) -> Point {
    let (min_x, min_y, max_x, max_y) = bounding_box(points);
    Point::new((min_x + max_x) / 2.0, (min_y + max_y) / 2.0)
}

/// Axis-aligned bounding box as `(min_x, min_y, max_x, max_y)`.
pub fn bounding_box(points: &[Point]) -> (f64, f64, f64, f64) {
    let mut min_x = f64::INFINITY;
    let mut min_y = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    for p in points {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }
    (min_x, min_y, max_x, max_y)
}

/// Recomputes every point's cached `length_to_next` (wrapping), in inches.
///
/// Must run after any mutation of a shape's point array before the shape
/// is considered valid again.
pub fn recalculate_side_lengths(points: &mut [Point], scale: f64) {
    let n = points.len();
    if n < 2 {
        for p in points.iter_mut() {
            p.length_to_next = None;
        }
        return;
    }
    for i in 0..n {
        let next = points[(i + 1) % n];
        let d = points[i].distance_to(&next) / scale;
        points[i].length_to_next = Some(d);
    }
}

/// Segment-segment intersection via the determinant method.
///
/// Returns `None` for parallel segments or when the intersection falls
/// outside either segment (both parametric coordinates must be in [0,1]).
pub fn line_intersection(p1: &Point, p2: &Point, p3: &Point, p4: &Point) -> Option<Point> {
    let d1x = p2.x - p1.x;
    let d1y = p2.y - p1.y;
    let d2x = p4.x - p3.x;
    let d2y = p4.y - p3.y;

    let denom = d1x * d2y - d1y * d2x;
    if denom.abs() < 1e-12 {
        return None;
    }

    let t = ((p3.x - p1.x) * d2y - (p3.y - p1.y) * d2x) / denom;
    let u = ((p3.x - p1.x) * d1y - (p3.y - p1.y) * d1x) / denom;

    if !(0.0..=1.0).contains(&t) || !(0.0..=1.0).contains(&u) {
        return None;
    }

    Some(Point::new(p1.x + t * d1x, p1.y + t * d1y))
}
