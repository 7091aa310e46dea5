//! Tenon and cutout editing on the active face.
//!
//! Tenons get a symmetric-placement convenience: each new tenon mirrors
//! the previously added one across the shape's centroid and snaps onto the
//! polygon boundary, so matching joinery lands opposite in one click.
//! Cutouts have no mirror semantics; they chain at a fixed offset.

use crate::faces::{face_origin, Face};
use crate::geometry::{self, Point};
use crate::model::{Cutout, Shape, Tenon};

const DEFAULT_TENON_W_IN: f64 = 2.0;
const DEFAULT_TENON_H_IN: f64 = 1.0;
const DEFAULT_CUTOUT_W_IN: f64 = 1.0;
const DEFAULT_CUTOUT_H_IN: f64 = 1.0;
/// Local-x spacing between successive tenons on an edge face.
const EDGE_TENON_SPACING_IN: f64 = 2.0;
/// Local-x spacing between successive cutouts.
const CUTOUT_SPACING_IN: f64 = 2.0;

/// Joinery feature kinds, for removal by index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoineryKind {
    Tenon,
    Cutout,
}

/// Adds a tenon to the shape's active face.
///
/// With existing tenons on FRONT/BACK, the new tenon is placed at the
/// boundary point nearest the centroid reflection of the last tenon's
/// center, copying its dimensions and inset. BACK gets the same mirror
/// deliberately: its frame already flips local x, so the reflected
/// placement reads identically from either side of the board. Edge faces
/// have no plan-space mirror, so the new tenon offsets 2" along local x
/// instead. The first tenon on a face takes default dimensions at the
/// face origin.
///
/// Returns `false` (no-op) when the face has no valid frame.
pub fn add_tenon(shape: &mut Shape, scale: f64) -> bool {
    let face = shape.active_face;
    let Some(frame) = face_origin(shape, face, scale) else {
        return false;
    };

    let last = shape
        .face_data
        .get(&face)
        .and_then(|j| j.tenons.last())
        .copied();

    let tenon = match (face, last) {
        (_, None) => Tenon {
            x: 0.0,
            y: 0.0,
            w: DEFAULT_TENON_W_IN,
            h: DEFAULT_TENON_H_IN,
            depth: shape.thickness,
            inset: 0.0,
        },
        (Face::Edge(_), Some(prev)) => Tenon {
            x: prev.x + EDGE_TENON_SPACING_IN,
            ..prev
        },
        (_, Some(prev)) => {
            // Mirror the last tenon's center across the centroid, then
            // snap the target onto the polygon boundary.
            let cx = frame.item_world_x(prev.x, prev.w, scale) + prev.w * scale / 2.0;
            let cy = frame.item_world_y(prev.y, scale) + prev.h * scale / 2.0;
            let c = shape.centroid();
            let target = Point::new(2.0 * c.x - cx, 2.0 * c.y - cy);
            let snapped = closest_point_on_boundary(&shape.points, &target);

            let left = snapped.x - prev.w * scale / 2.0;
            let top = snapped.y - prev.h * scale / 2.0;
            Tenon {
                x: frame.world_to_local_x(left, prev.w, scale),
                y: frame.world_to_local_y(top, scale),
                ..prev
            }
        }
    };

    let Some(joinery) = shape.face_data.get_mut(&face) else {
        return false;
    };
    joinery.tenons.push(tenon);
    shape.touch();
    true
}

/// Adds a cutout to the shape's active face.
///
/// New cutouts chain 2" along local x from the last one, copying its
/// dimensions; the first takes defaults at the face origin with half the
/// board thickness as a pocket depth.
pub fn add_cutout(shape: &mut Shape) -> bool {
    let face = shape.active_face;
    let last = shape
        .face_data
        .get(&face)
        .and_then(|j| j.cutouts.last())
        .copied();

    let cutout = match last {
        Some(prev) => Cutout {
            x: prev.x + CUTOUT_SPACING_IN,
            ..prev
        },
        None => Cutout {
            x: 0.0,
            y: 0.0,
            w: DEFAULT_CUTOUT_W_IN,
            h: DEFAULT_CUTOUT_H_IN,
            depth: shape.thickness / 2.0,
        },
    };

    let Some(joinery) = shape.face_data.get_mut(&face) else {
        return false;
    };
    joinery.cutouts.push(cutout);
    shape.touch();
    true
}

/// Removes a joinery feature by index from the active face.
pub fn remove_joinery(shape: &mut Shape, kind: JoineryKind, index: usize) -> bool {
    let face = shape.active_face;
    let Some(joinery) = shape.face_data.get_mut(&face) else {
        return false;
    };
    let removed = match kind {
        JoineryKind::Tenon => {
            if index < joinery.tenons.len() {
                joinery.tenons.remove(index);
                true
            } else {
                false
            }
        }
        JoineryKind::Cutout => {
            if index < joinery.cutouts.len() {
                joinery.cutouts.remove(index);
                true
            } else {
                false
            }
        }
    };
    if removed {
        shape.touch();
    }
    removed
}

/// Nearest point on the polygon's boundary to `p`.
fn closest_point_on_boundary(points: &[Point], p: &Point) -> Point {
    let n = points.len();
    let mut best = points[0];
    let mut best_dist = f64::INFINITY;
    for i in 0..n {
        let a = &points[i];
        let b = &points[(i + 1) % n];
        let candidate = geometry::closest_point_on_segment(p, a, b);
        let d = geometry::distance(p, &candidate);
        if d < best_dist {
            best_dist = d;
            best = candidate;
        }
    }
    best
}
