//! Logical board faces and their local coordinate frames.
//!
//! A board has a FRONT face, a BACK face (its horizontal mirror), and one
//! EDGE face per polygon side. Joinery is stored in face-local inches;
//! [`face_origin`] is the single place that maps a face's local frame to
//! world space. Editing and rendering must both route through it so the
//! FRONT/BACK/EDGE semantics never drift apart.

use std::fmt;
use std::str::FromStr;

use boardkit_core::error::DesignError;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::geometry::{self, Point};
use crate::model::Shape;

/// A logical face of the board.
///
/// Serialized as the strings `FRONT`, `BACK`, `EDGE_<i>` where `i` is a
/// point index, so the on-disk schema matches the face-data map keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Face {
    Front,
    Back,
    Edge(usize),
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Face::Front => write!(f, "FRONT"),
            Face::Back => write!(f, "BACK"),
            Face::Edge(i) => write!(f, "EDGE_{}", i),
        }
    }
}

impl FromStr for Face {
    type Err = DesignError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "FRONT" => Ok(Face::Front),
            "BACK" => Ok(Face::Back),
            _ => {
                if let Some(idx) = s.strip_prefix("EDGE_") {
                    if let Ok(i) = idx.parse::<usize>() {
                        return Ok(Face::Edge(i));
                    }
                }
                Err(DesignError::UnknownFace {
                    name: s.to_string(),
                })
            }
        }
    }
}

impl Serialize for Face {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Face {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(D::Error::custom)
    }
}

/// Origin and x-axis direction of a face's local frame in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceFrame {
    pub origin: Point,
    /// +1.0 on FRONT and EDGE faces, -1.0 on BACK (local x grows leftward).
    pub x_mult: f64,
}

impl FaceFrame {
    /// World x of a joinery item's left screen edge.
    ///
    /// On BACK the item extends leftward from the mirrored origin, so its
    /// width shifts the drawn rectangle back by `w * scale`.
    pub fn item_world_x(&self, item_x: f64, item_w: f64, scale: f64) -> f64 {
        let mut x = self.origin.x + item_x * scale * self.x_mult;
        if self.x_mult < 0.0 {
            x -= item_w * scale;
        }
        x
    }

    /// World y of a joinery item's top edge.
    pub fn item_world_y(&self, item_y: f64, scale: f64) -> f64 {
        self.origin.y + item_y * scale
    }

    /// Inverse of [`item_world_x`]: face-local x for a world x position.
    pub fn world_to_local_x(&self, world_x: f64, item_w: f64, scale: f64) -> f64 {
        let mut x = world_x;
        if self.x_mult < 0.0 {
            x += item_w * scale;
        }
        (x - self.origin.x) * self.x_mult / scale
    }

    /// Inverse of [`item_world_y`].
    pub fn world_to_local_y(&self, world_y: f64, scale: f64) -> f64 {
        (world_y - self.origin.y) / scale
    }
}

/// Computes the local coordinate frame for a face of `shape`.
///
/// - `FRONT`: origin at `points[0]`, local x maps directly to world x.
/// - `BACK`: origin at the horizontal mirror of `points[0]` about the
///   centroid's x, with local x growing leftward — the back of the board
///   is a literal horizontal flip of the front.
/// - `EDGE_i`: a synthetic workspace unrelated to the edge's plan-view
///   position: a rectangle centered on the centroid spanning the edge's
///   cached length by the board thickness.
///
/// Edge faces with an out-of-range index return `None`.
pub fn face_origin(shape: &Shape, face: Face, scale: f64) -> Option<FaceFrame> {
    let first = shape.points.first()?;
    match face {
        Face::Front => Some(FaceFrame {
            origin: Point::new(first.x, first.y),
            x_mult: 1.0,
        }),
        Face::Back => {
            let c = geometry::calculate_centroid(&shape.points);
            Some(FaceFrame {
                origin: Point::new(2.0 * c.x - first.x, first.y),
                x_mult: -1.0,
            })
        }
        Face::Edge(i) => {
            let p = shape.points.get(i)?;
            let edge_len = p.length_to_next.unwrap_or(0.0);
            let c = geometry::calculate_centroid(&shape.points);
            Some(FaceFrame {
                origin: Point::new(
                    c.x - edge_len * scale / 2.0,
                    c.y - shape.thickness * scale / 2.0,
                ),
                x_mult: 1.0,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Shape;

    fn board() -> Shape {
        Shape::new(
            "Board",
            vec![
                Point::new(0.0, 0.0),
                Point::new(100.0, 0.0),
                Point::new(100.0, 50.0),
                Point::new(0.0, 50.0),
            ],
            1.0,
            10.0,
        )
    }

    #[test]
    fn test_face_string_round_trip() {
        for face in [Face::Front, Face::Back, Face::Edge(0), Face::Edge(12)] {
            let s = face.to_string();
            assert_eq!(s.parse::<Face>().unwrap(), face);
        }
        assert!("EDGE_x".parse::<Face>().is_err());
        assert!("TOP".parse::<Face>().is_err());
    }

    #[test]
    fn test_front_frame() {
        let shape = board();
        let frame = face_origin(&shape, Face::Front, 10.0).unwrap();
        assert_eq!((frame.origin.x, frame.origin.y), (0.0, 0.0));
        assert_eq!(frame.x_mult, 1.0);
        // 2" wide tenon at local x=1 occupies world x 10..30.
        assert_eq!(frame.item_world_x(1.0, 2.0, 10.0), 10.0);
    }

    #[test]
    fn test_back_mirror_identity() {
        let shape = board();
        let frame = face_origin(&shape, Face::Back, 10.0).unwrap();
        // Centroid x = 50; mirror of points[0].x = 0 is 100.
        assert_eq!((frame.origin.x, frame.origin.y), (100.0, 0.0));
        assert_eq!(frame.x_mult, -1.0);

        // Mirroring the origin back across centroid x recovers points[0].
        let cx = 50.0;
        assert_eq!(2.0 * cx - frame.origin.x, shape.points[0].x);

        // Same 2" tenon at local x=1 draws at world x 70 (extends leftward).
        assert_eq!(frame.item_world_x(1.0, 2.0, 10.0), 70.0);
    }

    #[test]
    fn test_edge_frame_is_centroid_centered() {
        let shape = board();
        // Edge 0 runs 100 world px = 10" at scale 10; thickness 1".
        let frame = face_origin(&shape, Face::Edge(0), 10.0).unwrap();
        assert_eq!((frame.origin.x, frame.origin.y), (0.0, 20.0));
        assert_eq!(frame.x_mult, 1.0);

        assert!(face_origin(&shape, Face::Edge(9), 10.0).is_none());
    }

    #[test]
    fn test_local_world_inverse() {
        let shape = board();
        for face in [Face::Front, Face::Back] {
            let frame = face_origin(&shape, face, 10.0).unwrap();
            let wx = frame.item_world_x(3.5, 2.0, 10.0);
            assert!((frame.world_to_local_x(wx, 2.0, 10.0) - 3.5).abs() < 1e-9);
        }
    }
}
