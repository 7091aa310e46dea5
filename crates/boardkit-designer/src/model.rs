//! Shape and joinery data model.
//!
//! The serde field names here are the literal on-disk/on-wire schema the
//! persistence collaborator reads and writes
//! (`faceData.FRONT.tenons[].{x,y,w,h,depth,inset}` etc.); renames must
//! not change without a file-format version bump.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use boardkit_core::constants::DEFAULT_THICKNESS_IN;

use crate::faces::Face;
use crate::geometry::{self, Point};

/// A protruding rectangular joinery feature, in face-local inches.
///
/// `x,y` is the top-left corner in the face's local frame; `depth` is the
/// engagement depth (defaults to the parent board's thickness); `inset`
/// shrinks the tenon symmetrically from each face of the board.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tenon {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    pub depth: f64,
    pub inset: f64,
}

/// A recessed or through rectangular joinery feature, in face-local inches.
///
/// `depth < thickness` reads as a pocket, `depth >= thickness` as a
/// through-hole. The distinction is interpreted by the external 3D mesh
/// builder; this core stores the value without validating it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cutout {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    pub depth: f64,
}

/// Joinery attached to one face.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FaceJoinery {
    pub tenons: Vec<Tenon>,
    pub cutouts: Vec<Cutout>,
}

/// XYZ triple for the external 3D transform.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Manual 3D placement, offset from the shape's 2D bounding-box center.
///
/// Written only by the external 3D assembly collaborator; this core
/// carries it through untouched and accepts external writes as
/// authoritative.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Transform3D {
    pub position: Vec3,
    pub rotation: Vec3,
}

/// A drafted part: a closed polygon with thickness and per-face joinery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shape {
    pub id: Uuid,
    pub name: String,
    /// Insertion order is the polygon winding order; minimum 3 points for
    /// a valid closed shape.
    pub points: Vec<Point>,
    pub closed: bool,
    /// Board thickness in inches; always > 0.
    pub thickness: f64,
    pub active_face: Face,
    /// Always contains FRONT and BACK, plus one EDGE_i entry per point
    /// index. Rebuilt (edges re-keyed, edge joinery dropped) whenever the
    /// point count changes.
    pub face_data: BTreeMap<Face, FaceJoinery>,
    #[serde(rename = "transform3D", default)]
    pub transform_3d: Transform3D,
    pub last_modified: DateTime<Utc>,
}

impl Shape {
    /// Creates a closed shape from a drafted point list.
    ///
    /// Recomputes the cached side lengths and initializes face data for
    /// every face.
    pub fn new(name: &str, mut points: Vec<Point>, thickness: f64, scale: f64) -> Self {
        geometry::recalculate_side_lengths(&mut points, scale);
        let mut shape = Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            points,
            closed: true,
            thickness: if thickness > 0.0 {
                thickness
            } else {
                DEFAULT_THICKNESS_IN
            },
            active_face: Face::Front,
            face_data: BTreeMap::new(),
            transform_3d: Transform3D::default(),
            last_modified: Utc::now(),
        };
        shape.rebuild_face_data();
        shape
    }

    /// Creates a derived shape from a boolean or slice result.
    ///
    /// Inherits name and thickness, and carries FRONT/BACK joinery over.
    /// Edge joinery is dropped: the new point list's edge indices no
    /// longer correspond to the parent's.
    pub fn from_parent(parent: &Shape, mut points: Vec<Point>, scale: f64) -> Self {
        geometry::recalculate_side_lengths(&mut points, scale);
        let mut shape = Self {
            id: Uuid::new_v4(),
            name: parent.name.clone(),
            points,
            closed: true,
            thickness: parent.thickness,
            active_face: Face::Front,
            face_data: BTreeMap::new(),
            transform_3d: Transform3D::default(),
            last_modified: Utc::now(),
        };
        shape.rebuild_face_data();
        for face in [Face::Front, Face::Back] {
            if let Some(joinery) = parent.face_data.get(&face) {
                shape.face_data.insert(face, joinery.clone());
            }
        }
        shape
    }

    /// True when the shape is a usable closed polygon.
    pub fn is_valid(&self) -> bool {
        self.closed && self.points.len() >= 3
    }

    /// Re-keys `face_data` to the current point list.
    ///
    /// FRONT/BACK joinery is preserved; EDGE entries are reset to exactly
    /// one empty entry per point index. Call after any operation that
    /// changes the point count.
    pub fn rebuild_face_data(&mut self) {
        let front = self.face_data.remove(&Face::Front).unwrap_or_default();
        let back = self.face_data.remove(&Face::Back).unwrap_or_default();
        self.face_data.clear();
        self.face_data.insert(Face::Front, front);
        self.face_data.insert(Face::Back, back);
        for i in 0..self.points.len() {
            self.face_data.insert(Face::Edge(i), FaceJoinery::default());
        }
        if let Face::Edge(i) = self.active_face {
            if i >= self.points.len() {
                self.active_face = Face::Front;
            }
        }
    }

    /// Joinery on the active face.
    pub fn active_joinery(&self) -> Option<&FaceJoinery> {
        self.face_data.get(&self.active_face)
    }

    /// Bumps `last_modified`; external caches key on this.
    pub fn touch(&mut self) {
        self.last_modified = Utc::now();
    }

    /// Centroid (vertex mean) of the polygon, in world space.
    pub fn centroid(&self) -> Point {
        geometry::calculate_centroid(&self.points)
    }

    /// Axis-aligned bounds as `(min_x, min_y, max_x, max_y)`.
    pub fn bounds(&self) -> (f64, f64, f64, f64) {
        geometry::bounding_box(&self.points)
    }
}
