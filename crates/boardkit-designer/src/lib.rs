//! # BoardKit Designer
//!
//! Parametric 2D drafting and joinery engine for woodworking part design.
//! Users sketch closed polygonal profiles with snapping and alignment
//! guides, attach tenons and cutouts per board face, and derive new parts
//! through polygon boolean and slice operations.
//!
//! ## Core Components
//!
//! - **Geometry kernel**: pure point/segment/polygon math
//! - **Viewport**: pan/zoom mapping between screen and world space
//! - **Drawing state machine**: click-driven sketching with a directional
//!   compass and multi-tier fractional-inch length snapping
//! - **Face mapper**: FRONT/BACK/EDGE local coordinate frames for joinery
//! - **Joinery engine**: tenons and cutouts with mirrored placement
//! - **Boolean/slice engine**: union, difference, and chord splitting
//! - **Document**: the session object owning shapes, selection, and tools
//!
//! Rendering, 3D extrusion, persistence storage, and undo history are
//! external collaborators; this crate exposes the data contracts they
//! consume (read-only shape/sketch state, the JSON design-file schema,
//! and document snapshots).

pub mod boolean;
pub mod document;
pub mod drawing;
pub mod faces;
pub mod geometry;
pub mod joinery;
pub mod model;
pub mod serialization;
pub mod slice;
pub mod viewport;

pub use boolean::{bounds_overlap, difference, union};
pub use document::{Document, DocumentSnapshot, DrawClick, Tool};
pub use drawing::{ActiveDrawing, AlignmentGuide, ClickOutcome, DrawState, Sketcher, TempLine};
pub use faces::{face_origin, Face, FaceFrame};
pub use geometry::Point;
pub use joinery::JoineryKind;
pub use model::{Cutout, FaceJoinery, Shape, Tenon, Transform3D, Vec3};
pub use serialization::{load_design, save_design, DesignFile, DesignMetadata};
pub use slice::{plan_slice, slice_shape, split_polygon};
pub use viewport::View;
