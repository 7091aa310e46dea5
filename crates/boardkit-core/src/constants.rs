//! Shared drafting constants.
//!
//! All pixel values are screen pixels (post-zoom); all inch values are
//! board-space inches. World coordinates store inches multiplied by the
//! document scale (pixels per inch at zoom 1).

/// Default document scale: world pixels per inch at zoom 1.
pub const PX_PER_INCH: f64 = 10.0;

/// Screen-pixel radius for point snapping (loop closure, tier snap base).
pub const SNAP_RADIUS_PX: f64 = 15.0;

/// Radius of the inner compass ring (cardinal/diagonal directions).
pub const COMPASS_INNER_RADIUS_PX: f64 = 80.0;

/// Radius of the outer compass ring (22.5-degree offsets).
pub const COMPASS_OUTER_RADIUS_PX: f64 = 110.0;

/// A compass direction only highlights when the cursor is within this
/// distance of its marker; beyond it no direction is chosen.
pub const COMPASS_PICK_RADIUS_PX: f64 = 60.0;

/// Minimum vertices before the loop-closure snap is offered.
pub const MIN_CLOSE_VERTICES: usize = 3;

/// Default board thickness in inches.
pub const DEFAULT_THICKNESS_IN: f64 = 1.0;

/// Interactive thickness edits clamp to this floor.
pub const MIN_THICKNESS_IN: f64 = 0.125;

/// Slice cut angle limits relative to the hovered edge, in degrees.
/// Keeps the cut chord from running near-parallel to the edge.
pub const SLICE_MIN_ANGLE_DEG: f64 = 5.0;
pub const SLICE_MAX_ANGLE_DEG: f64 = 175.0;

/// World-unit tolerance when matching a cut point back onto an edge.
pub const EDGE_MATCH_EPSILON: f64 = 1e-3;
