//! Document session: the single owner of drafting state.
//!
//! One `Document` holds the shape list, the active tool and selection,
//! and the sketcher. Every operation is a command method here, so there
//! is no hidden global state and independent sessions (and tests) can
//! coexist. The rendering collaborator reads through the accessors; the
//! history collaborator snapshots and restores via [`DocumentSnapshot`].

use tracing::{debug, info};
use uuid::Uuid;

use boardkit_core::constants::{MIN_THICKNESS_IN, PX_PER_INCH};

use crate::drawing::{ClickOutcome, DrawState, Sketcher};
use crate::faces::Face;
use crate::geometry::Point;
use crate::joinery::{self, JoineryKind};
use crate::model::{Shape, Transform3D};
use crate::viewport::View;
use crate::{boolean, slice};

/// Interaction tools. Switching away from `Draw` discards any in-progress
/// sketch so no stale preview survives a tool round-trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    Select,
    Draw,
    Joinery,
    Slice,
}

/// Result of a commit click while drawing.
#[derive(Debug)]
pub enum DrawClick {
    /// The sketch advanced without producing a shape.
    Updated(ClickOutcome),
    /// The loop closed; the new shape is in the document under this id.
    Created(Uuid),
}

/// Everything the history collaborator needs to restore the document and
/// resume sketching correctly after an undo.
#[derive(Debug, Clone)]
pub struct DocumentSnapshot {
    pub shapes: Vec<Shape>,
    pub selected: Option<Uuid>,
    pub draw_state: DrawState,
}

/// A drafting session over one document.
#[derive(Debug)]
pub struct Document {
    name: String,
    shapes: Vec<Shape>,
    selected: Option<Uuid>,
    tool: Tool,
    sketcher: Sketcher,
    view: View,
    /// World pixels per inch at zoom 1.
    scale: f64,
    part_counter: usize,
}

impl Document {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            shapes: Vec::new(),
            selected: None,
            tool: Tool::Select,
            sketcher: Sketcher::new(PX_PER_INCH),
            view: View::new(),
            scale: PX_PER_INCH,
            part_counter: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn shape(&self, id: Uuid) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.id == id)
    }

    fn shape_mut(&mut self, id: Uuid) -> Option<&mut Shape> {
        self.shapes.iter_mut().find(|s| s.id == id)
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut View {
        &mut self.view
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    /// Read-only sketcher state for the rendering collaborator.
    pub fn sketcher(&self) -> &Sketcher {
        &self.sketcher
    }

    /// Switches tools, discarding any in-progress sketch when leaving Draw.
    pub fn set_tool(&mut self, tool: Tool) {
        if self.tool == Tool::Draw && tool != Tool::Draw {
            self.sketcher.cancel();
        }
        self.tool = tool;
    }

    // --- selection ---

    pub fn selected_id(&self) -> Option<Uuid> {
        self.selected
    }

    pub fn selected_shape(&self) -> Option<&Shape> {
        self.selected.and_then(|id| self.shape(id))
    }

    pub fn select(&mut self, id: Option<Uuid>) {
        self.selected = id.filter(|id| self.shape(*id).is_some());
    }

    // --- drawing ---

    /// Routes a commit click into the sketcher; a closed loop lands in the
    /// document as a freshly named part.
    pub fn draw_click(&mut self, world: Point) -> DrawClick {
        match self.sketcher.commit_click(world, &self.view) {
            ClickOutcome::ShapeClosed(mut shape) => {
                self.part_counter += 1;
                shape.name = format!("Part {}", self.part_counter);
                let id = shape.id;
                info!(name = %shape.name, points = shape.points.len(), "shape drafted");
                self.shapes.push(shape);
                self.selected = Some(id);
                DrawClick::Created(id)
            }
            outcome => DrawClick::Updated(outcome),
        }
    }

    /// Updates the sketch preview for the current cursor position.
    pub fn draw_preview(&mut self, cursor: Point) {
        self.sketcher.preview(cursor, &self.view);
    }

    /// Cancels the in-progress sketch (Escape).
    pub fn cancel_drawing(&mut self) {
        self.sketcher.cancel();
    }

    // --- shape management ---

    /// Inserts an externally built shape (e.g. loaded from a design file).
    pub fn add_shape(&mut self, shape: Shape) -> Uuid {
        let id = shape.id;
        self.shapes.push(shape);
        self.part_counter = self.part_counter.max(Self::max_part_number(&self.shapes));
        id
    }

    /// Highest `Part N` suffix among the given shapes. New drafts number
    /// past it so renamed or deleted shapes never cause a duplicate name.
    fn max_part_number(shapes: &[Shape]) -> usize {
        shapes
            .iter()
            .filter_map(|s| s.name.strip_prefix("Part "))
            .filter_map(|n| n.parse().ok())
            .max()
            .unwrap_or(0)
    }

    pub fn remove_shape(&mut self, id: Uuid) -> bool {
        let before = self.shapes.len();
        self.shapes.retain(|s| s.id != id);
        if self.selected == Some(id) {
            self.selected = None;
        }
        self.shapes.len() != before
    }

    /// Selects the active face for joinery editing. No-op when nothing is
    /// selected or the edge index is out of range.
    pub fn set_active_face(&mut self, face: Face) -> bool {
        let Some(shape) = self.selected.and_then(|id| self.shape_mut(id)) else {
            return false;
        };
        if let Face::Edge(i) = face {
            if i >= shape.points.len() {
                return false;
            }
        }
        shape.active_face = face;
        shape.touch();
        true
    }

    /// Sets the selected shape's thickness, clamped to the editing floor.
    /// Non-finite or non-positive input is rejected outright so NaN never
    /// enters the data model.
    pub fn set_thickness(&mut self, thickness: f64) -> bool {
        if !thickness.is_finite() || thickness <= 0.0 {
            return false;
        }
        let Some(shape) = self.selected.and_then(|id| self.shape_mut(id)) else {
            return false;
        };
        shape.thickness = thickness.max(MIN_THICKNESS_IN);
        shape.touch();
        true
    }

    /// Accepts an external 3D-collaborator transform write as
    /// authoritative.
    pub fn set_transform_3d(&mut self, id: Uuid, transform: Transform3D) -> bool {
        let Some(shape) = self.shape_mut(id) else {
            return false;
        };
        shape.transform_3d = transform;
        shape.touch();
        true
    }

    // --- joinery ---

    pub fn add_tenon(&mut self) -> bool {
        let scale = self.scale;
        match self.selected.and_then(|id| self.shape_mut(id)) {
            Some(shape) => joinery::add_tenon(shape, scale),
            None => false,
        }
    }

    pub fn add_cutout(&mut self) -> bool {
        match self.selected.and_then(|id| self.shape_mut(id)) {
            Some(shape) => joinery::add_cutout(shape),
            None => false,
        }
    }

    pub fn remove_joinery(&mut self, kind: JoineryKind, index: usize) -> bool {
        match self.selected.and_then(|id| self.shape_mut(id)) {
            Some(shape) => joinery::remove_joinery(shape, kind, index),
            None => false,
        }
    }

    // --- boolean / slice ---

    /// Merges two shapes, replacing them with the union. Inputs are left
    /// untouched when the operation yields no geometry.
    pub fn union_shapes(&mut self, a: Uuid, b: Uuid) -> Option<Uuid> {
        self.combine(a, b, boolean::union)
    }

    /// Subtracts `b` from `a`, replacing both with the result.
    pub fn difference_shapes(&mut self, a: Uuid, b: Uuid) -> Option<Uuid> {
        self.combine(a, b, boolean::difference)
    }

    fn combine(
        &mut self,
        a: Uuid,
        b: Uuid,
        op: fn(&Shape, &Shape, f64) -> Option<Shape>,
    ) -> Option<Uuid> {
        if a == b {
            return None;
        }
        let shape_a = self.shape(a)?;
        let shape_b = self.shape(b)?;
        let result = op(shape_a, shape_b, self.scale)?;
        let id = result.id;
        info!(from = %shape_a.name, result_points = result.points.len(), "boolean replaced shapes");
        self.remove_shape(a);
        self.remove_shape(b);
        self.shapes.push(result);
        self.selected = Some(id);
        Some(id)
    }

    /// Slices a shape along a chord anchored on `edge_index` at `anchor`,
    /// tilted `angle_deg` from the edge. The original is consumed; both
    /// halves join the document.
    pub fn slice_shape(
        &mut self,
        id: Uuid,
        edge_index: usize,
        anchor: Point,
        angle_deg: f64,
    ) -> Option<(Uuid, Uuid)> {
        let shape = self.shape(id)?;
        let (a, b) = slice::slice_shape(shape, edge_index, anchor, angle_deg, self.scale)?;
        let ids = (a.id, b.id);
        self.remove_shape(id);
        self.shapes.push(a);
        self.shapes.push(b);
        self.selected = Some(ids.0);
        Some(ids)
    }

    // --- history ---

    /// Captures the state the external history collaborator stores.
    pub fn snapshot(&self) -> DocumentSnapshot {
        DocumentSnapshot {
            shapes: self.shapes.clone(),
            selected: self.selected,
            draw_state: self.sketcher.state(),
        }
    }

    /// Restores a previously captured snapshot.
    pub fn restore(&mut self, snapshot: DocumentSnapshot) {
        debug!(shapes = snapshot.shapes.len(), "restoring document snapshot");
        self.shapes = snapshot.shapes;
        self.selected = snapshot
            .selected
            .filter(|id| self.shapes.iter().any(|s| s.id == *id));
        self.sketcher.restore_state(snapshot.draw_state);
    }

    /// Replaces the entire shape list (design-file load path).
    pub fn set_shapes(&mut self, shapes: Vec<Shape>) {
        self.shapes = shapes;
        self.selected = None;
        self.part_counter = Self::max_part_number(&self.shapes);
        self.sketcher.cancel();
    }
}
