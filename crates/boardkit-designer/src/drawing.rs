//! Interactive polygon sketching state machine.
//!
//! Discrete mouse events drive a three-state flow: an anchor click, a
//! compass-direction pick, then a length commit along the chosen
//! direction, repeating until the loop snaps closed on its start point.
//!
//! Pointer moves are non-committing previews, recomputed from scratch
//! against the last committed anchor; skipped or batched move events are
//! safe because a preview at the same cursor position is idempotent.

use serde::{Deserialize, Serialize};
use tracing::debug;

use boardkit_core::constants::{
    COMPASS_INNER_RADIUS_PX, COMPASS_OUTER_RADIUS_PX, COMPASS_PICK_RADIUS_PX,
    DEFAULT_THICKNESS_IN, MIN_CLOSE_VERTICES, SNAP_RADIUS_PX,
};

use crate::geometry::{self, Point};
use crate::model::Shape;
use crate::viewport::View;

/// Length snap tiers: (increment in inches, snap-radius weight).
/// Checked largest first; the first qualifying tier wins.
const SNAP_TIERS: [(f64, f64); 4] = [(1.0, 1.0), (0.5, 0.8), (0.25, 0.6), (0.125, 0.4)];

/// Sketching states. No terminal state: closing the loop emits a shape
/// and returns to `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrawState {
    Idle,
    StartShape,
    DrawingLine,
}

/// The segment being previewed from the current anchor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TempLine {
    pub start: Point,
    pub end: Point,
    /// Committed segment length in inches.
    pub length_in: f64,
}

impl TempLine {
    /// Fractional-inch label shown next to the previewed segment.
    pub fn label(&self) -> String {
        boardkit_core::units::format_inches(self.length_in)
    }
}

/// A rendered hint that the previewed endpoint aligns with the start
/// point's x or y coordinate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlignmentGuide {
    pub from: Point,
    pub to: Point,
}

/// Scratch state of the in-progress sketch. Discarded on cancel, tool
/// switch, or shape completion; never persisted beyond `DrawState`.
#[derive(Debug, Clone, Default)]
pub struct ActiveDrawing {
    pub points: Vec<Point>,
    pub temp_line: Option<TempLine>,
    /// Unit vector committed by the compass pick.
    pub selected_direction: Option<Point>,
    /// Unit vector currently hovered on the compass; set only by preview.
    pub highlighted_direction: Option<Point>,
    /// Start point, when the loop-closure snap is active.
    pub snap_target: Option<Point>,
    pub alignment_guide: Option<AlignmentGuide>,
}

impl ActiveDrawing {
    fn reset(&mut self) {
        self.points.clear();
        self.temp_line = None;
        self.selected_direction = None;
        self.highlighted_direction = None;
        self.snap_target = None;
        self.alignment_guide = None;
    }
}

/// Result of a commit click. The caller branches on this instead of the
/// sketcher dispatching side effects itself.
#[derive(Debug)]
pub enum ClickOutcome {
    /// First point placed; compass is now active.
    Anchor,
    /// A compass direction was committed.
    DirectionChosen,
    /// A segment endpoint was committed; back to picking a direction.
    PointCommitted,
    /// The loop closed; the finished shape is handed to the caller.
    ShapeClosed(Shape),
    /// Clicked with no direction highlighted: the sketch was reset and the
    /// click replayed as a fresh anchor, both in this one call.
    Restarted,
    /// Nothing to commit (e.g. no preview has run yet).
    NoOp,
}

/// The drawing state machine.
#[derive(Debug)]
pub struct Sketcher {
    state: DrawState,
    scratch: ActiveDrawing,
    /// World pixels per inch at zoom 1.
    scale: f64,
}

impl Sketcher {
    pub fn new(scale: f64) -> Self {
        Self {
            state: DrawState::Idle,
            scratch: ActiveDrawing::default(),
            scale,
        }
    }

    pub fn state(&self) -> DrawState {
        self.state
    }

    /// Read-only scratch state for the rendering collaborator.
    pub fn drawing(&self) -> &ActiveDrawing {
        &self.scratch
    }

    /// Restores the minimal state the history collaborator snapshots.
    pub fn restore_state(&mut self, state: DrawState) {
        if state == DrawState::Idle {
            self.scratch.reset();
        }
        self.state = state;
    }

    /// Discards all scratch state unconditionally and returns to `Idle`.
    pub fn cancel(&mut self) {
        if self.state != DrawState::Idle || !self.scratch.points.is_empty() {
            debug!("sketch cancelled, discarding {} points", self.scratch.points.len());
        }
        self.scratch.reset();
        self.state = DrawState::Idle;
    }

    /// Handles a commit click at a world-space point.
    pub fn commit_click(&mut self, world: Point, view: &View) -> ClickOutcome {
        match self.state {
            DrawState::Idle => {
                self.scratch.reset();
                self.scratch.points.push(world);
                self.state = DrawState::StartShape;
                ClickOutcome::Anchor
            }
            DrawState::StartShape => {
                if let Some(dir) = self.scratch.highlighted_direction {
                    self.scratch.selected_direction = Some(dir);
                    self.scratch.highlighted_direction = None;
                    self.state = DrawState::DrawingLine;
                    ClickOutcome::DirectionChosen
                } else {
                    // Clicking off the compass both resets the sketch and
                    // starts over from the clicked point, as two sequential
                    // transitions within this one event.
                    self.cancel();
                    self.scratch.points.push(world);
                    self.state = DrawState::StartShape;
                    ClickOutcome::Restarted
                }
            }
            DrawState::DrawingLine => self.commit_segment(view),
        }
    }

    /// Recomputes the non-committing preview for the current cursor.
    pub fn preview(&mut self, cursor: Point, view: &View) {
        match self.state {
            DrawState::Idle => {}
            DrawState::StartShape => {
                self.scratch.highlighted_direction = self.pick_compass_direction(&cursor, view);
            }
            DrawState::DrawingLine => self.preview_segment(cursor, view),
        }
    }

    fn commit_segment(&mut self, _view: &View) -> ClickOutcome {
        let Some(temp) = self.scratch.temp_line else {
            return ClickOutcome::NoOp;
        };

        let closing =
            self.scratch.snap_target.is_some() && self.scratch.points.len() >= MIN_CLOSE_VERTICES;

        if let Some(last) = self.scratch.points.last_mut() {
            last.length_to_next = Some(temp.length_in);
        }

        if closing {
            let points = std::mem::take(&mut self.scratch.points);
            let shape = Shape::new("Part", points, DEFAULT_THICKNESS_IN, self.scale);
            debug!(points = shape.points.len(), "sketch closed into shape");
            self.scratch.reset();
            self.state = DrawState::Idle;
            ClickOutcome::ShapeClosed(shape)
        } else {
            self.scratch.points.push(Point::new(temp.end.x, temp.end.y));
            self.scratch.selected_direction = None;
            self.scratch.temp_line = None;
            self.scratch.snap_target = None;
            self.scratch.alignment_guide = None;
            self.state = DrawState::StartShape;
            ClickOutcome::PointCommitted
        }
    }

    /// Candidate compass directions: 8 cardinal/diagonal markers on an
    /// inner ring plus 8 at 22.5-degree offsets on an outer ring.
    fn compass_candidates() -> impl Iterator<Item = (Point, f64)> {
        (0..8)
            .map(|k| {
                let a = (k as f64) * 45f64.to_radians();
                (Point::new(a.cos(), a.sin()), COMPASS_INNER_RADIUS_PX)
            })
            .chain((0..8).map(|k| {
                let a = (22.5 + (k as f64) * 45.0).to_radians();
                (Point::new(a.cos(), a.sin()), COMPASS_OUTER_RADIUS_PX)
            }))
    }

    /// Picks the compass marker nearest the cursor on screen, or `None`
    /// when the nearest marker is too far to force a choice.
    fn pick_compass_direction(&self, cursor: &Point, view: &View) -> Option<Point> {
        let anchor = self.scratch.points.last()?;
        let anchor_screen = view.world_to_screen(anchor);
        let cursor_screen = view.world_to_screen(cursor);

        let mut best: Option<(Point, f64)> = None;
        for (dir, radius) in Self::compass_candidates() {
            let marker = Point::new(
                anchor_screen.x + dir.x * radius,
                anchor_screen.y + dir.y * radius,
            );
            let d = geometry::distance(&cursor_screen, &marker);
            if best.map_or(true, |(_, bd)| d < bd) {
                best = Some((dir, d));
            }
        }

        match best {
            Some((dir, d)) if d <= COMPASS_PICK_RADIUS_PX => Some(dir),
            _ => None,
        }
    }

    fn preview_segment(&mut self, cursor: Point, view: &View) {
        let (Some(&anchor), Some(dir)) = (
            self.scratch.points.last(),
            self.scratch.selected_direction,
        ) else {
            return;
        };

        self.scratch.snap_target = None;
        self.scratch.alignment_guide = None;

        let zoom = view.zoom();
        let start = self.scratch.points[0];

        // Loop closure has priority over length snapping.
        if self.scratch.points.len() >= MIN_CLOSE_VERTICES {
            let cursor_screen = view.world_to_screen(&cursor);
            let start_screen = view.world_to_screen(&start);
            if geometry::distance(&cursor_screen, &start_screen) <= SNAP_RADIUS_PX {
                self.scratch.snap_target = Some(start);
                self.scratch.temp_line = Some(TempLine {
                    start: anchor,
                    end: Point::new(start.x, start.y),
                    length_in: geometry::distance(&anchor, &start) / self.scale,
                });
                return;
            }
        }

        // Project the drag onto the committed direction.
        let drag = Point::new(cursor.x - anchor.x, cursor.y - anchor.y);
        let mut len_world = geometry::dot(&drag, &dir).max(0.0);

        // Adaptive tier snap: larger increments get a wider radius, but a
        // snap never claims more than 40% of the distance to the next mark.
        for (tier_in, weight) in SNAP_TIERS {
            let tier_world = tier_in * self.scale;
            let nearest = (len_world / tier_world).round() * tier_world;
            let px_off = (len_world - nearest).abs() * zoom;
            let radius = (SNAP_RADIUS_PX * weight).min(0.4 * tier_world * zoom);
            if px_off <= radius {
                len_world = nearest;
                break;
            }
        }

        // Axis alignment with the start point overrides the tier snap.
        let mut aligned = false;
        if dir.x.abs() > 1e-9 {
            let t = (start.x - anchor.x) / dir.x;
            if t > 1e-9 && (t - len_world).abs() * zoom <= SNAP_RADIUS_PX {
                len_world = t;
                aligned = true;
            }
        }
        if !aligned && dir.y.abs() > 1e-9 {
            let t = (start.y - anchor.y) / dir.y;
            if t > 1e-9 && (t - len_world).abs() * zoom <= SNAP_RADIUS_PX {
                len_world = t;
                aligned = true;
            }
        }

        let end = Point::new(anchor.x + dir.x * len_world, anchor.y + dir.y * len_world);
        if aligned {
            self.scratch.alignment_guide = Some(AlignmentGuide {
                from: end,
                to: start,
            });
        }
        self.scratch.temp_line = Some(TempLine {
            start: anchor,
            end,
            length_in: len_world / self.scale,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sketcher() -> (Sketcher, View) {
        (Sketcher::new(10.0), View::new())
    }

    fn east() -> Point {
        Point::new(1.0, 0.0)
    }

    /// Drives the sketcher into DrawingLine heading east from (0,0).
    fn start_east(s: &mut Sketcher, view: &View) {
        s.commit_click(Point::new(0.0, 0.0), view);
        s.preview(Point::new(60.0, 0.0), view);
        assert!(matches!(
            s.commit_click(Point::new(60.0, 0.0), view),
            ClickOutcome::DirectionChosen
        ));
    }

    #[test]
    fn test_idle_click_anchors() {
        let (mut s, view) = sketcher();
        assert!(matches!(
            s.commit_click(Point::new(5.0, 5.0), &view),
            ClickOutcome::Anchor
        ));
        assert_eq!(s.state(), DrawState::StartShape);
        assert_eq!(s.drawing().points.len(), 1);
    }

    #[test]
    fn test_compass_picks_nearest_direction() {
        let (mut s, view) = sketcher();
        s.commit_click(Point::new(0.0, 0.0), &view);

        // Due east, 60px out: inner east marker is 20px away.
        s.preview(Point::new(60.0, 0.0), &view);
        let dir = s.drawing().highlighted_direction.unwrap();
        assert!((dir.x - 1.0).abs() < 1e-9 && dir.y.abs() < 1e-9);

        // Too far from every marker: highlight clears.
        s.preview(Point::new(500.0, 500.0), &view);
        assert!(s.drawing().highlighted_direction.is_none());
    }

    #[test]
    fn test_start_shape_click_without_direction_restarts() {
        let (mut s, view) = sketcher();
        s.commit_click(Point::new(0.0, 0.0), &view);
        s.preview(Point::new(500.0, 500.0), &view);

        // Single click both resets and re-anchors.
        assert!(matches!(
            s.commit_click(Point::new(500.0, 500.0), &view),
            ClickOutcome::Restarted
        ));
        assert_eq!(s.state(), DrawState::StartShape);
        assert_eq!(s.drawing().points.len(), 1);
        assert_eq!(s.drawing().points[0].x, 500.0);
    }

    #[test]
    fn test_whole_inch_tier_snap() {
        let (mut s, view) = sketcher();
        start_east(&mut s, &view);

        // 100.05 world px is 0.05px from the 10" mark at zoom 1.
        s.preview(Point::new(100.05, 0.0), &view);
        let temp = s.drawing().temp_line.unwrap();
        assert_eq!(temp.end.x, 100.0);
        assert_eq!(temp.length_in, 10.0);
        assert_eq!(temp.label(), "10\"");
    }

    #[test]
    fn test_snap_is_idempotent_on_tier_boundary() {
        let (mut s, view) = sketcher();
        start_east(&mut s, &view);

        s.preview(Point::new(20.0, 0.0), &view);
        let first = s.drawing().temp_line.unwrap();
        s.preview(Point::new(20.0, 0.0), &view);
        let second = s.drawing().temp_line.unwrap();
        assert_eq!(first, second);
        assert_eq!(first.length_in, 2.0);
    }

    #[test]
    fn test_half_tier_catches_what_whole_tier_misses() {
        let (mut s, view) = sketcher();
        start_east(&mut s, &view);

        // 14.5px at zoom 1: the whole-inch tier's radius is capped at 40%
        // of the 10px increment, so 4.5px off the 1" mark misses it; the
        // half-inch tier (0.5px off the 1.5" mark) catches.
        s.preview(Point::new(14.5, 0.0), &view);
        let temp = s.drawing().temp_line.unwrap();
        assert_eq!(temp.length_in, 1.5);
    }

    #[test]
    fn test_drag_projects_onto_direction() {
        let (mut s, view) = sketcher();
        start_east(&mut s, &view);

        // Cursor well off-axis: only the east component counts.
        s.preview(Point::new(40.0, 37.0), &view);
        let temp = s.drawing().temp_line.unwrap();
        assert_eq!(temp.end.y, 0.0);
        assert_eq!(temp.length_in, 4.0);

        // Behind the anchor clamps to zero.
        s.preview(Point::new(-50.0, 0.0), &view);
        assert_eq!(s.drawing().temp_line.unwrap().length_in, 0.0);
    }

    #[test]
    fn test_closure_requires_min_vertices() {
        let (mut s, view) = sketcher();
        start_east(&mut s, &view);

        // Two points only: cursor dead on the start point must not offer
        // the closure snap.
        s.preview(Point::new(0.0, 0.0), &view);
        assert!(s.drawing().snap_target.is_none());
    }

    #[test]
    fn test_cancel_discards_scratch() {
        let (mut s, view) = sketcher();
        start_east(&mut s, &view);
        s.preview(Point::new(50.0, 0.0), &view);
        s.cancel();
        assert_eq!(s.state(), DrawState::Idle);
        assert!(s.drawing().points.is_empty());
        assert!(s.drawing().temp_line.is_none());
    }

    #[test]
    fn test_full_rectangle_closes_loop() {
        let (mut s, view) = sketcher();

        // East 10".
        start_east(&mut s, &view);
        s.preview(Point::new(100.0, 0.0), &view);
        assert!(matches!(
            s.commit_click(Point::new(100.0, 0.0), &view),
            ClickOutcome::PointCommitted
        ));
        assert_eq!(s.drawing().points[0].length_to_next, Some(10.0));

        // South 5" (screen y grows downward).
        s.preview(Point::new(100.0, 60.0), &view);
        s.commit_click(Point::new(100.0, 60.0), &view);
        s.preview(Point::new(100.0, 50.0), &view);
        s.commit_click(Point::new(100.0, 50.0), &view);

        // West 10", using the axis-alignment guide back to start x.
        s.preview(Point::new(40.0, 50.0), &view);
        s.commit_click(Point::new(40.0, 50.0), &view);
        s.preview(Point::new(0.2, 50.0), &view);
        assert!(s.drawing().alignment_guide.is_some());
        s.commit_click(Point::new(0.2, 50.0), &view);
        assert_eq!(s.drawing().points.len(), 4);

        // North back to the start point: closure snap fires.
        s.preview(Point::new(0.0, -10.0), &view);
        s.commit_click(Point::new(0.0, -10.0), &view);
        s.preview(Point::new(0.5, 3.0), &view);
        assert!(s.drawing().snap_target.is_some());
        let outcome = s.commit_click(Point::new(0.5, 3.0), &view);
        let ClickOutcome::ShapeClosed(shape) = outcome else {
            panic!("expected ShapeClosed, got {:?}", outcome);
        };
        assert_eq!(s.state(), DrawState::Idle);
        assert_eq!(shape.points.len(), 4);
        assert!(shape.is_valid());
        assert_eq!(shape.points[0].length_to_next, Some(10.0));
        assert_eq!(shape.points[1].length_to_next, Some(5.0));
    }
}
