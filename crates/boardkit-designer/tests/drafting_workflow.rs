//! Integration tests for the click-driven drafting workflow.
//! Drives a full rectangle sketch through the document session and checks
//! snapping behavior at each step.

use boardkit_designer::{ClickOutcome, Document, DrawClick, DrawState, Point, Tool};

fn click(doc: &mut Document, x: f64, y: f64) -> DrawClick {
    doc.draw_preview(Point::new(x, y));
    doc.draw_click(Point::new(x, y))
}

/// Basic rectangle draw: anchor, compass pick, tier-snapped segments,
/// alignment guide, loop closure.
#[test]
fn test_rectangle_draft_end_to_end() {
    let mut doc = Document::new("Bench");
    doc.set_tool(Tool::Draw);

    // Anchor at the origin.
    assert!(matches!(
        click(&mut doc, 0.0, 0.0),
        DrawClick::Updated(ClickOutcome::Anchor)
    ));

    // Cursor due east 60px picks the east compass direction.
    doc.draw_preview(Point::new(60.0, 0.0));
    let dir = doc.sketcher().drawing().highlighted_direction.unwrap();
    assert!((dir.x - 1.0).abs() < 1e-9);
    assert!(matches!(
        doc.draw_click(Point::new(60.0, 0.0)),
        DrawClick::Updated(ClickOutcome::DirectionChosen)
    ));

    // 100.05px east at 10px/in snaps to exactly 10" on the whole tier.
    doc.draw_preview(Point::new(100.05, 0.0));
    let temp = doc.sketcher().drawing().temp_line.unwrap();
    assert_eq!(temp.length_in, 10.0);
    assert!(matches!(
        doc.draw_click(Point::new(100.05, 0.0)),
        DrawClick::Updated(ClickOutcome::PointCommitted)
    ));
    assert_eq!(
        doc.sketcher().drawing().points[0].length_to_next,
        Some(10.0)
    );

    // South 5".
    click(&mut doc, 100.0, 60.0);
    click(&mut doc, 100.0, 50.0);

    // West back under the anchor: the axis-alignment snap takes the
    // length to exactly the start point's x and emits a guide.
    click(&mut doc, 40.0, 50.0);
    doc.draw_preview(Point::new(0.3, 50.0));
    assert!(doc.sketcher().drawing().alignment_guide.is_some());
    assert_eq!(doc.sketcher().drawing().temp_line.unwrap().end.x, 0.0);
    doc.draw_click(Point::new(0.3, 50.0));

    // North toward the start; closing snap only fires within tolerance.
    doc.draw_preview(Point::new(0.0, -10.0));
    doc.draw_click(Point::new(0.0, -10.0));
    doc.draw_preview(Point::new(0.4, 2.0));
    assert!(doc.sketcher().drawing().snap_target.is_some());

    let DrawClick::Created(id) = doc.draw_click(Point::new(0.4, 2.0)) else {
        panic!("expected loop closure to create a shape");
    };

    let shape = doc.shape(id).expect("created shape is in the document");
    assert_eq!(shape.name, "Part 1");
    assert_eq!(shape.points.len(), 4);
    assert!(shape.is_valid());
    assert_eq!(doc.selected_id(), Some(id));
    assert_eq!(doc.sketcher().state(), DrawState::Idle);

    // Side lengths cached in inches: 10 x 5 rectangle.
    let lengths: Vec<f64> = shape
        .points
        .iter()
        .map(|p| p.length_to_next.unwrap())
        .collect();
    assert_eq!(lengths, vec![10.0, 5.0, 10.0, 5.0]);
}

/// Escape mid-sketch discards everything; the next click starts fresh.
#[test]
fn test_escape_then_redraft() {
    let mut doc = Document::new("Bench");
    doc.set_tool(Tool::Draw);

    click(&mut doc, 0.0, 0.0);
    doc.draw_preview(Point::new(60.0, 0.0));
    doc.draw_click(Point::new(60.0, 0.0));
    doc.cancel_drawing();

    assert_eq!(doc.sketcher().state(), DrawState::Idle);
    assert!(doc.sketcher().drawing().points.is_empty());
    assert!(doc.shapes().is_empty());

    assert!(matches!(
        click(&mut doc, 30.0, 30.0),
        DrawClick::Updated(ClickOutcome::Anchor)
    ));
    assert_eq!(doc.sketcher().drawing().points[0].x, 30.0);
}

/// A preview at the same cursor position is idempotent: repeated calls
/// on a tier boundary produce an identical temp line.
#[test]
fn test_preview_idempotent_across_batched_moves() {
    let mut doc = Document::new("Bench");
    doc.set_tool(Tool::Draw);

    click(&mut doc, 0.0, 0.0);
    doc.draw_preview(Point::new(60.0, 0.0));
    doc.draw_click(Point::new(60.0, 0.0));

    doc.draw_preview(Point::new(20.0, 0.0));
    let first = doc.sketcher().drawing().temp_line.unwrap();
    for _ in 0..5 {
        doc.draw_preview(Point::new(20.0, 0.0));
    }
    assert_eq!(doc.sketcher().drawing().temp_line.unwrap(), first);
}
