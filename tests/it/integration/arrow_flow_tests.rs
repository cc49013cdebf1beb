//! Arrow workflows: creating arrows, keeping them attached while boxes move,
//! picking them and deleting their boxes.

use crate::helpers::{TestSceneBuilder, click, drag, hover, two_boxes};
use arrowboard::Event;
use arrowboard::geometry::QuadBezier;
use arrowboard::types::{Cursor, Endpoint, Hit, Rect};

fn connected_pair() -> TestSceneBuilder {
    TestSceneBuilder::new()
        .with_box("A", (0.0, 0.0, 100.0, 100.0))
        .with_box("B", (300.0, 0.0, 100.0, 100.0))
        .with_arrow("A", "B")
}

#[test]
fn test_arrow_tool_connects_two_boxes() {
    let mut editor = two_boxes().editor();
    editor.send(Event::SelectedArrowTool);
    assert_eq!(editor.cursor(), Cursor::Crosshair);

    click(&mut editor, 5.0, 5.0);
    assert_eq!(editor.scene().pending_arrow_from.as_deref(), Some("A"));
    assert!(editor.scene().arrows.is_empty());

    click(&mut editor, 105.0, 5.0);
    let arrow = editor.scene().arrows.values().next().expect("arrow created");
    assert_eq!(arrow.from, Endpoint::boxed("A"));
    assert_eq!(arrow.to, Endpoint::boxed("B"));
    assert!(editor.scene().boxes["A"].arrow_ids.contains(&arrow.id));
    assert!(editor.scene().boxes["B"].arrow_ids.contains(&arrow.id));
    assert!(editor.scene().arrow_cache.contains_key(&arrow.id));

    assert!(editor.state().is_idle());
    assert!(!editor.state().is_creating());
    assert_eq!(editor.scene().selected_box_ids, vec!["B".to_string()]);
    assert!(editor.scene().pending_arrow_from.is_none());
}

#[test]
fn test_arrow_tool_starts_from_selected_box() {
    let mut editor = two_boxes().with_selection(&["A"]).editor();
    editor.send(Event::SelectedArrowTool);
    assert_eq!(editor.scene().pending_arrow_from.as_deref(), Some("A"));

    // Pressing the source box again does nothing.
    click(&mut editor, 5.0, 5.0);
    assert!(editor.scene().arrows.is_empty());

    click(&mut editor, 105.0, 5.0);
    assert_eq!(editor.scene().arrows.len(), 1);
    assert!(editor.view().preview_arrow.is_none());
}

#[test]
fn test_cancel_leaves_arrow_tool() {
    let mut editor = two_boxes().with_selection(&["A"]).editor();
    editor.send(Event::SelectedArrowTool);
    editor.send(Event::Cancelled);
    assert!(editor.state().is_idle());
    assert!(!editor.state().is_creating());
    assert!(editor.scene().pending_arrow_from.is_none());
    assert!(editor.scene().arrows.is_empty());
}

#[test]
fn test_dragging_boxes_moves_attached_arrow() {
    let mut editor = connected_pair().with_selection(&["A", "B"]).editor();
    let before = *editor.scene().arrow_cache.values().next().unwrap();

    // Between the two boxes, inside the selection bounds.
    hover(&mut editor, 200.0, 50.0);
    assert_eq!(editor.scene().hit, Hit::Bounds);
    drag(&mut editor, (200.0, 50.0), (205.0, 55.0), 5);

    assert_eq!(editor.scene().boxes["A"].rect(), Rect::new(5.0, 5.0, 100.0, 100.0));
    assert_eq!(editor.scene().boxes["B"].rect(), Rect::new(305.0, 5.0, 100.0, 100.0));

    let after = *editor.scene().arrow_cache.values().next().unwrap();
    for (moved, original) in [
        (after.start, before.start),
        (after.control, before.control),
        (after.end, before.end),
    ] {
        assert!((moved.x - original.x - 5.0).abs() < 1e-9);
        assert!((moved.y - original.y - 5.0).abs() < 1e-9);
    }
    assert!(editor.state().is_idle());
}

#[test]
fn test_hovering_curve_hits_arrow_and_click_selects_it() {
    let mut editor = connected_pair().editor();
    let (id, geometry) = editor
        .scene()
        .arrow_cache
        .iter()
        .map(|(id, g)| (id.clone(), *g))
        .next()
        .unwrap();
    let mid = QuadBezier::new(geometry.start, geometry.control, geometry.end).point_at(0.5);

    hover(&mut editor, mid.x, mid.y);
    assert_eq!(editor.scene().hit, Hit::Arrow(id.clone()));
    assert_eq!(editor.cursor(), Cursor::Pointer);

    click(&mut editor, mid.x, mid.y);
    assert_eq!(editor.scene().selected_arrow_ids, vec![id]);
    assert!(editor.scene().selected_box_ids.is_empty());
    assert!(editor.scene().bounds.is_none());
}

#[test]
fn test_deleting_box_removes_its_arrows() {
    let mut editor = connected_pair().with_selection(&["A"]).editor();
    editor.send(Event::DeletedSelected);

    let scene = editor.scene();
    assert!(!scene.boxes.contains_key("A"));
    assert!(scene.arrows.is_empty());
    assert!(scene.arrow_cache.is_empty());
    assert!(scene.boxes["B"].arrow_ids.is_empty());
    assert!(scene.selected_box_ids.is_empty());
    assert!(scene.bounds.is_none());
}

#[test]
fn test_deleting_selected_arrow_keeps_boxes() {
    let mut editor = connected_pair().editor();
    let id = editor.scene().arrows.keys().next().cloned().unwrap();
    editor.send(Event::StartedPointingArrow { id });
    editor.send(Event::DeletedSelected);

    assert!(editor.scene().arrows.is_empty());
    assert_eq!(editor.scene().boxes.len(), 2);
}
