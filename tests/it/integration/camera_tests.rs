//! Viewport events: wheel zoom, pan, view box layout and page scroll.

use crate::helpers::{assert_close, hover, two_boxes};
use arrowboard::constants::{MAX_ZOOM, MIN_ZOOM};
use arrowboard::types::{Hit, Point, Rect};
use arrowboard::Event;

#[test]
fn test_wheel_zoom_keeps_point_under_cursor() {
    let mut editor = two_boxes().editor();
    editor.send(Event::UpdatedViewBox(Rect::new(40.0, 30.0, 800.0, 600.0)));
    hover(&mut editor, 240.0, 130.0);
    let before = editor.scene().pointer.document;

    editor.wheel(Point::new(240.0, 130.0), -20.0);
    let camera = editor.scene().camera;
    assert!(camera.zoom > 1.0);
    let after = editor.scene().pointer.document;
    assert_close(after.x, before.x);
    assert_close(after.y, before.y);
}

#[test]
fn test_zoom_is_clamped() {
    let mut editor = two_boxes().editor();
    editor.wheel(Point::new(0.0, 0.0), 10_000.0);
    assert_eq!(editor.scene().camera.zoom, MIN_ZOOM);
    editor.wheel(Point::new(0.0, 0.0), -10_000.0);
    assert_eq!(editor.scene().camera.zoom, MAX_ZOOM);
}

#[test]
fn test_zoom_rescales_selection_handles() {
    let mut editor = two_boxes().with_selection(&["A"]).editor();
    let handle = editor.scene().bounds.as_ref().unwrap().corners[0];
    editor.wheel(Point::new(0.0, 0.0), -35.0);
    let zoom = editor.scene().camera.zoom;
    let rescaled = editor.scene().bounds.as_ref().unwrap().corners[0];
    assert_close(rescaled.width, handle.width / zoom);
    assert!(editor.scene().is_index_dirty());
}

#[test]
fn test_zoomed_in_hit_uses_document_space() {
    let mut editor = two_boxes().with_zoom(2.0).editor();
    // Screen (10, 10) is document (5, 5) at zoom 2.
    hover(&mut editor, 10.0, 10.0);
    assert_close(editor.scene().pointer.document.x, 5.0);
    assert_eq!(editor.scene().hit, Hit::Box("A".into()));
    // Screen (30, 10) is document (15, 5), past box A.
    hover(&mut editor, 30.0, 10.0);
    assert_eq!(editor.scene().hit, Hit::Canvas);
}

#[test]
fn test_pan_moves_document_under_pointer() {
    let mut editor = two_boxes().editor();
    hover(&mut editor, 0.0, 0.0);
    editor.send(Event::Panned { dx: 10.0, dy: -4.0 });
    let camera = editor.scene().camera;
    assert_eq!((camera.x, camera.y), (-10.0, 4.0));
    assert_eq!(editor.scene().pointer.document, Point::new(10.0, -4.0));
}

#[test]
fn test_viewbox_resize_recenters() {
    let mut editor = two_boxes().editor();
    editor.send(Event::UpdatedViewBox(Rect::new(0.0, 0.0, 800.0, 600.0)));
    assert_eq!(editor.scene().camera.x, 0.0);
    editor.send(Event::UpdatedViewBox(Rect::new(0.0, 0.0, 1000.0, 500.0)));
    let camera = editor.scene().camera;
    assert_eq!((camera.x, camera.y), (100.0, -50.0));
}

#[test]
fn test_page_scroll_shifts_canvas_origin() {
    let mut editor = two_boxes().editor();
    editor.send(Event::UpdatedViewBox(Rect::new(0.0, 100.0, 800.0, 600.0)));
    editor.send(Event::ScrolledViewport(Point::new(0.0, 40.0)));
    assert_eq!(editor.scene().viewbox.y, 60.0);
    hover(&mut editor, 5.0, 65.0);
    assert_eq!(editor.scene().hit, Hit::Box("A".into()));
}
