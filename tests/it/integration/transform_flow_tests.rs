//! Transform workflows: commands over the selection and handle gestures.

use crate::helpers::{TestSceneBuilder, drag, hover, test_config, two_boxes};
use arrowboard::Event;
use arrowboard::input::StateTag;
use arrowboard::settings::EditorConfig;
use arrowboard::types::{Alignment, Axis, Corner, Edge, Hit, Rect};

fn wide_box() -> TestSceneBuilder {
    TestSceneBuilder::new()
        .with_box("A", (0.0, 0.0, 200.0, 100.0))
        .with_box("B", (400.0, 0.0, 50.0, 50.0))
        .with_selection(&["A"])
}

#[test]
fn test_align_left_after_brush_selection() {
    let mut editor = TestSceneBuilder::new()
        .with_box("A", (0.0, 0.0, 10.0, 10.0))
        .with_box("B", (100.0, 40.0, 20.0, 10.0))
        .editor();
    drag(&mut editor, (-5.0, -5.0), (130.0, 60.0), 4);
    assert_eq!(editor.scene().selected_box_ids.len(), 2);

    editor.send(Event::Aligned(Alignment::Left));
    assert_eq!(editor.scene().boxes["B"].rect(), Rect::new(0.0, 40.0, 20.0, 10.0));
    assert_eq!(
        editor.scene().bounds.as_ref().map(|b| b.rect),
        Some(Rect::new(0.0, 0.0, 20.0, 50.0))
    );

    editor.send(Event::Undo);
    assert_eq!(editor.scene().boxes["B"].x, 100.0);
}

#[test]
fn test_commands_need_selected_boxes() {
    let mut editor = two_boxes().editor();
    let depth = editor.history().undo_depth();
    editor.send(Event::Aligned(Alignment::Top));
    editor.send(Event::Stretched(Axis::Y));
    editor.send(Event::Distributed(Axis::X));
    assert_eq!(editor.history().undo_depth(), depth);
    assert_eq!(editor.pending_requests(), 0);
}

#[test]
fn test_stretch_round_trips_through_worker() {
    let mut editor = two_boxes().with_selection(&["A", "B"]).editor();
    editor.send(Event::Stretched(Axis::X));
    for id in ["A", "B"] {
        assert_eq!(
            editor.scene().boxes[id].rect(),
            Rect::new(0.0, 0.0, 110.0, 10.0)
        );
    }
}

#[test]
fn test_distribute_spaces_selection() {
    let mut editor = TestSceneBuilder::new()
        .with_box("A", (0.0, 0.0, 10.0, 10.0))
        .with_box("B", (20.0, 0.0, 10.0, 10.0))
        .with_box("C", (90.0, 0.0, 10.0, 10.0))
        .with_selection(&["A", "B", "C"])
        .editor();
    editor.send(Event::Distributed(Axis::X));
    assert_eq!(editor.scene().boxes["B"].x, 45.0);
}

#[test]
fn test_corner_resize_gesture() {
    let mut editor = wide_box().editor();
    let depth = editor.history().undo_depth();

    hover(&mut editor, 200.0, 100.0);
    assert_eq!(editor.scene().hit, Hit::BoundsCorner(Corner::BottomRight));
    editor.pointer_down();
    assert!(editor.state().is_in(StateTag::CornerResizeIdle));
    hover(&mut editor, 250.0, 125.0);
    assert!(editor.state().is_in(StateTag::CornerResizeActive));
    hover(&mut editor, 300.0, 150.0);
    editor.pointer_up();

    assert_eq!(editor.scene().boxes["A"].rect(), Rect::new(0.0, 0.0, 300.0, 150.0));
    // Unselected boxes are untouched.
    assert_eq!(editor.scene().boxes["B"].rect(), Rect::new(400.0, 0.0, 50.0, 50.0));
    assert!(editor.state().is_idle());
    assert_eq!(editor.history().undo_depth(), depth + 1);
}

#[test]
fn test_edge_resize_gesture() {
    let mut editor = wide_box().editor();
    hover(&mut editor, 100.0, 0.0);
    assert_eq!(editor.scene().hit, Hit::BoundsEdge(Edge::Top));
    drag(&mut editor, (100.0, 0.0), (160.0, -50.0), 2);
    assert_eq!(editor.scene().boxes["A"].rect(), Rect::new(0.0, -50.0, 200.0, 150.0));
}

#[test]
fn test_press_on_bounds_without_move_commits_nothing() {
    let mut editor = wide_box().editor();
    let depth = editor.history().undo_depth();
    hover(&mut editor, 100.0, 50.0);
    editor.pointer_down();
    assert!(editor.state().is_in(StateTag::DragIdle));
    editor.pointer_up();
    assert_eq!(editor.history().undo_depth(), depth);
    assert_eq!(editor.scene().boxes["A"].rect(), Rect::new(0.0, 0.0, 200.0, 100.0));
}

#[test]
fn test_apply_config_resizes_handles() {
    let mut editor = wide_box().editor();
    let config = EditorConfig {
        hit_padding: 30.0,
        ..test_config()
    };
    editor.apply_config(config);
    assert_eq!(editor.config().hit_padding, 30.0);
    let corner = editor.scene().bounds.as_ref().unwrap().corner(Corner::TopLeft);
    assert_eq!(corner, Rect::new(-30.0, -30.0, 60.0, 60.0));
}
