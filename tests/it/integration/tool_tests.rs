//! Creation tools and tool switching.

use crate::helpers::{drag, hover, two_boxes};
use arrowboard::constants::{DEFAULT_TEXT_LABEL, TEXT_BOX_SIZE};
use arrowboard::input::{BoxState, StateTag};
use arrowboard::types::{BoxKind, Cursor, Rect};
use arrowboard::{Event, ToolState};

#[test]
fn test_box_tool_draws_new_box() {
    let mut editor = two_boxes().with_selection(&["A"]).editor();
    editor.send(Event::SelectedBoxTool);
    assert_eq!(*editor.state(), ToolState::Box(BoxState::Idle));
    assert_eq!(editor.cursor(), Cursor::Crosshair);

    hover(&mut editor, 200.0, 200.0);
    editor.pointer_down();
    hover(&mut editor, 230.0, 220.0);
    assert!(editor.state().is_in(StateTag::DrawingBoxActive));
    let spawning = editor.view().spawning_box.cloned().expect("box being drawn");
    assert_eq!(spawning.rect(), Rect::new(200.0, 200.0, 30.0, 20.0));
    assert!(editor.scene().selected_box_ids.is_empty());

    hover(&mut editor, 260.0, 240.0);
    editor.pointer_up();

    let scene = editor.scene();
    assert_eq!(scene.boxes.len(), 3);
    assert!(scene.spawning_box.is_none());
    let [id] = scene.selected_box_ids.as_slice() else {
        panic!("expected exactly the new box to be selected");
    };
    let created = &scene.boxes[id];
    assert_eq!(created.rect(), Rect::new(200.0, 200.0, 60.0, 40.0));
    assert!(created.z > scene.boxes["B"].z);
    assert_eq!(created.kind, BoxKind::Rect);
    assert!(editor.state().is_in(StateTag::SelectingIdle));
}

#[test]
fn test_box_tool_drawn_backwards_is_normalized() {
    let mut editor = two_boxes().editor();
    editor.send(Event::SelectedBoxTool);
    drag(&mut editor, (300.0, 300.0), (250.0, 280.0), 2);
    let id = editor.scene().selected_box_ids[0].clone();
    assert_eq!(
        editor.scene().boxes[&id].rect(),
        Rect::new(250.0, 280.0, 50.0, 20.0)
    );
}

#[test]
fn test_box_tool_press_without_move_creates_nothing() {
    let mut editor = two_boxes().editor();
    editor.send(Event::SelectedBoxTool);
    hover(&mut editor, 300.0, 300.0);
    editor.pointer_down();
    editor.pointer_up();
    assert_eq!(editor.scene().boxes.len(), 2);
    assert_eq!(*editor.state(), ToolState::Box(BoxState::Idle));
}

#[test]
fn test_text_tool_places_box_at_upper_left_press() {
    let mut editor = two_boxes().editor();
    editor.send(Event::SelectedTextTool);
    assert_eq!(editor.cursor(), Cursor::Crosshair);

    hover(&mut editor, 300.0, 300.0);
    editor.pointer_down();
    assert!(editor.state().is_in(StateTag::DrawingText));
    hover(&mut editor, 250.0, 260.0);
    editor.pointer_down();

    let scene = editor.scene();
    let [id] = scene.selected_box_ids.as_slice() else {
        panic!("expected the text box to be selected");
    };
    let text = &scene.boxes[id];
    assert_eq!(text.kind, BoxKind::Text);
    assert_eq!(text.label, DEFAULT_TEXT_LABEL);
    assert_eq!(
        text.rect(),
        Rect::new(250.0, 260.0, TEXT_BOX_SIZE, TEXT_BOX_SIZE)
    );

    editor.pointer_up();
    assert!(editor.state().is_in(StateTag::SelectingIdle));
}

#[test]
fn test_switching_tools_mid_brush_clears_brush() {
    let mut editor = two_boxes().editor();
    hover(&mut editor, -5.0, -5.0);
    editor.pointer_down();
    hover(&mut editor, 20.0, 20.0);
    hover(&mut editor, 30.0, 30.0);
    assert!(editor.scene().brush.is_some());

    editor.send(Event::SelectedBoxTool);
    assert!(editor.scene().brush.is_none());
    assert_eq!(*editor.state(), ToolState::Box(BoxState::Idle));

    // The release lands in the new tool and does nothing.
    editor.pointer_up();
    assert_eq!(*editor.state(), ToolState::Box(BoxState::Idle));
}

#[test]
fn test_selecting_active_tool_again_is_a_no_op() {
    let mut editor = two_boxes().with_selection(&["A"]).editor();
    editor.send(Event::SelectedArrowTool);
    editor.send(Event::SelectedArrowTool);
    assert_eq!(editor.scene().pending_arrow_from.as_deref(), Some("A"));
    assert_eq!(editor.state().name(), "arrow_tool.creating_arrow");

    editor.send(Event::SelectedSelectTool);
    assert_eq!(editor.cursor(), Cursor::Default);
    assert_eq!(editor.state().name(), "select_tool.selecting_idle");
}
