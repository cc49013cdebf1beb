//! Select tool: selection, commands over the selection, brush selection,
//! dragging and resizing.

use super::context::Ctx;
use super::event::Event;
use super::state::{Phase, SelectState, StateTag, ToolState};
use super::Transition;
use crate::transforms::{self, CornerResizer, EdgeResizer, SelectionSnapshot};
use crate::types::Brush;
use crate::worker::IndexRequest;
use tracing::debug;

pub(super) fn handle(state: &mut SelectState, event: &Event, cx: &mut Ctx<'_>) -> Transition {
    match state {
        SelectState::Idle => idle(event, cx),
        SelectState::PointingCanvas => pointing_canvas(event, cx),
        SelectState::BrushSelecting { .. } => brush_selecting(event, cx),
        SelectState::Dragging { phase, snapshot } => dragging(*phase, snapshot, event, cx),
        SelectState::EdgeResizing {
            edge,
            phase,
            resizer,
        } => match event {
            Event::MovedPointer(_) => {
                let Some(r) = resizer.as_ref() else {
                    return Transition::Stay;
                };
                let mut boxes = cx.scene.selected_boxes();
                let rect = r.resize(cx.pointer(), &mut boxes);
                cx.apply_gesture(&boxes, rect);
                match phase {
                    Phase::Idle => Transition::To(ToolState::Select(SelectState::EdgeResizing {
                        edge: *edge,
                        phase: Phase::Active,
                        resizer: resizer.take(),
                    })),
                    Phase::Active => Transition::Stay,
                }
            }
            Event::StoppedPointing => Transition::To(ToolState::Select(SelectState::Idle)),
            _ => Transition::Stay,
        },
        SelectState::CornerResizing {
            corner,
            phase,
            resizer,
        } => match event {
            Event::MovedPointer(_) => {
                let Some(r) = resizer.as_ref() else {
                    return Transition::Stay;
                };
                let mut boxes = cx.scene.selected_boxes();
                let rect = r.resize(cx.pointer(), &mut boxes);
                cx.apply_gesture(&boxes, rect);
                match phase {
                    Phase::Idle => Transition::To(ToolState::Select(SelectState::CornerResizing {
                        corner: *corner,
                        phase: Phase::Active,
                        resizer: resizer.take(),
                    })),
                    Phase::Active => Transition::Stay,
                }
            }
            Event::StoppedPointing => Transition::To(ToolState::Select(SelectState::Idle)),
            _ => Transition::Stay,
        },
    }
}

fn idle(event: &Event, cx: &mut Ctx<'_>) -> Transition {
    let has_boxes = cx.scene.has_selected_boxes();
    match event {
        Event::Cancelled if cx.scene.has_selection() => {
            cx.scene.clear_selection();
            cx.commit();
            Transition::Stay
        }
        Event::DeletedSelected if cx.scene.has_selection() => {
            let removed = cx.scene.delete_selected();
            debug!(removed, "deleted selected");
            cx.update_bounds();
            cx.commit();
            Transition::Stay
        }
        Event::Aligned(alignment) if has_boxes => {
            cx.scene
                .update_selected_boxes(|boxes| transforms::align(boxes, *alignment));
            cx.finish_transform();
            Transition::Stay
        }
        Event::Distributed(axis) if has_boxes => {
            cx.scene
                .update_selected_boxes(|boxes| transforms::distribute(boxes, *axis));
            cx.finish_transform();
            Transition::Stay
        }
        Event::Stretched(axis) if has_boxes => {
            // Stretch runs on the index worker; the reply is applied by the
            // editor when it arrives.
            cx.index.request(IndexRequest::Stretch {
                boxes: cx.scene.selected_boxes(),
                axis: *axis,
            });
            Transition::Stay
        }
        Event::StartedPointingCanvas => Transition::To(ToolState::Select(SelectState::PointingCanvas)),
        Event::StartedPointingBox { id } => {
            if !cx.scene.box_is_selected(id) {
                cx.scene.select_box(id);
                cx.update_bounds();
                cx.commit();
            }
            Transition::To(ToolState::Select(SelectState::dragging()))
        }
        Event::StartedPointingArrow { id } => {
            if !cx.scene.arrow_is_selected(id) {
                cx.scene.select_arrow(id);
                cx.commit();
            }
            Transition::Stay
        }
        Event::StartedPointingBounds if has_boxes => {
            Transition::To(ToolState::Select(SelectState::dragging()))
        }
        Event::StartedPointingBoundsEdge(edge) if has_boxes => {
            Transition::To(ToolState::Select(SelectState::edge_resizing(*edge)))
        }
        Event::StartedPointingBoundsCorner(corner) if has_boxes => {
            Transition::To(ToolState::Select(SelectState::corner_resizing(*corner)))
        }
        _ => Transition::Stay,
    }
}

fn pointing_canvas(event: &Event, cx: &mut Ctx<'_>) -> Transition {
    match event {
        Event::MovedPointer(_) => {
            let travelled = cx.pointer().distance_to(cx.scene.initial_pointer);
            if travelled > cx.config.brush_threshold {
                Transition::To(ToolState::Select(SelectState::BrushSelecting {
                    initial_ids: Vec::new(),
                }))
            } else {
                Transition::Stay
            }
        }
        Event::StoppedPointing => {
            if cx.scene.has_selection() {
                cx.scene.clear_selection();
                cx.commit();
            }
            Transition::To(ToolState::Select(SelectState::Idle))
        }
        _ => Transition::Stay,
    }
}

fn brush_selecting(event: &Event, cx: &mut Ctx<'_>) -> Transition {
    match event {
        Event::MovedPointer(_) => {
            let point = cx.pointer();
            cx.scene.brush = Some(Brush::new(cx.scene.initial_pointer, point));
            cx.index.request(IndexRequest::Selected { point });
            Transition::Stay
        }
        Event::StoppedPointing => Transition::To(ToolState::Select(SelectState::Idle)),
        _ => Transition::Stay,
    }
}

fn dragging(
    phase: Phase,
    snapshot: &mut Option<SelectionSnapshot>,
    event: &Event,
    cx: &mut Ctx<'_>,
) -> Transition {
    match event {
        Event::MovedPointer(_) => {
            if let Some(snapshot) = snapshot.as_ref() {
                let delta = cx.gesture_delta();
                cx.scene.place_boxes(snapshot.translated(delta));
                cx.scene.refresh_selected_arrows();
                cx.set_bounds(snapshot.bounds.translate(delta.x, delta.y));
            }
            match phase {
                Phase::Idle => Transition::To(ToolState::Select(SelectState::Dragging {
                    phase: Phase::Active,
                    snapshot: snapshot.take(),
                })),
                Phase::Active => Transition::Stay,
            }
        }
        Event::StoppedPointing => Transition::To(ToolState::Select(SelectState::Idle)),
        _ => Transition::Stay,
    }
}

// ============================================================================
// Enter / Exit Hooks
// ============================================================================

pub(super) fn on_enter(tag: StateTag, state: &mut SelectState, cx: &mut Ctx<'_>) {
    match (tag, state) {
        (StateTag::BrushSelecting, SelectState::BrushSelecting { initial_ids }) => {
            *initial_ids = std::mem::take(&mut cx.scene.selected_box_ids);
            cx.scene.clear_selection();
            cx.index.request(IndexRequest::Selecter {
                origin: cx.scene.initial_pointer,
            });
        }
        (StateTag::DragIdle, SelectState::Dragging { snapshot, .. }) => {
            *snapshot = SelectionSnapshot::capture(&cx.scene.selected_boxes());
        }
        (StateTag::EdgeResizeIdle, SelectState::EdgeResizing { edge, resizer, .. }) => {
            cx.scene.refresh_selected_arrows();
            cx.update_bounds();
            *resizer = SelectionSnapshot::capture(&cx.scene.selected_boxes())
                .map(|snapshot| EdgeResizer::new(*edge, snapshot));
        }
        (StateTag::CornerResizeIdle, SelectState::CornerResizing { corner, resizer, .. }) => {
            cx.scene.refresh_selected_arrows();
            cx.update_bounds();
            *resizer = SelectionSnapshot::capture(&cx.scene.selected_boxes())
                .map(|snapshot| CornerResizer::new(*corner, snapshot));
        }
        _ => {}
    }
}

pub(super) fn on_exit(tag: StateTag, state: &mut SelectState, cx: &mut Ctx<'_>) {
    match (tag, state) {
        (StateTag::BrushSelecting, SelectState::BrushSelecting { initial_ids }) => {
            cx.scene.brush = None;
            cx.update_bounds();
            if cx.scene.selected_box_ids != *initial_ids {
                cx.commit();
            }
        }
        (StateTag::DragActive | StateTag::EdgeResizeActive | StateTag::CornerResizeActive, _) => {
            cx.update_bounds();
            cx.commit();
        }
        _ => {}
    }
}
