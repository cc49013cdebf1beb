//! Box tool: press, drag out a rectangle, release to create it.

use super::context::Ctx;
use super::event::Event;
use super::state::{BoxState, Phase, SelectState, StateTag, ToolState};
use super::Transition;
use crate::types::{CanvasBox, Rect};
use tracing::debug;

pub(super) fn handle(state: &mut BoxState, event: &Event, cx: &mut Ctx<'_>) -> Transition {
    match (state, event) {
        (BoxState::Idle, Event::StartedPointing) => Transition::To(ToolState::Box(BoxState::Drawing {
            phase: Phase::Idle,
            origin: cx.scene.initial_pointer,
        })),
        (BoxState::Drawing { phase: Phase::Idle, origin }, Event::MovedPointer(_)) => {
            Transition::To(ToolState::Box(BoxState::Drawing {
                phase: Phase::Active,
                origin: *origin,
            }))
        }
        (BoxState::Drawing { phase: Phase::Idle, .. }, Event::StoppedPointing) => {
            Transition::To(ToolState::Box(BoxState::Idle))
        }
        (BoxState::Drawing { phase: Phase::Active, origin }, Event::MovedPointer(_)) => {
            let rect = Rect::from_corners(*origin, cx.pointer());
            if let Some(spawning) = cx.scene.spawning_box.as_mut() {
                spawning.set_rect(rect);
            }
            Transition::Stay
        }
        (BoxState::Drawing { phase: Phase::Active, .. }, Event::StoppedPointing) => {
            Transition::To(ToolState::Select(SelectState::Idle))
        }
        _ => Transition::Stay,
    }
}

pub(super) fn on_enter(tag: StateTag, state: &mut BoxState, cx: &mut Ctx<'_>) {
    if let (StateTag::DrawingBoxActive, BoxState::Drawing { origin, .. }) = (tag, state) {
        cx.commit();
        cx.scene.clear_selection();
        let id = cx.scene.next_box_id();
        let z = cx.scene.next_z();
        let rect = Rect::from_corners(*origin, cx.pointer());
        cx.scene.spawning_box = Some(CanvasBox::new(id, rect, z));
    }
}

pub(super) fn on_exit(tag: StateTag, _state: &mut BoxState, cx: &mut Ctx<'_>) {
    if tag != StateTag::DrawingBoxActive {
        return;
    }
    let Some(spawned) = cx.scene.spawning_box.take() else {
        return;
    };
    let id = spawned.id.clone();
    debug!(box_id = %id, "box created");
    cx.scene.insert_box(spawned);
    cx.scene.select_box(&id);
    cx.update_bounds();
    cx.commit();
}
