//! Arrow tool: pick a source box (or start from the selected one), then a
//! target box.

use super::context::Ctx;
use super::event::Event;
use super::state::{ArrowState, SelectState, StateTag, ToolState};
use super::Transition;
use crate::types::Endpoint;
use tracing::{debug, info};

pub(super) fn handle(_state: &mut ArrowState, event: &Event, cx: &mut Ctx<'_>) -> Transition {
    match event {
        Event::StartedPointingBox { id } => {
            let Some(from) = cx.scene.pending_arrow_from.clone() else {
                cx.scene.pending_arrow_from = Some(id.clone());
                cx.scene.select_box(id);
                cx.update_bounds();
                return Transition::Stay;
            };
            if from == *id {
                debug!(box_id = %id, "arrow target is its own source");
                return Transition::Stay;
            }
            if let Some(arrow_id) =
                cx.scene
                    .add_arrow(Endpoint::boxed(from.as_str()), Endpoint::boxed(id.as_str()), false)
            {
                info!(arrow_id = %arrow_id, from = %from, to = %id, "arrow created");
                cx.scene.select_box(id);
                cx.update_bounds();
                cx.commit();
            }
            Transition::To(ToolState::Select(SelectState::Idle))
        }
        Event::Cancelled => Transition::To(ToolState::Select(SelectState::Idle)),
        _ => Transition::Stay,
    }
}

pub(super) fn on_enter(tag: StateTag, cx: &mut Ctx<'_>) {
    if tag != StateTag::CreatingArrow {
        return;
    }
    cx.scene.pending_arrow_from = match cx.scene.selected_box_ids.as_slice() {
        [only] => Some(only.clone()),
        _ => None,
    };
}

pub(super) fn on_exit(tag: StateTag, cx: &mut Ctx<'_>) {
    if tag == StateTag::CreatingArrow {
        cx.scene.pending_arrow_from = None;
    }
}
