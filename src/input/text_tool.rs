//! Text tool: a press arms the tool, a second press drops a fixed-size text
//! box at the upper-left of the two press points.

use super::context::Ctx;
use super::event::Event;
use super::state::{SelectState, TextState, ToolState};
use super::Transition;
use crate::constants::DEFAULT_TEXT_LABEL;
use crate::types::{BoxKind, CanvasBox, Rect};
use tracing::debug;
use uuid::Uuid;

pub(super) fn handle(state: &mut TextState, event: &Event, cx: &mut Ctx<'_>) -> Transition {
    match (state, event) {
        (TextState::Idle, Event::StartedPointing) => Transition::To(ToolState::Text(TextState::Drawing {
            origin: cx.scene.initial_pointer,
        })),
        (TextState::Drawing { origin }, Event::StartedPointing) => {
            let size = cx.config.text_box_size;
            let pointer = cx.pointer();
            let z = cx.scene.next_z();
            let mut text = CanvasBox::new(
                format!("t_{}", Uuid::new_v4().simple()),
                Rect::new(pointer.x.min(origin.x), pointer.y.min(origin.y), size, size),
                z,
            );
            text.kind = BoxKind::Text;
            text.label = DEFAULT_TEXT_LABEL.to_string();
            let id = text.id.clone();
            debug!(box_id = %id, "text box created");

            cx.scene.insert_box(text);
            cx.scene.select_box(&id);
            cx.update_bounds();
            cx.commit();
            Transition::Stay
        }
        (TextState::Drawing { .. }, Event::StoppedPointing) => {
            Transition::To(ToolState::Select(SelectState::Idle))
        }
        _ => Transition::Stay,
    }
}
