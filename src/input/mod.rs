//! Interaction state machine for the canvas.
//!
//! Every input (pointer, wheel, keyboard command, worker reply) becomes an
//! [`Event`] that runs one transition to completion against the scene.
//!
//! ## Architecture
//!
//! The active state is a [`ToolState`] tree with one leaf path at a time.
//! Handlers return a [`Transition`]; moving to a new leaf runs exit hooks
//! leaf-first up to the common ancestor, then enter hooks down to the new
//! leaf. Viewport events, undo/redo and forced selections are handled at the
//! root before the active tool sees the event.
//!
//! ## Modules
//!
//! - `state` - State tree enum and path helpers
//! - `event` - The closed event set
//! - `context` - Handler context and commit helpers
//! - `coords` - Screen/document coordinate conversion
//! - `camera` - Pointer tracking, zoom, pan and view box handlers
//! - `select_tool` - Selection, commands, brush, drag and resize
//! - `box_tool` / `arrow_tool` / `text_tool` - Creation tools

mod arrow_tool;
mod box_tool;
pub mod camera;
mod context;
pub mod coords;
mod event;
mod select_tool;
mod state;
mod text_tool;

pub use context::Ctx;
pub use event::Event;
pub use state::{ArrowState, BoxState, Phase, SelectState, StateTag, TextState, ToolState};

use crate::profile_scope;
use crate::seed::{Linking, SeedArea, seed_scene};
use tracing::{debug, info, trace};

/// Result of handling an event in the active state.
#[derive(Debug)]
pub enum Transition {
    Stay,
    To(ToolState),
}

/// Run one event to completion.
pub fn dispatch(state: &mut ToolState, event: &Event, cx: &mut Ctx<'_>) {
    profile_scope!("dispatch");
    if event.is_noisy() {
        trace!(event = event.name(), state = %state.name(), "dispatch");
    } else {
        debug!(event = event.name(), state = %state.name(), "dispatch");
    }

    if handle_root(state, event, cx) {
        return;
    }

    let transition = match event {
        Event::SelectedSelectTool => tool_switch(state, ToolState::Select(SelectState::Idle)),
        Event::SelectedBoxTool => tool_switch(state, ToolState::Box(BoxState::Idle)),
        Event::SelectedArrowTool => tool_switch(state, ToolState::Arrow(ArrowState::Creating)),
        Event::SelectedTextTool => tool_switch(state, ToolState::Text(TextState::Idle)),
        _ => match state {
            ToolState::Select(s) => select_tool::handle(s, event, cx),
            ToolState::Box(s) => box_tool::handle(s, event, cx),
            ToolState::Arrow(s) => arrow_tool::handle(s, event, cx),
            ToolState::Text(s) => text_tool::handle(s, event, cx),
        },
    };

    if let Transition::To(next) = transition {
        transition_to(state, next, cx);
    }
}

/// Root-level handlers. Returns true when the event is fully consumed.
fn handle_root(state: &ToolState, event: &Event, cx: &mut Ctx<'_>) -> bool {
    match event {
        Event::MovedPointer(screen) => camera::update_pointer(cx.scene, *screen),
        Event::StartedPointing => cx.scene.initial_pointer = cx.pointer(),
        Event::Zoomed { point, delta } => {
            camera::zoom_at(cx.scene, *point, *delta);
            if let Some(rect) = cx.scene.bounds.as_ref().map(|b| b.rect) {
                cx.set_bounds(rect);
            }
            // Arrow padding in the hit index is zoom-dependent.
            cx.scene.mark_dirty();
            return true;
        }
        Event::Panned { dx, dy } => {
            camera::pan(cx.scene, *dx, *dy);
            return true;
        }
        Event::UpdatedViewBox(frame) => {
            camera::update_viewbox(cx.scene, *frame);
            return true;
        }
        Event::ScrolledViewport(scroll) => {
            camera::scroll_viewport(cx.scene, *scroll);
            return true;
        }
        Event::ForcedIds(ids) => {
            cx.force_selection(ids.clone(), state.is_brush_selecting());
            return true;
        }
        Event::Undo | Event::Redo | Event::ResetBoxes(_) if !state.is_idle() => {
            debug!(event = event.name(), state = %state.name(), "ignored mid-gesture");
            return true;
        }
        Event::Undo => {
            cx.undo();
            return true;
        }
        Event::Redo => {
            cx.redo();
            return true;
        }
        Event::ResetBoxes(count) => {
            let snapshot = seed_scene(&mut rand::thread_rng(), *count, SeedArea::RESET, Linking::Ring);
            info!(boxes = snapshot.boxes.len(), "reset boxes");
            cx.replace(snapshot);
            cx.commit();
            return true;
        }
        _ => {}
    }
    false
}

fn tool_switch(state: &ToolState, target: ToolState) -> Transition {
    if state.path() == target.path() {
        Transition::Stay
    } else {
        Transition::To(target)
    }
}

/// Exit the old path below the common ancestor, then enter the new one.
fn transition_to(state: &mut ToolState, next: ToolState, cx: &mut Ctx<'_>) {
    let from = state.path();
    let to = next.path();
    let shared = from
        .iter()
        .zip(&to)
        .take_while(|(a, b)| a == b)
        .count();

    for tag in from[shared..].iter().rev() {
        exit(*tag, state, cx);
    }
    debug!(from = %state.name(), to = %next.name(), "transition");
    *state = next;
    for tag in &to[shared..] {
        enter(*tag, state, cx);
    }
}

fn enter(tag: StateTag, state: &mut ToolState, cx: &mut Ctx<'_>) {
    match state {
        ToolState::Select(s) => select_tool::on_enter(tag, s, cx),
        ToolState::Box(s) => box_tool::on_enter(tag, s, cx),
        ToolState::Arrow(_) => arrow_tool::on_enter(tag, cx),
        ToolState::Text(_) => {}
    }
}

fn exit(tag: StateTag, state: &mut ToolState, cx: &mut Ctx<'_>) {
    match state {
        ToolState::Select(s) => select_tool::on_exit(tag, s, cx),
        ToolState::Box(s) => box_tool::on_exit(tag, s, cx),
        ToolState::Arrow(_) => arrow_tool::on_exit(tag, cx),
        ToolState::Text(_) => {}
    }
}
