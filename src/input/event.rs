//! Closed set of events the interaction machine understands.

use crate::types::{Alignment, ArrowId, Axis, BoxId, Corner, Edge, Point, Rect};

#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    // Pointer
    /// Any press; records the gesture origin.
    StartedPointing,
    StartedPointingCanvas,
    StartedPointingBox { id: BoxId },
    StartedPointingArrow { id: ArrowId },
    StartedPointingBounds,
    StartedPointingBoundsEdge(Edge),
    StartedPointingBoundsCorner(Corner),
    /// Pointer moved to this screen position.
    MovedPointer(Point),
    StoppedPointing,

    // Viewport
    /// Wheel zoom by `0.98^delta`, pinned at a screen point.
    Zoomed { point: Point, delta: f64 },
    Panned { dx: f64, dy: f64 },
    /// The canvas element was laid out at this screen frame.
    UpdatedViewBox(Rect),
    ScrolledViewport(Point),

    // Tools
    SelectedSelectTool,
    SelectedBoxTool,
    SelectedArrowTool,
    SelectedTextTool,
    Cancelled,

    // Commands
    DeletedSelected,
    Aligned(Alignment),
    Distributed(Axis),
    Stretched(Axis),
    Undo,
    Redo,
    /// Replace the box selection wholesale.
    ForcedIds(Vec<BoxId>),
    /// Replace the scene with this many random boxes.
    ResetBoxes(usize),
}

impl Event {
    pub fn name(&self) -> &'static str {
        match self {
            Event::StartedPointing => "started_pointing",
            Event::StartedPointingCanvas => "started_pointing_canvas",
            Event::StartedPointingBox { .. } => "started_pointing_box",
            Event::StartedPointingArrow { .. } => "started_pointing_arrow",
            Event::StartedPointingBounds => "started_pointing_bounds",
            Event::StartedPointingBoundsEdge(_) => "started_pointing_bounds_edge",
            Event::StartedPointingBoundsCorner(_) => "started_pointing_bounds_corner",
            Event::MovedPointer(_) => "moved_pointer",
            Event::StoppedPointing => "stopped_pointing",
            Event::Zoomed { .. } => "zoomed",
            Event::Panned { .. } => "panned",
            Event::UpdatedViewBox(_) => "updated_viewbox",
            Event::ScrolledViewport(_) => "scrolled_viewport",
            Event::SelectedSelectTool => "selected_select_tool",
            Event::SelectedBoxTool => "selected_box_tool",
            Event::SelectedArrowTool => "selected_arrow_tool",
            Event::SelectedTextTool => "selected_text_tool",
            Event::Cancelled => "cancelled",
            Event::DeletedSelected => "deleted_selected",
            Event::Aligned(_) => "aligned",
            Event::Distributed(_) => "distributed",
            Event::Stretched(_) => "stretched",
            Event::Undo => "undo",
            Event::Redo => "redo",
            Event::ForcedIds(_) => "forced_ids",
            Event::ResetBoxes(_) => "reset_boxes",
        }
    }

    /// Pointer moves fire constantly; keep them out of debug logs.
    pub fn is_noisy(&self) -> bool {
        matches!(self, Event::MovedPointer(_) | Event::ForcedIds(_))
    }
}
