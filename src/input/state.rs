//! Interaction state tree.
//!
//! The editor is always in exactly one leaf of this tree. Gesture data
//! (snapshots, resizers, origins) lives inside the variant that needs it,
//! so it cannot outlive the gesture.
//!
//! ```text
//! select_tool
//!   selecting_idle
//!   pointing_canvas
//!   brush_selecting
//!   dragging            { drag_idle | drag_active }
//!   edge_resizing       { edge_resize_idle | edge_resize_active }
//!   corner_resizing     { corner_resize_idle | corner_resize_active }
//! box_tool
//!   box_idle
//!   drawing_box         { drawing_box_idle | drawing_box_active }
//! arrow_tool
//!   creating_arrow
//! text_tool
//!   text_idle
//!   drawing_text
//! ```
//!
//! Transitions exit every node below the deepest common ancestor (leaf
//! first) and then enter every new node (root first).

use crate::transforms::{CornerResizer, EdgeResizer, SelectionSnapshot};
use crate::types::{BoxId, Corner, Edge, Point};

/// Whether a two-phase gesture has started moving yet.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    Active,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ToolState {
    Select(SelectState),
    Box(BoxState),
    Arrow(ArrowState),
    Text(TextState),
}

impl Default for ToolState {
    fn default() -> Self {
        ToolState::Select(SelectState::Idle)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum SelectState {
    Idle,
    PointingCanvas,
    BrushSelecting {
        /// Selection when the brush started.
        initial_ids: Vec<BoxId>,
    },
    Dragging {
        phase: Phase,
        snapshot: Option<SelectionSnapshot>,
    },
    EdgeResizing {
        edge: Edge,
        phase: Phase,
        resizer: Option<EdgeResizer>,
    },
    CornerResizing {
        corner: Corner,
        phase: Phase,
        resizer: Option<CornerResizer>,
    },
}

impl SelectState {
    pub fn dragging() -> Self {
        SelectState::Dragging {
            phase: Phase::Idle,
            snapshot: None,
        }
    }

    pub fn edge_resizing(edge: Edge) -> Self {
        SelectState::EdgeResizing {
            edge,
            phase: Phase::Idle,
            resizer: None,
        }
    }

    pub fn corner_resizing(corner: Corner) -> Self {
        SelectState::CornerResizing {
            corner,
            phase: Phase::Idle,
            resizer: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum BoxState {
    Idle,
    Drawing { phase: Phase, origin: Point },
}

#[derive(Clone, Debug, PartialEq)]
pub enum ArrowState {
    Creating,
}

#[derive(Clone, Debug, PartialEq)]
pub enum TextState {
    Idle,
    Drawing { origin: Point },
}

/// One node of the state tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StateTag {
    SelectTool,
    SelectingIdle,
    PointingCanvas,
    BrushSelecting,
    Dragging,
    DragIdle,
    DragActive,
    EdgeResizing,
    EdgeResizeIdle,
    EdgeResizeActive,
    CornerResizing,
    CornerResizeIdle,
    CornerResizeActive,
    BoxTool,
    BoxIdle,
    DrawingBox,
    DrawingBoxIdle,
    DrawingBoxActive,
    ArrowTool,
    CreatingArrow,
    TextTool,
    TextIdle,
    DrawingText,
}

impl StateTag {
    pub fn name(self) -> &'static str {
        match self {
            StateTag::SelectTool => "select_tool",
            StateTag::SelectingIdle => "selecting_idle",
            StateTag::PointingCanvas => "pointing_canvas",
            StateTag::BrushSelecting => "brush_selecting",
            StateTag::Dragging => "dragging",
            StateTag::DragIdle => "drag_idle",
            StateTag::DragActive => "drag_active",
            StateTag::EdgeResizing => "edge_resizing",
            StateTag::EdgeResizeIdle => "edge_resize_idle",
            StateTag::EdgeResizeActive => "edge_resize_active",
            StateTag::CornerResizing => "corner_resizing",
            StateTag::CornerResizeIdle => "corner_resize_idle",
            StateTag::CornerResizeActive => "corner_resize_active",
            StateTag::BoxTool => "box_tool",
            StateTag::BoxIdle => "box_idle",
            StateTag::DrawingBox => "drawing_box",
            StateTag::DrawingBoxIdle => "drawing_box_idle",
            StateTag::DrawingBoxActive => "drawing_box_active",
            StateTag::ArrowTool => "arrow_tool",
            StateTag::CreatingArrow => "creating_arrow",
            StateTag::TextTool => "text_tool",
            StateTag::TextIdle => "text_idle",
            StateTag::DrawingText => "drawing_text",
        }
    }
}

fn phase_tag(phase: Phase, idle: StateTag, active: StateTag) -> StateTag {
    match phase {
        Phase::Idle => idle,
        Phase::Active => active,
    }
}

impl ToolState {
    /// Tags from the root down to the current leaf.
    pub fn path(&self) -> Vec<StateTag> {
        use StateTag as T;
        match self {
            ToolState::Select(s) => match s {
                SelectState::Idle => vec![T::SelectTool, T::SelectingIdle],
                SelectState::PointingCanvas => vec![T::SelectTool, T::PointingCanvas],
                SelectState::BrushSelecting { .. } => vec![T::SelectTool, T::BrushSelecting],
                SelectState::Dragging { phase, .. } => vec![
                    T::SelectTool,
                    T::Dragging,
                    phase_tag(*phase, T::DragIdle, T::DragActive),
                ],
                SelectState::EdgeResizing { phase, .. } => vec![
                    T::SelectTool,
                    T::EdgeResizing,
                    phase_tag(*phase, T::EdgeResizeIdle, T::EdgeResizeActive),
                ],
                SelectState::CornerResizing { phase, .. } => vec![
                    T::SelectTool,
                    T::CornerResizing,
                    phase_tag(*phase, T::CornerResizeIdle, T::CornerResizeActive),
                ],
            },
            ToolState::Box(BoxState::Idle) => vec![T::BoxTool, T::BoxIdle],
            ToolState::Box(BoxState::Drawing { phase, .. }) => vec![
                T::BoxTool,
                T::DrawingBox,
                phase_tag(*phase, T::DrawingBoxIdle, T::DrawingBoxActive),
            ],
            ToolState::Arrow(ArrowState::Creating) => vec![T::ArrowTool, T::CreatingArrow],
            ToolState::Text(TextState::Idle) => vec![T::TextTool, T::TextIdle],
            ToolState::Text(TextState::Drawing { .. }) => vec![T::TextTool, T::DrawingText],
        }
    }

    /// Dotted path, e.g. `select_tool.dragging.drag_active`.
    pub fn name(&self) -> String {
        self.path()
            .into_iter()
            .map(StateTag::name)
            .collect::<Vec<_>>()
            .join(".")
    }

    /// Whether `tag` is on the current path.
    pub fn is_in(&self, tag: StateTag) -> bool {
        self.path().contains(&tag)
    }

    /// Resting leaf of a tool, with no gesture in progress.
    pub fn is_idle(&self) -> bool {
        matches!(
            self,
            ToolState::Select(SelectState::Idle)
                | ToolState::Box(BoxState::Idle)
                | ToolState::Arrow(ArrowState::Creating)
                | ToolState::Text(TextState::Idle)
        )
    }

    pub fn is_brush_selecting(&self) -> bool {
        matches!(self, ToolState::Select(SelectState::BrushSelecting { .. }))
    }

    /// Whether a creation tool (box, arrow, text) is active.
    pub fn is_creating(&self) -> bool {
        !matches!(self, ToolState::Select(_))
    }
}
