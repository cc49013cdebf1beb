//! Transform library over sets of boxes: snapshots for gestures, edge and
//! corner resizers, alignment, distribution and stretching.
//!
//! Every function here works on plain slices of boxes; callers decide which
//! boxes are affected and write the results back into the scene.

use crate::constants::MIN_BOUNDS_SIZE;
use crate::geometry::{bounding_box, safe_div};
use crate::types::{Alignment, Axis, BoxId, CanvasBox, Corner, Edge, Point, Rect};
use std::collections::HashMap;

// ============================================================================
// Snapshots
// ============================================================================

/// A box captured at gesture start, with its position normalized against
/// the envelope of the whole selection.
#[derive(Clone, Debug, PartialEq)]
pub struct BoxSnapshot {
    pub id: BoxId,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub nx: f64,
    pub ny: f64,
    pub nmx: f64,
    pub nmy: f64,
}

/// Selection state captured when a drag or resize begins. Gestures apply
/// absolute offsets from this snapshot, so repeated moves never drift.
#[derive(Clone, Debug, PartialEq)]
pub struct SelectionSnapshot {
    pub bounds: Rect,
    pub boxes: Vec<BoxSnapshot>,
}

impl SelectionSnapshot {
    /// `None` when `boxes` is empty.
    pub fn capture(boxes: &[CanvasBox]) -> Option<Self> {
        let bounds = bounding_box(boxes.iter().map(CanvasBox::rect))?;
        let snapshots = boxes
            .iter()
            .map(|b| BoxSnapshot {
                id: b.id.clone(),
                x: b.x,
                y: b.y,
                width: b.width,
                height: b.height,
                nx: safe_div(b.x - bounds.x, bounds.width),
                ny: safe_div(b.y - bounds.y, bounds.height),
                nmx: safe_div(b.max_x() - bounds.x, bounds.width),
                nmy: safe_div(b.max_y() - bounds.y, bounds.height),
            })
            .collect();

        Some(Self {
            bounds,
            boxes: snapshots,
        })
    }

    /// New absolute rect for every snapshotted box after moving by `delta`.
    pub fn translated(&self, delta: Point) -> Vec<(BoxId, Rect)> {
        self.boxes
            .iter()
            .map(|s| {
                (
                    s.id.clone(),
                    Rect::new(s.x + delta.x, s.y + delta.y, s.width, s.height),
                )
            })
            .collect()
    }

    /// Re-lay out `boxes` inside `bounds` along the given axes, preserving
    /// each box's normalized position. Boxes not in the snapshot are left
    /// untouched.
    pub fn fit_into(&self, bounds: Rect, boxes: &mut [CanvasBox], horizontal: bool, vertical: bool) {
        let lookup: HashMap<&str, &BoxSnapshot> =
            self.boxes.iter().map(|s| (s.id.as_str(), s)).collect();

        for b in boxes.iter_mut() {
            let Some(s) = lookup.get(b.id.as_str()) else {
                continue;
            };
            if horizontal {
                b.x = bounds.x + s.nx * bounds.width;
                b.width = (s.nmx - s.nx) * bounds.width;
            }
            if vertical {
                b.y = bounds.y + s.ny * bounds.height;
                b.height = (s.nmy - s.ny) * bounds.height;
            }
        }
    }
}

// ============================================================================
// Resizers
// ============================================================================

/// Drags one edge of the selection envelope.
#[derive(Clone, Debug, PartialEq)]
pub struct EdgeResizer {
    edge: Edge,
    snapshot: SelectionSnapshot,
}

impl EdgeResizer {
    pub fn new(edge: Edge, snapshot: SelectionSnapshot) -> Self {
        Self { edge, snapshot }
    }

    pub fn edge(&self) -> Edge {
        self.edge
    }

    /// Move the dragged edge to `point`, reposition `boxes` and return the
    /// new envelope.
    pub fn resize(&self, point: Point, boxes: &mut [CanvasBox]) -> Rect {
        let start = self.snapshot.bounds;
        let bounds = move_edge(start, self.edge, point);
        let horizontal = matches!(self.edge, Edge::Left | Edge::Right);
        self.snapshot.fit_into(bounds, boxes, horizontal, !horizontal);
        bounds
    }
}

/// Drags one corner of the selection envelope.
#[derive(Clone, Debug, PartialEq)]
pub struct CornerResizer {
    corner: Corner,
    snapshot: SelectionSnapshot,
}

impl CornerResizer {
    pub fn new(corner: Corner, snapshot: SelectionSnapshot) -> Self {
        Self { corner, snapshot }
    }

    pub fn corner(&self) -> Corner {
        self.corner
    }

    /// Move the dragged corner to `point`, reposition `boxes` and return the
    /// new envelope.
    pub fn resize(&self, point: Point, boxes: &mut [CanvasBox]) -> Rect {
        let (vertical, horizontal) = match self.corner {
            Corner::TopLeft => (Edge::Top, Edge::Left),
            Corner::TopRight => (Edge::Top, Edge::Right),
            Corner::BottomRight => (Edge::Bottom, Edge::Right),
            Corner::BottomLeft => (Edge::Bottom, Edge::Left),
        };
        let bounds = move_edge(move_edge(self.snapshot.bounds, vertical, point), horizontal, point);
        self.snapshot.fit_into(bounds, boxes, true, true);
        bounds
    }
}

/// Envelope with one edge moved to `point`, never thinner than
/// [`MIN_BOUNDS_SIZE`]. The opposite edge stays fixed.
fn move_edge(bounds: Rect, edge: Edge, point: Point) -> Rect {
    let mut next = bounds;
    match edge {
        Edge::Top => {
            let y = point.y.min(bounds.max_y() - MIN_BOUNDS_SIZE);
            next.y = y;
            next.height = bounds.max_y() - y;
        }
        Edge::Bottom => {
            next.height = (point.y - bounds.y).max(MIN_BOUNDS_SIZE);
        }
        Edge::Left => {
            let x = point.x.min(bounds.max_x() - MIN_BOUNDS_SIZE);
            next.x = x;
            next.width = bounds.max_x() - x;
        }
        Edge::Right => {
            next.width = (point.x - bounds.x).max(MIN_BOUNDS_SIZE);
        }
    }
    next
}

// ============================================================================
// Align / Distribute / Stretch
// ============================================================================

/// Align every box to the shared envelope. No-op for an empty slice.
pub fn align(boxes: &mut [CanvasBox], alignment: Alignment) {
    let Some(env) = bounding_box(boxes.iter().map(CanvasBox::rect)) else {
        return;
    };
    let center = env.center();

    for b in boxes.iter_mut() {
        match alignment {
            Alignment::Left => b.x = env.x,
            Alignment::Right => b.x = env.max_x() - b.width,
            Alignment::CenterX => b.x = center.x - b.width / 2.0,
            Alignment::Top => b.y = env.y,
            Alignment::Bottom => b.y = env.max_y() - b.height,
            Alignment::CenterY => b.y = center.y - b.height / 2.0,
        }
    }
}

/// Space box centers evenly between the outermost two along `axis`.
/// Fewer than three boxes are left alone.
pub fn distribute(boxes: &mut [CanvasBox], axis: Axis) {
    if boxes.len() < 3 {
        return;
    }

    let center = |b: &CanvasBox| match axis {
        Axis::X => b.x + b.width / 2.0,
        Axis::Y => b.y + b.height / 2.0,
    };

    let mut order: Vec<usize> = (0..boxes.len()).collect();
    order.sort_by(|&a, &b| center(&boxes[a]).total_cmp(&center(&boxes[b])));

    let first = center(&boxes[order[0]]);
    let last = center(&boxes[order[order.len() - 1]]);
    let step = (last - first) / (order.len() - 1) as f64;

    for (rank, &i) in order.iter().enumerate() {
        let target = first + step * rank as f64;
        let b = &mut boxes[i];
        match axis {
            Axis::X => b.x = target - b.width / 2.0,
            Axis::Y => b.y = target - b.height / 2.0,
        }
    }
}

/// Make every box span the shared envelope along `axis`.
pub fn stretch(boxes: &mut [CanvasBox], axis: Axis) {
    let Some(env) = bounding_box(boxes.iter().map(CanvasBox::rect)) else {
        return;
    };
    for b in boxes.iter_mut() {
        match axis {
            Axis::X => {
                b.x = env.x;
                b.width = env.width;
            }
            Axis::Y => {
                b.y = env.y;
                b.height = env.height;
            }
        }
    }
}
