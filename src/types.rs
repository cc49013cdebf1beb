//! Core types for the arrowboard diagram model.
//!
//! This module defines the persistent data model (boxes and arrows), the
//! transient interaction records (brush, hit result, camera) and the small
//! geometric value types everything else is built from.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Identifier of a box in the scene.
pub type BoxId = String;

/// Identifier of an arrow in the scene.
pub type ArrowId = String;

// ============================================================================
// Geometric Primitives
// ============================================================================

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn distance_to(self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    #[inline]
    pub fn offset(self, dx: f64, dy: f64) -> Point {
        Point::new(self.x + dx, self.y + dy)
    }

    /// Linear interpolation towards `other`.
    #[inline]
    pub fn lerp(self, other: Point, t: f64) -> Point {
        Point::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }

    /// Angle of the vector from `self` to `other`, in radians.
    #[inline]
    pub fn angle_to(self, other: Point) -> f64 {
        (other.y - self.y).atan2(other.x - self.x)
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Axis-aligned rectangle in document coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[inline]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle spanning two arbitrary corners, normalized so width and
    /// height are never negative.
    pub fn from_corners(a: Point, b: Point) -> Self {
        let x = a.x.min(b.x);
        let y = a.y.min(b.y);
        Self::new(x, y, (a.x - b.x).abs(), (a.y - b.y).abs())
    }

    #[inline]
    pub fn max_x(&self) -> f64 {
        self.x + self.width
    }

    #[inline]
    pub fn max_y(&self) -> f64 {
        self.y + self.height
    }

    #[inline]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn translate(&self, dx: f64, dy: f64) -> Rect {
        Rect::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// Grow the rectangle by `amount` on every side.
    pub fn expand(&self, amount: f64) -> Rect {
        Rect::new(
            self.x - amount,
            self.y - amount,
            self.width + amount * 2.0,
            self.height + amount * 2.0,
        )
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.width.is_finite() && self.height.is_finite()
    }
}

// ============================================================================
// Persistent Model
// ============================================================================

/// What a box renders as. Text boxes are created by the text tool.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoxKind {
    #[default]
    Rect,
    Text,
}

/// A rectangle on the canvas that arrows can connect to.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CanvasBox {
    pub id: BoxId,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Stacking order; higher draws (and hits) on top.
    pub z: i64,
    pub label: String,
    pub color: String,
    #[serde(default)]
    pub kind: BoxKind,
    /// Arrows that reference this box as either endpoint.
    #[serde(default)]
    pub arrow_ids: BTreeSet<ArrowId>,
}

impl CanvasBox {
    pub fn new(id: impl Into<BoxId>, rect: Rect, z: i64) -> Self {
        Self {
            id: id.into(),
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
            z,
            label: String::new(),
            color: crate::constants::DEFAULT_BOX_COLOR.to_string(),
            kind: BoxKind::Rect,
            arrow_ids: BTreeSet::new(),
        }
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    pub fn set_rect(&mut self, rect: Rect) {
        self.x = rect.x;
        self.y = rect.y;
        self.width = rect.width;
        self.height = rect.height;
    }

    #[inline]
    pub fn max_x(&self) -> f64 {
        self.x + self.width
    }

    #[inline]
    pub fn max_y(&self) -> f64 {
        self.y + self.height
    }
}

/// One end of an arrow: either attached to a box or floating at a point.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Endpoint {
    Box { id: BoxId },
    Point { x: f64, y: f64 },
}

impl Endpoint {
    pub fn boxed(id: impl Into<BoxId>) -> Self {
        Endpoint::Box { id: id.into() }
    }

    pub fn point(point: Point) -> Self {
        Endpoint::Point {
            x: point.x,
            y: point.y,
        }
    }

    pub fn box_id(&self) -> Option<&str> {
        match self {
            Endpoint::Box { id } => Some(id),
            Endpoint::Point { .. } => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArrowKind {
    BoxToBox,
    BoxToPoint,
    PointToBox,
    PointToPoint,
}

/// A directed connector between two endpoints.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Arrow {
    pub id: ArrowId,
    pub from: Endpoint,
    pub to: Endpoint,
    #[serde(default)]
    pub flip: bool,
    #[serde(default)]
    pub label: String,
}

impl Arrow {
    /// The arrow kind always follows from its endpoints.
    pub fn kind(&self) -> ArrowKind {
        match (&self.from, &self.to) {
            (Endpoint::Box { .. }, Endpoint::Box { .. }) => ArrowKind::BoxToBox,
            (Endpoint::Box { .. }, Endpoint::Point { .. }) => ArrowKind::BoxToPoint,
            (Endpoint::Point { .. }, Endpoint::Box { .. }) => ArrowKind::PointToBox,
            (Endpoint::Point { .. }, Endpoint::Point { .. }) => ArrowKind::PointToPoint,
        }
    }

    pub fn references_box(&self, box_id: &str) -> bool {
        self.from.box_id() == Some(box_id) || self.to.box_id() == Some(box_id)
    }
}

/// Cached rendering geometry of an arrow: a quadratic curve plus the angle
/// of the arrowhead at its end.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArrowGeometry {
    pub start: Point,
    pub control: Point,
    pub end: Point,
    pub end_angle: f64,
}

impl ArrowGeometry {
    /// Flat `[sx, sy, cx, cy, ex, ey, angle]` form handed to renderers.
    pub fn to_array(&self) -> [f64; 7] {
        [
            self.start.x,
            self.start.y,
            self.control.x,
            self.control.y,
            self.end.x,
            self.end.y,
            self.end_angle,
        ]
    }
}

// ============================================================================
// Interaction Records
// ============================================================================

/// Rubber-band rectangle anchored at the gesture origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Brush {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl Brush {
    pub fn new(origin: Point, current: Point) -> Self {
        Self {
            x0: origin.x,
            y0: origin.y,
            x1: current.x,
            y1: current.y,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_corners(Point::new(self.x0, self.y0), Point::new(self.x1, self.y1))
    }
}

/// Pan offset and zoom of the viewport.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub x: f64,
    pub y: f64,
    pub zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            zoom: crate::constants::DEFAULT_ZOOM,
        }
    }
}

/// Screen-space frame of the canvas element plus its page scroll.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ViewBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub scroll_x: f64,
    pub scroll_y: f64,
}

/// Latest pointer position in both coordinate spaces.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerState {
    pub screen: Point,
    pub document: Point,
    /// Document-space movement since the previous pointer event.
    pub delta: Point,
}

/// Corner handles of the selection bounds, in index order 0..=3.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomRight,
    BottomLeft,
}

impl Corner {
    pub const ALL: [Corner; 4] = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomRight,
        Corner::BottomLeft,
    ];

    pub fn index(self) -> usize {
        self as usize
    }
}

/// Edge handles of the selection bounds, in index order 0..=3.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Top, Edge::Right, Edge::Bottom, Edge::Left];

    pub fn index(self) -> usize {
        self as usize
    }
}

/// What the pointer is currently over.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Hit {
    #[default]
    Canvas,
    Bounds,
    BoundsCorner(Corner),
    BoundsEdge(Edge),
    Box(BoxId),
    Arrow(ArrowId),
}

/// Cursor the renderer should show for a hit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Cursor {
    #[default]
    Default,
    Pointer,
    Move,
    NwseResize,
    NeswResize,
    NsResize,
    EwResize,
    /// Creation tools.
    Crosshair,
}

impl Hit {
    pub fn cursor(&self) -> Cursor {
        match self {
            Hit::Canvas => Cursor::Default,
            Hit::Bounds => Cursor::Move,
            Hit::BoundsCorner(corner) if corner.index() % 2 == 0 => Cursor::NwseResize,
            Hit::BoundsCorner(_) => Cursor::NeswResize,
            Hit::BoundsEdge(edge) if edge.index() % 2 == 0 => Cursor::NsResize,
            Hit::BoundsEdge(_) => Cursor::EwResize,
            Hit::Box(_) | Hit::Arrow(_) => Cursor::Pointer,
        }
    }
}

/// Axis selector for distribute and stretch commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
}

/// Alignment commands over the selected boxes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Alignment {
    Left,
    Right,
    CenterX,
    Top,
    Bottom,
    CenterY,
}
