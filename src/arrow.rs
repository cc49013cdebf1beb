//! Arrow geometry: turns an [`Arrow`] and the boxes it references into a
//! quadratic curve plus arrowhead angle.
//!
//! Box endpoints anchor at the midpoints of the facing edges, picked by the
//! dominant axis between the two box centers. Short arrows bow sideways,
//! long ones flatten out. Any degenerate configuration falls back to a
//! straight line instead of failing.

use crate::constants::{ARROW_BOW, ARROW_STRETCH, ARROW_STRETCH_MAX, POINT_ENDPOINT_SIZE};
use crate::geometry::{modulate, project, rects_collide};
use crate::types::{Arrow, ArrowGeometry, BoxId, CanvasBox, Endpoint, Point, Rect};
use std::collections::BTreeMap;
use std::f64::consts::FRAC_PI_2;
use tracing::warn;

/// Compute geometry for `arrow`. Returns `None` when an endpoint refers to
/// a box that does not exist.
pub fn compute_arrow(arrow: &Arrow, boxes: &BTreeMap<BoxId, CanvasBox>) -> Option<ArrowGeometry> {
    let from = endpoint_rect(&arrow.from, boxes)?;
    let to = endpoint_rect(&arrow.to, boxes)?;
    Some(box_to_box(from, to, arrow.flip))
}

fn endpoint_rect(endpoint: &Endpoint, boxes: &BTreeMap<BoxId, CanvasBox>) -> Option<Rect> {
    match endpoint {
        Endpoint::Box { id } => boxes.get(id).map(CanvasBox::rect),
        Endpoint::Point { x, y } => Some(point_rect(Point::new(*x, *y))),
    }
}

/// Stand-in rectangle for a free point endpoint.
pub fn point_rect(point: Point) -> Rect {
    Rect::new(point.x, point.y, POINT_ENDPOINT_SIZE, POINT_ENDPOINT_SIZE)
}

/// Geometry of an arrow between two rectangles.
pub fn box_to_box(from: Rect, to: Rect, flip: bool) -> ArrowGeometry {
    let a = from.center();
    let b = to.center();

    if !from.is_finite() || !to.is_finite() {
        warn!(?from, ?to, "non-finite arrow endpoint, drawing straight");
        return straight(a, b);
    }
    if from.width <= 0.0 || from.height <= 0.0 || to.width <= 0.0 || to.height <= 0.0 {
        warn!(?from, ?to, "zero-size arrow endpoint, drawing straight");
        return straight(a, b);
    }
    if rects_collide(from, to) {
        return straight(a, b);
    }

    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let (start, end) = if dx.abs() >= dy.abs() {
        if dx >= 0.0 {
            (Point::new(from.max_x(), a.y), Point::new(to.x, b.y))
        } else {
            (Point::new(from.x, a.y), Point::new(to.max_x(), b.y))
        }
    } else if dy >= 0.0 {
        (Point::new(a.x, from.max_y()), Point::new(b.x, to.y))
    } else {
        (Point::new(a.x, from.y), Point::new(b.x, to.max_y()))
    };

    curve(start, end, flip)
}

fn curve(start: Point, end: Point, flip: bool) -> ArrowGeometry {
    let distance = start.distance_to(end);
    if !distance.is_finite() || distance < f64::EPSILON {
        warn!(?start, ?end, "degenerate arrow, drawing straight");
        return straight(start, end);
    }

    let arc = ARROW_BOW + modulate(distance, (0.0, ARROW_STRETCH_MAX), (1.0, 0.0)) * ARROW_STRETCH;
    let side = if flip { -1.0 } else { 1.0 };
    let mid = start.lerp(end, 0.5);
    let control = project(
        mid,
        start.angle_to(end) + side * FRAC_PI_2,
        distance * arc * 0.5,
    );

    let end_angle = if control.distance_to(end) < f64::EPSILON {
        start.angle_to(end)
    } else {
        control.angle_to(end)
    };

    ArrowGeometry {
        start,
        control,
        end,
        end_angle,
    }
}

/// Straight fallback: control point on the midpoint.
fn straight(start: Point, end: Point) -> ArrowGeometry {
    let end_angle = if start == end { 0.0 } else { start.angle_to(end) };
    ArrowGeometry {
        start,
        control: start.lerp(end, 0.5),
        end,
        end_angle,
    }
}
