//! Pure geometry helpers: rectangle predicates, envelopes and quadratic
//! Bézier curves.

use crate::types::{Point, Rect};

/// Whether `point` lies within `rect` grown by `padding / 2` on each side.
/// Boundaries count as inside.
pub fn point_in_rect(point: Point, rect: Rect, padding: f64) -> bool {
    let r = padding / 2.0;
    point.x >= rect.x - r
        && point.x <= rect.max_x() + r
        && point.y >= rect.y - r
        && point.y <= rect.max_y() + r
}

/// Closed-interval overlap test; touching edges collide.
pub fn rects_collide(a: Rect, b: Rect) -> bool {
    a.x <= b.max_x() && a.max_x() >= b.x && a.y <= b.max_y() && a.max_y() >= b.y
}

/// Smallest rectangle containing every input rectangle.
pub fn bounding_box<I>(rects: I) -> Option<Rect>
where
    I: IntoIterator<Item = Rect>,
{
    let mut iter = rects.into_iter();
    let first = iter.next()?;
    let (mut min_x, mut min_y) = (first.x, first.y);
    let (mut max_x, mut max_y) = (first.max_x(), first.max_y());

    for rect in iter {
        min_x = min_x.min(rect.x);
        min_y = min_y.min(rect.y);
        max_x = max_x.max(rect.max_x());
        max_y = max_y.max(rect.max_y());
    }

    Some(Rect::new(min_x, min_y, max_x - min_x, max_y - min_y))
}

/// Corners in top-left, top-right, bottom-right, bottom-left order.
pub fn corners(rect: Rect) -> [Point; 4] {
    [
        Point::new(rect.x, rect.y),
        Point::new(rect.max_x(), rect.y),
        Point::new(rect.max_x(), rect.max_y()),
        Point::new(rect.x, rect.max_y()),
    ]
}

/// Edges as segments in top, right, bottom, left order.
pub fn edges(rect: Rect) -> [(Point, Point); 4] {
    let [tl, tr, br, bl] = corners(rect);
    [(tl, tr), (tr, br), (br, bl), (bl, tl)]
}

/// Division that yields zero instead of NaN/inf for a zero denominator.
#[inline]
pub fn safe_div(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

/// Map `value` from `[a0, a1]` onto `[b0, b1]`, clamped to the target range.
pub fn modulate(value: f64, from: (f64, f64), to: (f64, f64)) -> f64 {
    let (a0, a1) = from;
    let (b0, b1) = to;
    let t = safe_div(value - a0, a1 - a0);
    let result = b0 + t * (b1 - b0);
    let (lo, hi) = if b0 < b1 { (b0, b1) } else { (b1, b0) };
    result.clamp(lo, hi)
}

/// Point at `distance` from `origin` in direction `angle`.
#[inline]
pub fn project(origin: Point, angle: f64, distance: f64) -> Point {
    Point::new(
        origin.x + angle.cos() * distance,
        origin.y + angle.sin() * distance,
    )
}

// ============================================================================
// Quadratic Bézier
// ============================================================================

/// Quadratic Bézier curve with one control point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QuadBezier {
    pub p0: Point,
    pub p1: Point,
    pub p2: Point,
}

impl QuadBezier {
    pub const fn new(p0: Point, p1: Point, p2: Point) -> Self {
        Self { p0, p1, p2 }
    }

    /// Evaluate the curve at `t` in `[0, 1]`.
    pub fn point_at(&self, t: f64) -> Point {
        let mt = 1.0 - t;
        let a = mt * mt;
        let b = 2.0 * mt * t;
        let c = t * t;
        Point::new(
            a * self.p0.x + b * self.p1.x + c * self.p2.x,
            a * self.p0.y + b * self.p1.y + c * self.p2.y,
        )
    }

    /// Tight axis-aligned bounding box, from the endpoints plus any interior
    /// extremum on each axis.
    pub fn bbox(&self) -> Rect {
        let mut min_x = self.p0.x.min(self.p2.x);
        let mut max_x = self.p0.x.max(self.p2.x);
        let mut min_y = self.p0.y.min(self.p2.y);
        let mut max_y = self.p0.y.max(self.p2.y);

        if let Some(t) = extremum(self.p0.x, self.p1.x, self.p2.x) {
            let x = self.point_at(t).x;
            min_x = min_x.min(x);
            max_x = max_x.max(x);
        }
        if let Some(t) = extremum(self.p0.y, self.p1.y, self.p2.y) {
            let y = self.point_at(t).y;
            min_y = min_y.min(y);
            max_y = max_y.max(y);
        }

        Rect::new(min_x, min_y, max_x - min_x, max_y - min_y)
    }

    /// Evenly spaced samples in `t`; `steps` segments, `steps + 1` points.
    pub fn lut(&self, steps: usize) -> Vec<Point> {
        let steps = steps.max(1);
        (0..=steps)
            .map(|i| self.point_at(i as f64 / steps as f64))
            .collect()
    }

    /// Approximate distance from `point` to the curve, using the nearest of
    /// `steps + 1` samples.
    pub fn distance_to(&self, point: Point, steps: usize) -> f64 {
        self.lut(steps)
            .into_iter()
            .map(|sample| sample.distance_to(point))
            .fold(f64::INFINITY, f64::min)
    }
}

/// Parameter of the interior extremum of a 1-D quadratic, if any.
fn extremum(p0: f64, p1: f64, p2: f64) -> Option<f64> {
    let denom = p0 - 2.0 * p1 + p2;
    if denom == 0.0 {
        return None;
    }
    let t = (p0 - p1) / denom;
    (t > 0.0 && t < 1.0).then_some(t)
}
