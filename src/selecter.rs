//! Range selection over the box index.

use crate::spatial_index::SpatialIndex;
use crate::types::{BoxId, Point, Rect};

/// A brush anchored at a fixed origin. Each query selects every box whose
/// envelope intersects the normalized rectangle from the origin to the
/// pointer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoxSelecter {
    origin: Point,
}

impl BoxSelecter {
    pub fn new(origin: Point) -> Self {
        Self { origin }
    }

    pub fn origin(&self) -> Point {
        self.origin
    }

    pub fn query_rect(&self, point: Point) -> Rect {
        Rect::from_corners(self.origin, point)
    }

    /// Ids of boxes intersecting the brush, sorted so the result only
    /// depends on the index contents and the pointer.
    pub fn select(&self, index: &SpatialIndex, point: Point) -> Vec<BoxId> {
        let mut ids: Vec<BoxId> = index
            .query_rect(self.query_rect(point))
            .into_iter()
            .map(|entry| entry.id.clone())
            .collect();
        ids.sort();
        ids.dedup();
        ids
    }
}
