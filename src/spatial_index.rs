//! Spatial Index Module
//!
//! R-tree over the envelopes of boxes (and, for the hit index, arrow curves).
//! Both indexes are rebuilt wholesale from a scene copy with bulk loading;
//! there is no incremental update path.

use crate::types::Rect;
use rstar::{AABB, RTree, RTreeObject};

/// What an indexed envelope belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntryKind {
    Box,
    Arrow,
}

/// A spatial entry representing an item's bounding box.
#[derive(Debug, Clone, PartialEq)]
pub struct SpatialEntry {
    pub id: String,
    pub kind: EntryKind,
    pub z: i64,
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl SpatialEntry {
    pub fn new(id: impl Into<String>, kind: EntryKind, z: i64, rect: Rect) -> Self {
        Self {
            id: id.into(),
            kind,
            z,
            min_x: rect.x,
            min_y: rect.y,
            max_x: rect.max_x(),
            max_y: rect.max_y(),
        }
    }

    #[inline]
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }
}

impl RTreeObject for SpatialEntry {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners([self.min_x, self.min_y], [self.max_x, self.max_y])
    }
}

/// Bulk-loaded R-tree with the overall extent of its entries.
#[derive(Default)]
pub struct SpatialIndex {
    tree: RTree<SpatialEntry>,
    extent: Option<Rect>,
}

impl SpatialIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a spatial index from an iterator of entries.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = SpatialEntry>,
    {
        let mut index = Self::new();
        index.rebuild(entries);
        index
    }

    /// Replace the whole index.
    pub fn rebuild<I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = SpatialEntry>,
    {
        let entries: Vec<SpatialEntry> = entries.into_iter().collect();
        self.extent = entries.iter().fold(None, |acc: Option<(f64, f64, f64, f64)>, e| {
            Some(match acc {
                None => (e.min_x, e.min_y, e.max_x, e.max_y),
                Some((x0, y0, x1, y1)) => (
                    x0.min(e.min_x),
                    y0.min(e.min_y),
                    x1.max(e.max_x),
                    y1.max(e.max_y),
                ),
            })
        })
        .map(|(x0, y0, x1, y1)| Rect::new(x0, y0, x1 - x0, y1 - y0));
        self.tree = RTree::bulk_load(entries);
    }

    /// All entries whose envelope intersects `rect` (touching counts).
    pub fn query_rect(&self, rect: Rect) -> Vec<&SpatialEntry> {
        let envelope = AABB::from_corners([rect.x, rect.y], [rect.max_x(), rect.max_y()]);
        self.tree.locate_in_envelope_intersecting(&envelope).collect()
    }

    /// All entries whose envelope contains the point.
    pub fn query_point(&self, x: f64, y: f64) -> Vec<&SpatialEntry> {
        let point_envelope = AABB::from_point([x, y]);

        self.tree
            .locate_in_envelope_intersecting(&point_envelope)
            .filter(|entry| entry.contains_point(x, y))
            .collect()
    }

    /// Envelope of everything indexed, `None` when empty.
    pub fn extent(&self) -> Option<Rect> {
        self.extent
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&mut self) {
        self.tree = RTree::new();
        self.extent = None;
    }
}
