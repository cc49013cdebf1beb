//! Selection bounds: the envelope of the selected boxes plus its eight
//! resize handles.

use crate::geometry::{bounding_box, corners, edges};
use crate::types::{CanvasBox, Corner, Edge, Rect};

/// Envelope of the current selection with corner and edge handle rects.
///
/// Handles are `2 * padding / zoom` thick so they keep a constant on-screen
/// size regardless of zoom.
#[derive(Clone, Debug, PartialEq)]
pub struct SelectionBounds {
    pub rect: Rect,
    /// Indexed by [`Corner::index`].
    pub corners: [Rect; 4],
    /// Indexed by [`Edge::index`].
    pub edges: [Rect; 4],
}

impl SelectionBounds {
    pub fn new(rect: Rect, zoom: f64, padding: f64) -> Self {
        let p = padding / zoom;
        let pp = p * 2.0;
        let inner_w = (rect.width - pp).max(0.0);
        let inner_h = (rect.height - pp).max(0.0);

        let segments = edges(rect);
        Self {
            rect,
            corners: corners(rect).map(|c| Rect::new(c.x - p, c.y - p, pp, pp)),
            // Top and bottom run along x, right and left along y.
            edges: std::array::from_fn(|i| {
                let (a, b) = segments[i];
                let (x, y) = (a.x.min(b.x), a.y.min(b.y));
                if i % 2 == 0 {
                    Rect::new(x + p, y - p, inner_w, pp)
                } else {
                    Rect::new(x - p, y + p, pp, inner_h)
                }
            }),
        }
    }

    /// Bounds around `boxes`, or `None` when there are none.
    pub fn from_boxes<'a, I>(boxes: I, zoom: f64, padding: f64) -> Option<Self>
    where
        I: IntoIterator<Item = &'a CanvasBox>,
    {
        bounding_box(boxes.into_iter().map(CanvasBox::rect)).map(|rect| Self::new(rect, zoom, padding))
    }

    pub fn corner(&self, corner: Corner) -> Rect {
        self.corners[corner.index()]
    }

    pub fn edge(&self, edge: Edge) -> Rect {
        self.edges[edge.index()]
    }
}
