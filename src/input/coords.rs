//! Coordinate conversion between screen and document space.
//!
//! Screen points are relative to the page; the canvas element sits at the
//! view box origin, and the camera offset and zoom are applied inside it:
//! `document = (screen - viewbox - camera) / zoom`.

use crate::types::{Camera, Point, ViewBox};

/// Context needed for coordinate conversions
#[derive(Clone, Copy, Debug)]
pub struct CoordinateContext<'a> {
    pub camera: &'a Camera,
    pub viewbox: &'a ViewBox,
}

impl<'a> CoordinateContext<'a> {
    #[inline]
    pub fn new(camera: &'a Camera, viewbox: &'a ViewBox) -> Self {
        Self { camera, viewbox }
    }
}

pub struct CoordinateConverter;

impl CoordinateConverter {
    /// Screen point relative to the canvas element's origin.
    #[inline]
    pub fn screen_to_canvas(screen: Point, ctx: &CoordinateContext<'_>) -> Point {
        Point::new(screen.x - ctx.viewbox.x, screen.y - ctx.viewbox.y)
    }

    #[inline]
    pub fn screen_to_document(screen: Point, ctx: &CoordinateContext<'_>) -> Point {
        let canvas = Self::screen_to_canvas(screen, ctx);
        Point::new(
            (canvas.x - ctx.camera.x) / ctx.camera.zoom,
            (canvas.y - ctx.camera.y) / ctx.camera.zoom,
        )
    }
}
