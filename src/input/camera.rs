//! Viewport handlers: pointer tracking, zoom, pan, view box layout and
//! page scroll. These run at the root of the state tree for every event.

use super::coords::{CoordinateContext, CoordinateConverter};
use crate::constants::{MAX_ZOOM, MIN_ZOOM, ZOOM_BASE};
use crate::scene::Scene;
use crate::types::{Point, Rect};
use tracing::trace;

/// Record a new screen position and derive its document position.
pub fn update_pointer(scene: &mut Scene, screen: Point) {
    let previous = scene.pointer.document;
    scene.pointer.screen = screen;
    scene.pointer.document = document_point(scene, screen);
    scene.pointer.delta = Point::new(
        scene.pointer.document.x - previous.x,
        scene.pointer.document.y - previous.y,
    );
}

/// Re-derive the document pointer after the camera or view box moved.
pub fn refresh_pointer(scene: &mut Scene) {
    scene.pointer.document = document_point(scene, scene.pointer.screen);
}

pub fn document_point(scene: &Scene, screen: Point) -> Point {
    let ctx = CoordinateContext::new(&scene.camera, &scene.viewbox);
    CoordinateConverter::screen_to_document(screen, &ctx)
}

/// Zoom by `ZOOM_BASE^delta`, keeping the document point under `screen`
/// fixed. Zoom is clamped to `[MIN_ZOOM, MAX_ZOOM]`.
pub fn zoom_at(scene: &mut Scene, screen: Point, delta: f64) {
    let camera = &mut scene.camera;
    let zoom = (camera.zoom * ZOOM_BASE.powf(delta)).clamp(MIN_ZOOM, MAX_ZOOM);
    if !zoom.is_finite() || zoom == camera.zoom {
        return;
    }
    let ratio = zoom / camera.zoom;
    let ctx = CoordinateContext::new(&scene.camera, &scene.viewbox);
    let p = CoordinateConverter::screen_to_canvas(screen, &ctx);

    let camera = &mut scene.camera;
    camera.x = p.x - (p.x - camera.x) * ratio;
    camera.y = p.y - (p.y - camera.y) * ratio;
    camera.zoom = zoom;
    trace!(zoom, "zoomed");
    refresh_pointer(scene);
}

/// Pan by a screen-space offset.
pub fn pan(scene: &mut Scene, dx: f64, dy: f64) {
    scene.camera.x -= dx;
    scene.camera.y -= dy;
    refresh_pointer(scene);
}

/// Lay the canvas out at a new screen frame. The camera shifts by half the
/// size change so the content stays centered.
pub fn update_viewbox(scene: &mut Scene, frame: Rect) {
    let viewbox = &mut scene.viewbox;
    if viewbox.width > 0.0 && viewbox.height > 0.0 {
        scene.camera.x += (frame.width - viewbox.width) / 2.0;
        scene.camera.y += (frame.height - viewbox.height) / 2.0;
    }
    viewbox.x = frame.x;
    viewbox.y = frame.y;
    viewbox.width = frame.width;
    viewbox.height = frame.height;
    refresh_pointer(scene);
}

/// The page scrolled to `scroll`; the canvas origin moves the other way.
pub fn scroll_viewport(scene: &mut Scene, scroll: Point) {
    let viewbox = &mut scene.viewbox;
    viewbox.x += viewbox.scroll_x - scroll.x;
    viewbox.y += viewbox.scroll_y - scroll.y;
    viewbox.scroll_x = scroll.x;
    viewbox.scroll_y = scroll.y;
    refresh_pointer(scene);
}
