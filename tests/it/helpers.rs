//! Test helpers and builders for reducing boilerplate in tests.
//!
//! This module provides:
//! - `TestSceneBuilder` - Builder pattern for scenes with boxes and arrows
//! - Editor drivers like `hover()`, `click()` and `drag()` that run the
//!   frame loop against an inline (same-thread) index worker

use arrowboard::editor::Editor;
use arrowboard::hit_test::HitParams;
use arrowboard::scene::Scene;
use arrowboard::settings::EditorConfig;
use arrowboard::types::{CanvasBox, Endpoint, Point, Rect};
use arrowboard::worker::InlineTransport;

// ============================================================================
// TestSceneBuilder - Builder pattern for creating test scenes
// ============================================================================

/// Builder for scenes with boxes, arrows and an initial selection.
///
/// # Example
/// ```ignore
/// let scene = TestSceneBuilder::new()
///     .with_box("A", (0.0, 0.0, 10.0, 10.0))
///     .with_box("B", (100.0, 0.0, 10.0, 10.0))
///     .with_arrow("A", "B")
///     .build();
/// ```
#[derive(Default)]
pub struct TestSceneBuilder {
    boxes: Vec<(String, Rect)>,
    arrows: Vec<(String, String)>,
    selected: Vec<String>,
    zoom: Option<f64>,
}

impl TestSceneBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a box; z follows insertion order.
    pub fn with_box(mut self, id: &str, rect: (f64, f64, f64, f64)) -> Self {
        self.boxes
            .push((id.to_string(), Rect::new(rect.0, rect.1, rect.2, rect.3)));
        self
    }

    pub fn with_arrow(mut self, from: &str, to: &str) -> Self {
        self.arrows.push((from.to_string(), to.to_string()));
        self
    }

    pub fn with_selection(mut self, ids: &[&str]) -> Self {
        self.selected = ids.iter().map(|id| (*id).to_string()).collect();
        self
    }

    pub fn with_zoom(mut self, zoom: f64) -> Self {
        self.zoom = Some(zoom);
        self
    }

    pub fn build(self) -> Scene {
        let mut scene = Scene::new();
        for (z, (id, rect)) in self.boxes.into_iter().enumerate() {
            scene.insert_box(CanvasBox::new(id, rect, z as i64));
        }
        for (from, to) in self.arrows {
            scene
                .add_arrow(Endpoint::boxed(from), Endpoint::boxed(to), false)
                .expect("arrow endpoints exist");
        }
        scene.set_selected_box_ids(self.selected);
        if let Some(zoom) = self.zoom {
            scene.camera.zoom = zoom;
        }
        scene
    }

    /// Editor over the built scene with an inline index worker.
    pub fn editor(self) -> Editor {
        editor_for(self.build())
    }
}

// ============================================================================
// Editor Drivers
// ============================================================================

/// Config with persistence off, so tests never touch the data directory.
pub fn test_config() -> EditorConfig {
    EditorConfig {
        autosave: false,
        ..EditorConfig::default()
    }
}

pub fn editor_for(scene: Scene) -> Editor {
    let config = test_config();
    let transport = InlineTransport::new(config.hit_params());
    Editor::with_transport(scene, config, Box::new(transport))
}

/// The two-box scene most scenarios start from.
pub fn two_boxes() -> TestSceneBuilder {
    TestSceneBuilder::new()
        .with_box("A", (0.0, 0.0, 10.0, 10.0))
        .with_box("B", (100.0, 0.0, 10.0, 10.0))
}

/// Move the pointer and run a frame so the hit is current.
pub fn hover(editor: &mut Editor, x: f64, y: f64) {
    editor.pointer_move(Point::new(x, y));
    editor.tick_now();
}

/// Press and release at a point without moving.
pub fn click(editor: &mut Editor, x: f64, y: f64) {
    hover(editor, x, y);
    editor.pointer_down();
    editor.pointer_up();
}

/// Press at `from`, move through `steps` intermediate points to `to`, and
/// release.
pub fn drag(editor: &mut Editor, from: (f64, f64), to: (f64, f64), steps: u32) {
    hover(editor, from.0, from.1);
    editor.pointer_down();
    for step in 1..=steps {
        let t = f64::from(step) / f64::from(steps);
        hover(
            editor,
            from.0 + (to.0 - from.0) * t,
            from.1 + (to.1 - from.1) * t,
        );
    }
    editor.pointer_up();
}

pub fn default_hit_params() -> HitParams {
    test_config().hit_params()
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
