//! Everything a transition may touch, bundled for the handlers.

use crate::bounds::SelectionBounds;
use crate::history::History;
use crate::persistence::SceneDatabase;
use crate::scene::{Scene, SceneSnapshot};
use crate::settings::EditorConfig;
use crate::types::{BoxId, CanvasBox, Point, Rect};
use crate::worker::{IndexClient, IndexRequest};
use tracing::{debug, error, warn};

pub struct Ctx<'a> {
    pub scene: &'a mut Scene,
    pub history: &'a mut History,
    pub index: &'a mut IndexClient,
    pub config: &'a EditorConfig,
    pub database: Option<&'a SceneDatabase>,
}

impl Ctx<'_> {
    /// Pointer position in document space.
    pub fn pointer(&self) -> Point {
        self.scene.pointer.document
    }

    /// Document-space offset from the gesture origin to the pointer.
    pub fn gesture_delta(&self) -> Point {
        let origin = self.scene.initial_pointer;
        let pointer = self.pointer();
        Point::new(pointer.x - origin.x, pointer.y - origin.y)
    }

    pub fn update_bounds(&mut self) {
        self.scene.update_bounds(self.config.hit_padding);
    }

    /// Bounds for an explicit rect, sized for the current zoom.
    pub fn set_bounds(&mut self, rect: Rect) {
        self.scene.bounds = Some(SelectionBounds::new(
            rect,
            self.scene.camera.zoom,
            self.config.hit_padding,
        ));
    }

    // ========================================================================
    // Commit Points
    // ========================================================================

    /// Push the current scene onto the undo stack. A new entry also rebuilds
    /// the range index and autosaves.
    pub fn commit(&mut self) {
        let json = match self.scene.snapshot().to_json() {
            Ok(json) => json,
            Err(e) => {
                error!(error = %e, "failed to serialize scene");
                return;
            }
        };
        if !self.history.commit(json.clone()) {
            return;
        }
        self.request_tree_update();
        self.autosave(&json);
    }

    /// Persist a serialized scene when autosave is on.
    fn autosave(&self, json: &str) {
        if !self.config.autosave {
            return;
        }
        if let Some(db) = self.database {
            if let Err(e) = db.save_json(json) {
                warn!(path = %db.path().display(), error = %e, "autosave failed");
            }
        }
    }

    pub fn request_tree_update(&mut self) {
        self.index.request(IndexRequest::UpdateTree {
            boxes: self.scene.box_list(),
        });
    }

    /// Finish a one-shot transform of the selected boxes.
    pub fn finish_transform(&mut self) {
        self.scene.refresh_selected_arrows();
        self.update_bounds();
        self.commit();
    }

    /// Apply geometry computed off-thread to the live boxes.
    pub fn apply_transformed(&mut self, boxes: &[CanvasBox]) {
        let applied = self.scene.apply_box_geometry(boxes);
        if applied.is_empty() {
            return;
        }
        self.scene.refresh_arrows_for(&applied);
        self.update_bounds();
        self.commit();
    }

    /// Write gesture output back and redraw the bounds around it.
    pub fn apply_gesture(&mut self, boxes: &[CanvasBox], bounds: Rect) {
        self.scene.apply_box_geometry(boxes);
        self.scene.refresh_selected_arrows();
        self.set_bounds(bounds);
    }

    // ========================================================================
    // History
    // ========================================================================

    pub fn undo(&mut self) {
        let current = match self.scene.snapshot().to_json() {
            Ok(json) => json,
            Err(e) => {
                error!(error = %e, "failed to serialize scene");
                return;
            }
        };
        let Some(state) = self.history.undo(current).map(str::to_owned) else {
            debug!("nothing to undo");
            return;
        };
        if self.restore(&state) {
            self.autosave(&state);
        }
    }

    pub fn redo(&mut self) {
        let Some(state) = self.history.redo().map(str::to_owned) else {
            debug!("nothing to redo");
            return;
        };
        if self.restore(&state) {
            self.autosave(&state);
        }
    }

    /// Replace the scene with a serialized snapshot. False if the entry
    /// does not parse; the scene is left as it was.
    pub fn restore(&mut self, json: &str) -> bool {
        match SceneSnapshot::from_json(json) {
            Ok(snapshot) => {
                self.replace(snapshot);
                true
            }
            Err(e) => {
                error!(error = %e, "corrupt history entry");
                false
            }
        }
    }

    /// Replace the persistent scene wholesale without committing.
    pub fn replace(&mut self, snapshot: SceneSnapshot) {
        self.scene.restore(snapshot);
        self.update_bounds();
        self.request_tree_update();
    }

    /// Overwrite the box selection from a range query.
    pub fn force_selection(&mut self, ids: Vec<BoxId>, brushing: bool) {
        self.scene.set_selected_box_ids(ids);
        if !brushing {
            self.update_bounds();
            self.commit();
        }
    }
}
