//! The editor's single source of truth.
//!
//! [`Scene`] owns the persistent model (boxes, arrows, selection) plus every
//! transient interaction record the renderer draws (bounds, brush, hit,
//! spawning box, pointer and camera). Only the state machine mutates it.
//! [`SceneSnapshot`] is the serializable subset used for undo history and
//! the scene database.

use crate::arrow;
use crate::bounds::SelectionBounds;
use crate::types::{
    Arrow, ArrowGeometry, ArrowId, BoxId, Brush, Camera, CanvasBox, Endpoint, Hit, Point,
    PointerState, ViewBox,
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, warn};

/// Persistent part of the scene. Maps are ordered so serialization is
/// byte-stable.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneSnapshot {
    pub boxes: BTreeMap<BoxId, CanvasBox>,
    pub arrows: BTreeMap<ArrowId, Arrow>,
    #[serde(default)]
    pub selected_box_ids: Vec<BoxId>,
    #[serde(default)]
    pub selected_arrow_ids: Vec<ArrowId>,
}

impl SceneSnapshot {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Scene {
    pub boxes: BTreeMap<BoxId, CanvasBox>,
    pub arrows: BTreeMap<ArrowId, Arrow>,
    pub arrow_cache: BTreeMap<ArrowId, ArrowGeometry>,
    pub selected_box_ids: Vec<BoxId>,
    pub selected_arrow_ids: Vec<ArrowId>,

    pub bounds: Option<SelectionBounds>,
    pub brush: Option<Brush>,
    pub hit: Hit,
    pub spawning_box: Option<CanvasBox>,
    /// Source box of the arrow being created by the arrow tool.
    pub pending_arrow_from: Option<BoxId>,

    pub camera: Camera,
    pub viewbox: ViewBox,
    pub pointer: PointerState,
    /// Document position of the last pointer press.
    pub initial_pointer: Point,

    next_z: i64,
    next_seq: u64,
    index_dirty: bool,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_snapshot(snapshot: SceneSnapshot) -> Self {
        let mut scene = Self::new();
        scene.restore(snapshot);
        scene
    }

    // ========================================================================
    // Snapshots
    // ========================================================================

    pub fn snapshot(&self) -> SceneSnapshot {
        SceneSnapshot {
            boxes: self.boxes.clone(),
            arrows: self.arrows.clone(),
            selected_box_ids: self.selected_box_ids.clone(),
            selected_arrow_ids: self.selected_arrow_ids.clone(),
        }
    }

    /// Replace the persistent model. Transient gesture records are cleared
    /// and the arrow cache is recomputed; bounds are left for the caller to
    /// refresh.
    pub fn restore(&mut self, snapshot: SceneSnapshot) {
        self.boxes = snapshot.boxes;
        self.arrows = snapshot.arrows;
        self.selected_box_ids = snapshot
            .selected_box_ids
            .into_iter()
            .filter(|id| self.boxes.contains_key(id))
            .collect();
        self.selected_arrow_ids = snapshot
            .selected_arrow_ids
            .into_iter()
            .filter(|id| self.arrows.contains_key(id))
            .collect();
        self.clear_stale_hit();
        self.brush = None;
        self.spawning_box = None;
        self.pending_arrow_from = None;
        self.bounds = None;
        self.next_z = self.next_z.max(self.boxes.values().map(|b| b.z + 1).max().unwrap_or(0));
        self.rebuild_arrow_cache();
        self.mark_dirty();
    }

    // ========================================================================
    // Ids
    // ========================================================================

    /// Next stacking order; strictly greater than any box created so far.
    pub fn next_z(&mut self) -> i64 {
        let z = self.next_z;
        self.next_z += 1;
        z
    }

    pub fn next_box_id(&mut self) -> BoxId {
        self.next_seq += 1;
        let mut id = format!("b_{}_{}", self.boxes.len(), self.next_seq);
        while self.boxes.contains_key(&id) {
            self.next_seq += 1;
            id = format!("b_{}_{}", self.boxes.len(), self.next_seq);
        }
        id
    }

    pub fn next_arrow_id(&mut self) -> ArrowId {
        self.next_seq += 1;
        let mut id = format!("a_{}_{}", self.arrows.len(), self.next_seq);
        while self.arrows.contains_key(&id) {
            self.next_seq += 1;
            id = format!("a_{}_{}", self.arrows.len(), self.next_seq);
        }
        id
    }

    // ========================================================================
    // Model Mutation
    // ========================================================================

    /// Insert (or replace) a box, keeping z allocation ahead of it.
    pub fn insert_box(&mut self, b: CanvasBox) {
        self.next_z = self.next_z.max(b.z + 1);
        self.boxes.insert(b.id.clone(), b);
        self.mark_dirty();
    }

    /// Create an arrow between two endpoints. Fails (returns `None`) when a
    /// box endpoint does not exist.
    pub fn add_arrow(&mut self, from: Endpoint, to: Endpoint, flip: bool) -> Option<ArrowId> {
        for endpoint in [&from, &to] {
            if let Some(id) = endpoint.box_id() {
                if !self.boxes.contains_key(id) {
                    warn!(box_id = id, "arrow endpoint references missing box");
                    return None;
                }
            }
        }

        let id = self.next_arrow_id();
        let arrow = Arrow {
            id: id.clone(),
            from,
            to,
            flip,
            label: String::new(),
        };
        let geometry = arrow::compute_arrow(&arrow, &self.boxes)?;

        for endpoint in [&arrow.from, &arrow.to] {
            if let Some(b) = endpoint.box_id().and_then(|bid| self.boxes.get_mut(bid)) {
                b.arrow_ids.insert(id.clone());
            }
        }
        self.arrows.insert(id.clone(), arrow);
        self.arrow_cache.insert(id.clone(), geometry);
        self.mark_dirty();
        Some(id)
    }

    pub fn delete_arrow(&mut self, id: &str) -> Option<Arrow> {
        let arrow = self.arrows.remove(id)?;
        self.arrow_cache.remove(id);
        for endpoint in [&arrow.from, &arrow.to] {
            if let Some(b) = endpoint.box_id().and_then(|bid| self.boxes.get_mut(bid)) {
                b.arrow_ids.remove(id);
            }
        }
        self.selected_arrow_ids.retain(|a| a != id);
        self.clear_stale_hit();
        self.mark_dirty();
        Some(arrow)
    }

    /// Remove a box and every arrow that references it.
    pub fn delete_box(&mut self, id: &str) -> Option<CanvasBox> {
        let removed = self.boxes.remove(id)?;
        let mut attached: BTreeSet<ArrowId> = removed.arrow_ids.clone();
        attached.extend(
            self.arrows
                .values()
                .filter(|a| a.references_box(id))
                .map(|a| a.id.clone()),
        );
        for arrow_id in attached {
            self.delete_arrow(&arrow_id);
        }
        self.selected_box_ids.retain(|b| b != id);
        self.clear_stale_hit();
        self.mark_dirty();
        Some(removed)
    }

    /// Delete every selected box (cascading to attached arrows) and every
    /// selected arrow. Returns how many items were removed.
    pub fn delete_selected(&mut self) -> usize {
        let box_ids = std::mem::take(&mut self.selected_box_ids);
        let arrow_ids = std::mem::take(&mut self.selected_arrow_ids);
        let mut removed = 0;
        for id in &box_ids {
            removed += usize::from(self.delete_box(id).is_some());
        }
        for id in &arrow_ids {
            removed += usize::from(self.delete_arrow(id).is_some());
        }
        self.bounds = None;
        self.clear_stale_hit();
        debug!(removed, "deleted selection");
        removed
    }

    /// Move boxes to absolute rects. Unknown ids are skipped.
    pub fn place_boxes<I>(&mut self, rects: I)
    where
        I: IntoIterator<Item = (BoxId, crate::types::Rect)>,
    {
        for (id, rect) in rects {
            if let Some(b) = self.boxes.get_mut(&id) {
                b.set_rect(rect);
            }
        }
        self.mark_dirty();
    }

    /// Copy geometry from `updated` onto the matching live boxes, leaving
    /// their other fields alone. Returns the ids that were applied.
    pub fn apply_box_geometry(&mut self, updated: &[CanvasBox]) -> Vec<BoxId> {
        let mut applied = Vec::new();
        for u in updated {
            if let Some(b) = self.boxes.get_mut(&u.id) {
                b.set_rect(u.rect());
                applied.push(u.id.clone());
            }
        }
        self.mark_dirty();
        applied
    }

    // ========================================================================
    // Selection
    // ========================================================================

    pub fn has_selection(&self) -> bool {
        !self.selected_box_ids.is_empty() || !self.selected_arrow_ids.is_empty()
    }

    pub fn has_selected_boxes(&self) -> bool {
        !self.selected_box_ids.is_empty()
    }

    pub fn box_is_selected(&self, id: &str) -> bool {
        self.selected_box_ids.iter().any(|b| b == id)
    }

    pub fn arrow_is_selected(&self, id: &str) -> bool {
        self.selected_arrow_ids.iter().any(|a| a == id)
    }

    pub fn clear_selection(&mut self) {
        self.selected_box_ids.clear();
        self.selected_arrow_ids.clear();
        self.bounds = None;
    }

    /// Select exactly one box. Box and arrow selections are exclusive.
    pub fn select_box(&mut self, id: &str) {
        if !self.boxes.contains_key(id) {
            return;
        }
        self.selected_arrow_ids.clear();
        self.selected_box_ids = vec![id.to_string()];
    }

    /// Select exactly one arrow, dropping any box selection.
    pub fn select_arrow(&mut self, id: &str) {
        if !self.arrows.contains_key(id) {
            return;
        }
        self.selected_box_ids.clear();
        self.bounds = None;
        self.selected_arrow_ids = vec![id.to_string()];
    }

    /// Overwrite the box selection, ignoring unknown ids.
    pub fn set_selected_box_ids(&mut self, ids: Vec<BoxId>) {
        self.selected_arrow_ids.clear();
        self.selected_box_ids = ids
            .into_iter()
            .filter(|id| self.boxes.contains_key(id))
            .collect();
    }

    /// Clones of the selected boxes, in selection order.
    pub fn selected_boxes(&self) -> Vec<CanvasBox> {
        self.selected_box_ids
            .iter()
            .filter_map(|id| self.boxes.get(id).cloned())
            .collect()
    }

    /// Run a transform over the selected boxes and write the result back.
    pub fn update_selected_boxes<F>(&mut self, f: F)
    where
        F: FnOnce(&mut [CanvasBox]),
    {
        let mut boxes = self.selected_boxes();
        if boxes.is_empty() {
            return;
        }
        f(&mut boxes);
        for b in boxes {
            self.boxes.insert(b.id.clone(), b);
        }
        self.mark_dirty();
    }

    /// Recompute the selection bounds from the selected boxes.
    pub fn update_bounds(&mut self, padding: f64) {
        let zoom = self.camera.zoom;
        self.bounds = SelectionBounds::from_boxes(
            self.selected_box_ids.iter().filter_map(|id| self.boxes.get(id)),
            zoom,
            padding,
        );
    }

    // ========================================================================
    // Arrow Cache
    // ========================================================================

    pub fn rebuild_arrow_cache(&mut self) {
        self.arrow_cache = self
            .arrows
            .values()
            .filter_map(|a| arrow::compute_arrow(a, &self.boxes).map(|g| (a.id.clone(), g)))
            .collect();
    }

    /// Recompute cached geometry for arrows attached to the given boxes.
    pub fn refresh_arrows_for<'a, I>(&mut self, box_ids: I)
    where
        I: IntoIterator<Item = &'a BoxId>,
    {
        let arrow_ids: BTreeSet<ArrowId> = box_ids
            .into_iter()
            .filter_map(|id| self.boxes.get(id))
            .flat_map(|b| b.arrow_ids.iter().cloned())
            .collect();

        for id in arrow_ids {
            let Some(a) = self.arrows.get(&id) else {
                continue;
            };
            match arrow::compute_arrow(a, &self.boxes) {
                Some(geometry) => {
                    self.arrow_cache.insert(id, geometry);
                }
                None => {
                    self.arrow_cache.remove(&id);
                }
            }
        }
    }

    pub fn refresh_selected_arrows(&mut self) {
        let ids = self.selected_box_ids.clone();
        self.refresh_arrows_for(&ids);
    }

    /// Geometry of the arrow the arrow tool would create right now: from the
    /// pending source box to the hovered box, or to the pointer.
    pub fn preview_arrow(&self) -> Option<ArrowGeometry> {
        let from = self.boxes.get(self.pending_arrow_from.as_ref()?)?;
        let target = match &self.hit {
            Hit::Box(id) if *id != from.id => self.boxes.get(id).map(CanvasBox::rect),
            _ => None,
        };
        let to = target.unwrap_or_else(|| arrow::point_rect(self.pointer.document));
        Some(arrow::box_to_box(from.rect(), to, false))
    }

    // ========================================================================
    // Hit & Index Bookkeeping
    // ========================================================================

    /// The current hit, degraded to `Canvas` when it names something that
    /// no longer exists.
    pub fn resolved_hit(&self) -> Hit {
        match &self.hit {
            Hit::Box(id) if !self.boxes.contains_key(id) => Hit::Canvas,
            Hit::Arrow(id) if !self.arrows.contains_key(id) => Hit::Canvas,
            Hit::Bounds | Hit::BoundsCorner(_) | Hit::BoundsEdge(_) if self.bounds.is_none() => {
                Hit::Canvas
            }
            hit => hit.clone(),
        }
    }

    /// Reset the stored hit to `Canvas` if it names a removed item.
    pub fn clear_stale_hit(&mut self) {
        let resolved = self.resolved_hit();
        if resolved != self.hit {
            debug!(stale = ?self.hit, "clearing stale hit");
            self.hit = resolved;
        }
    }

    /// Flag that the hit index no longer matches the scene.
    pub fn mark_dirty(&mut self) {
        self.index_dirty = true;
    }

    pub fn is_index_dirty(&self) -> bool {
        self.index_dirty
    }

    pub fn take_index_dirty(&mut self) -> bool {
        std::mem::take(&mut self.index_dirty)
    }

    /// Value copies of boxes in stable order, for the index worker.
    pub fn box_list(&self) -> Vec<CanvasBox> {
        self.boxes.values().cloned().collect()
    }
}
