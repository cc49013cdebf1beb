//! The editor facade: owns the scene, history, interaction state and the
//! index worker, and turns raw input into state machine events.
//!
//! ## Frame loop
//!
//! The host calls [`Editor::tick`] once per frame while the ticker runs.
//! A tick applies worker replies, times out stale requests, rebuilds the hit
//! index when the scene changed (throttled during gestures), and asks for a
//! fresh hit test at the pointer.

use crate::bounds::SelectionBounds;
use crate::error::WorkerError;
use crate::history::History;
use crate::input::{self, Ctx, Event, ToolState};
use crate::persistence::SceneDatabase;
use crate::profile_scope;
use crate::scene::Scene;
use crate::settings::{ConfigEvent, ConfigWatcher, EditorConfig};
use crate::ticker::{Throttle, Ticker};
use crate::types::{
    Arrow, ArrowGeometry, ArrowId, BoxId, Brush, Camera, CanvasBox, Cursor, Hit, Point, Rect,
};
use crate::worker::{
    IndexClient, IndexRequest, IndexResponse, IndexTransport, RequestKind, WorkerTransport,
};
use std::collections::BTreeMap;
use std::time::{Duration, Instant};
use tracing::{debug, info, trace, warn};

/// Read-only view of everything the renderer draws in a frame.
#[derive(Clone, Copy, Debug)]
pub struct RenderView<'a> {
    pub boxes: &'a BTreeMap<BoxId, CanvasBox>,
    pub arrows: &'a BTreeMap<ArrowId, Arrow>,
    pub arrow_cache: &'a BTreeMap<ArrowId, ArrowGeometry>,
    pub bounds: Option<&'a SelectionBounds>,
    pub brush: Option<&'a Brush>,
    pub hit: &'a Hit,
    pub selected_box_ids: &'a [BoxId],
    pub selected_arrow_ids: &'a [ArrowId],
    pub camera: &'a Camera,
    pub spawning_box: Option<&'a CanvasBox>,
    /// Arrow the arrow tool would create, following the pointer.
    pub preview_arrow: Option<ArrowGeometry>,
}

pub struct Editor {
    scene: Scene,
    history: History,
    state: ToolState,
    config: EditorConfig,
    index: IndexClient,
    database: Option<SceneDatabase>,
    ticker: Ticker,
    rebuild_throttle: Throttle,
    index_extent: Option<Rect>,
}

impl Editor {
    /// Editor backed by a background index worker thread.
    pub fn new(scene: Scene, config: EditorConfig) -> Result<Self, WorkerError> {
        let transport = WorkerTransport::spawn(config.hit_params())?;
        Ok(Self::with_transport(scene, config, Box::new(transport)))
    }

    pub fn with_transport(
        scene: Scene,
        config: EditorConfig,
        transport: Box<dyn IndexTransport>,
    ) -> Self {
        let index = IndexClient::new(transport, config.worker_timeout());
        let mut editor = Self {
            scene,
            history: History::new(config.max_history),
            state: ToolState::default(),
            ticker: Ticker::new(config.idle_stop()),
            rebuild_throttle: Throttle::new(config.rebuild_throttle()),
            config,
            index,
            database: None,
            index_extent: None,
        };
        editor.start();
        editor
    }

    /// Autosave committed states to `database`.
    pub fn with_database(mut self, database: SceneDatabase) -> Self {
        self.database = Some(database);
        self
    }

    /// The opening state is the first undo entry.
    fn start(&mut self) {
        let (_, mut cx) = self.parts();
        cx.update_bounds();
        cx.commit();
        info!(
            boxes = self.scene.boxes.len(),
            arrows = self.scene.arrows.len(),
            "editor started"
        );
    }

    fn parts(&mut self) -> (&mut ToolState, Ctx<'_>) {
        (
            &mut self.state,
            Ctx {
                scene: &mut self.scene,
                history: &mut self.history,
                index: &mut self.index,
                config: &self.config,
                database: self.database.as_ref(),
            },
        )
    }

    // ========================================================================
    // Events
    // ========================================================================

    /// Dispatch one event, then apply any worker replies that are ready.
    pub fn send(&mut self, event: Event) {
        self.ticker.touch(Instant::now());
        self.dispatch(&event);
        self.pump();
    }

    fn dispatch(&mut self, event: &Event) {
        let (state, mut cx) = self.parts();
        input::dispatch(state, event, &mut cx);
    }

    pub fn pointer_move(&mut self, screen: Point) {
        self.send(Event::MovedPointer(screen));
    }

    /// Press at the current pointer; the last hit decides what was pressed.
    pub fn pointer_down(&mut self) {
        self.send(Event::StartedPointing);
        let event = match self.scene.resolved_hit() {
            Hit::Canvas => Event::StartedPointingCanvas,
            Hit::Bounds => Event::StartedPointingBounds,
            Hit::BoundsCorner(corner) => Event::StartedPointingBoundsCorner(corner),
            Hit::BoundsEdge(edge) => Event::StartedPointingBoundsEdge(edge),
            Hit::Box(id) => Event::StartedPointingBox { id },
            Hit::Arrow(id) => Event::StartedPointingArrow { id },
        };
        self.send(event);
    }

    pub fn pointer_up(&mut self) {
        self.send(Event::StoppedPointing);
    }

    /// Wheel zoom pinned at `screen`.
    pub fn wheel(&mut self, screen: Point, delta: f64) {
        self.send(Event::Zoomed {
            point: screen,
            delta,
        });
        self.send(Event::MovedPointer(screen));
    }

    // ========================================================================
    // Worker Replies & Frame Loop
    // ========================================================================

    /// Apply every worker reply that is ready. Returns how many were applied.
    pub fn pump(&mut self) -> usize {
        let responses = self.index.poll();
        let count = responses.len();
        for response in responses {
            self.apply_response(response);
        }
        count
    }

    /// Block up to `timeout` for outstanding replies and apply them.
    pub fn settle(&mut self, timeout: Duration) -> usize {
        let responses = self.index.wait(timeout);
        let count = responses.len();
        for response in responses {
            self.apply_response(response);
        }
        count + self.pump()
    }

    fn apply_response(&mut self, response: IndexResponse) {
        match response {
            IndexResponse::TreeUpdated { len } => trace!(len, "range index rebuilt"),
            IndexResponse::Hit(hit) => self.scene.hit = hit,
            IndexResponse::Extent(extent) => self.index_extent = extent,
            IndexResponse::Selected(ids) => {
                // Only a change in size is applied.
                if ids.len() != self.scene.selected_box_ids.len() {
                    self.dispatch(&Event::ForcedIds(ids));
                }
            }
            IndexResponse::Stretched { boxes, axis } => {
                debug!(?axis, count = boxes.len(), "stretch applied");
                let (_, mut cx) = self.parts();
                cx.apply_transformed(&boxes);
            }
        }
    }

    /// One frame. Returns whether the ticker should keep running.
    pub fn tick(&mut self, now: Instant) -> bool {
        profile_scope!("tick");
        self.pump();

        for kind in self.index.expire(now) {
            warn!(request = kind.label(), "index request timed out");
            if kind == RequestKind::HitTest {
                self.scene.hit = Hit::Canvas;
            }
        }

        if self.scene.is_index_dirty()
            && (self.state.is_idle() || self.rebuild_throttle.ready(now))
        {
            self.scene.take_index_dirty();
            self.index.request(IndexRequest::UpdateHitTree {
                boxes: self.scene.box_list(),
                arrows: self.scene.arrows.values().cloned().collect(),
                arrow_cache: self
                    .scene
                    .arrow_cache
                    .iter()
                    .map(|(id, g)| (id.clone(), *g))
                    .collect(),
                zoom: self.scene.camera.zoom,
            });
        }

        if !self.index.has_pending(RequestKind::HitTest) {
            self.index.request(IndexRequest::HitTest {
                point: self.scene.pointer.document,
                bounds: self.scene.bounds.clone(),
                zoom: self.scene.camera.zoom,
            });
        }

        self.pump();
        self.ticker.is_running(now)
    }

    pub fn tick_now(&mut self) -> bool {
        self.tick(Instant::now())
    }

    // ========================================================================
    // Configuration
    // ========================================================================

    pub fn apply_config(&mut self, config: EditorConfig) {
        self.index.configure(config.hit_params());
        self.index.set_timeout(config.worker_timeout());
        self.ticker.set_idle_after(config.idle_stop());
        self.rebuild_throttle.set_interval(config.rebuild_throttle());
        self.config = config;
        self.scene.update_bounds(self.config.hit_padding);
        self.scene.mark_dirty();
        info!("editor config applied");
    }

    /// Reload the config if the watcher saw it change. Returns whether a new
    /// config was applied.
    pub fn poll_config(&mut self, watcher: &mut ConfigWatcher) -> bool {
        match watcher.poll() {
            Some(ConfigEvent::Modified | ConfigEvent::Created) => {
                match EditorConfig::load(watcher.path()) {
                    Ok(config) => {
                        self.apply_config(config);
                        true
                    }
                    Err(e) => {
                        warn!(error = %e, "config reload failed, keeping current config");
                        false
                    }
                }
            }
            Some(ConfigEvent::Deleted) => {
                info!("config file removed, keeping current config");
                false
            }
            Some(ConfigEvent::Error(e)) => {
                warn!(error = %e, "config watcher error");
                false
            }
            None => false,
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn state(&self) -> &ToolState {
        &self.state
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn database(&self) -> Option<&SceneDatabase> {
        self.database.as_ref()
    }

    /// Extent of the range index, as of the last brush selection.
    pub fn index_extent(&self) -> Option<Rect> {
        self.index_extent
    }

    pub fn pending_requests(&self) -> usize {
        self.index.pending_count()
    }

    pub fn is_running(&self, now: Instant) -> bool {
        self.ticker.is_running(now)
    }

    pub fn cursor(&self) -> Cursor {
        if self.state.is_creating() {
            Cursor::Crosshair
        } else {
            self.scene.resolved_hit().cursor()
        }
    }

    pub fn view(&self) -> RenderView<'_> {
        let scene = &self.scene;
        RenderView {
            boxes: &scene.boxes,
            arrows: &scene.arrows,
            arrow_cache: &scene.arrow_cache,
            bounds: scene.bounds.as_ref(),
            brush: scene.brush.as_ref(),
            hit: &scene.hit,
            selected_box_ids: &scene.selected_box_ids,
            selected_arrow_ids: &scene.selected_arrow_ids,
            camera: &scene.camera,
            spawning_box: scene.spawning_box.as_ref(),
            preview_arrow: scene.preview_arrow(),
        }
    }
}
