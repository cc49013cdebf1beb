//! Spatial index worker.
//!
//! Index maintenance, hit testing and range selection run behind a
//! message-passing seam so they can live on a background thread. Requests
//! carry value copies of the scene; the worker never sees the live model.
//!
//! ```text
//! Editor ── Envelope{id, IndexRequest} ──▶ IndexTransport ──▶ IndexService
//!   ▲                                                            │
//!   └────────────── IndexReply{id, IndexResponse} ◀──────────────┘
//! ```
//!
//! [`WorkerTransport`] runs the service on a dedicated thread over mpsc
//! channels. [`InlineTransport`] runs it synchronously on the caller's
//! thread and queues replies, which keeps tests deterministic.

use crate::bounds::SelectionBounds;
use crate::error::WorkerError;
use crate::hit_test::{HitParams, HitTester};
use crate::perf::{StatsTable, measure};
use crate::selecter::BoxSelecter;
use crate::spatial_index::{EntryKind, SpatialEntry, SpatialIndex};
use crate::transforms;
use crate::types::{Arrow, ArrowGeometry, ArrowId, Axis, BoxId, CanvasBox, Hit, Point, Rect};
use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

// ============================================================================
// Protocol
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(pub u64);

/// Closed set of worker requests.
#[derive(Clone, Debug)]
pub enum IndexRequest {
    /// Rebuild the plain box index used for range selection.
    UpdateTree { boxes: Vec<CanvasBox> },
    /// Rebuild the hit index over boxes and padded arrow curves.
    UpdateHitTree {
        boxes: Vec<CanvasBox>,
        arrows: Vec<Arrow>,
        arrow_cache: Vec<(ArrowId, ArrowGeometry)>,
        zoom: f64,
    },
    HitTest {
        point: Point,
        bounds: Option<SelectionBounds>,
        zoom: f64,
    },
    /// Start a range selection anchored at `origin`.
    Selecter { origin: Point },
    /// Query the active range selection with the pointer at `point`.
    Selected { point: Point },
    Stretch { boxes: Vec<CanvasBox>, axis: Axis },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RequestKind {
    UpdateTree,
    UpdateHitTree,
    HitTest,
    Selecter,
    Selected,
    Stretch,
}

impl RequestKind {
    pub fn label(self) -> &'static str {
        match self {
            RequestKind::UpdateTree => "update_tree",
            RequestKind::UpdateHitTree => "update_hit_tree",
            RequestKind::HitTest => "hit_test",
            RequestKind::Selecter => "selecter",
            RequestKind::Selected => "selected",
            RequestKind::Stretch => "stretch",
        }
    }

    /// Whether the worker answers this kind of request.
    pub fn expects_reply(self) -> bool {
        !matches!(self, RequestKind::UpdateHitTree)
    }
}

impl IndexRequest {
    pub fn kind(&self) -> RequestKind {
        match self {
            IndexRequest::UpdateTree { .. } => RequestKind::UpdateTree,
            IndexRequest::UpdateHitTree { .. } => RequestKind::UpdateHitTree,
            IndexRequest::HitTest { .. } => RequestKind::HitTest,
            IndexRequest::Selecter { .. } => RequestKind::Selecter,
            IndexRequest::Selected { .. } => RequestKind::Selected,
            IndexRequest::Stretch { .. } => RequestKind::Stretch,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum IndexResponse {
    /// The box index was rebuilt with this many entries.
    TreeUpdated { len: usize },
    Hit(Hit),
    /// Extent of the box index when a range selection starts.
    Extent(Option<Rect>),
    Selected(Vec<BoxId>),
    Stretched { boxes: Vec<CanvasBox>, axis: Axis },
}

#[derive(Clone, Debug)]
pub struct Envelope {
    pub id: RequestId,
    pub request: IndexRequest,
}

#[derive(Clone, Debug)]
pub struct IndexReply {
    pub id: RequestId,
    pub response: IndexResponse,
}

// ============================================================================
// Service
// ============================================================================

/// The index state machine that runs inside the worker.
#[derive(Default)]
pub struct IndexService {
    tree: SpatialIndex,
    hits: HitTester,
    selecter: Option<BoxSelecter>,
}

impl IndexService {
    pub fn new(params: HitParams) -> Self {
        Self {
            hits: HitTester::new(params),
            ..Self::default()
        }
    }

    /// Handle one request. `None` for requests without a reply.
    pub fn handle(&mut self, request: IndexRequest) -> Option<IndexResponse> {
        match request {
            IndexRequest::UpdateTree { boxes } => {
                self.tree.rebuild(
                    boxes
                        .iter()
                        .map(|b| SpatialEntry::new(b.id.clone(), EntryKind::Box, b.z, b.rect())),
                );
                Some(IndexResponse::TreeUpdated {
                    len: self.tree.len(),
                })
            }
            IndexRequest::UpdateHitTree {
                boxes,
                arrows,
                arrow_cache,
                zoom,
            } => {
                self.hits.rebuild(&boxes, &arrows, &arrow_cache, zoom);
                None
            }
            IndexRequest::HitTest {
                point,
                bounds,
                zoom,
            } => Some(IndexResponse::Hit(self.hits.hit_test(point, bounds.as_ref(), zoom))),
            IndexRequest::Selecter { origin } => {
                self.selecter = Some(BoxSelecter::new(origin));
                Some(IndexResponse::Extent(self.tree.extent()))
            }
            IndexRequest::Selected { point } => {
                let ids = match &self.selecter {
                    Some(selecter) => selecter.select(&self.tree, point),
                    None => {
                        warn!("range query without an active selecter");
                        Vec::new()
                    }
                };
                Some(IndexResponse::Selected(ids))
            }
            IndexRequest::Stretch { mut boxes, axis } => {
                transforms::stretch(&mut boxes, axis);
                Some(IndexResponse::Stretched { boxes, axis })
            }
        }
    }

    pub fn set_params(&mut self, params: HitParams) {
        self.hits.set_params(params);
    }
}

// ============================================================================
// Transports
// ============================================================================

/// The seam between the editor and wherever the index service runs.
pub trait IndexTransport {
    fn send(&mut self, envelope: Envelope) -> Result<(), WorkerError>;

    /// Next reply if one is ready.
    fn try_recv(&mut self) -> Option<IndexReply>;

    /// Block up to `timeout` for the next reply.
    fn recv_timeout(&mut self, timeout: Duration) -> Option<IndexReply>;

    /// Update hit-testing parameters on the service.
    fn configure(&mut self, params: HitParams) -> Result<(), WorkerError>;
}

/// Runs the service synchronously on the caller's thread.
#[derive(Default)]
pub struct InlineTransport {
    service: IndexService,
    replies: VecDeque<IndexReply>,
    stats: StatsTable,
}

impl InlineTransport {
    pub fn new(params: HitParams) -> Self {
        Self {
            service: IndexService::new(params),
            ..Self::default()
        }
    }

    pub fn stats(&self) -> &StatsTable {
        &self.stats
    }
}

impl IndexTransport for InlineTransport {
    fn send(&mut self, envelope: Envelope) -> Result<(), WorkerError> {
        let kind = envelope.request.kind();
        let (response, ms) = measure(|| self.service.handle(envelope.request));
        self.stats.record(kind.label(), ms);
        if let Some(response) = response {
            self.replies.push_back(IndexReply {
                id: envelope.id,
                response,
            });
        }
        Ok(())
    }

    fn try_recv(&mut self) -> Option<IndexReply> {
        self.replies.pop_front()
    }

    fn recv_timeout(&mut self, _timeout: Duration) -> Option<IndexReply> {
        self.replies.pop_front()
    }

    fn configure(&mut self, params: HitParams) -> Result<(), WorkerError> {
        self.service.set_params(params);
        Ok(())
    }
}

enum WorkerMessage {
    Request(Envelope),
    Configure(HitParams),
    Shutdown,
}

/// Runs the service on a dedicated thread.
pub struct WorkerTransport {
    tx: Sender<WorkerMessage>,
    rx: Receiver<IndexReply>,
    handle: Option<JoinHandle<()>>,
    stats: Arc<Mutex<StatsTable>>,
}

impl WorkerTransport {
    pub fn spawn(params: HitParams) -> Result<Self, WorkerError> {
        let (tx, worker_rx) = mpsc::channel();
        let (worker_tx, rx) = mpsc::channel();
        let stats = Arc::new(Mutex::new(StatsTable::default()));
        let worker_stats = Arc::clone(&stats);

        let handle = thread::Builder::new()
            .name("arrowboard-index".into())
            .spawn(move || run_worker(IndexService::new(params), worker_rx, worker_tx, worker_stats))?;

        info!("index worker started");
        Ok(Self {
            tx,
            rx,
            handle: Some(handle),
            stats,
        })
    }

    /// Copy of the per-request timing statistics.
    pub fn stats(&self) -> StatsTable {
        self.stats.lock().clone()
    }
}

impl IndexTransport for WorkerTransport {
    fn send(&mut self, envelope: Envelope) -> Result<(), WorkerError> {
        self.tx
            .send(WorkerMessage::Request(envelope))
            .map_err(|_| WorkerError::Disconnected)
    }

    fn try_recv(&mut self) -> Option<IndexReply> {
        match self.rx.try_recv() {
            Ok(reply) => Some(reply),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                warn!("index worker reply channel closed");
                None
            }
        }
    }

    fn recv_timeout(&mut self, timeout: Duration) -> Option<IndexReply> {
        match self.rx.recv_timeout(timeout) {
            Ok(reply) => Some(reply),
            Err(RecvTimeoutError::Timeout) => None,
            Err(RecvTimeoutError::Disconnected) => {
                warn!("index worker reply channel closed");
                None
            }
        }
    }

    fn configure(&mut self, params: HitParams) -> Result<(), WorkerError> {
        self.tx
            .send(WorkerMessage::Configure(params))
            .map_err(|_| WorkerError::Disconnected)
    }
}

impl Drop for WorkerTransport {
    fn drop(&mut self) {
        let _ = self.tx.send(WorkerMessage::Shutdown);
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                error!("index worker panicked");
            }
        }
        self.stats.lock().log_summary();
    }
}

fn run_worker(
    mut service: IndexService,
    rx: Receiver<WorkerMessage>,
    tx: Sender<IndexReply>,
    stats: Arc<Mutex<StatsTable>>,
) {
    while let Ok(first) = rx.recv() {
        // Drain whatever queued up behind the first message so stale hit
        // index rebuilds can be skipped.
        let mut batch = vec![first];
        batch.extend(rx.try_iter());
        let last_rebuild = batch.iter().rposition(|m| {
            matches!(
                m,
                WorkerMessage::Request(Envelope {
                    request: IndexRequest::UpdateHitTree { .. },
                    ..
                })
            )
        });

        for (i, message) in batch.into_iter().enumerate() {
            let envelope = match message {
                WorkerMessage::Shutdown => {
                    debug!("index worker stopping");
                    return;
                }
                WorkerMessage::Configure(params) => {
                    service.set_params(params);
                    continue;
                }
                WorkerMessage::Request(envelope) => envelope,
            };

            let kind = envelope.request.kind();
            if kind == RequestKind::UpdateHitTree && Some(i) != last_rebuild {
                debug!("skipping superseded hit index rebuild");
                continue;
            }

            let (response, ms) = measure(|| service.handle(envelope.request));
            stats.lock().record(kind.label(), ms);

            if let Some(response) = response {
                if tx.send(IndexReply {
                    id: envelope.id,
                    response,
                })
                .is_err()
                {
                    debug!("editor dropped, index worker exiting");
                    return;
                }
            }
        }
    }
}

// ============================================================================
// Client
// ============================================================================

#[derive(Clone, Copy, Debug)]
struct PendingRequest {
    kind: RequestKind,
    sent_at: Instant,
}

/// Editor-side handle: assigns request ids, tracks outstanding requests and
/// drops replies that arrive after their request timed out.
pub struct IndexClient {
    transport: Box<dyn IndexTransport>,
    next_id: u64,
    pending: HashMap<RequestId, PendingRequest>,
    timeout: Duration,
}

impl IndexClient {
    pub fn new(transport: Box<dyn IndexTransport>, timeout: Duration) -> Self {
        Self {
            transport,
            next_id: 0,
            pending: HashMap::new(),
            timeout,
        }
    }

    pub fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = timeout;
    }

    pub fn configure(&mut self, params: HitParams) {
        if let Err(e) = self.transport.configure(params) {
            error!(error = %e, "failed to reconfigure index worker");
        }
    }

    /// Send a request. Failures are logged and yield `None`.
    pub fn request(&mut self, request: IndexRequest) -> Option<RequestId> {
        let id = RequestId(self.next_id);
        self.next_id += 1;
        let kind = request.kind();

        match self.transport.send(Envelope { id, request }) {
            Ok(()) => {
                if kind.expects_reply() {
                    self.pending.insert(
                        id,
                        PendingRequest {
                            kind,
                            sent_at: Instant::now(),
                        },
                    );
                }
                Some(id)
            }
            Err(e) => {
                error!(error = %e, request = kind.label(), "index request failed");
                None
            }
        }
    }

    /// Every reply that is ready now, in arrival order.
    pub fn poll(&mut self) -> Vec<IndexResponse> {
        let mut out = Vec::new();
        while let Some(reply) = self.transport.try_recv() {
            self.accept(reply, &mut out);
        }
        out
    }

    /// Block until every outstanding request is answered or `timeout`
    /// passes.
    pub fn wait(&mut self, timeout: Duration) -> Vec<IndexResponse> {
        let deadline = Instant::now() + timeout;
        let mut out = Vec::new();
        while !self.pending.is_empty() {
            let now = Instant::now();
            if now >= deadline {
                break;
            }
            match self.transport.recv_timeout(deadline - now) {
                Some(reply) => self.accept(reply, &mut out),
                None => break,
            }
        }
        out
    }

    fn accept(&mut self, reply: IndexReply, out: &mut Vec<IndexResponse>) {
        if self.pending.remove(&reply.id).is_some() {
            out.push(reply.response);
        } else {
            debug!(id = reply.id.0, "ignoring reply to expired request");
        }
    }

    /// Forget requests older than the timeout and report their kinds.
    pub fn expire(&mut self, now: Instant) -> Vec<RequestKind> {
        let timeout = self.timeout;
        let mut expired = Vec::new();
        self.pending.retain(|_, p| {
            let alive = now.saturating_duration_since(p.sent_at) <= timeout;
            if !alive {
                expired.push(p.kind);
            }
            alive
        });
        expired
    }

    pub fn has_pending(&self, kind: RequestKind) -> bool {
        self.pending.values().any(|p| p.kind == kind)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }
}
