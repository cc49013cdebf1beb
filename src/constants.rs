//! Editor-wide constants.
//!
//! Centralizes thresholds and default values so the state machine, the
//! index worker and the transform library agree on the same numbers.
//! Most of these are only defaults: [`crate::settings::EditorConfig`]
//! can override them at runtime.

// ============================================================================
// Hit Testing
// ============================================================================

/// Padding around arrow curves and bounds handles, in screen pixels.
/// Divided by zoom before use so it stays constant on screen.
pub const HIT_PADDING: f64 = 15.0;

/// Total slop around the selection bounds that still counts as "inside".
/// Half of it is applied on each side.
pub const BOUNDS_SLOP: f64 = 16.0;

/// Base number of lookup-table samples for curve distance at zoom 1.0.
pub const LUT_SAMPLES: usize = 50;

/// Size of the probe rectangle used for point queries.
pub const PROBE_SIZE: f64 = 1.0;

// ============================================================================
// Gestures
// ============================================================================

/// Distance (document units) the pointer must travel before a press on the
/// canvas becomes a brush selection.
pub const BRUSH_THRESHOLD: f64 = 4.0;

/// Smallest width/height a resized selection envelope may shrink to.
pub const MIN_BOUNDS_SIZE: f64 = 1.0;

// ============================================================================
// Item Defaults
// ============================================================================

/// Fixed size of boxes created by the text tool.
pub const TEXT_BOX_SIZE: f64 = 100.0;

/// Label given to freshly created text boxes.
pub const DEFAULT_TEXT_LABEL: &str = "Text";

/// Fill color for new boxes.
pub const DEFAULT_BOX_COLOR: &str = "#FFF";

// ============================================================================
// Arrows
// ============================================================================

/// Constant bow added to every arrow arc.
pub const ARROW_BOW: f64 = 0.0;

/// How much short arrows curve (fraction of their length).
pub const ARROW_STRETCH: f64 = 0.5;

/// Distance at which arrows stop curving entirely.
pub const ARROW_STRETCH_MAX: f64 = 420.0;

/// Size of the stand-in rectangle used for point endpoints.
pub const POINT_ENDPOINT_SIZE: f64 = 1.0;

// ============================================================================
// History & Timing
// ============================================================================

/// Maximum undo history states to keep
pub const MAX_HISTORY_STATES: usize = 100;

/// Minimum interval between hit-index rebuilds while a gesture is active.
pub const REBUILD_THROTTLE_MS: u64 = 48;

/// The frame ticker stops after this long without input.
pub const IDLE_STOP_MS: u64 = 250;

/// Outstanding worker requests older than this are dropped.
pub const WORKER_TIMEOUT_MS: u64 = 500;

// ============================================================================
// Zoom & Pan
// ============================================================================

/// Minimum zoom level
pub const MIN_ZOOM: f64 = 0.1;

/// Maximum zoom level
pub const MAX_ZOOM: f64 = 5.0;

/// Default zoom level
pub const DEFAULT_ZOOM: f64 = 1.0;

/// Base of the exponential zoom curve; each wheel unit scales by this.
pub const ZOOM_BASE: f64 = 0.98;

// ============================================================================
// Seeding
// ============================================================================

/// Boxes in the demo scene.
pub const DEMO_BOX_COUNT: usize = 10;

/// Half-width of the square area reseeded boxes are scattered over.
pub const RESET_SPREAD: f64 = 1500.0;

/// Seeded box sides fall in `MIN_SEED_SIZE..MIN_SEED_SIZE + SEED_SIZE_RANGE`.
pub const MIN_SEED_SIZE: f64 = 32.0;
pub const SEED_SIZE_RANGE: f64 = 64.0;
