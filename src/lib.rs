//! Arrowboard - an interactive diagram editor core.
//!
//! Boxes and curved arrows on a pannable, zoomable canvas. The crate covers
//! the editor's engine, not its rendering:
//!
//! - `input` - hierarchical interaction state machine
//! - `worker` - spatial index, hit testing and range selection behind a
//!   message-passing worker
//! - `transforms` - align, distribute, stretch and resize over box sets
//! - `history` - snapshot undo/redo
//! - `arrow` / `geometry` - arrow curves and the math under them
//! - `editor` - the facade a host application drives

pub mod arrow;
pub mod bounds;
pub mod constants;
pub mod editor;
pub mod error;
pub mod geometry;
pub mod history;
pub mod input;
pub mod logging;
pub mod perf;
pub mod persistence;
pub mod scene;
pub mod seed;
pub mod selecter;
pub mod settings;
pub mod spatial_index;
pub mod ticker;
pub mod transforms;
pub mod types;
pub mod worker;

pub use editor::{Editor, RenderView};
pub use input::{Event, ToolState};
pub use scene::{Scene, SceneSnapshot};
