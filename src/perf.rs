//! Timing helpers for the editor's hot paths.
//!
//! Event dispatch, hit testing and index rebuilds are wrapped in
//! [`profile_scope!`]. Without the `profiling` feature the macro compiles
//! to nothing; with it, each scope becomes a [`ScopedTimer`] and slow
//! scopes are traced with their nesting depth.
//!
//! ```ignore
//! fn rebuild() {
//!     profile_scope!("hit_index_rebuild");
//!     // ...
//! }
//! ```
//!
//! The index worker keeps a [`StatsTable`] of per-request timings that is
//! logged when its transport is dropped.

use std::collections::{HashMap, VecDeque};
use std::time::{Duration, Instant};
#[cfg(feature = "profiling")]
use tracing::trace;
use tracing::{debug, warn};

// ============================================================================
// Budgets
// ============================================================================

/// One frame at 60Hz.
pub const TARGET_FRAME_MS: f64 = 16.67;

/// Samples retained per operation for average and percentile figures.
const STATS_SAMPLE_COUNT: usize = 100;

/// Threshold used by [`ScopedTimer::for_profiling`].
const PROFILING_THRESHOLD_MS: f64 = 1.0;

fn as_ms(duration: Duration) -> f64 {
    duration.as_secs_f64() * 1000.0
}

// ============================================================================
// profile_scope!
// ============================================================================

/// Time the enclosing scope under `$name`, optionally with a custom
/// threshold in milliseconds. Expands to nothing without `profiling`.
#[macro_export]
macro_rules! profile_scope {
    ($name:expr) => {
        #[cfg(feature = "profiling")]
        let _scope_timer = $crate::perf::ScopedTimer::for_profiling($name);
        #[cfg(not(feature = "profiling"))]
        let _ = $name;
    };
    ($name:expr, $threshold_ms:expr) => {
        #[cfg(feature = "profiling")]
        let _scope_timer = $crate::perf::ScopedTimer::new($name, $threshold_ms);
        #[cfg(not(feature = "profiling"))]
        let _ = ($name, $threshold_ms);
    };
}

pub use profile_scope;

// ============================================================================
// Per-operation statistics
// ============================================================================

/// Timings for one operation: a lifetime count and maximum plus a bounded
/// window of recent samples.
#[derive(Debug, Clone)]
pub struct OperationStats {
    recent: VecDeque<f64>,
    window_total: f64,
    count: u64,
    max_ms: f64,
}

impl Default for OperationStats {
    fn default() -> Self {
        Self {
            recent: VecDeque::with_capacity(STATS_SAMPLE_COUNT),
            window_total: 0.0,
            count: 0,
            max_ms: 0.0,
        }
    }
}

impl OperationStats {
    pub fn record(&mut self, ms: f64) {
        if self.recent.len() == STATS_SAMPLE_COUNT {
            self.window_total -= self.recent.pop_front().unwrap_or_default();
        }
        self.recent.push_back(ms);
        self.window_total += ms;
        self.count += 1;
        self.max_ms = self.max_ms.max(ms);
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn max(&self) -> f64 {
        self.max_ms
    }

    /// Mean of the retained window; zero before any sample.
    pub fn average(&self) -> f64 {
        match self.recent.len() {
            0 => 0.0,
            n => self.window_total / n as f64,
        }
    }

    /// Nearest-rank 95th percentile of the retained window.
    pub fn p95(&self) -> f64 {
        let mut window: Vec<f64> = self.recent.iter().copied().collect();
        window.sort_by(f64::total_cmp);
        let rank = (window.len() * 95 / 100).min(window.len().saturating_sub(1));
        window.get(rank).copied().unwrap_or(0.0)
    }
}

/// Operation name to [`OperationStats`].
#[derive(Debug, Clone, Default)]
pub struct StatsTable {
    operations: HashMap<&'static str, OperationStats>,
}

impl StatsTable {
    pub fn record(&mut self, name: &'static str, ms: f64) {
        self.operations.entry(name).or_default().record(ms);
    }

    pub fn get(&self, name: &str) -> Option<&OperationStats> {
        self.operations.get(name)
    }

    pub fn total_count(&self) -> u64 {
        self.operations.values().map(OperationStats::count).sum()
    }

    /// One log line per operation in name order. Operations whose p95 is
    /// over [`TARGET_FRAME_MS`] are logged at warn level and counted in the
    /// return value.
    pub fn log_summary(&self) -> usize {
        let mut rows: Vec<_> = self.operations.iter().collect();
        rows.sort_unstable_by_key(|(name, _)| **name);
        let mut over_budget = 0;
        for (name, stats) in rows {
            let avg_ms = format!("{:.2}", stats.average());
            let p95_ms = format!("{:.2}", stats.p95());
            if stats.p95() > TARGET_FRAME_MS {
                over_budget += 1;
                warn!(operation = name, count = stats.count(), avg_ms, p95_ms, "Operation over frame budget");
            } else {
                debug!(operation = name, count = stats.count(), avg_ms, p95_ms, "Operation stats");
            }
        }
        over_budget
    }
}

// ============================================================================
// ScopedTimer
// ============================================================================

#[cfg(feature = "profiling")]
thread_local! {
    static NESTING: std::cell::Cell<usize> = const { std::cell::Cell::new(0) };
}

/// Reports its own lifetime when dropped if it ran past `threshold_ms`.
pub struct ScopedTimer {
    name: &'static str,
    started: Instant,
    threshold_ms: f64,
    #[cfg(feature = "profiling")]
    nesting: usize,
}

impl ScopedTimer {
    pub fn new(name: &'static str, threshold_ms: f64) -> Self {
        Self {
            name,
            started: Instant::now(),
            threshold_ms,
            #[cfg(feature = "profiling")]
            nesting: NESTING.with(|n| n.replace(n.get() + 1)),
        }
    }

    pub fn for_profiling(name: &'static str) -> Self {
        Self::new(name, PROFILING_THRESHOLD_MS)
    }

    pub fn elapsed_ms(&self) -> f64 {
        as_ms(self.started.elapsed())
    }
}

impl Drop for ScopedTimer {
    fn drop(&mut self) {
        #[cfg(feature = "profiling")]
        NESTING.with(|n| n.set(self.nesting));

        let elapsed_ms = self.elapsed_ms();
        if elapsed_ms <= self.threshold_ms {
            return;
        }

        #[cfg(feature = "profiling")]
        trace!("{}{} took {:.2}ms", "  ".repeat(self.nesting), self.name, elapsed_ms);

        #[cfg(not(feature = "profiling"))]
        warn!(
            operation = self.name,
            elapsed_ms = format!("{elapsed_ms:.2}"),
            threshold_ms = format!("{:.2}", self.threshold_ms),
            "Slow operation"
        );
    }
}

/// Run `f`, returning its result and the wall time it took in milliseconds.
#[inline]
pub fn measure<T>(f: impl FnOnce() -> T) -> (T, f64) {
    let started = Instant::now();
    let value = f();
    (value, as_ms(started.elapsed()))
}
