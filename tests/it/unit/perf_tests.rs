//! Unit tests for timing utilities.

use arrowboard::perf::{OperationStats, ScopedTimer, StatsTable, TARGET_FRAME_MS, measure};
use std::thread;
use std::time::Duration;

#[test]
fn test_measure_returns_result_and_time() {
    let (value, ms) = measure(|| {
        thread::sleep(Duration::from_millis(5));
        42
    });
    assert_eq!(value, 42);
    assert!(ms >= 5.0, "measured {ms}ms");
}

#[test]
fn test_scoped_timer_elapsed_grows() {
    let timer = ScopedTimer::new("test_scope", 1_000.0);
    let first = timer.elapsed_ms();
    thread::sleep(Duration::from_millis(2));
    assert!(timer.elapsed_ms() > first);
}

#[test]
fn test_empty_stats() {
    let stats = OperationStats::default();
    assert_eq!(stats.count(), 0);
    assert_eq!(stats.average(), 0.0);
    assert_eq!(stats.p95(), 0.0);
}

#[test]
fn test_slow_operations_still_summarize() {
    let mut table = StatsTable::default();
    for _ in 0..10 {
        table.record("update_hit_tree", TARGET_FRAME_MS * 2.0);
    }
    table.record("hit_test", 0.2);
    assert_eq!(table.log_summary(), 1);
    assert_eq!(table.get("update_hit_tree").map(|s| s.count()), Some(10));
    assert!(table.get("update_hit_tree").map(|s| s.p95()) > Some(TARGET_FRAME_MS));
}
