//! Frame pacing: an idle-stopping ticker and a rebuild throttle.

use std::time::{Duration, Instant};

/// Keeps the frame loop alive while input keeps arriving and lets it stop
/// once input has been quiet for `idle_after`.
#[derive(Clone, Debug)]
pub struct Ticker {
    idle_after: Duration,
    last_activity: Option<Instant>,
}

impl Ticker {
    pub fn new(idle_after: Duration) -> Self {
        Self {
            idle_after,
            last_activity: None,
        }
    }

    pub fn touch(&mut self, now: Instant) {
        self.last_activity = Some(now);
    }

    pub fn is_running(&self, now: Instant) -> bool {
        self.last_activity
            .is_some_and(|last| now.saturating_duration_since(last) < self.idle_after)
    }

    pub fn set_idle_after(&mut self, idle_after: Duration) {
        self.idle_after = idle_after;
    }
}

/// Lets an action through at most once per `interval`.
#[derive(Clone, Debug)]
pub struct Throttle {
    interval: Duration,
    last: Option<Instant>,
}

impl Throttle {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: None,
        }
    }

    /// Whether the action may run at `now`; records the run if so.
    pub fn ready(&mut self, now: Instant) -> bool {
        let ready = self
            .last
            .is_none_or(|last| now.saturating_duration_since(last) >= self.interval);
        if ready {
            self.last = Some(now);
        }
        ready
    }

    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
    }
}
