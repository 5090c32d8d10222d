//! Search control: wall-clock budget checked cooperatively by the search.

use std::time::{Duration, Instant};

/// Nodes between two clock reads. Must be a power of two.
const CHECK_INTERVAL: u64 = 2048;

/// Wall-clock budget for one iterative-deepening run.
///
/// The search does not get interrupted; it asks [`TimeControl::should_check`]
/// every node and reads the clock only every [`CHECK_INTERVAL`] nodes.
#[derive(Debug, Clone, Copy)]
pub struct TimeControl {
    start: Instant,
    limit: Duration,
}

impl TimeControl {
    /// Start the clock now with a budget of `limit_ms` milliseconds.
    pub fn new(limit_ms: u64) -> Self {
        Self {
            start: Instant::now(),
            limit: Duration::from_millis(limit_ms),
        }
    }

    /// Restart the clock with a new budget.
    pub fn restart(&mut self, limit_ms: u64) {
        *self = Self::new(limit_ms);
    }

    /// Whether the node counter has reached a clock-reading point.
    #[inline]
    pub fn should_check(nodes: u64) -> bool {
        nodes & (CHECK_INTERVAL - 1) == 0
    }

    /// Time since the clock was started.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// The configured budget.
    pub fn limit(&self) -> Duration {
        self.limit
    }

    /// Whether the budget is spent.
    pub fn time_over(&self) -> bool {
        self.elapsed() >= self.limit
    }
}

impl Default for TimeControl {
    fn default() -> Self {
        Self::new(u64::MAX)
    }
}
