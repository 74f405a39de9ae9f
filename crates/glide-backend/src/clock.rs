#![forbid(unsafe_code)]

//! Monotonic time sources.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

/// Monotonic clock abstraction.
///
/// Native hosts use `Instant`; wasm hosts get `performance.now()` through
/// `web-time`. The carousel never reads wall time directly: all time flows
/// through this trait, and pointer timestamps must share its epoch.
pub trait Clock {
    /// Elapsed time since an unspecified epoch, monotonically increasing.
    fn now_mono(&self) -> Duration;
}

/// Real clock anchored at construction.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    epoch: web_time::Instant,
}

impl MonotonicClock {
    /// Start a clock at zero.
    #[must_use]
    pub fn new() -> Self {
        Self {
            epoch: web_time::Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now_mono(&self) -> Duration {
        self.epoch.elapsed()
    }
}

/// Hand-driven clock for tests and deterministic replays.
///
/// Clones share the same time, so a renderer and a carousel can observe one
/// clock that the test advances.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<Duration>>,
}

impl ManualClock {
    /// Create a clock at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Move time forward.
    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    /// Jump to an absolute time. Going backwards is clamped to the current time.
    pub fn set(&self, to: Duration) {
        self.now.set(to.max(self.now.get()));
    }
}

impl Clock for ManualClock {
    fn now_mono(&self) -> Duration {
        self.now.get()
    }
}
