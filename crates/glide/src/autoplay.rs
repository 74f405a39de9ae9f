#![forbid(unsafe_code)]

//! Autoplay timer: a single-shot deadline re-armed after each settle.
//!
//! The timer never fires by itself. The carousel polls it on every tick,
//! which keeps all state changes on the owning thread. Arming again replaces
//! the pending deadline, so at most one advance is ever outstanding.

use std::time::Duration;

/// Deadline-based autoplay timer.
#[derive(Debug, Clone, Default)]
pub struct AutoplayTimer {
    delay: Duration,
    pending: Option<Duration>,
}

impl AutoplayTimer {
    /// Create a timer with `delay`; zero disables autoplay.
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Current delay.
    #[inline]
    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Whether a non-zero delay is configured.
    #[inline]
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        !self.delay.is_zero()
    }

    /// Replace the delay and drop any pending deadline.
    pub fn set_delay(&mut self, delay: Duration) {
        self.delay = delay;
        self.cancel();
    }

    /// Arm the timer to fire `delay` after `now`, returning the deadline.
    /// Disarms instead when autoplay is disabled.
    pub fn begin(&mut self, now: Duration) -> Option<Duration> {
        self.pending = self.is_enabled().then(|| now + self.delay);
        self.pending
    }

    /// Drop the pending deadline, keeping the delay.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Disable autoplay entirely.
    pub fn stop(&mut self) {
        self.set_delay(Duration::ZERO);
    }

    /// When the pending arming fires.
    #[must_use]
    pub fn deadline(&self) -> Option<Duration> {
        self.pending
    }

    /// Returns `true` exactly once when the deadline has passed.
    pub fn poll(&mut self, now: Duration) -> bool {
        match self.pending {
            Some(deadline) if deadline <= now => {
                self.pending = None;
                true
            }
            _ => false,
        }
    }
}
