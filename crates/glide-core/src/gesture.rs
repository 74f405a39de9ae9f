#![forbid(unsafe_code)]

//! Gesture classification: turns pointer samples into a swipe decision.
//!
//! [`GestureClassifier`] owns at most one [`GestureSession`]. A session moves
//! through `Idle → Tracking → {Scrolling, Swiping} → Idle`:
//!
//! - **Start** opens a session, superseding any unterminated one. A
//!   superseded swipe is handed back as a cancelled [`Release`] so its
//!   displacement can be undone.
//! - The **first move** fixes the scroll lock. Mostly-vertical motion hands
//!   the interaction to native scrolling, anything else is a swipe.
//! - While **swiping**, each move reports the (possibly damped) horizontal
//!   displacement.
//! - **End** turns a swipe into a [`Release`] carrying a commit/cancel
//!   [`Decision`] and a [`Direction`].
//!
//! # Invariants
//!
//! 1. The scroll lock is decided exactly once per session.
//! 2. Only a session locked to swiping can produce a [`Release`].
//! 3. Damped displacement keeps the sign of the raw displacement and its
//!    magnitude stays below the panel width.
//! 4. After `reset()` no session exists.
//! 5. Every swipe ends in exactly one [`Release`]: on end, on cancel, or
//!    when a new start supersedes it.
//!
//! # Failure Modes
//!
//! - Moves without a session, from a secondary pointer, or with several
//!   contacts are ignored rather than rejected.
//! - A zero displacement swipe reads as backward, so it commits backward
//!   when the carousel wraps and cancels otherwise.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::event::{Point, PointerPhase, PointerSample};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Thresholds deciding whether a released swipe commits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// A release faster than this counts as a flick (default: 250ms).
    pub flick_window_ms: u64,
    /// Minimum displacement (px) for a flick to commit (default: 20).
    pub flick_distance: f64,
    /// Fraction of the panel width that commits regardless of speed
    /// (default: 0.5).
    pub commit_fraction: f64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            flick_window_ms: 250,
            flick_distance: 20.0,
            commit_fraction: 0.5,
        }
    }
}

impl GestureConfig {
    /// Flick window as a [`Duration`].
    #[inline]
    #[must_use]
    pub fn flick_window(&self) -> Duration {
        Duration::from_millis(self.flick_window_ms)
    }

    /// Whether a release of `delta_x` after `elapsed` is a valid commit.
    #[must_use]
    pub fn is_valid_commit(&self, delta_x: f64, elapsed: Duration, width: f64) -> bool {
        let distance = delta_x.abs();
        (elapsed < self.flick_window() && distance > self.flick_distance)
            || distance > width * self.commit_fraction
    }
}

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// Which way a commit advances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Toward higher indices (content moves right-to-left).
    Forward,
    /// Toward lower indices.
    Backward,
}

impl Direction {
    /// Direction implied by a horizontal displacement.
    #[inline]
    #[must_use]
    pub fn from_delta(delta_x: f64) -> Self {
        if delta_x < 0.0 {
            Self::Forward
        } else {
            Self::Backward
        }
    }

    /// Sign of the panel motion that realizes this direction.
    #[inline]
    #[must_use]
    pub const fn motion_sign(self) -> f64 {
        match self {
            Self::Forward => -1.0,
            Self::Backward => 1.0,
        }
    }
}

/// Scroll-lock decision of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScrollLock {
    /// No move sample seen yet.
    #[default]
    Undecided,
    /// The session is a horizontal swipe.
    LockedHorizontal,
    /// Native vertical scrolling owns the session.
    LockedVertical,
}

/// Observable state of the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GestureState {
    /// No session.
    Idle,
    /// Session open, lock undecided.
    Tracking,
    /// Session locked to native scroll.
    Scrolling,
    /// Session locked to swiping.
    Swiping,
}

/// Carousel facts the classifier needs to damp and bound a swipe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureContext {
    /// Current panel index.
    pub index: usize,
    /// Number of panels.
    pub count: usize,
    /// Panel width in pixels.
    pub width: f64,
    /// Whether the carousel wraps.
    pub continuous: bool,
}

impl GestureContext {
    #[inline]
    fn at_first(&self) -> bool {
        self.index == 0
    }

    #[inline]
    fn at_last(&self) -> bool {
        self.index + 1 == self.count
    }

    /// Whether dragging by `delta_x` meets edge resistance.
    ///
    /// Dragging right at the first panel resists only without wrapping;
    /// dragging left at the last panel always resists.
    #[must_use]
    pub fn resists(&self, delta_x: f64) -> bool {
        (!self.continuous && self.at_first() && delta_x > 0.0)
            || (self.at_last() && delta_x < 0.0)
    }

    /// Whether releasing at `delta_x` would step past either end.
    #[must_use]
    pub fn is_past_bounds(&self, delta_x: f64) -> bool {
        !self.continuous
            && ((self.at_first() && delta_x > 0.0) || (self.at_last() && delta_x < 0.0))
    }
}

/// Edge-resistance damping: `d / (|d| / width + 1)`.
///
/// Identity at zero, strictly increasing, and bounded by `±width`.
#[inline]
#[must_use]
pub fn resistance(delta_x: f64, width: f64) -> f64 {
    if width <= 0.0 {
        return 0.0;
    }
    delta_x / (delta_x.abs() / width + 1.0)
}

/// Outcome of a released swipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Decision {
    /// Advance one panel.
    Commit,
    /// Snap back to the resting layout.
    Cancel,
}

/// A swipe that ended.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Release {
    /// Final (damped) horizontal displacement.
    pub delta_x: f64,
    /// Time from start to release.
    pub elapsed: Duration,
    /// Direction implied by the displacement.
    pub direction: Direction,
    /// Whether to commit.
    pub decision: Decision,
}

/// What the carousel should do with a processed sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureOutcome {
    /// The sample had no effect.
    Ignored,
    /// A new session started.
    Began {
        /// The swipe this start cut short, released as a cancel.
        superseded: Option<Release>,
    },
    /// The session belongs to native scroll.
    Scroll {
        /// Whether the host must still suppress default scrolling.
        prevent_default: bool,
    },
    /// The session is swiping; move the window by this displacement.
    Drag {
        /// Damped horizontal displacement.
        delta_x: f64,
    },
    /// A swipe ended or was cancelled.
    Released(Release),
    /// A session ended without ever swiping.
    Abandoned,
}

impl GestureOutcome {
    /// Whether the host should suppress its default scroll handling.
    #[must_use]
    pub fn prevents_default(&self) -> bool {
        match self {
            Self::Drag { .. } => true,
            Self::Scroll { prevent_default } => *prevent_default,
            _ => false,
        }
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// State of one interaction, from start to end.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureSession {
    start: Point,
    start_time: Duration,
    delta_x: f64,
    lock: ScrollLock,
}

impl GestureSession {
    fn new(start: Point, start_time: Duration) -> Self {
        Self {
            start,
            start_time,
            delta_x: 0.0,
            lock: ScrollLock::Undecided,
        }
    }

    /// Where the interaction began.
    #[inline]
    #[must_use]
    pub const fn start_point(&self) -> Point {
        self.start
    }

    /// When the interaction began.
    #[inline]
    #[must_use]
    pub const fn start_time(&self) -> Duration {
        self.start_time
    }

    /// Latest damped displacement.
    #[inline]
    #[must_use]
    pub const fn delta_x(&self) -> f64 {
        self.delta_x
    }

    /// Scroll-lock decision so far.
    #[inline]
    #[must_use]
    pub const fn scroll_lock(&self) -> ScrollLock {
        self.lock
    }

    /// The swipe as a cancelled release at `now`; `None` unless swiping.
    fn cancelled(&self, now: Duration) -> Option<Release> {
        (self.lock == ScrollLock::LockedHorizontal).then(|| Release {
            delta_x: self.delta_x,
            elapsed: now.saturating_sub(self.start_time),
            direction: Direction::from_delta(self.delta_x),
            decision: Decision::Cancel,
        })
    }
}

// ---------------------------------------------------------------------------
// GestureClassifier
// ---------------------------------------------------------------------------

/// Per-carousel gesture state machine.
#[derive(Debug, Clone)]
pub struct GestureClassifier {
    config: GestureConfig,
    disable_vertical_scroll: bool,
    session: Option<GestureSession>,
}

impl GestureClassifier {
    /// Create a classifier.
    ///
    /// With `disable_vertical_scroll`, vertically locked sessions still ask
    /// the host to suppress scrolling.
    #[must_use]
    pub fn new(config: GestureConfig, disable_vertical_scroll: bool) -> Self {
        Self {
            config,
            disable_vertical_scroll,
            session: None,
        }
    }

    /// Feed one sample.
    pub fn process(&mut self, sample: &PointerSample, ctx: &GestureContext) -> GestureOutcome {
        match sample.phase {
            PointerPhase::Start => self.on_start(sample),
            PointerPhase::Move => self.on_move(sample, ctx),
            PointerPhase::End => self.on_end(sample, ctx),
            PointerPhase::Cancel => self.on_cancel(sample),
        }
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> GestureState {
        match self.session.map(|s| s.lock) {
            None => GestureState::Idle,
            Some(ScrollLock::Undecided) => GestureState::Tracking,
            Some(ScrollLock::LockedVertical) => GestureState::Scrolling,
            Some(ScrollLock::LockedHorizontal) => GestureState::Swiping,
        }
    }

    /// The open session, if any.
    #[inline]
    #[must_use]
    pub fn session(&self) -> Option<&GestureSession> {
        self.session.as_ref()
    }

    /// Whether a swipe is in flight.
    #[inline]
    #[must_use]
    pub fn is_swiping(&self) -> bool {
        self.state() == GestureState::Swiping
    }

    /// Drop any session without emitting anything.
    pub fn reset(&mut self) {
        self.session = None;
    }

    /// Thresholds in use.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &GestureConfig {
        &self.config
    }
}

impl GestureClassifier {
    fn on_start(&mut self, sample: &PointerSample) -> GestureOutcome {
        if !sample.primary {
            return GestureOutcome::Ignored;
        }
        let superseded = self
            .session
            .replace(GestureSession::new(sample.pos, sample.timestamp))
            .and_then(|stale| stale.cancelled(sample.timestamp));
        #[cfg(feature = "tracing")]
        if let Some(stale) = &superseded {
            tracing::debug!(delta_x = stale.delta_x, "new start supersedes swipe");
        }
        GestureOutcome::Began { superseded }
    }

    fn on_move(&mut self, sample: &PointerSample, ctx: &GestureContext) -> GestureOutcome {
        if sample.is_multi_touch() || !sample.primary {
            return GestureOutcome::Ignored;
        }
        let disable_vertical_scroll = self.disable_vertical_scroll;
        let Some(session) = self.session.as_mut() else {
            return GestureOutcome::Ignored;
        };

        let raw_dx = sample.pos.x - session.start.x;
        let raw_dy = sample.pos.y - session.start.y;

        if session.lock == ScrollLock::Undecided {
            session.lock = if raw_dx.abs() < raw_dy.abs() {
                ScrollLock::LockedVertical
            } else {
                ScrollLock::LockedHorizontal
            };
        }

        match session.lock {
            ScrollLock::LockedHorizontal => {
                let delta_x = if ctx.resists(raw_dx) {
                    resistance(raw_dx, ctx.width)
                } else {
                    raw_dx
                };
                session.delta_x = delta_x;
                #[cfg(feature = "tracing")]
                tracing::trace!(raw_dx, delta_x, "swipe drag");
                GestureOutcome::Drag { delta_x }
            }
            _ => GestureOutcome::Scroll {
                prevent_default: disable_vertical_scroll,
            },
        }
    }

    fn on_end(&mut self, sample: &PointerSample, ctx: &GestureContext) -> GestureOutcome {
        if !sample.primary {
            return GestureOutcome::Ignored;
        }
        let Some(session) = self.session.take() else {
            return GestureOutcome::Ignored;
        };
        if session.lock != ScrollLock::LockedHorizontal {
            return GestureOutcome::Abandoned;
        }

        let delta_x = session.delta_x;
        let elapsed = sample.timestamp.saturating_sub(session.start_time);
        let direction = Direction::from_delta(delta_x);
        let valid = self.config.is_valid_commit(delta_x, elapsed, ctx.width);
        let past_bounds = ctx.is_past_bounds(delta_x);

        let decision = if (valid && !past_bounds) || ctx.continuous {
            Decision::Commit
        } else {
            Decision::Cancel
        };

        #[cfg(feature = "tracing")]
        tracing::debug!(
            delta_x,
            elapsed_ms = elapsed.as_millis() as u64,
            valid,
            past_bounds,
            ?direction,
            ?decision,
            "swipe released"
        );

        GestureOutcome::Released(Release {
            delta_x,
            elapsed,
            direction,
            decision,
        })
    }

    fn on_cancel(&mut self, sample: &PointerSample) -> GestureOutcome {
        let Some(session) = self.session.take() else {
            return GestureOutcome::Ignored;
        };
        match session.cancelled(sample.timestamp) {
            Some(release) => GestureOutcome::Released(release),
            None => GestureOutcome::Abandoned,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
