#![forbid(unsafe_code)]

//! Canonical pointer input.
//!
//! Hosts deliver touch, pen, and mouse input in different shapes. Everything
//! is folded into one [`PointerSample`] at the boundary so the gesture state
//! machine never sees a platform-specific event.
//!
//! # Design Notes
//!
//! - Coordinates are page pixels as `f64`; only horizontal and vertical
//!   displacement from the session start matter.
//! - Timestamps are monotonic offsets from an unspecified epoch. They must
//!   share the timebase of the runtime clock.
//! - A pinch is reported as `contacts > 1`, whatever the source shape was.

use std::time::Duration;

/// A 2D point in page pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl Point {
    /// Create a new point.
    #[inline]
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Which part of an interaction a sample belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerPhase {
    /// Contact began (touchstart, pointerdown).
    Start,
    /// Contact moved.
    Move,
    /// Contact lifted.
    End,
    /// The host aborted the interaction (touchcancel, lost capture).
    Cancel,
}

/// One normalized pointer sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    /// Interaction phase.
    pub phase: PointerPhase,
    /// Position of the tracked contact.
    pub pos: Point,
    /// Number of simultaneous contacts. More than one means pinch.
    pub contacts: u8,
    /// Whether this sample comes from the primary pointer.
    pub primary: bool,
    /// Monotonic timestamp.
    pub timestamp: Duration,
}

impl PointerSample {
    /// Create a single-contact primary sample.
    #[must_use]
    pub const fn new(phase: PointerPhase, x: f64, y: f64, timestamp: Duration) -> Self {
        Self {
            phase,
            pos: Point::new(x, y),
            contacts: 1,
            primary: true,
            timestamp,
        }
    }

    /// Shorthand for a [`PointerPhase::Start`] sample.
    #[must_use]
    pub const fn start(x: f64, y: f64, timestamp: Duration) -> Self {
        Self::new(PointerPhase::Start, x, y, timestamp)
    }

    /// Shorthand for a [`PointerPhase::Move`] sample.
    #[must_use]
    pub const fn moved(x: f64, y: f64, timestamp: Duration) -> Self {
        Self::new(PointerPhase::Move, x, y, timestamp)
    }

    /// Shorthand for a [`PointerPhase::End`] sample.
    #[must_use]
    pub const fn end(x: f64, y: f64, timestamp: Duration) -> Self {
        Self::new(PointerPhase::End, x, y, timestamp)
    }

    /// Shorthand for a [`PointerPhase::Cancel`] sample.
    #[must_use]
    pub const fn cancel(timestamp: Duration) -> Self {
        Self::new(PointerPhase::Cancel, 0.0, 0.0, timestamp)
    }

    /// Override the contact count.
    #[must_use]
    pub const fn with_contacts(mut self, contacts: u8) -> Self {
        self.contacts = contacts;
        self
    }

    /// Mark the sample as coming from a secondary pointer.
    #[must_use]
    pub const fn secondary(mut self) -> Self {
        self.primary = false;
        self
    }

    /// Whether more than one contact is down.
    #[inline]
    #[must_use]
    pub const fn is_multi_touch(&self) -> bool {
        self.contacts > 1
    }

    /// Normalize a platform event into a sample.
    ///
    /// Returns `None` when the raw event carries no usable contact (a touch
    /// list that is empty on start or move).
    #[must_use]
    pub fn from_raw(phase: PointerPhase, raw: &RawPointer, timestamp: Duration) -> Option<Self> {
        match raw {
            RawPointer::Touch { touches, scale } => {
                let first = touches.first().copied();
                let pos = match (first, phase) {
                    (Some(p), _) => p,
                    // touchend reports the lifted contact in changedTouches only.
                    (None, PointerPhase::End | PointerPhase::Cancel) => Point::default(),
                    (None, _) => return None,
                };
                let pinching = scale.is_some_and(|s| s != 1.0);
                let contacts = if pinching {
                    touches.len().max(2)
                } else {
                    touches.len().max(1)
                };
                Some(Self {
                    phase,
                    pos,
                    contacts: u8::try_from(contacts).unwrap_or(u8::MAX),
                    primary: true,
                    timestamp,
                })
            }
            RawPointer::Pointer {
                pos,
                primary,
                kind,
                buttons,
            } => {
                // A mouse only drags with exactly the primary button held.
                let usable = *primary
                    && !(*kind == PointerKind::Mouse
                        && phase == PointerPhase::Move
                        && *buttons != 1);
                Some(Self {
                    phase,
                    pos: *pos,
                    contacts: 1,
                    primary: usable,
                    timestamp,
                })
            }
        }
    }
}

/// Kind of device behind a [`RawPointer::Pointer`] event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerKind {
    /// Finger on a touch surface.
    Touch,
    /// Stylus.
    Pen,
    /// Mouse.
    Mouse,
}

/// Platform-shaped pointer input, before normalization.
#[derive(Debug, Clone, PartialEq)]
pub enum RawPointer {
    /// Touch-list style input.
    Touch {
        /// Active contacts, first is tracked.
        touches: Vec<Point>,
        /// Gesture scale reported by the platform, if any.
        scale: Option<f64>,
    },
    /// Single-pointer style input.
    Pointer {
        /// Pointer position.
        pos: Point,
        /// Whether this is the primary pointer.
        primary: bool,
        /// Device kind.
        kind: PointerKind,
        /// Pressed-button bitmask.
        buttons: u16,
    },
}

/// Everything a host feeds into a carousel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A pointer sample.
    Pointer(PointerSample),
    /// The viewport changed size.
    Resize,
    /// A panel's animation settled.
    AnimationComplete {
        /// Panel whose animation finished.
        panel: usize,
    },
}
