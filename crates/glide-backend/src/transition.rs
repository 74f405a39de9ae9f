#![forbid(unsafe_code)]

//! Declarative-transition renderer strategy.
//!
//! Hands each positioning straight to the surface with its duration and lets
//! the host animate it. Completion is tracked by deadline so headless hosts
//! get notifications without a platform event; hosts that do receive a
//! native transition-end may report it to the carousel directly instead.

use std::collections::BTreeMap;
use std::time::Duration;

use crate::{Clock, Renderer, Surface};

/// Renderer for hosts with declarative transitions.
#[derive(Debug)]
pub struct TransitionRenderer<S, C> {
    surface: S,
    clock: C,
    /// Settle deadline per animating panel.
    pending: BTreeMap<usize, Duration>,
}

impl<S: Surface, C: Clock> TransitionRenderer<S, C> {
    /// Wrap a surface.
    #[must_use]
    pub fn new(surface: S, clock: C) -> Self {
        Self {
            surface,
            clock,
            pending: BTreeMap::new(),
        }
    }

    /// The wrapped surface.
    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// The wrapped surface, mutably.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Number of animations still in flight.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.pending.len()
    }
}

impl<S: Surface, C: Clock> Renderer for TransitionRenderer<S, C> {
    fn position_panel(&mut self, panel: usize, offset: f64, duration: Duration) {
        self.surface.write_offset(panel, offset, duration);
        if duration.is_zero() {
            self.pending.remove(&panel);
        } else {
            self.pending
                .insert(panel, self.clock.now_mono() + duration);
        }
    }

    fn measure_viewport_width(&self) -> f64 {
        self.surface.viewport_width()
    }

    fn set_viewport_visible(&mut self, visible: bool) {
        self.surface.set_viewport_visible(visible);
    }

    fn set_panel_visible(&mut self, panel: usize, visible: bool) {
        self.surface.set_panel_visible(panel, visible);
    }

    fn set_strip_extent(&mut self, extent: f64) {
        self.surface.set_strip_extent(extent);
    }

    fn reset_panel(&mut self, panel: usize) {
        self.pending.remove(&panel);
        self.surface.clear_panel(panel);
    }

    fn poll_completions(&mut self) -> Vec<usize> {
        let now = self.clock.now_mono();
        let done: Vec<usize> = self
            .pending
            .iter()
            .filter(|&(_, &deadline)| deadline <= now)
            .map(|(&panel, _)| panel)
            .collect();
        for panel in &done {
            self.pending.remove(panel);
        }
        done
    }
}
