#![forbid(unsafe_code)]

//! Strategy selection.
//!
//! A host declares once whether it can animate declaratively. The matching
//! strategy is fixed for the renderer's lifetime; the carousel core never
//! branches on platform capability.

use std::time::Duration;

use crate::{Clock, PollingRenderer, Renderer, Surface, TransitionRenderer};

/// Host capabilities relevant to rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RendererCapabilities {
    /// The host animates offset changes declaratively (CSS transitions,
    /// compositor animations).
    pub transitions: bool,
}

impl RendererCapabilities {
    /// Capabilities of a host with declarative transitions.
    #[must_use]
    pub const fn with_transitions() -> Self {
        Self { transitions: true }
    }

    /// Capabilities of a host that must be polled frame by frame.
    #[must_use]
    pub const fn polling_only() -> Self {
        Self { transitions: false }
    }
}

/// Renderer whose strategy was chosen from [`RendererCapabilities`].
#[derive(Debug)]
pub enum AdaptiveRenderer<S, C> {
    /// Declarative transitions.
    Transition(TransitionRenderer<S, C>),
    /// Interpolated frames.
    Polling(PollingRenderer<S, C>),
}

impl<S: Surface, C: Clock> AdaptiveRenderer<S, C> {
    /// Pick a strategy for `surface`.
    #[must_use]
    pub fn select(caps: RendererCapabilities, surface: S, clock: C) -> Self {
        if caps.transitions {
            #[cfg(feature = "tracing")]
            tracing::debug!("renderer strategy: declarative transitions");
            Self::Transition(TransitionRenderer::new(surface, clock))
        } else {
            #[cfg(feature = "tracing")]
            tracing::debug!("renderer strategy: polling");
            Self::Polling(PollingRenderer::new(surface, clock))
        }
    }

    /// Whether the polling strategy is active.
    #[must_use]
    pub fn is_polling(&self) -> bool {
        matches!(self, Self::Polling(_))
    }

    /// The wrapped surface.
    #[must_use]
    pub fn surface(&self) -> &S {
        match self {
            Self::Transition(r) => r.surface(),
            Self::Polling(r) => r.surface(),
        }
    }

    /// The wrapped surface, mutably.
    pub fn surface_mut(&mut self) -> &mut S {
        match self {
            Self::Transition(r) => r.surface_mut(),
            Self::Polling(r) => r.surface_mut(),
        }
    }

    fn inner(&mut self) -> &mut dyn Renderer {
        match self {
            Self::Transition(r) => r,
            Self::Polling(r) => r,
        }
    }
}

impl<S: Surface, C: Clock> Renderer for AdaptiveRenderer<S, C> {
    fn position_panel(&mut self, panel: usize, offset: f64, duration: Duration) {
        self.inner().position_panel(panel, offset, duration);
    }

    fn measure_viewport_width(&self) -> f64 {
        self.surface().viewport_width()
    }

    fn set_viewport_visible(&mut self, visible: bool) {
        self.inner().set_viewport_visible(visible);
    }

    fn set_panel_visible(&mut self, panel: usize, visible: bool) {
        self.inner().set_panel_visible(panel, visible);
    }

    fn set_strip_extent(&mut self, extent: f64) {
        self.inner().set_strip_extent(extent);
    }

    fn reset_panel(&mut self, panel: usize) {
        self.inner().reset_panel(panel);
    }

    fn poll_completions(&mut self) -> Vec<usize> {
        self.inner().poll_completions()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{HeadlessSurface, ManualClock};

    #[test]
    fn selects_transition_strategy() {
        let r = AdaptiveRenderer::select(
            RendererCapabilities::with_transitions(),
            HeadlessSurface::new(300.0),
            ManualClock::new(),
        );
        assert!(!r.is_polling());
    }

    #[test]
    fn selects_polling_strategy() {
        let r = AdaptiveRenderer::select(
            RendererCapabilities::default(),
            HeadlessSurface::new(300.0),
            ManualClock::new(),
        );
        assert!(r.is_polling());
    }

    #[test]
    fn both_strategies_settle_at_the_same_target() {
        for caps in [
            RendererCapabilities::with_transitions(),
            RendererCapabilities::polling_only(),
        ] {
            let clock = ManualClock::new();
            let mut r = AdaptiveRenderer::select(caps, HeadlessSurface::new(300.0), clock.clone());
            r.position_panel(0, 300.0, Duration::ZERO);
            r.position_panel(0, 0.0, Duration::from_millis(300));
            clock.advance(Duration::from_millis(300));
            assert_eq!(r.poll_completions(), vec![0]);
            assert_eq!(r.surface().offset(0), Some(0.0));
        }
    }
}
