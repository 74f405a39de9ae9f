#![forbid(unsafe_code)]

//! Polling renderer strategy, for hosts without declarative transitions.
//!
//! Every animated positioning is interpolated by this renderer: each
//! [`poll_completions`](Renderer::poll_completions) call writes the current
//! frame to the surface with zero duration. Hosts drive it from a short
//! repeating timer or their frame callback.
//!
//! # Invariants
//!
//! 1. Progress is quantized to hundredths, so a frame never overshoots.
//! 2. The exact target is written once the duration has elapsed, and only
//!    then is the panel reported complete.
//! 3. A new positioning for a panel starts from the last written frame.

use std::collections::BTreeMap;
use std::time::Duration;

use crate::{Clock, Renderer, Surface};

#[derive(Debug, Clone, Copy)]
struct Tween {
    from: f64,
    to: f64,
    start: Duration,
    duration: Duration,
}

impl Tween {
    fn sample(&self, now: Duration) -> Option<f64> {
        let elapsed = now.saturating_sub(self.start);
        if elapsed >= self.duration {
            return None;
        }
        let percent = elapsed.as_nanos() * 100 / self.duration.as_nanos();
        let stepped = percent as f64 / 100.0;
        Some(self.from + (self.to - self.from) * stepped)
    }
}

/// Renderer that animates by writing interpolated frames.
#[derive(Debug)]
pub struct PollingRenderer<S, C> {
    surface: S,
    clock: C,
    written: BTreeMap<usize, f64>,
    tweens: BTreeMap<usize, Tween>,
}

impl<S: Surface, C: Clock> PollingRenderer<S, C> {
    /// Wrap a surface.
    #[must_use]
    pub fn new(surface: S, clock: C) -> Self {
        Self {
            surface,
            clock,
            written: BTreeMap::new(),
            tweens: BTreeMap::new(),
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

    /// Whether any animation is still running.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        !self.tweens.is_empty()
    }

    fn write(&mut self, panel: usize, offset: f64) {
        self.surface.write_offset(panel, offset, Duration::ZERO);
        self.written.insert(panel, offset);
    }
}

impl<S: Surface, C: Clock> Renderer for PollingRenderer<S, C> {
    fn position_panel(&mut self, panel: usize, offset: f64, duration: Duration) {
        if duration.is_zero() {
            self.tweens.remove(&panel);
            self.write(panel, offset);
            return;
        }
        let from = self.written.get(&panel).copied().unwrap_or(offset);
        self.tweens.insert(
            panel,
            Tween {
                from,
                to: offset,
                start: self.clock.now_mono(),
                duration,
            },
        );
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
        self.tweens.remove(&panel);
        self.written.remove(&panel);
        self.surface.clear_panel(panel);
    }

    fn poll_completions(&mut self) -> Vec<usize> {
        let now = self.clock.now_mono();
        let frames: Vec<(usize, Option<f64>, f64)> = self
            .tweens
            .iter()
            .map(|(&panel, tween)| (panel, tween.sample(now), tween.to))
            .collect();

        let mut done = Vec::new();
        for (panel, frame, target) in frames {
            match frame {
                Some(offset) => self.write(panel, offset),
                None => {
                    self.tweens.remove(&panel);
                    self.write(panel, target);
                    done.push(panel);
                }
            }
        }
        #[cfg(feature = "tracing")]
        if !done.is_empty() {
            tracing::trace!(?done, "polled animations settled");
        }
        done
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{HeadlessSurface, ManualClock};

    const MS: Duration = Duration::from_millis(1);

    fn renderer() -> (PollingRenderer<HeadlessSurface, ManualClock>, ManualClock) {
        let clock = ManualClock::new();
        (
            PollingRenderer::new(HeadlessSurface::new(300.0), clock.clone()),
            clock,
        )
    }

    #[test]
    fn instant_positioning_writes_immediately() {
        let (mut r, _) = renderer();
        r.position_panel(0, 300.0, Duration::ZERO);
        assert_eq!(r.surface().offset(0), Some(300.0));
        assert!(!r.is_animating());
    }

    #[test]
    fn interpolates_from_last_written_frame() {
        let (mut r, clock) = renderer();
        r.position_panel(0, 300.0, Duration::ZERO);
        r.position_panel(0, 0.0, MS * 100);
        clock.advance(MS * 25);
        assert!(r.poll_completions().is_empty());
        assert_eq!(r.surface().offset(0), Some(225.0));
        clock.advance(MS * 50);
        r.poll_completions();
        assert_eq!(r.surface().offset(0), Some(75.0));
    }

    #[test]
    fn progress_is_quantized() {
        let (mut r, clock) = renderer();
        r.position_panel(0, 0.0, Duration::ZERO);
        r.position_panel(0, 100.0, MS * 300);
        clock.advance(Duration::from_micros(1_000));
        r.poll_completions();
        // 1/300 = 0.0033 floors to 0.00.
        assert_eq!(r.surface().offset(0), Some(0.0));
    }

    #[test]
    fn writes_exact_target_and_completes() {
        let (mut r, clock) = renderer();
        r.position_panel(1, -300.0, Duration::ZERO);
        r.position_panel(1, 0.0, MS * 40);
        clock.advance(MS * 40);
        assert_eq!(r.poll_completions(), vec![1]);
        assert_eq!(r.surface().offset(1), Some(0.0));
        assert!(!r.is_animating());
        assert!(r.poll_completions().is_empty());
    }

    #[test]
    fn unknown_start_jumps_to_target() {
        let (mut r, clock) = renderer();
        r.position_panel(4, 120.0, MS * 10);
        clock.advance(MS * 5);
        r.poll_completions();
        assert_eq!(r.surface().offset(4), Some(120.0));
    }

    #[test]
    fn surface_writes_are_always_instant() {
        let (mut r, clock) = renderer();
        r.position_panel(0, 0.0, Duration::ZERO);
        r.position_panel(0, 50.0, MS * 10);
        for _ in 0..12 {
            clock.advance(MS);
            r.poll_completions();
        }
        assert!(
            r.surface()
                .writes_for(0)
                .iter()
                .all(|&(_, d)| d == Duration::ZERO)
        );
    }

    #[test]
    fn reset_stops_animation() {
        let (mut r, clock) = renderer();
        r.position_panel(0, 0.0, Duration::ZERO);
        r.position_panel(0, 50.0, MS * 10);
        r.reset_panel(0);
        clock.advance(MS * 10);
        assert!(r.poll_completions().is_empty());
        assert_eq!(r.surface().offset(0), None);
    }
}
