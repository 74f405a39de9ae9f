#![forbid(unsafe_code)]

//! The carousel: one owned state machine wiring gestures, the ring, the
//! transition controller, and autoplay together.
//!
//! # Event flow
//!
//! ```text
//! host input ──► handle_event ──► GestureClassifier ──► ring / strip ──► Renderer
//!                     ▲                                                    │
//!   CarouselRemote ──►│ pump                          poll_completions ◄──┘
//!                     │                                     │
//!                   tick ◄────────── AutoplayTimer ◄────────┘
//! ```
//!
//! Everything happens on the owning thread. A carousel that failed layout
//! (too few panels, nothing to measure) or was torn down is inert: every
//! entry point returns without touching the renderer.

use std::fmt;
use std::time::Duration;

use glide_backend::{Clock, MonotonicClock, Renderer};
use glide_core::{
    CarouselConfig, Decision, Direction, GestureClassifier, GestureContext, GestureOutcome,
    GestureState, InputEvent, PointerSample, Release,
};

use crate::autoplay::AutoplayTimer;
use crate::layout::{self, Geometry, Inert, Ready};
use crate::remote::{CarouselRemote, Command, CommandQueue};
use crate::ring::{self, Ring};
use crate::transition::{Panel, TransitionController};

/// Notification hook: the index and the panel at that index.
type Hook = Box<dyn FnMut(usize, &Panel)>;

/// Result of a programmatic [`Carousel::slide`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlideOutcome {
    /// Moved to this index.
    Moved(usize),
    /// Already there.
    Unchanged,
    /// Target outside `0..count`.
    Rejected,
    /// A swipe is in flight.
    Busy,
    /// The carousel is static.
    Inert,
}

/// Mutable runtime state. Only the carousel touches it.
#[derive(Debug, Clone)]
struct CarouselState {
    index: usize,
    strip: TransitionController,
    autoplay: AutoplayTimer,
}

/// A touch-driven carousel over `count` panels.
pub struct Carousel<R: Renderer, C: Clock = MonotonicClock> {
    config: CarouselConfig,
    count: usize,
    renderer: R,
    clock: C,
    state: CarouselState,
    classifier: GestureClassifier,
    geometry: Option<Geometry>,
    lazy_hidden: bool,
    torn_down: bool,
    on_settle: Option<Hook>,
    on_transition_end: Option<Hook>,
    queue: CommandQueue,
}

impl<R: Renderer> Carousel<R> {
    /// Build a carousel timed by the monotonic system clock.
    pub fn with_renderer(config: CarouselConfig, count: usize, renderer: R) -> Self {
        Self::new(config, count, renderer, MonotonicClock::new())
    }
}

impl<R: Renderer, C: Clock> Carousel<R, C> {
    /// Build a carousel and lay it out.
    ///
    /// A layout failure leaves the carousel inert; see [`Self::is_ready`].
    pub fn new(config: CarouselConfig, count: usize, renderer: R, clock: C) -> Self {
        let index = config.start_slide.min(count.saturating_sub(1));
        let classifier =
            GestureClassifier::new(config.gesture.clone(), config.disable_vertical_scroll);
        let autoplay = AutoplayTimer::new(config.autoplay_delay());
        let mut carousel = Self {
            config,
            count,
            renderer,
            clock,
            state: CarouselState {
                index,
                strip: TransitionController::new(count),
                autoplay,
            },
            classifier,
            geometry: None,
            lazy_hidden: false,
            torn_down: false,
            on_settle: None,
            on_transition_end: None,
            queue: CommandQueue::new(),
        };
        if carousel.setup(false).is_ok() {
            carousel.begin_autoplay();
        }
        carousel
    }

    /// Called with the new index and its panel after every commit.
    #[must_use]
    pub fn on_settle(mut self, hook: impl FnMut(usize, &Panel) + 'static) -> Self {
        self.on_settle = Some(Box::new(hook));
        self
    }

    /// Called with the current index and its panel when its animation
    /// completes.
    #[must_use]
    pub fn on_transition_end(mut self, hook: impl FnMut(usize, &Panel) + 'static) -> Self {
        self.on_transition_end = Some(Box::new(hook));
        self
    }

    // -----------------------------------------------------------------------
    // Layout
    // -----------------------------------------------------------------------

    /// Measure and lay out every panel for the current index.
    ///
    /// On failure nothing is touched and the previous layout (if any) stays.
    pub fn setup(&mut self, is_resize: bool) -> Result<Ready, Inert> {
        let _span = tracing::debug_span!("glide.setup", is_resize).entered();
        if self.torn_down {
            return Err(Inert::TornDown);
        }
        if is_resize && self.config.is_clamped() {
            tracing::debug!("resize ignored in strip layout");
            return self.geometry.map(|g| g.ready()).ok_or(Inert::ResizeIgnored);
        }

        let viewport = self.renderer.measure_viewport_width();
        let geometry = match Geometry::measure(&self.config, self.count, viewport) {
            Ok(geometry) => geometry,
            Err(reason) => {
                tracing::debug!(?reason, viewport, count = self.count, "carousel is inert");
                return Err(reason);
            }
        };

        let ring = self.ring_for(&geometry);
        layout::lay_out(
            &geometry,
            &ring,
            self.state.index,
            &mut self.state.strip,
            &mut self.renderer,
        );
        self.geometry = Some(geometry);
        self.lazy_hidden = !geometry.clamped;
        Ok(geometry.ready())
    }

    /// Re-run layout after the viewport changed size.
    pub fn resize(&mut self) -> Result<Ready, Inert> {
        self.setup(true)
    }

    // -----------------------------------------------------------------------
    // Input
    // -----------------------------------------------------------------------

    /// Feed one host event. Returns whether it had any effect.
    ///
    /// Pointer hosts that must decide on default scroll handling should call
    /// [`Self::handle_pointer`] directly.
    pub fn handle_event(&mut self, event: InputEvent) -> bool {
        match event {
            InputEvent::Pointer(sample) => {
                !matches!(self.handle_pointer(&sample), GestureOutcome::Ignored)
            }
            InputEvent::Resize => self.resize().is_ok(),
            InputEvent::AnimationComplete { panel } => self.animation_complete(panel),
        }
    }

    /// Feed one pointer sample through the gesture classifier.
    pub fn handle_pointer(&mut self, sample: &PointerSample) -> GestureOutcome {
        let Some(geometry) = self.geometry else {
            return GestureOutcome::Ignored;
        };
        let ctx = GestureContext {
            index: self.state.index,
            count: self.count,
            width: geometry.width,
            continuous: self.wraps(),
        };
        let outcome = self.classifier.process(sample, &ctx);

        match outcome {
            GestureOutcome::Began { superseded } => {
                if let Some(stale) = superseded {
                    tracing::debug!(delta_x = stale.delta_x, "superseded swipe reset");
                    self.snap_back(&geometry, Duration::ZERO);
                }
                self.state.autoplay.cancel();
                self.reveal();
            }
            GestureOutcome::Drag { delta_x } => {
                self.state.autoplay.stop();
                if geometry.clamped {
                    let all = self.all_panels();
                    self.state.strip.displace(&mut self.renderer, &all, delta_x);
                } else {
                    ring::drag(
                        &self.ring_for(&geometry),
                        geometry.width,
                        self.state.index,
                        delta_x,
                        &mut self.state.strip,
                        &mut self.renderer,
                    );
                }
            }
            GestureOutcome::Released(release) => self.release(&geometry, release),
            GestureOutcome::Abandoned => self.begin_autoplay(),
            GestureOutcome::Ignored | GestureOutcome::Scroll { .. } => {}
        }
        outcome
    }

    fn release(&mut self, geometry: &Geometry, release: Release) {
        let _span = tracing::debug_span!(
            "glide.release",
            index = self.state.index,
            delta_x = release.delta_x
        )
        .entered();
        let speed = self.config.speed();
        if release.decision == Decision::Commit
            && let Some(index) = self.advance(geometry, release.direction, speed)
        {
            self.settled(index);
        } else {
            self.snap_back(geometry, speed);
        }
    }

    /// Act on a renderer completion for `panel`.
    ///
    /// Only the current panel's completion counts; others are stray and
    /// ignored. Returns whether the completion was acted on.
    pub fn animation_complete(&mut self, panel: usize) -> bool {
        let Some(geometry) = self.geometry else {
            return false;
        };
        let index = self.state.index;
        if !self.state.strip.is_authoritative(panel, index) {
            tracing::trace!(panel, index, "stray completion ignored");
            return false;
        }
        if !geometry.clamped {
            ring::repark(
                &self.ring_for(&geometry),
                geometry.width,
                index,
                &[index],
                &mut self.state.strip,
                &mut self.renderer,
            );
        }
        self.begin_autoplay();
        if let Some(hook) = self.on_transition_end.as_mut()
            && let Some(panel) = self.state.strip.panels().get(index)
        {
            hook(index, panel);
        }
        true
    }

    /// Poll the renderer for completions and fire autoplay if due.
    pub fn tick(&mut self) {
        if self.geometry.is_none() {
            return;
        }
        for panel in self.renderer.poll_completions() {
            self.animation_complete(panel);
        }
        if self.state.autoplay.poll(self.clock.now_mono()) {
            let delay = self.state.autoplay.delay();
            tracing::debug!(index = self.state.index, "autoplay advance");
            self.next(Some(delay));
        }
    }

    // -----------------------------------------------------------------------
    // Public control surface
    // -----------------------------------------------------------------------

    /// Step forward. `delay` replaces the autoplay delay; `None` stops
    /// autoplay. Returns the new index, or `None` if nothing moved.
    pub fn next(&mut self, delay: Option<Duration>) -> Option<usize> {
        self.step(Direction::Forward, delay)
    }

    /// Step backward. See [`Self::next`].
    pub fn prev(&mut self, delay: Option<Duration>) -> Option<usize> {
        self.step(Direction::Backward, delay)
    }

    fn step(&mut self, direction: Direction, delay: Option<Duration>) -> Option<usize> {
        let geometry = self.geometry?;
        if self.classifier.is_swiping() {
            tracing::debug!(?direction, "step ignored: swipe in progress");
            return None;
        }
        self.state.autoplay.set_delay(delay.unwrap_or(Duration::ZERO));
        self.reveal();
        let index = self.advance(&geometry, direction, self.config.speed())?;
        self.settled(index);
        Some(index)
    }

    /// Jump straight to `to`, animating over `speed` (default: configured).
    pub fn slide(&mut self, to: usize, speed: Option<Duration>) -> SlideOutcome {
        let Some(geometry) = self.geometry else {
            return SlideOutcome::Inert;
        };
        if to >= self.count {
            tracing::warn!(to, count = self.count, "slide target out of range");
            return SlideOutcome::Rejected;
        }
        if self.classifier.is_swiping() {
            tracing::debug!(to, "slide ignored: swipe in progress");
            return SlideOutcome::Busy;
        }
        let from = self.state.index;
        if to == from {
            return SlideOutcome::Unchanged;
        }

        let speed = speed.unwrap_or_else(|| self.config.speed());
        self.reveal();
        if geometry.clamped {
            self.shift_strip(&geometry, from, to, speed);
        } else {
            ring::jump(
                &self.ring_for(&geometry),
                geometry.width,
                from,
                to,
                speed,
                &mut self.state.strip,
                &mut self.renderer,
            );
        }
        self.state.index = to;
        self.settled(to);
        SlideOutcome::Moved(to)
    }

    /// Current index.
    #[inline]
    #[must_use]
    pub fn position(&self) -> usize {
        self.state.index
    }

    /// Stop autoplay, reset every panel and go inert. Safe to call twice.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;
        self.state.autoplay.stop();
        self.classifier.reset();
        self.state.strip.reset(&mut self.renderer);
        self.geometry = None;
        self.lazy_hidden = false;
        tracing::debug!(index = self.state.index, "carousel torn down");
    }

    // -----------------------------------------------------------------------
    // Remote commands
    // -----------------------------------------------------------------------

    /// A handle other threads can use to queue commands.
    #[must_use]
    pub fn remote(&self) -> CarouselRemote {
        self.queue.remote()
    }

    /// Apply every queued command. Returns how many were applied.
    pub fn pump(&mut self) -> usize {
        let commands = self.queue.drain();
        let applied = commands.len();
        for command in commands {
            self.apply(command);
        }
        applied
    }

    fn apply(&mut self, command: Command) {
        match command {
            Command::Next(delay) => {
                self.next(delay);
            }
            Command::Prev(delay) => {
                self.prev(delay);
            }
            Command::Slide { to, speed } => {
                self.slide(to, speed);
            }
            Command::Input(event) => {
                self.handle_event(event);
            }
            Command::Teardown => self.teardown(),
        }
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    /// The renderer.
    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// The renderer, mutably.
    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// The clock.
    #[must_use]
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Configuration in use.
    #[must_use]
    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    /// Panel count.
    #[must_use]
    pub fn count(&self) -> usize {
        self.count
    }

    /// All panels with their cached offsets.
    #[must_use]
    pub fn panels(&self) -> &[Panel] {
        self.state.strip.panels()
    }

    /// Gesture state.
    #[must_use]
    pub fn gesture_state(&self) -> GestureState {
        self.classifier.state()
    }

    /// Whether layout succeeded and the carousel is live.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.geometry.is_some()
    }

    /// Whether [`Self::teardown`] ran.
    #[must_use]
    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Panel width, once laid out.
    #[must_use]
    pub fn width(&self) -> Option<f64> {
        self.geometry.map(|g| g.width)
    }

    /// When autoplay will next fire, if armed.
    #[must_use]
    pub fn autoplay_pending(&self) -> Option<Duration> {
        self.state.autoplay.deadline()
    }

    /// Current autoplay delay; zero when stopped.
    #[must_use]
    pub fn autoplay_delay(&self) -> Duration {
        self.state.autoplay.delay()
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    /// Strip layout never wraps.
    fn wraps(&self) -> bool {
        self.config.continuous && !self.config.is_clamped()
    }

    fn ring_for(&self, geometry: &Geometry) -> Ring {
        Ring::new(geometry.count, self.config.continuous && !geometry.clamped)
    }

    fn all_panels(&self) -> Vec<usize> {
        (0..self.count).collect()
    }

    fn begin_autoplay(&mut self) {
        let now = self.clock.now_mono();
        if let Some(deadline) = self.state.autoplay.begin(now) {
            let deadline_ms = deadline.as_millis() as u64;
            tracing::trace!(deadline_ms, "autoplay armed");
        }
    }

    fn reveal(&mut self) {
        if !self.lazy_hidden {
            return;
        }
        self.lazy_hidden = false;
        for panel in 0..self.count {
            self.renderer.set_panel_visible(panel, true);
        }
    }

    fn settled(&mut self, index: usize) {
        if let Some(hook) = self.on_settle.as_mut()
            && let Some(panel) = self.state.strip.panels().get(index)
        {
            hook(index, panel);
        }
    }

    /// Commit one step and update the index.
    fn advance(
        &mut self,
        geometry: &Geometry,
        direction: Direction,
        speed: Duration,
    ) -> Option<usize> {
        let from = self.state.index;
        let ring = self.ring_for(geometry);
        let to = if geometry.clamped {
            let to = ring.neighbor(from, direction)?;
            self.shift_strip(geometry, from, to, speed);
            to
        } else {
            ring::commit_step(
                &ring,
                geometry.width,
                from,
                direction,
                speed,
                &mut self.state.strip,
                &mut self.renderer,
            )?
        };
        self.state.index = to;
        tracing::debug!(from, to, ?direction, "committed");
        Some(to)
    }

    fn snap_back(&mut self, geometry: &Geometry, speed: Duration) {
        tracing::debug!(index = self.state.index, "snap back");
        if geometry.clamped {
            let all = self.all_panels();
            self.state.strip.slide(&mut self.renderer, &all, 0.0, speed);
        } else {
            ring::snap_back(
                &self.ring_for(geometry),
                self.state.index,
                speed,
                &mut self.state.strip,
                &mut self.renderer,
            );
        }
    }

    /// Strip layout: move every panel by the change in shift.
    fn shift_strip(&mut self, geometry: &Geometry, from: usize, to: usize, speed: Duration) {
        let delta = geometry.shift(to) - geometry.shift(from);
        let all = self.all_panels();
        self.state.strip.slide(&mut self.renderer, &all, delta, speed);
    }
}

impl<R: Renderer, C: Clock> fmt::Debug for Carousel<R, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Carousel")
            .field("index", &self.state.index)
            .field("count", &self.count)
            .field("geometry", &self.geometry)
            .field("gesture", &self.classifier.state())
            .field("torn_down", &self.torn_down)
            .finish_non_exhaustive()
    }
}
