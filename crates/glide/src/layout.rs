#![forbid(unsafe_code)]

//! Layout engine: measures the viewport and puts every panel at rest.
//!
//! Two layouts exist:
//!
//! - **Single-panel** (no `max_width`): panels are classified before /
//!   current / after and stacked through the ring's resting slots. Only
//!   the current panel is visible until the first interaction.
//! - **Strip** (`max_width > 0`): several panels fit in the viewport. Panels
//!   sit side by side at `index × width`, shifted so the current panel is at
//!   the left edge, except that the strip never scrolls past its right end.
//!
//! The viewport is revealed only once every panel is in place.

use glide_backend::Renderer;
use glide_core::CarouselConfig;

use crate::ring::{self, Ring};
use crate::transition::TransitionController;

/// A successful layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ready {
    /// Panel width in pixels.
    pub width: f64,
    /// Measured viewport width in pixels.
    pub viewport: f64,
    /// Total strip extent (`count × width`).
    pub extent: f64,
}

/// Why the carousel is static.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Inert {
    /// Fewer than two panels.
    TooFewPanels {
        /// Panel count found.
        count: usize,
    },
    /// The viewport measured zero.
    ZeroWidth,
    /// A resize arrived in strip layout, which is not resize-safe, before
    /// any layout succeeded.
    ResizeIgnored,
    /// The carousel was torn down.
    TornDown,
}

/// Measured dimensions the rest of the runtime works against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    /// Panel width.
    pub width: f64,
    /// Viewport width.
    pub viewport: f64,
    /// Panel count.
    pub count: usize,
    /// Whether the strip layout is active.
    pub clamped: bool,
}

impl Geometry {
    /// Measure, or explain why layout is impossible.
    pub fn measure(config: &CarouselConfig, count: usize, viewport: f64) -> Result<Self, Inert> {
        if count < 2 {
            return Err(Inert::TooFewPanels { count });
        }
        let clamped = config.is_clamped();
        let width = if clamped { config.max_width } else { viewport };
        if !(width > 0.0) {
            return Err(Inert::ZeroWidth);
        }
        Ok(Self {
            width,
            viewport,
            count,
            clamped,
        })
    }

    /// Total strip extent.
    #[inline]
    #[must_use]
    pub fn extent(&self) -> f64 {
        self.count as f64 * self.width
    }

    /// Strip displacement that brings `current` to the left edge, limited so
    /// the last panel never leaves the right edge.
    #[must_use]
    pub fn shift(&self, current: usize) -> f64 {
        let overflow = (self.extent() - self.viewport).max(0.0);
        -(current as f64 * self.width).min(overflow)
    }

    /// Strip-layout offset of `panel` when `current` is shown.
    #[must_use]
    pub fn strip_offset(&self, panel: usize, current: usize) -> f64 {
        panel as f64 * self.width + self.shift(current)
    }

    /// Summary handed back to callers.
    #[must_use]
    pub fn ready(&self) -> Ready {
        Ready {
            width: self.width,
            viewport: self.viewport,
            extent: self.extent(),
        }
    }
}

/// Put every panel at rest for `current` and reveal the viewport.
pub fn lay_out<R: Renderer + ?Sized>(
    geometry: &Geometry,
    ring: &Ring,
    current: usize,
    strip: &mut TransitionController,
    renderer: &mut R,
) {
    let _span = tracing::debug_span!(
        "glide.layout",
        width = geometry.width,
        count = geometry.count,
        clamped = geometry.clamped
    )
    .entered();

    renderer.set_strip_extent(geometry.extent());

    if geometry.clamped {
        for panel in 0..geometry.count {
            strip.place(renderer, panel, geometry.strip_offset(panel, current));
            renderer.set_panel_visible(panel, true);
        }
    } else {
        ring::stack_all(ring, geometry.width, current, strip, renderer);
        for panel in 0..geometry.count {
            renderer.set_panel_visible(panel, panel == current);
        }
    }

    renderer.set_viewport_visible(true);
    tracing::debug!(current, "layout complete");
}
