#![forbid(unsafe_code)]
#![doc = "Renderer traits for glide: panel positioning, animation strategies, and time."]
#![doc = ""]
#![doc = "This crate defines the boundary between the carousel runtime and whatever"]
#![doc = "actually moves pixels. The runtime only ever talks to a [`Renderer`]; hosts"]
#![doc = "implement the lower-level [`Surface`] and pick an animation strategy once,"]
#![doc = "from their declared [`RendererCapabilities`]."]

use std::time::Duration;

pub mod adaptive;
pub mod clock;
pub mod headless;
pub mod polling;
pub mod transition;

pub use adaptive::{AdaptiveRenderer, RendererCapabilities};
pub use clock::{Clock, ManualClock, MonotonicClock};
pub use headless::{HeadlessSurface, SurfaceOp};
pub use polling::PollingRenderer;
pub use transition::TransitionRenderer;

/// What the carousel runtime needs from a rendering backend.
///
/// Offsets are absolute horizontal positions in pixels relative to the
/// viewport origin. A `duration` of zero means place immediately.
pub trait Renderer {
    /// Move a panel to `offset`, animated over `duration`.
    ///
    /// A new call for the same panel overwrites any animation in flight; the
    /// overwritten animation never reports completion.
    fn position_panel(&mut self, panel: usize, offset: f64, duration: Duration);

    /// Current viewport width in pixels. Zero means the host is not measurable.
    fn measure_viewport_width(&self) -> f64;

    /// Show or hide the whole viewport.
    fn set_viewport_visible(&mut self, visible: bool);

    /// Show or hide one panel.
    fn set_panel_visible(&mut self, panel: usize, visible: bool);

    /// Total strip width (`panel count × panel width`).
    fn set_strip_extent(&mut self, extent: f64);

    /// Drop every style the renderer applied to a panel.
    fn reset_panel(&mut self, panel: usize);

    /// Panels whose animated positioning settled since the last poll.
    ///
    /// Renderers driven by host events (for example a DOM `transitionend`)
    /// may return nothing here and let the host report completions directly.
    fn poll_completions(&mut self) -> Vec<usize> {
        Vec::new()
    }
}

impl<R: Renderer + ?Sized> Renderer for Box<R> {
    fn position_panel(&mut self, panel: usize, offset: f64, duration: Duration) {
        (**self).position_panel(panel, offset, duration);
    }

    fn measure_viewport_width(&self) -> f64 {
        (**self).measure_viewport_width()
    }

    fn set_viewport_visible(&mut self, visible: bool) {
        (**self).set_viewport_visible(visible);
    }

    fn set_panel_visible(&mut self, panel: usize, visible: bool) {
        (**self).set_panel_visible(panel, visible);
    }

    fn set_strip_extent(&mut self, extent: f64) {
        (**self).set_strip_extent(extent);
    }

    fn reset_panel(&mut self, panel: usize) {
        (**self).reset_panel(panel);
    }

    fn poll_completions(&mut self) -> Vec<usize> {
        (**self).poll_completions()
    }
}

/// Host-side sink a renderer strategy writes to.
///
/// This is the part a platform integration implements: style writes on DOM
/// nodes, layer transforms in a compositor, or an in-memory model.
pub trait Surface {
    /// Measured viewport width in pixels.
    fn viewport_width(&self) -> f64;

    /// Toggle viewport visibility.
    fn set_viewport_visible(&mut self, visible: bool);

    /// Toggle one panel's visibility.
    fn set_panel_visible(&mut self, panel: usize, visible: bool);

    /// Set the strip's total extent.
    fn set_strip_extent(&mut self, extent: f64);

    /// Write a panel offset. A non-zero `duration` asks the host to animate
    /// the change declaratively; polling strategies always pass zero.
    fn write_offset(&mut self, panel: usize, offset: f64, duration: Duration);

    /// Remove all styling from a panel.
    fn clear_panel(&mut self, panel: usize);
}
