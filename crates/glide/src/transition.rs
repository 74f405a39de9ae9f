#![forbid(unsafe_code)]

//! Transition controller: the authoritative record of panel offsets.
//!
//! Every renderer call flows through [`TransitionController`]. Animated
//! moves are expressed as deltas added to a panel's cached offset, so drags
//! and settles compose without drift. Drags themselves never touch the cache:
//! they layer a displacement on top of it until the gesture resolves.

use std::time::Duration;

use glide_backend::Renderer;

use crate::ring::Slot;

/// One content panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Panel {
    index: usize,
    offset: f64,
    displaced: bool,
}

impl Panel {
    /// Stable logical index, assigned once in document order.
    #[inline]
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Last offset issued to the renderer, ignoring drag displacement.
    #[inline]
    #[must_use]
    pub const fn offset(&self) -> f64 {
        self.offset
    }

    /// Whether a drag left the rendered position away from the cache.
    #[inline]
    #[must_use]
    pub const fn is_displaced(&self) -> bool {
        self.displaced
    }
}

/// Owns the per-panel offset cache and issues renderer calls.
#[derive(Debug, Clone)]
pub struct TransitionController {
    panels: Vec<Panel>,
}

impl TransitionController {
    /// Create `count` panels, all at offset zero.
    #[must_use]
    pub fn new(count: usize) -> Self {
        Self {
            panels: (0..count)
                .map(|index| Panel {
                    index,
                    offset: 0.0,
                    displaced: false,
                })
                .collect(),
        }
    }

    /// All panels in logical order.
    #[inline]
    #[must_use]
    pub fn panels(&self) -> &[Panel] {
        &self.panels
    }

    /// Cached offset of a panel, zero for unknown panels.
    #[must_use]
    pub fn offset(&self, panel: usize) -> f64 {
        self.panels.get(panel).map_or(0.0, |p| p.offset)
    }

    /// Whether a panel is displaced by an unresolved drag.
    #[must_use]
    pub fn is_displaced(&self, panel: usize) -> bool {
        self.panels.get(panel).is_some_and(|p| p.displaced)
    }

    /// Add `delta` to a panel's cached offset and animate it there.
    pub fn translate<R: Renderer + ?Sized>(
        &mut self,
        renderer: &mut R,
        panel: usize,
        delta: f64,
        duration: Duration,
    ) {
        let Some(p) = self.panels.get_mut(panel) else {
            return;
        };
        p.offset += delta;
        p.displaced = false;
        renderer.position_panel(panel, p.offset, duration);
    }

    /// Translate several panels by the same delta.
    pub fn slide<R: Renderer + ?Sized>(
        &mut self,
        renderer: &mut R,
        panels: &[usize],
        delta: f64,
        duration: Duration,
    ) {
        for &panel in panels {
            self.translate(renderer, panel, delta, duration);
        }
    }

    /// Teleport a panel to an absolute offset.
    pub fn place<R: Renderer + ?Sized>(&mut self, renderer: &mut R, panel: usize, offset: f64) {
        let Some(p) = self.panels.get_mut(panel) else {
            return;
        };
        p.offset = offset;
        p.displaced = false;
        renderer.position_panel(panel, offset, Duration::ZERO);
    }

    /// Teleport panels to a resting slot.
    pub fn stack<R: Renderer + ?Sized>(
        &mut self,
        renderer: &mut R,
        panels: &[usize],
        slot: Slot,
        width: f64,
    ) {
        let offset = slot.offset(width);
        for &panel in panels {
            self.place(renderer, panel, offset);
        }
    }

    /// Render panels at `cache + delta` without changing the cache.
    pub fn displace<R: Renderer + ?Sized>(&mut self, renderer: &mut R, panels: &[usize], delta: f64) {
        for &panel in panels {
            let Some(p) = self.panels.get_mut(panel) else {
                continue;
            };
            p.displaced = true;
            renderer.position_panel(panel, p.offset + delta, Duration::ZERO);
        }
    }

    /// Whether a completion from `panel` should be acted on.
    ///
    /// After a wrap several panels settle together; only the current one
    /// speaks for the carousel.
    #[inline]
    #[must_use]
    pub fn is_authoritative(&self, panel: usize, current: usize) -> bool {
        panel == current && panel < self.panels.len()
    }

    /// Return every panel to the unstyled zero state.
    pub fn reset<R: Renderer + ?Sized>(&mut self, renderer: &mut R) {
        for p in &mut self.panels {
            p.offset = 0.0;
            p.displaced = false;
            renderer.reset_panel(p.index);
        }
    }
}
