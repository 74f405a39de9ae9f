#![forbid(unsafe_code)]

//! In-memory [`Surface`] for tests and headless embedding.
//!
//! Records the latest state of every panel plus an ordered log of writes, so
//! tests can assert both where panels ended up and how they got there.

use std::time::Duration;

use crate::Surface;

/// One recorded surface mutation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SurfaceOp {
    /// `write_offset` call.
    Write {
        /// Target panel.
        panel: usize,
        /// Written offset.
        offset: f64,
        /// Requested animation length.
        duration: Duration,
    },
    /// `clear_panel` call.
    Clear {
        /// Target panel.
        panel: usize,
    },
    /// `set_panel_visible` call.
    PanelVisible {
        /// Target panel.
        panel: usize,
        /// New visibility.
        visible: bool,
    },
    /// `set_viewport_visible` call.
    ViewportVisible(bool),
    /// `set_strip_extent` call.
    Extent(f64),
}

/// Last known state of a panel.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PanelView {
    /// Latest written offset, `None` when unstyled.
    pub offset: Option<f64>,
    /// Duration of the latest write.
    pub duration: Duration,
    /// Visibility; panels start visible.
    pub visible: bool,
}

/// In-memory surface.
#[derive(Debug, Clone)]
pub struct HeadlessSurface {
    viewport_width: f64,
    viewport_visible: bool,
    extent: f64,
    panels: Vec<PanelView>,
    log: Vec<SurfaceOp>,
}

impl HeadlessSurface {
    /// Create a surface with the given viewport width.
    #[must_use]
    pub fn new(viewport_width: f64) -> Self {
        Self {
            viewport_width,
            viewport_visible: false,
            extent: 0.0,
            panels: Vec::new(),
            log: Vec::new(),
        }
    }

    /// Simulate a viewport resize.
    pub fn set_viewport_width(&mut self, width: f64) {
        self.viewport_width = width;
    }

    /// Latest offset written for a panel.
    #[must_use]
    pub fn offset(&self, panel: usize) -> Option<f64> {
        self.panels.get(panel).and_then(|p| p.offset)
    }

    /// Full view of a panel.
    #[must_use]
    pub fn panel(&self, panel: usize) -> PanelView {
        self.panels.get(panel).copied().unwrap_or(PanelView {
            visible: true,
            ..PanelView::default()
        })
    }

    /// Whether the viewport is visible.
    #[must_use]
    pub fn viewport_visible(&self) -> bool {
        self.viewport_visible
    }

    /// Latest strip extent.
    #[must_use]
    pub fn extent(&self) -> f64 {
        self.extent
    }

    /// Ordered log of every mutation.
    #[must_use]
    pub fn log(&self) -> &[SurfaceOp] {
        &self.log
    }

    /// Writes that targeted one panel, in order.
    #[must_use]
    pub fn writes_for(&self, panel: usize) -> Vec<(f64, Duration)> {
        self.log
            .iter()
            .filter_map(|op| match *op {
                SurfaceOp::Write {
                    panel: p,
                    offset,
                    duration,
                } if p == panel => Some((offset, duration)),
                _ => None,
            })
            .collect()
    }

    /// Forget the log, keeping state.
    pub fn clear_log(&mut self) {
        self.log.clear();
    }

    fn slot(&mut self, panel: usize) -> &mut PanelView {
        if panel >= self.panels.len() {
            self.panels.resize(
                panel + 1,
                PanelView {
                    visible: true,
                    ..PanelView::default()
                },
            );
        }
        &mut self.panels[panel]
    }
}

impl Surface for HeadlessSurface {
    fn viewport_width(&self) -> f64 {
        self.viewport_width
    }

    fn set_viewport_visible(&mut self, visible: bool) {
        self.viewport_visible = visible;
        self.log.push(SurfaceOp::ViewportVisible(visible));
    }

    fn set_panel_visible(&mut self, panel: usize, visible: bool) {
        self.slot(panel).visible = visible;
        self.log.push(SurfaceOp::PanelVisible { panel, visible });
    }

    fn set_strip_extent(&mut self, extent: f64) {
        self.extent = extent;
        self.log.push(SurfaceOp::Extent(extent));
    }

    fn write_offset(&mut self, panel: usize, offset: f64, duration: Duration) {
        let view = self.slot(panel);
        view.offset = Some(offset);
        view.duration = duration;
        self.log.push(SurfaceOp::Write {
            panel,
            offset,
            duration,
        });
    }

    fn clear_panel(&mut self, panel: usize) {
        let view = self.slot(panel);
        view.offset = None;
        view.duration = Duration::ZERO;
        view.visible = true;
        self.log.push(SurfaceOp::Clear { panel });
    }
}
