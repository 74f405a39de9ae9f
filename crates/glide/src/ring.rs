#![forbid(unsafe_code)]

//! Loop positioning: index and offset arithmetic for an apparently endless
//! ring built from panels parked one width either side of the viewport.
//!
//! At rest the current panel sits at offset zero, its forward neighbor at
//! `+width`, its backward neighbor at `-width`. Every other panel is parked at
//! `-width` if it precedes the current panel and `+width` otherwise. In
//! continuous mode the neighbors wrap, so the last panel is the backward
//! neighbor of the first and the first is the forward neighbor of the last.
//!
//! A commit slides exactly two panels (outgoing and incoming) and then
//! teleports whatever else is out of place. Teleports only ever touch
//! offscreen panels, so the ring has no visible seam.
//!
//! # Invariants
//!
//! 1. The index handed back by a step is always in `0..count`.
//! 2. The incoming panel is on the correct side before it starts moving.
//! 3. A non-continuous ring never steps past either end.

use std::time::Duration;

use glide_backend::Renderer;
use glide_core::Direction;

use crate::transition::TransitionController;

/// A resting slot relative to the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    /// One width to the left.
    Before,
    /// In the viewport.
    Current,
    /// One width to the right.
    After,
}

impl Slot {
    /// Signed slot number (-1, 0, +1).
    #[inline]
    #[must_use]
    pub const fn factor(self) -> f64 {
        match self {
            Self::Before => -1.0,
            Self::Current => 0.0,
            Self::After => 1.0,
        }
    }

    /// Pixel offset of this slot for a panel width.
    #[inline]
    #[must_use]
    pub fn offset(self, width: f64) -> f64 {
        self.factor() * width
    }

    /// Slot the incoming panel occupies before a step in `direction`.
    #[inline]
    #[must_use]
    pub const fn incoming(direction: Direction) -> Self {
        match direction {
            Direction::Forward => Self::After,
            Direction::Backward => Self::Before,
        }
    }
}

/// Ring topology: how many panels, and whether the ends join.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ring {
    count: usize,
    continuous: bool,
}

impl Ring {
    /// Create a ring.
    #[must_use]
    pub const fn new(count: usize, continuous: bool) -> Self {
        Self { count, continuous }
    }

    /// Number of panels.
    #[inline]
    #[must_use]
    pub const fn count(&self) -> usize {
        self.count
    }

    /// Whether the ends join.
    #[inline]
    #[must_use]
    pub const fn is_continuous(&self) -> bool {
        self.continuous
    }

    #[inline]
    fn last(&self) -> usize {
        self.count.saturating_sub(1)
    }

    /// Forward neighbor of `index`.
    #[must_use]
    pub fn next(&self, index: usize) -> Option<usize> {
        if self.count < 2 {
            None
        } else if index < self.last() {
            Some(index + 1)
        } else if self.continuous {
            Some(0)
        } else {
            None
        }
    }

    /// Backward neighbor of `index`.
    #[must_use]
    pub fn prev(&self, index: usize) -> Option<usize> {
        if self.count < 2 {
            None
        } else if index > 0 {
            Some(index - 1)
        } else if self.continuous {
            Some(self.last())
        } else {
            None
        }
    }

    /// Neighbor reached by one step in `direction`.
    #[must_use]
    pub fn neighbor(&self, index: usize, direction: Direction) -> Option<usize> {
        match direction {
            Direction::Forward => self.next(index),
            Direction::Backward => self.prev(index),
        }
    }

    /// Panels that move with a drag: backward neighbor, current, forward
    /// neighbor, without duplicates.
    #[must_use]
    pub fn window(&self, index: usize) -> Vec<usize> {
        let mut panels = Vec::with_capacity(3);
        for panel in [self.prev(index), Some(index), self.next(index)]
            .into_iter()
            .flatten()
        {
            if !panels.contains(&panel) {
                panels.push(panel);
            }
        }
        panels
    }

    /// Resting slot of `panel` when `current` is shown.
    ///
    /// With two continuous panels the other panel is both neighbors; it
    /// rests on the forward side.
    #[must_use]
    pub fn rest_slot(&self, panel: usize, current: usize) -> Slot {
        if panel == current {
            Slot::Current
        } else if self.next(current) == Some(panel) {
            Slot::After
        } else if self.prev(current) == Some(panel) || panel < current {
            Slot::Before
        } else {
            Slot::After
        }
    }

    /// Index after one step from `current`.
    ///
    /// A forward wrap goes through the `-1` sentinel: the index is set to -1
    /// and then incremented like any other forward step. The sentinel never
    /// leaves this function.
    #[must_use]
    pub fn stepped_index(&self, current: usize, direction: Direction) -> Option<usize> {
        self.neighbor(current, direction)?;
        let mut index = current as isize;
        match direction {
            Direction::Forward => {
                if current == self.last() {
                    index = -1;
                }
                index += 1;
            }
            Direction::Backward => {
                index = if current == 0 {
                    self.last() as isize
                } else {
                    index - 1
                };
            }
        }
        debug_assert!((0..self.count as isize).contains(&index));
        usize::try_from(index).ok()
    }

    /// Panels strictly between `from` and `to`, in ascending order.
    #[must_use]
    pub fn between(from: usize, to: usize) -> std::ops::Range<usize> {
        from.min(to) + 1..from.max(to)
    }
}

/// Re-stack every panel that is out of its resting slot, skipping `keep`.
///
/// Displaced panels are re-stacked even when their cache is already right,
/// since the renderer still shows them where the drag left them.
pub fn repark<R: Renderer + ?Sized>(
    ring: &Ring,
    width: f64,
    current: usize,
    keep: &[usize],
    strip: &mut TransitionController,
    renderer: &mut R,
) {
    for panel in 0..ring.count() {
        if keep.contains(&panel) {
            continue;
        }
        let slot = ring.rest_slot(panel, current);
        if strip.offset(panel) != slot.offset(width) || strip.is_displaced(panel) {
            strip.stack(renderer, &[panel], slot, width);
        }
    }
}

/// Place every panel in its resting slot for `current`.
pub fn stack_all<R: Renderer + ?Sized>(
    ring: &Ring,
    width: f64,
    current: usize,
    strip: &mut TransitionController,
    renderer: &mut R,
) {
    for panel in 0..ring.count() {
        strip.stack(renderer, &[panel], ring.rest_slot(panel, current), width);
    }
}

/// Make sure `panel` sits in `slot` before it starts moving.
fn orient<R: Renderer + ?Sized>(
    panel: usize,
    slot: Slot,
    width: f64,
    strip: &mut TransitionController,
    renderer: &mut R,
) {
    if strip.offset(panel) != slot.offset(width) {
        strip.stack(renderer, &[panel], slot, width);
    }
}

/// Render the drag window displaced by `delta_x`.
///
/// When one panel is both neighbors it is first stacked on the side the
/// drag is revealing.
pub fn drag<R: Renderer + ?Sized>(
    ring: &Ring,
    width: f64,
    current: usize,
    delta_x: f64,
    strip: &mut TransitionController,
    renderer: &mut R,
) {
    if let (Some(prev), Some(next)) = (ring.prev(current), ring.next(current))
        && prev == next
        && delta_x != 0.0
    {
        let slot = Slot::incoming(Direction::from_delta(delta_x));
        orient(prev, slot, width, strip, renderer);
    }
    strip.displace(renderer, &ring.window(current), delta_x);
}

/// Animate the drag window back to its cached offsets.
pub fn snap_back<R: Renderer + ?Sized>(
    ring: &Ring,
    current: usize,
    speed: Duration,
    strip: &mut TransitionController,
    renderer: &mut R,
) {
    strip.slide(renderer, &ring.window(current), 0.0, speed);
}

/// Advance one step in `direction`.
///
/// Returns the new index, or `None` when a non-continuous ring is already
/// at the end (nothing is touched in that case).
pub fn commit_step<R: Renderer + ?Sized>(
    ring: &Ring,
    width: f64,
    current: usize,
    direction: Direction,
    speed: Duration,
    strip: &mut TransitionController,
    renderer: &mut R,
) -> Option<usize> {
    let incoming = ring.neighbor(current, direction)?;
    let index = ring.stepped_index(current, direction)?;

    orient(incoming, Slot::incoming(direction), width, strip, renderer);
    strip.slide(
        renderer,
        &[current, incoming],
        direction.motion_sign() * width,
        speed,
    );
    repark(ring, width, index, &[current, incoming], strip, renderer);

    tracing::debug!(from = current, to = index, ?direction, "ring step");
    Some(index)
}

/// Jump straight from `from` to `to`.
///
/// Panels in between are stacked on the far side in one pass, then only
/// the `from`/`to` pair animates. Direction follows the linear indices, so
/// a jump from the last panel to the first runs backward across the strip.
pub fn jump<R: Renderer + ?Sized>(
    ring: &Ring,
    width: f64,
    from: usize,
    to: usize,
    speed: Duration,
    strip: &mut TransitionController,
    renderer: &mut R,
) {
    if from == to || to >= ring.count() {
        return;
    }
    let direction = if to > from {
        Direction::Forward
    } else {
        Direction::Backward
    };
    let behind = match direction {
        Direction::Forward => Slot::Before,
        Direction::Backward => Slot::After,
    };

    let in_between: Vec<usize> = Ring::between(from, to).collect();
    strip.stack(renderer, &in_between, behind, width);
    orient(to, Slot::incoming(direction), width, strip, renderer);
    strip.slide(renderer, &[from, to], direction.motion_sign() * width, speed);
    repark(ring, width, to, &[from, to], strip, renderer);

    tracing::debug!(from, to, skipped = in_between.len(), "ring jump");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neighbors_without_wrap() {
        let ring = Ring::new(4, false);
        assert_eq!(ring.prev(0), None);
        assert_eq!(ring.next(0), Some(1));
        assert_eq!(ring.prev(3), Some(2));
        assert_eq!(ring.next(3), None);
    }

    #[test]
    fn neighbors_with_wrap() {
        let ring = Ring::new(4, true);
        assert_eq!(ring.prev(0), Some(3));
        assert_eq!(ring.next(3), Some(0));
    }

    #[test]
    fn single_panel_has_no_neighbors() {
        let ring = Ring::new(1, true);
        assert_eq!(ring.next(0), None);
        assert_eq!(ring.prev(0), None);
        assert_eq!(ring.window(0), vec![0]);
    }

    #[test]
    fn window_dedups_two_panel_ring() {
        let ring = Ring::new(2, true);
        assert_eq!(ring.window(0), vec![1, 0]);
        let ring = Ring::new(5, true);
        assert_eq!(ring.window(0), vec![4, 0, 1]);
        assert_eq!(ring.window(4), vec![3, 4, 0]);
        let ring = Ring::new(5, false);
        assert_eq!(ring.window(0), vec![0, 1]);
    }

    #[test]
    fn rest_slots_classify_before_current_after() {
        let ring = Ring::new(5, false);
        let slots: Vec<Slot> = (0..5).map(|p| ring.rest_slot(p, 2)).collect();
        assert_eq!(
            slots,
            vec![
                Slot::Before,
                Slot::Before,
                Slot::Current,
                Slot::After,
                Slot::After
            ]
        );
    }

    #[test]
    fn rest_slots_park_wrap_neighbors() {
        let ring = Ring::new(4, true);
        assert_eq!(ring.rest_slot(3, 0), Slot::Before);
        assert_eq!(ring.rest_slot(0, 3), Slot::After);
        assert_eq!(ring.rest_slot(1, 3), Slot::Before);
        assert_eq!(ring.rest_slot(2, 0), Slot::After);
    }

    #[test]
    fn two_panel_ring_rests_forward() {
        let ring = Ring::new(2, true);
        assert_eq!(ring.rest_slot(1, 0), Slot::After);
        assert_eq!(ring.rest_slot(0, 1), Slot::After);
    }

    #[test]
    fn stepped_index_wraps_both_ways() {
        let ring = Ring::new(3, true);
        assert_eq!(ring.stepped_index(2, Direction::Forward), Some(0));
        assert_eq!(ring.stepped_index(0, Direction::Backward), Some(2));
        assert_eq!(ring.stepped_index(1, Direction::Forward), Some(2));
        assert_eq!(ring.stepped_index(1, Direction::Backward), Some(0));
    }

    #[test]
    fn stepped_index_clamps_without_wrap() {
        let ring = Ring::new(3, false);
        assert_eq!(ring.stepped_index(2, Direction::Forward), None);
        assert_eq!(ring.stepped_index(0, Direction::Backward), None);
    }

    #[test]
    fn between_is_exclusive() {
        assert_eq!(Ring::between(1, 4).collect::<Vec<_>>(), vec![2, 3]);
        assert_eq!(Ring::between(4, 1).collect::<Vec<_>>(), vec![2, 3]);
        assert!(Ring::between(2, 3).next().is_none());
    }

    #[test]
    fn slot_offsets() {
        assert_eq!(Slot::Before.offset(300.0), -300.0);
        assert_eq!(Slot::Current.offset(300.0), 0.0);
        assert_eq!(Slot::After.offset(300.0), 300.0);
        assert_eq!(Slot::incoming(Direction::Forward), Slot::After);
        assert_eq!(Slot::incoming(Direction::Backward), Slot::Before);
    }
}
