//! Property-based invariant tests for ring positioning.
//!
//! 1. `next()` N times in a continuous ring returns to the start index.
//! 2. Every index observed between operations is in range.
//! 3. Bounded rings never move past either end.
//! 4. After any operation sequence and a settle, offsets match a fresh
//!    layout at the same index.
//! 5. At rest exactly one panel sits in the viewport and every other panel
//!    is parked one width away.

use std::time::Duration;

use glide::{
    Carousel, CarouselConfig, Direction, HeadlessSurface, ManualClock, Panel, Ring,
    TransitionRenderer,
};
use proptest::prelude::*;

type Subject = Carousel<TransitionRenderer<HeadlessSurface, ManualClock>, ManualClock>;

const WIDTH: f64 = 300.0;

#[derive(Debug, Clone, Copy)]
enum Op {
    Next,
    Prev,
    Slide(usize),
}

// ── Strategies ────────────────────────────────────────────────────────────

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        Just(Op::Next),
        Just(Op::Prev),
        (0usize..10).prop_map(Op::Slide),
    ]
}

fn build(count: usize, start: usize, continuous: bool) -> (Subject, ManualClock) {
    let config = CarouselConfig::default()
        .with_start_slide(start)
        .with_continuous(continuous);
    let clock = ManualClock::new();
    let renderer = TransitionRenderer::new(HeadlessSurface::new(WIDTH), clock.clone());
    (Carousel::new(config, count, renderer, clock.clone()), clock)
}

fn offsets(c: &Subject) -> Vec<f64> {
    c.panels().iter().map(Panel::offset).collect()
}

fn apply(c: &mut Subject, clock: &ManualClock, op: Op) {
    match op {
        Op::Next => {
            c.next(None);
        }
        Op::Prev => {
            c.prev(None);
        }
        Op::Slide(to) => {
            c.slide(to, None);
        }
    }
    clock.advance(Duration::from_millis(300));
    c.tick();
}

// ═════════════════════════════════════════════════════════════════════════
// 1-2. Wrap closure
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn next_n_times_closes_the_loop(count in 2usize..=8, start_seed in any::<usize>()) {
        let start = start_seed % count;
        let (mut c, clock) = build(count, start, true);
        let rest = offsets(&c);
        for _ in 0..count {
            apply(&mut c, &clock, Op::Next);
            prop_assert!(c.position() < count);
        }
        prop_assert_eq!(c.position(), start);
        prop_assert_eq!(offsets(&c), rest);
    }

    #[test]
    fn prev_n_times_closes_the_loop(count in 2usize..=8, start_seed in any::<usize>()) {
        let start = start_seed % count;
        let (mut c, clock) = build(count, start, true);
        for _ in 0..count {
            apply(&mut c, &clock, Op::Prev);
        }
        prop_assert_eq!(c.position(), start);
    }

    #[test]
    fn stepped_index_stays_in_range(
        count in 2usize..=16,
        index_seed in any::<usize>(),
        forward in any::<bool>(),
    ) {
        let ring = Ring::new(count, true);
        let index = index_seed % count;
        let direction = if forward { Direction::Forward } else { Direction::Backward };
        let stepped = ring.stepped_index(index, direction);
        prop_assert!(stepped.is_some_and(|i| i < count));
        prop_assert_eq!(stepped, ring.neighbor(index, direction));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Bounds clamp
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn bounded_ring_clamps_at_ends(
        count in 2usize..=8,
        ops in proptest::collection::vec(op_strategy(), 1..24),
    ) {
        let (mut c, clock) = build(count, 0, false);
        for op in ops {
            let before_index = c.position();
            let before = offsets(&c);
            apply(&mut c, &clock, op);
            prop_assert!(c.position() < count);
            let at_end = match op {
                Op::Next => before_index + 1 == count,
                Op::Prev => before_index == 0,
                Op::Slide(_) => false,
            };
            if at_end {
                prop_assert_eq!(c.position(), before_index);
                prop_assert_eq!(offsets(&c), before);
            }
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4-5. Rest layout
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn settled_layout_matches_fresh_layout(
        count in 2usize..=8,
        continuous in any::<bool>(),
        ops in proptest::collection::vec(op_strategy(), 1..24),
    ) {
        let (mut c, clock) = build(count, 0, continuous);
        for op in ops {
            apply(&mut c, &clock, op);
            let (fresh, _) = build(count, c.position(), continuous);
            prop_assert_eq!(offsets(&c), offsets(&fresh), "after {:?}", op);
        }
    }

    #[test]
    fn rest_layout_has_one_visible_panel(
        count in 2usize..=8,
        continuous in any::<bool>(),
        ops in proptest::collection::vec(op_strategy(), 0..16),
    ) {
        let (mut c, clock) = build(count, 0, continuous);
        for op in ops {
            apply(&mut c, &clock, op);
        }
        let current = c.position();
        for panel in c.panels() {
            let expected_zero = panel.index() == current;
            prop_assert_eq!(panel.offset() == 0.0, expected_zero);
            prop_assert!(
                [-WIDTH, 0.0, WIDTH].contains(&panel.offset()),
                "panel {} at {}",
                panel.index(),
                panel.offset()
            );
            prop_assert!(!panel.is_displaced());
        }
        let ring = Ring::new(count, continuous);
        if let Some(next) = ring.next(current) {
            prop_assert_eq!(c.panels()[next].offset(), WIDTH);
        }
        if let Some(prev) = ring.prev(current)
            && ring.next(current) != Some(prev)
        {
            prop_assert_eq!(c.panels()[prev].offset(), -WIDTH);
        }
    }
}
