//! Property-based invariant tests for the gesture classifier.
//!
//! 1. Resistance is zero at zero.
//! 2. Resistance is strictly increasing for non-negative drags.
//! 3. Resistance stays below one panel width.
//! 4. Resistance is odd: `f(-d) == -f(d)`.
//! 5. Continuous carousels always commit a swipe.
//! 6. Non-continuous carousels never commit past either end.
//! 7. Released swipes report the damped displacement they were dragged to.
//! 8. Every session ends back in `Idle`.

use std::time::Duration;

use glide_core::{
    Decision, Direction, GestureClassifier, GestureConfig, GestureContext, GestureOutcome,
    GestureState, PointerSample, resistance,
};
use proptest::prelude::*;

// ── Strategies ────────────────────────────────────────────────────────────

fn width_strategy() -> impl Strategy<Value = f64> {
    1.0f64..=5000.0
}

/// A non-zero horizontal drag distance.
fn drag_strategy() -> impl Strategy<Value = f64> {
    (1.0f64..=2000.0, any::<bool>()).prop_map(|(d, neg)| if neg { -d } else { d })
}

fn swipe(
    classifier: &mut GestureClassifier,
    ctx: &GestureContext,
    dx: f64,
    elapsed_ms: u64,
) -> GestureOutcome {
    let end = Duration::from_millis(elapsed_ms);
    classifier.process(&PointerSample::start(3000.0, 100.0, Duration::ZERO), ctx);
    classifier.process(&PointerSample::moved(3000.0 + dx, 100.0, end), ctx);
    classifier.process(&PointerSample::end(3000.0 + dx, 100.0, end), ctx)
}

fn released(outcome: GestureOutcome) -> glide_core::Release {
    match outcome {
        GestureOutcome::Released(release) => release,
        other => panic!("expected a release, got {other:?}"),
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 1-4. Resistance curve
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn resistance_is_zero_at_zero(width in width_strategy()) {
        prop_assert_eq!(resistance(0.0, width), 0.0);
    }

    #[test]
    fn resistance_strictly_increasing(
        width in width_strategy(),
        d in 0.0f64..=10_000.0,
        gap in 0.01f64..=10_000.0,
    ) {
        prop_assert!(resistance(d, width) < resistance(d + gap, width));
    }

    #[test]
    fn resistance_bounded_by_width(width in width_strategy(), d in 0.001f64..=1_000_000.0) {
        let f = resistance(d, width);
        prop_assert!(f > 0.0);
        prop_assert!(f < width, "f({}) = {} with width {}", d, f, width);
    }

    #[test]
    fn resistance_is_odd(width in width_strategy(), d in drag_strategy()) {
        prop_assert_eq!(resistance(-d, width), -resistance(d, width));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5-8. Release decisions
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn continuous_always_commits(
        count in 2usize..=8,
        index_seed in any::<usize>(),
        dx in drag_strategy(),
        elapsed_ms in 0u64..=2000,
    ) {
        let ctx = GestureContext {
            index: index_seed % count,
            count,
            width: 300.0,
            continuous: true,
        };
        let mut classifier = GestureClassifier::new(GestureConfig::default(), false);
        let release = released(swipe(&mut classifier, &ctx, dx, elapsed_ms));
        prop_assert_eq!(release.decision, Decision::Commit);
        prop_assert_eq!(release.direction, Direction::from_delta(release.delta_x));
    }

    #[test]
    fn bounded_never_commits_past_ends(
        count in 2usize..=8,
        at_first in any::<bool>(),
        d in 1.0f64..=2000.0,
        elapsed_ms in 0u64..=2000,
    ) {
        let (index, dx) = if at_first { (0, d) } else { (count - 1, -d) };
        let ctx = GestureContext { index, count, width: 300.0, continuous: false };
        let mut classifier = GestureClassifier::new(GestureConfig::default(), false);
        let release = released(swipe(&mut classifier, &ctx, dx, elapsed_ms));
        prop_assert_eq!(release.decision, Decision::Cancel);
    }

    #[test]
    fn release_carries_damped_delta(
        count in 2usize..=8,
        index_seed in any::<usize>(),
        continuous in any::<bool>(),
        dx in drag_strategy(),
    ) {
        let ctx = GestureContext {
            index: index_seed % count,
            count,
            width: 300.0,
            continuous,
        };
        let mut classifier = GestureClassifier::new(GestureConfig::default(), false);
        let release = released(swipe(&mut classifier, &ctx, dx, 100));
        let expected = if ctx.resists(dx) { resistance(dx, 300.0) } else { dx };
        prop_assert_eq!(release.delta_x, expected);
        prop_assert!(release.delta_x.abs() <= dx.abs());
    }

    #[test]
    fn sessions_always_end_idle(
        moves in proptest::collection::vec((-500.0f64..=500.0, -500.0f64..=500.0), 0..10),
        cancel in any::<bool>(),
    ) {
        let ctx = GestureContext { index: 1, count: 3, width: 300.0, continuous: false };
        let mut classifier = GestureClassifier::new(GestureConfig::default(), false);
        classifier.process(&PointerSample::start(0.0, 0.0, Duration::ZERO), &ctx);
        for (i, (x, y)) in moves.iter().enumerate() {
            let t = Duration::from_millis(10 * (i as u64 + 1));
            classifier.process(&PointerSample::moved(*x, *y, t), &ctx);
        }
        let t = Duration::from_secs(1);
        let last = if cancel {
            PointerSample::cancel(t)
        } else {
            PointerSample::end(0.0, 0.0, t)
        };
        classifier.process(&last, &ctx);
        prop_assert_eq!(classifier.state(), GestureState::Idle);
    }
}
