//! Property-based invariant tests for the renderer strategies.
//!
//! 1. Polled frames never leave the segment between start and target.
//! 2. Polled frames move monotonically toward the target.
//! 3. A panel completes exactly once, on the first poll at or past its
//!    duration, and its last write is the exact target.
//! 4. Both strategies report the same completions for the same schedule.

use std::time::Duration;

use glide_backend::{
    AdaptiveRenderer, HeadlessSurface, ManualClock, PollingRenderer, Renderer,
    RendererCapabilities,
};
use proptest::prelude::*;

const MS: Duration = Duration::from_millis(1);

fn polling() -> (PollingRenderer<HeadlessSurface, ManualClock>, ManualClock) {
    let clock = ManualClock::new();
    (
        PollingRenderer::new(HeadlessSurface::new(300.0), clock.clone()),
        clock,
    )
}

// ═════════════════════════════════════════════════════════════════════════
// 1-3. Polling frames
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn polled_frames_stay_on_segment(
        from in -900.0f64..900.0,
        to in -900.0f64..900.0,
        duration_ms in 1u64..600,
        steps in proptest::collection::vec(1u64..40, 1..40),
    ) {
        let (mut r, clock) = polling();
        r.position_panel(0, from, Duration::ZERO);
        r.position_panel(0, to, MS * duration_ms as u32);

        let (lo, hi) = if from <= to { (from, to) } else { (to, from) };
        let mut last = from;
        let mut elapsed = 0u64;
        let mut completions = 0;
        for step in steps {
            clock.advance(MS * step as u32);
            elapsed += step;
            let done = r.poll_completions();
            completions += done.len();
            let Some(offset) = r.surface().offset(0) else {
                return Err(TestCaseError::fail("panel lost its offset"));
            };
            prop_assert!(offset >= lo && offset <= hi, "{offset} outside [{lo}, {hi}]");
            prop_assert!((to - offset).abs() <= (to - last).abs());
            last = offset;
            if elapsed >= duration_ms {
                prop_assert_eq!(offset, to);
                prop_assert_eq!(completions, 1);
                prop_assert!(!r.is_animating());
            } else {
                prop_assert_eq!(completions, 0);
            }
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Strategy agreement
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn strategies_agree_on_completions(
        durations in proptest::collection::vec(0u64..400, 1..6),
        ticks in proptest::collection::vec(1u64..120, 1..12),
    ) {
        let clocks = [ManualClock::new(), ManualClock::new()];
        let mut renderers = [
            AdaptiveRenderer::select(
                RendererCapabilities::with_transitions(),
                HeadlessSurface::new(300.0),
                clocks[0].clone(),
            ),
            AdaptiveRenderer::select(
                RendererCapabilities::polling_only(),
                HeadlessSurface::new(300.0),
                clocks[1].clone(),
            ),
        ];
        for r in &mut renderers {
            for (panel, &ms) in durations.iter().enumerate() {
                r.position_panel(panel, 300.0, Duration::ZERO);
                r.position_panel(panel, 0.0, MS * ms as u32);
            }
        }
        for tick in ticks {
            for clock in &clocks {
                clock.advance(MS * tick as u32);
            }
            let [a, b] = &mut renderers;
            prop_assert_eq!(a.poll_completions(), b.poll_completions());
        }
    }
}
