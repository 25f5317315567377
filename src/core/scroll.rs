//! Scroll-direction hysteresis for the bottom navigation bar.
//!
//! A stream of raw vertical offsets is folded into a binary show/hide
//! decision. Small or oscillating motion near the threshold produces no
//! flicker; only a sustained displacement in one direction — measured from
//! the initial state or from the last direction reversal — flips the
//! decision, exactly once.

/// Accumulated displacement required before the bar toggles.
pub const TOGGLE_DISTANCE: f64 = 20.0;

/// Outcome of feeding one scroll sample into the filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChromeDecision {
    /// Slide the bar back in.
    Show,
    /// Slide the bar out of view.
    Hide,
    /// Below threshold or state already matches — nothing to do.
    Unchanged,
}

/// Directional-accumulation hysteresis filter.
///
/// One instance per scrollable screen; construct at screen mount and drop
/// at unmount. `last_offset` is always ≥ 0 — elastic overscroll (negative
/// offsets) is clamped before it can affect the signal.
#[derive(Debug, Clone)]
pub struct ScrollSignal {
    /// Last observed clamped offset.
    last_offset: f64,
    /// Signed displacement since the last direction reset.
    accumulated: f64,
    /// Last emitted visibility decision.
    hidden: bool,
}

impl Default for ScrollSignal {
    fn default() -> Self {
        Self::new()
    }
}

impl ScrollSignal {
    pub fn new() -> Self {
        Self {
            last_offset: 0.0,
            accumulated: 0.0,
            hidden: false,
        }
    }

    /// Feed one raw vertical offset sample.
    pub fn process(&mut self, raw_offset: f64) -> ChromeDecision {
        // Bouncy scroll containers report negative offsets at the top.
        let offset = raw_offset.max(0.0);

        let delta = offset - self.last_offset;
        self.last_offset = offset;

        self.accumulated += delta;

        // A reversal discards prior same-direction history: the user must
        // re-earn the toggle distance from the turning point.
        if (delta > 0.0 && self.accumulated < 0.0)
            || (delta < 0.0 && self.accumulated > 0.0)
        {
            self.accumulated = delta;
        }

        if self.accumulated.abs() < TOGGLE_DISTANCE {
            return ChromeDecision::Unchanged;
        }

        let should_hide = self.accumulated > 0.0;

        // Already in the requested state — keep quiet so the animator is
        // never re-triggered toward its current target.
        if should_hide == self.hidden {
            return ChromeDecision::Unchanged;
        }

        self.hidden = should_hide;
        self.accumulated = 0.0;

        if should_hide {
            ChromeDecision::Hide
        } else {
            ChromeDecision::Show
        }
    }

    /// Last emitted decision.
    pub fn is_hidden(&self) -> bool {
        self.hidden
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Feed a sequence of absolute offsets, returning all decisions.
    fn run(signal: &mut ScrollSignal, offsets: &[f64]) -> Vec<ChromeDecision> {
        offsets.iter().map(|&y| signal.process(y)).collect()
    }

    #[test]
    fn below_threshold_never_toggles() {
        let mut s = ScrollSignal::new();
        // Same-direction deltas summing to TOGGLE_DISTANCE - 1.
        let decisions = run(&mut s, &[5.0, 11.0, 19.0]);
        assert!(decisions.iter().all(|&d| d == ChromeDecision::Unchanged));
        assert!(!s.is_hidden());
    }

    #[test]
    fn threshold_flips_exactly_once() {
        let mut s = ScrollSignal::new();
        assert_eq!(s.process(20.0), ChromeDecision::Hide);
        // Still scrolling down — the accumulator keeps growing but the
        // state already matches, so no duplicate decision is emitted.
        assert_eq!(s.process(45.0), ChromeDecision::Unchanged);
        assert_eq!(s.process(90.0), ChromeDecision::Unchanged);
        assert!(s.is_hidden());
    }

    #[test]
    fn reversal_resets_accumulation() {
        let mut s = ScrollSignal::new();
        assert_eq!(s.process(15.0), ChromeDecision::Unchanged); // +15
        assert_eq!(s.process(10.0), ChromeDecision::Unchanged); // -5 delta
        // The +15 history was discarded: accumulated is now -5, not +10.
        assert_eq!(s.accumulated, -5.0);
        // 15 more units upward finish the re-earned toggle distance, but
        // the bar is already shown, so nothing fires.
        assert_eq!(s.process(0.0), ChromeDecision::Unchanged);
        assert!(!s.is_hidden());
    }

    #[test]
    fn reversal_while_hidden_shows_after_full_distance() {
        let mut s = ScrollSignal::new();
        assert_eq!(s.process(100.0), ChromeDecision::Hide);
        // Scroll back up: 19 units is not enough…
        assert_eq!(s.process(81.0), ChromeDecision::Unchanged);
        // …the 20th unit shows the bar again.
        assert_eq!(s.process(80.0), ChromeDecision::Show);
        assert!(!s.is_hidden());
    }

    #[test]
    fn overscroll_clamps_to_zero() {
        let mut s = ScrollSignal::new();
        assert_eq!(s.process(-50.0), ChromeDecision::Unchanged);
        assert_eq!(s.process(-10.0), ChromeDecision::Unchanged);
        // Both samples clamp to offset 0, delta 0 — baseline untouched.
        assert_eq!(s.accumulated, 0.0);
        assert_eq!(s.last_offset, 0.0);
        // A real 20-unit pull from the clamped baseline still hides.
        assert_eq!(s.process(20.0), ChromeDecision::Hide);
    }

    #[test]
    fn oscillation_below_threshold_is_silent() {
        let mut s = ScrollSignal::new();
        let decisions = run(
            &mut s,
            &[10.0, 2.0, 12.0, 4.0, 14.0, 6.0, 16.0, 8.0],
        );
        assert!(decisions.iter().all(|&d| d == ChromeDecision::Unchanged));
    }
}
