//! Timed show/hide transition for the bottom navigation bar.
//!
//! The bar's vertical offset is modelled as an explicit owned value: a
//! captured start value, a target, a start instant and a fixed duration.
//! Sampling at any instant is a pure function of time, so the transition
//! never needs to be cancelled — a later directive simply supersedes the
//! current one, taking the sampled value as its new starting point.

use std::time::{Duration, Instant};

use super::scroll::ChromeDecision;

/// Full height of the navigation bar in offset units — the "hidden" target.
pub const NAV_HEIGHT: f64 = 64.0;

/// Duration of one show/hide transition.
pub const SLIDE_DURATION: Duration = Duration::from_millis(160);

/// Drives a single offset in `[0, NAV_HEIGHT]`: 0 = fully shown,
/// `NAV_HEIGHT` = fully hidden.
#[derive(Debug, Clone)]
pub struct ChromeSlide {
    from: f64,
    target: f64,
    started: Option<Instant>,
}

impl Default for ChromeSlide {
    fn default() -> Self {
        Self::new()
    }
}

impl ChromeSlide {
    /// A bar that starts fully shown, at rest.
    pub fn new() -> Self {
        Self {
            from: 0.0,
            target: 0.0,
            started: None,
        }
    }

    /// Consume one hysteresis decision. `Unchanged` is a no-op; `Show` and
    /// `Hide` start a transition from the currently sampled offset (last
    /// decision wins, nothing is queued).
    pub fn apply(&mut self, decision: ChromeDecision, now: Instant) {
        let target = match decision {
            ChromeDecision::Show => 0.0,
            ChromeDecision::Hide => NAV_HEIGHT,
            ChromeDecision::Unchanged => return,
        };
        self.from = self.offset(now);
        self.target = target;
        self.started = Some(now);
    }

    /// Sample the offset at `now`.
    pub fn offset(&self, now: Instant) -> f64 {
        let Some(started) = self.started else {
            return self.target;
        };
        let t = now.saturating_duration_since(started).as_secs_f64()
            / SLIDE_DURATION.as_secs_f64();
        if t >= 1.0 {
            self.target
        } else {
            self.from + (self.target - self.from) * ease_in_out(t)
        }
    }

    /// Offset as a fraction of the full bar height, in `[0, 1]`.
    pub fn hidden_fraction(&self, now: Instant) -> f64 {
        self.offset(now) / NAV_HEIGHT
    }

    /// True while the offset is still moving toward its target.
    pub fn is_animating(&self, now: Instant) -> bool {
        self.offset(now) != self.target
    }
}

/// Smoothstep ease: slow in, slow out.
fn ease_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_shown_and_at_rest() {
        let slide = ChromeSlide::new();
        let now = Instant::now();
        assert_eq!(slide.offset(now), 0.0);
        assert!(!slide.is_animating(now));
    }

    #[test]
    fn hide_reaches_nav_height_after_duration() {
        let mut slide = ChromeSlide::new();
        let t0 = Instant::now();
        slide.apply(ChromeDecision::Hide, t0);

        let mid = slide.offset(t0 + SLIDE_DURATION / 2);
        assert!(mid > 0.0 && mid < NAV_HEIGHT, "mid-flight offset: {mid}");

        assert_eq!(slide.offset(t0 + SLIDE_DURATION), NAV_HEIGHT);
        assert_eq!(slide.offset(t0 + SLIDE_DURATION * 4), NAV_HEIGHT);
        assert_eq!(slide.hidden_fraction(t0 + SLIDE_DURATION), 1.0);
    }

    #[test]
    fn unchanged_is_a_no_op() {
        let mut slide = ChromeSlide::new();
        let t0 = Instant::now();
        slide.apply(ChromeDecision::Hide, t0);
        slide.apply(ChromeDecision::Unchanged, t0 + SLIDE_DURATION);
        assert_eq!(slide.offset(t0 + SLIDE_DURATION), NAV_HEIGHT);
    }

    #[test]
    fn show_supersedes_hide_mid_flight() {
        let mut slide = ChromeSlide::new();
        let t0 = Instant::now();
        slide.apply(ChromeDecision::Hide, t0);

        // Reverse halfway through: the new transition starts from the
        // sampled mid-flight value, not from NAV_HEIGHT.
        let t1 = t0 + SLIDE_DURATION / 2;
        let sampled = slide.offset(t1);
        slide.apply(ChromeDecision::Show, t1);
        assert_eq!(slide.offset(t1), sampled);

        assert_eq!(slide.offset(t1 + SLIDE_DURATION), 0.0);
        assert!(!slide.is_animating(t1 + SLIDE_DURATION));
    }
}
