//! Horizontal paging motion with exponential ease-out.
//!
//! A paged strip's offset is eased toward the target page boundary: each
//! tick the remaining distance decays, giving visible deceleration. When
//! the motion comes to rest the glide reports the momentum-settle exactly
//! once — that pulse is what feeds the page tracker, so the dot indicator
//! only updates at rest, never mid-swipe.

/// Column-offset paging animator for one paged strip.
#[derive(Debug, Clone)]
pub struct PageGlide {
    /// Current horizontal offset in columns.
    offset_x: f64,
    /// Offset the strip is gliding toward (a page boundary).
    target_x: f64,
    /// Damping: `remaining *= (1 - speed)` each tick.
    /// Good range: 0.25–0.55 at 30 fps.
    speed: f64,
    /// True while a gesture's settle pulse is still owed.
    settle_pending: bool,
}

impl PageGlide {
    pub fn new(speed: f64) -> Self {
        Self {
            offset_x: 0.0,
            target_x: 0.0,
            speed: speed.clamp(0.05, 0.95),
            settle_pending: false,
        }
    }

    /// Start gliding toward `x` (a page boundary). Arms the settle pulse.
    pub fn glide_to(&mut self, x: f64) {
        self.target_x = x;
        self.settle_pending = true;
    }

    /// Jump to `x` with no animation and no settle pulse — programmatic
    /// positioning is not a gesture.
    pub fn snap_to(&mut self, x: f64) {
        self.offset_x = x;
        self.target_x = x;
        self.settle_pending = false;
    }

    /// Advance one frame. Returns `true` exactly once per gesture, when
    /// the motion comes to rest (the momentum-settle event).
    pub fn tick(&mut self) -> bool {
        let remaining = self.target_x - self.offset_x;
        if remaining.abs() < 0.4 {
            self.offset_x = self.target_x;
            if self.settle_pending {
                self.settle_pending = false;
                return true;
            }
            return false;
        }
        self.offset_x += remaining * self.speed;
        false
    }

    /// Current offset in columns.
    pub fn offset_x(&self) -> f64 {
        self.offset_x
    }

    /// Offset the strip will come to rest at.
    pub fn target_x(&self) -> f64 {
        self.target_x
    }

    /// True while there is visible motion.
    pub fn is_animating(&self) -> bool {
        self.offset_x != self.target_x
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settles_once_per_gesture() {
        let mut glide = PageGlide::new(0.5);
        glide.glide_to(40.0);

        let mut settles = 0;
        for _ in 0..64 {
            if glide.tick() {
                settles += 1;
            }
        }
        assert_eq!(settles, 1);
        assert_eq!(glide.offset_x(), 40.0);
        assert!(!glide.is_animating());
    }

    #[test]
    fn snap_does_not_pulse() {
        let mut glide = PageGlide::new(0.5);
        glide.snap_to(80.0);
        assert_eq!(glide.offset_x(), 80.0);
        for _ in 0..8 {
            assert!(!glide.tick());
        }
    }

    #[test]
    fn retarget_mid_flight_settles_at_new_page() {
        let mut glide = PageGlide::new(0.5);
        glide.glide_to(40.0);
        glide.tick();
        glide.glide_to(0.0); // reverse before settling

        let mut settles = 0;
        for _ in 0..64 {
            if glide.tick() {
                settles += 1;
            }
        }
        assert_eq!(settles, 1);
        assert_eq!(glide.offset_x(), 0.0);
    }
}
