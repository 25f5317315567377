//! Paged carousel state shared between the inline strip and the fullscreen
//! viewer.
//!
//! Both presentations are paged horizontal containers over the same image
//! list. `PagerState` is the single source of truth for the current page;
//! `settle_page` maps a settled scroll offset to a page index; and
//! `FullscreenSync` coordinates the open/close handshake with the freshly
//! mounted fullscreen viewer, which has to be positioned at the shared page
//! without animation even though its mount and first layout are
//! asynchronous relative to the open call.

use std::time::{Duration, Instant};

/// Upper bound on how long the fullscreen viewer's mount is expected to
/// take. Used only as a fallback when the viewer never reports readiness;
/// the explicit ready signal is preferred.
pub const FULLSCREEN_MOUNT_DELAY: Duration = Duration::from_millis(50);

/// Shared carousel state for one listing's image set.
///
/// `current_page` is meaningless while `image_count == 0`; every write path
/// clamps against the count, so the `current_page < image_count` invariant
/// holds whenever there is at least one image.
#[derive(Debug, Clone)]
pub struct PagerState {
    /// Page both viewers agree on.
    pub current_page: usize,
    /// Number of images; set once when the listing data arrives.
    pub image_count: usize,
    /// Whether the fullscreen viewer is up.
    pub fullscreen_open: bool,
}

impl PagerState {
    pub fn new(image_count: usize) -> Self {
        Self {
            current_page: 0,
            image_count,
            fullscreen_open: false,
        }
    }
}

/// Map a paged container's settled horizontal offset to a page index.
///
/// Called once per gesture, at rest — never continuously during motion, so
/// the dot indicator doesn't flicker mid-swipe. Returns `None` when there
/// are no images (inert carousel) or the viewport has no width.
pub fn settle_page(offset_x: f64, viewport_width: f64, image_count: usize) -> Option<usize> {
    if image_count == 0 || viewport_width <= 0.0 {
        return None;
    }
    let page = (offset_x / viewport_width).round().max(0.0) as usize;
    Some(page.min(image_count - 1))
}

/// Coordinates the inline carousel with the independently-mounted
/// fullscreen viewer.
///
/// At most one positioning request is pending at a time. The request is
/// resolved either by the viewer's explicit ready signal (first layout) or,
/// for hosts that cannot provide one, by the deadline fallback. Closing the
/// viewer or unmounting the screen cancels the request so it can never act
/// on a torn-down viewer.
#[derive(Debug, Clone, Default)]
pub struct FullscreenSync {
    deadline: Option<Instant>,
}

impl FullscreenSync {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open the fullscreen viewer at `at_page`. Rejected when there are no
    /// images to show. Arms the deferred positioning request.
    pub fn open(&mut self, pager: &mut PagerState, at_page: usize, now: Instant) -> bool {
        if pager.image_count == 0 {
            return false;
        }
        pager.fullscreen_open = true;
        pager.current_page = at_page.min(pager.image_count - 1);
        self.deadline = Some(now + FULLSCREEN_MOUNT_DELAY);
        true
    }

    /// Close the viewer. The current page is retained so the inline
    /// carousel (and a reopened viewer) stay on the page the user left.
    pub fn close(&mut self, pager: &mut PagerState) {
        pager.fullscreen_open = false;
        self.deadline = None;
    }

    /// The fullscreen viewer completed its first layout. Returns the page
    /// it must snap to (no animation), exactly once per open.
    pub fn viewer_ready(&mut self, pager: &PagerState) -> Option<usize> {
        if !pager.fullscreen_open {
            // Ready signal from a viewer that was already closed.
            self.deadline = None;
            return None;
        }
        self.deadline.take().map(|_| pager.current_page)
    }

    /// Deadline fallback: fires once the mount delay has elapsed. A stale
    /// deadline observed after close is dropped silently.
    pub fn poll(&mut self, pager: &PagerState, now: Instant) -> Option<usize> {
        if !pager.fullscreen_open {
            self.deadline = None;
            return None;
        }
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                Some(pager.current_page)
            }
            _ => None,
        }
    }

    /// A gesture inside either viewer settled on `page`; update the shared
    /// index. Mutations from both call sites run on the single event
    /// thread, serialized by event-loop ordering.
    pub fn page_settled(&self, pager: &mut PagerState, page: usize) {
        if pager.image_count > 0 {
            pager.current_page = page.min(pager.image_count - 1);
        }
    }

    /// Screen unmount: drop any pending positioning request.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settle_rounds_to_nearest_page() {
        assert_eq!(settle_page(0.0, 400.0, 5), Some(0));
        assert_eq!(settle_page(390.0, 400.0, 5), Some(1));
        assert_eq!(settle_page(610.0, 400.0, 5), Some(2));
    }

    #[test]
    fn settle_clamps_to_image_count() {
        // Wild overshoot still lands on the last page, never index 25.
        assert_eq!(settle_page(10_000.0, 400.0, 3), Some(2));
        // Negative overscroll clamps to the first page.
        assert_eq!(settle_page(-180.0, 400.0, 3), Some(0));
    }

    #[test]
    fn settle_is_inert_without_images() {
        assert_eq!(settle_page(400.0, 400.0, 0), None);
        assert_eq!(settle_page(400.0, 0.0, 3), None);
    }

    #[test]
    fn open_rejected_when_no_images() {
        let mut pager = PagerState::new(0);
        let mut sync = FullscreenSync::new();
        assert!(!sync.open(&mut pager, 0, Instant::now()));
        assert!(!pager.fullscreen_open);
    }

    #[test]
    fn inline_and_fullscreen_stay_in_sync() {
        let mut pager = PagerState::new(5);
        let mut sync = FullscreenSync::new();
        let t0 = Instant::now();

        // Inline carousel is on page 2 when the user taps.
        sync.page_settled(&mut pager, 2);
        let page = pager.current_page;
        assert!(sync.open(&mut pager, page, t0));
        assert!(pager.fullscreen_open);

        // Deadline fallback positions the fresh viewer at page 2.
        assert_eq!(sync.poll(&pager, t0 + FULLSCREEN_MOUNT_DELAY), Some(2));
        // One-shot: it never fires again.
        assert_eq!(sync.poll(&pager, t0 + Duration::from_secs(1)), None);

        // User swipes the fullscreen viewer to page 4, then closes.
        sync.page_settled(&mut pager, 4);
        sync.close(&mut pager);
        assert!(!pager.fullscreen_open);
        // The inline dot indicator now shows page 4.
        assert_eq!(pager.current_page, 4);
    }

    #[test]
    fn ready_signal_preempts_the_deadline() {
        let mut pager = PagerState::new(3);
        let mut sync = FullscreenSync::new();
        let t0 = Instant::now();

        assert!(sync.open(&mut pager, 1, t0));
        // Viewer lays out before the delay elapses.
        assert_eq!(sync.viewer_ready(&pager), Some(1));
        // The armed deadline was disarmed; neither path fires again.
        assert_eq!(sync.viewer_ready(&pager), None);
        assert_eq!(sync.poll(&pager, t0 + Duration::from_secs(1)), None);
    }

    #[test]
    fn close_before_deadline_cancels_positioning() {
        let mut pager = PagerState::new(3);
        let mut sync = FullscreenSync::new();
        let t0 = Instant::now();

        assert!(sync.open(&mut pager, 1, t0));
        sync.close(&mut pager);
        // Rapid open/close must not leave a stale timer firing against an
        // unmounted viewer.
        assert_eq!(sync.poll(&pager, t0 + Duration::from_secs(1)), None);
        assert_eq!(sync.viewer_ready(&pager), None);
    }

    #[test]
    fn open_clamps_the_requested_page() {
        let mut pager = PagerState::new(3);
        let mut sync = FullscreenSync::new();
        assert!(sync.open(&mut pager, 99, Instant::now()));
        assert_eq!(pager.current_page, 2);
    }

    #[test]
    fn page_retained_across_reopen() {
        let mut pager = PagerState::new(5);
        let mut sync = FullscreenSync::new();
        let t0 = Instant::now();

        assert!(sync.open(&mut pager, 2, t0));
        sync.page_settled(&mut pager, 3);
        sync.close(&mut pager);

        let t1 = t0 + Duration::from_secs(5);
        let page = pager.current_page;
        assert!(sync.open(&mut pager, page, t1));
        assert_eq!(sync.poll(&pager, t1 + FULLSCREEN_MOUNT_DELAY), Some(3));
    }
}
