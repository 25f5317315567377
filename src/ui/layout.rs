//! Layout helpers — split the terminal area into regions and remember the
//! clickable ones for mouse hit-testing.

use ratatui::layout::Rect;

/// Height of the bottom navigation bar in rows.
pub const NAVBAR_ROWS: u16 = 2;

/// Primary screen layout: a one-row header, the content area, and the
/// navigation bar overlaid on the bottom of the content.
pub struct AppLayout {
    pub header_area: Rect,
    pub content_area: Rect,
    /// Visible part of the navigation bar. `None` while fully hidden.
    /// The bar overlays content rather than reserving rows, so hiding it
    /// does not reflow the screen.
    pub navbar_area: Option<Rect>,
}

impl AppLayout {
    /// Compute the layout from the full terminal area. `hidden_fraction`
    /// is the chrome transition's offset expressed as a fraction of the
    /// bar height: 0 = fully shown, 1 = fully off-screen.
    pub fn from_area(area: Rect, hidden_fraction: f64) -> Self {
        let header_area = Rect::new(area.x, area.y, area.width, area.height.min(1));
        let content_area = Rect::new(
            area.x,
            area.y + header_area.height,
            area.width,
            area.height.saturating_sub(header_area.height),
        );

        let hidden_rows =
            (hidden_fraction.clamp(0.0, 1.0) * NAVBAR_ROWS as f64).round() as u16;
        let visible_rows = NAVBAR_ROWS.saturating_sub(hidden_rows).min(area.height);
        let navbar_area = if visible_rows == 0 {
            None
        } else {
            Some(Rect::new(
                area.x,
                area.y + area.height - visible_rows,
                area.width,
                visible_rows,
            ))
        };

        Self {
            header_area,
            content_area,
            navbar_area,
        }
    }
}

/// Clickable regions recorded during the last render, consumed by the
/// mouse handler on the next event.
#[derive(Debug, Clone, Default)]
pub struct HitZones {
    /// Content area of the last frame (for scroll clamping).
    pub content: Option<Rect>,
    pub nav_home: Option<Rect>,
    pub nav_cart: Option<Rect>,
    pub nav_profile: Option<Rect>,
    /// Feed / cart rows: (item index, row rect).
    pub items: Vec<(usize, Rect)>,
    /// Inline carousel area on the listing screen.
    pub carousel: Option<Rect>,
    /// Add-to-cart button on the listing screen.
    pub cart_button: Option<Rect>,
    /// Seller-name link on the listing screen.
    pub seller_link: Option<Rect>,
    /// Whole-screen fullscreen viewer (click closes).
    pub fullscreen: Option<Rect>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn navbar_shrinks_with_hidden_fraction() {
        let area = Rect::new(0, 0, 80, 24);

        let shown = AppLayout::from_area(area, 0.0);
        assert_eq!(shown.navbar_area, Some(Rect::new(0, 22, 80, 2)));

        let half = AppLayout::from_area(area, 0.5);
        assert_eq!(half.navbar_area, Some(Rect::new(0, 23, 80, 1)));

        let hidden = AppLayout::from_area(area, 1.0);
        assert_eq!(hidden.navbar_area, None);
    }

    #[test]
    fn header_takes_one_row() {
        let layout = AppLayout::from_area(Rect::new(0, 0, 80, 24), 0.0);
        assert_eq!(layout.header_area.height, 1);
        assert_eq!(layout.content_area.y, 1);
        assert_eq!(layout.content_area.height, 23);
    }
}
