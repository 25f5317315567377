//! Bottom navigation bar — persistent chrome overlaid on every screen.
//!
//! The bar is two rows tall (separator + items) and slides out of view by
//! rendering only the rows the chrome transition still leaves on screen.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Clear, Paragraph, Widget},
};

use crate::app::state::Route;
use crate::ui::layout::NAVBAR_ROWS;
use crate::ui::theme::Theme;

const ITEMS: &[(&str, Route)] = &[
    ("Főoldal", Route::Home),
    ("Kosár", Route::Cart),
    ("Profil", Route::Profile),
];

/// The navigation bar widget. `area` is the *visible* slice of the bar —
/// when it is sliding out, the top rows disappear first, like a bar
/// translating past the bottom edge of a phone screen.
pub struct NavBar {
    pub route: Route,
}

/// Hit rects for the three items, in item order.
pub struct NavBarHitZones {
    pub home: Rect,
    pub cart: Rect,
    pub profile: Rect,
}

impl NavBar {
    pub fn render_and_hit(self, area: Rect, buf: &mut Buffer) -> NavBarHitZones {
        Clear.render(area, buf);
        buf.set_style(area, Theme::navbar_style());

        // When partially hidden we only draw the bottom rows of the bar:
        // row 0 is the separator, row 1 the items.
        let first_bar_row = NAVBAR_ROWS.saturating_sub(area.height);

        let item_w = area.width / ITEMS.len() as u16;
        let mut zones = [Rect::default(); 3];

        for row in first_bar_row..NAVBAR_ROWS {
            let y = area.y + (row - first_bar_row);
            match row {
                0 => {
                    let sep = "─".repeat(area.width as usize);
                    buf.set_line(
                        area.x,
                        y,
                        &Line::from(Span::styled(sep, Theme::meta_style())),
                        area.width,
                    );
                }
                _ => {
                    for (i, &(label, route)) in ITEMS.iter().enumerate() {
                        let x = area.x + item_w * i as u16;
                        let w = if i == ITEMS.len() - 1 {
                            area.width - item_w * i as u16
                        } else {
                            item_w
                        };
                        let rect = Rect::new(x, y, w, 1);
                        zones[i] = rect;

                        let style = if route == self.route {
                            Theme::navbar_active_style()
                        } else {
                            Theme::navbar_style()
                        };
                        buf.set_style(rect, style);
                        let pad = (w as usize).saturating_sub(label.chars().count()) / 2;
                        let text = format!("{}{}", " ".repeat(pad), label);
                        Paragraph::new(Line::from(Span::styled(text, style)))
                            .style(style)
                            .render(rect, buf);
                    }
                }
            }
        }

        NavBarHitZones {
            home: zones[0],
            cart: zones[1],
            profile: zones[2],
        }
    }
}
