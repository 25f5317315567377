//! Home feed — a vertically scrolling strip of listing cards, plus the
//! one-shot startup splash.

use std::collections::HashMap;
use std::sync::Arc;

use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::Widget,
};

use crate::api::types::Instrument;
use crate::app::state::HomeScreen;
use crate::ui::image::render_halfblocks_at;
use crate::ui::layout::HitZones;
use crate::ui::spinner::LoadingIndicator;
use crate::ui::stars::stars_line;
use crate::ui::theme::Theme;

/// Rows per feed card, including the separator row below it.
pub const CARD_ROWS: u16 = 8;
/// Columns reserved for the card thumbnail.
const THUMB_COLS: u16 = 18;

/// Format a forint price with thousands grouping (`250 000 Ft`).
pub fn format_price(price: i64) -> String {
    let digits = price.abs().to_string();
    let mut grouped = String::new();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(ch);
    }
    let sign = if price < 0 { "-" } else { "" };
    format!("{sign}{grouped} Ft")
}

pub struct HomeView<'a> {
    pub screen: &'a HomeScreen,
    pub images: &'a HashMap<String, Arc<image::RgbaImage>>,
    pub tick: u64,
}

impl<'a> HomeView<'a> {
    /// Render the feed into `area`, recording card hit zones.
    pub fn render(self, area: Rect, buf: &mut Buffer, hit: &mut HitZones) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        if self.screen.splash_until.is_some() {
            render_splash(area, buf);
            return;
        }

        if let Some(err) = &self.screen.error {
            let line = Line::from(Span::styled(
                format!("Hiba: {err}"),
                Theme::error_style(),
            ));
            buf.set_line(area.x + 1, area.y + 1, &line, area.width.saturating_sub(2));
            let hint = Line::from(Span::styled("r — újratöltés", Theme::meta_style()));
            buf.set_line(area.x + 1, area.y + 2, &hint, area.width.saturating_sub(2));
            return;
        }

        if self.screen.loading && self.screen.listings.is_empty() {
            LoadingIndicator {
                visible: true,
                tick: self.tick,
            }
            .render(area, buf);
            return;
        }

        if self.screen.listings.is_empty() {
            let line = Line::from(Span::styled("Nincs hirdetés.", Theme::meta_style()));
            buf.set_line(area.x + 1, area.y + 1, &line, area.width.saturating_sub(2));
            return;
        }

        for (idx, item) in self.screen.listings.iter().enumerate() {
            let top = area.y as i32 + idx as i32 * CARD_ROWS as i32
                - self.screen.scroll_rows as i32;
            if top + CARD_ROWS as i32 <= area.y as i32 {
                continue;
            }
            if top >= (area.y + area.height) as i32 {
                break;
            }
            self.render_card(item, idx == self.screen.selected, top, area, buf);

            // Hit zone: the visible slice of the card.
            let vis_top = top.max(area.y as i32) as u16;
            let vis_bottom =
                ((top + CARD_ROWS as i32 - 1).min((area.y + area.height) as i32)) as u16;
            if vis_bottom > vis_top {
                hit.items
                    .push((idx, Rect::new(area.x, vis_top, area.width, vis_bottom - vis_top)));
            }
        }

        LoadingIndicator {
            visible: self.screen.refreshing,
            tick: self.tick,
        }
        .render(area, buf);
    }

    fn render_card(&self, item: &Instrument, selected: bool, top: i32, area: Rect, buf: &mut Buffer) {
        let body_rows = CARD_ROWS - 1;

        // Card background, row by row so partial cards clip cleanly.
        for row in 0..body_rows as i32 {
            let y = top + row;
            if y < area.y as i32 || y >= (area.y + area.height) as i32 {
                continue;
            }
            let stripe = Rect::new(area.x, y as u16, area.width, 1);
            buf.set_style(stripe, ratatui::style::Style::default().bg(Theme::CARD_BG));
            if selected {
                if let Some(cell) = buf.cell_mut(Position::new(area.x, y as u16)) {
                    cell.set_char('▐').set_style(Theme::selected_card_style());
                }
            }
        }

        let thumb_w = THUMB_COLS.min(area.width.saturating_sub(2));
        if let Some(thumb) = item.images.first().and_then(|id| self.images.get(id)) {
            render_halfblocks_at(thumb, (area.x + 1) as i32, top, thumb_w, body_rows, area, buf);
        }

        let text_x = area.x + thumb_w + 3;
        let text_w = (area.x + area.width).saturating_sub(text_x + 1);
        if text_w == 0 {
            return;
        }
        let mut put = |row: i32, line: Line| {
            let y = top + row;
            if y >= area.y as i32 && y < (area.y + area.height) as i32 {
                buf.set_line(text_x, y as u16, &line, text_w);
            }
        };

        let title_style = if selected {
            Theme::title_style().add_modifier(Modifier::UNDERLINED)
        } else {
            Theme::title_style()
        };
        put(1, Line::from(Span::styled(item.title.clone(), title_style)));
        put(
            2,
            Line::from(Span::styled(
                format!("{} · {}", item.brand, item.category),
                Theme::meta_style(),
            )),
        );
        put(3, stars_line(item.ai_rating));
        put(
            5,
            Line::from(Span::styled(format_price(item.price), Theme::price_style())),
        );
    }
}

/// First-visit splash: wordmark centred on the accent background.
fn render_splash(area: Rect, buf: &mut Buffer) {
    buf.set_style(area, ratatui::style::Style::default().bg(Theme::ACCENT));
    let word = "hangszercsere.hu";
    let sub = "hangszerek gazdát cserélnek";
    let cx = |s: &str| area.x + area.width.saturating_sub(s.chars().count() as u16) / 2;
    let mid = area.y + area.height / 2;
    if area.height >= 2 {
        buf.set_line(
            cx(word),
            mid.saturating_sub(1),
            &Line::from(Span::styled(
                word,
                ratatui::style::Style::default()
                    .fg(ratatui::style::Color::White)
                    .add_modifier(Modifier::BOLD),
            )),
            area.width,
        );
        buf.set_line(
            cx(sub),
            mid + 1,
            &Line::from(Span::styled(
                sub,
                ratatui::style::Style::default().fg(ratatui::style::Color::White),
            )),
            area.width,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_grouping() {
        assert_eq!(format_price(0), "0 Ft");
        assert_eq!(format_price(900), "900 Ft");
        assert_eq!(format_price(90000), "90 000 Ft");
        assert_eq!(format_price(1250000), "1 250 000 Ft");
        assert_eq!(format_price(-4500), "-4 500 Ft");
    }
}
