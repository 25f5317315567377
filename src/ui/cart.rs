//! Cart screen — the user's collected listings and a running total.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::Widget,
};

use crate::app::state::CartScreen;
use crate::ui::home::format_price;
use crate::ui::layout::HitZones;
use crate::ui::spinner::LoadingIndicator;
use crate::ui::theme::Theme;

pub struct CartView<'a> {
    pub screen: &'a CartScreen,
    pub logged_in: bool,
    pub tick: u64,
}

impl<'a> CartView<'a> {
    pub fn render(self, area: Rect, buf: &mut Buffer, hit: &mut HitZones) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        if !self.logged_in {
            let line = Line::from(Span::styled(
                "A kosárhoz be kell jelentkezni.",
                Theme::meta_style(),
            ));
            buf.set_line(area.x + 1, area.y + 1, &line, area.width.saturating_sub(2));
            return;
        }

        if let Some(err) = &self.screen.error {
            let line = Line::from(Span::styled(format!("Hiba: {err}"), Theme::error_style()));
            buf.set_line(area.x + 1, area.y + 1, &line, area.width.saturating_sub(2));
            return;
        }

        if self.screen.loading && self.screen.items.is_empty() {
            LoadingIndicator {
                visible: true,
                tick: self.tick,
            }
            .render(area, buf);
            return;
        }

        if self.screen.items.is_empty() {
            let line = Line::from(Span::styled("A kosár üres.", Theme::meta_style()));
            buf.set_line(area.x + 1, area.y + 1, &line, area.width.saturating_sub(2));
            return;
        }

        let mut y = area.y;
        for (idx, item) in self.screen.items.iter().enumerate() {
            if y >= area.bottom().saturating_sub(1) {
                break;
            }
            let selected = idx == self.screen.selected;
            let marker = if selected { "▐ " } else { "  " };
            let price = format_price(item.price);
            let title_w = (area.width as usize)
                .saturating_sub(marker.chars().count() + price.chars().count() + 3);
            let title: String = item.title.chars().take(title_w).collect();
            let pad = title_w.saturating_sub(title.chars().count());

            let line = Line::from(vec![
                Span::styled(marker, Theme::selected_card_style()),
                Span::styled(
                    title,
                    if selected {
                        Theme::selected_card_style()
                    } else {
                        Theme::title_style()
                    },
                ),
                Span::raw(" ".repeat(pad + 1)),
                Span::styled(price, Theme::price_style()),
            ]);
            buf.set_line(area.x, y, &line, area.width);
            hit.items.push((idx, Rect::new(area.x, y, area.width, 1)));
            y += 1;
        }

        // Running total pinned to the last row.
        let total: i64 = self.screen.items.iter().map(|i| i.price).sum();
        let label = format!("Összesen: {}", format_price(total));
        let x = area.x + area.width.saturating_sub(label.chars().count() as u16 + 1);
        buf.set_line(
            x,
            area.bottom() - 1,
            &Line::from(Span::styled(label, Theme::price_style())),
            area.width,
        );
    }
}
