//! Seller profile screen — the public profile card behind the seller
//! link on a listing.

use std::collections::HashMap;
use std::sync::Arc;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::Widget,
};

use crate::app::state::SellerScreen;
use crate::ui::image::render_halfblocks;
use crate::ui::listing::wrap_text;
use crate::ui::spinner::LoadingIndicator;
use crate::ui::theme::Theme;

/// Rows reserved for the avatar above the card text.
const AVATAR_ROWS: u16 = 8;

pub struct SellerView<'a> {
    pub screen: &'a SellerScreen,
    pub images: &'a HashMap<String, Arc<image::RgbaImage>>,
    pub tick: u64,
}

impl<'a> SellerView<'a> {
    pub fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 10 || area.height < 4 {
            return;
        }

        if let Some(err) = &self.screen.error {
            let line = Line::from(Span::styled(format!("Hiba: {err}"), Theme::error_style()));
            buf.set_line(area.x + 2, area.y + 1, &line, area.width.saturating_sub(4));
            return;
        }

        let Some(profile) = self.screen.data.as_ref() else {
            // Show the name we already know while the profile loads.
            let line = Line::from(Span::styled(self.screen.name.clone(), Theme::title_style()));
            buf.set_line(area.x + 2, area.y + 1, &line, area.width.saturating_sub(4));
            LoadingIndicator {
                visible: self.screen.loading,
                tick: self.tick,
            }
            .render(area, buf);
            return;
        };

        let mut y = area.y + 1;
        if !profile.profile_url.is_empty() && area.height > AVATAR_ROWS + 4 {
            let avatar = Rect::new(area.x, y, area.width, AVATAR_ROWS);
            match self.images.get(&profile.profile_url) {
                Some(thumb) => render_halfblocks(thumb, avatar, avatar, buf),
                None => {
                    let glyph = LoadingIndicator::frame(self.tick).to_string();
                    let x = avatar.x + avatar.width / 2;
                    buf.set_line(
                        x,
                        avatar.y + avatar.height / 2,
                        &Line::from(Span::styled(glyph, Theme::meta_style())),
                        1,
                    );
                }
            }
            y = avatar.bottom() + 1;
        }

        let text_w = area.width.saturating_sub(4) as usize;
        let mut lines: Vec<Line> = Vec::new();
        lines.push(Line::from(Span::styled(
            profile.name.clone(),
            Theme::title_style(),
        )));
        if let Some(bio) = profile.bio.as_deref().filter(|b| !b.is_empty()) {
            lines.push(Line::default());
            for wrapped in wrap_text(bio, text_w) {
                lines.push(Line::from(Span::styled(wrapped, Theme::meta_style())));
            }
        }
        if !profile.location.is_empty() {
            lines.push(Line::default());
            lines.push(Line::from(Span::styled(
                profile.location.clone(),
                Theme::meta_style(),
            )));
        }
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            format!(
                "Hirdetések: {} · Értékelések: {}",
                profile.total_listings, profile.rating_count
            ),
            Theme::meta_style(),
        )));
        if let Some(date) = join_date(&profile.join_date) {
            lines.push(Line::from(Span::styled(
                format!("Csatlakozás: {date}"),
                Theme::meta_style(),
            )));
        }

        for line in &lines {
            if y >= area.bottom() {
                break;
            }
            buf.set_line(area.x + 2, y, line, area.width.saturating_sub(4));
            y += 1;
        }
    }
}

/// Date part of an ISO-8601 join timestamp.
fn join_date(timestamp: &str) -> Option<&str> {
    let date = timestamp.split('T').next()?;
    (!date.is_empty()).then_some(date)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_date_strips_the_time_part() {
        assert_eq!(join_date("2023-05-01T10:00:00Z"), Some("2023-05-01"));
        assert_eq!(join_date("2023-05-01"), Some("2023-05-01"));
        assert_eq!(join_date(""), None);
    }
}
