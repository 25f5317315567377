//! Listing detail screen — inline image carousel with a page-dot
//! indicator, the listing body, and the add-to-cart button.

use std::collections::HashMap;
use std::sync::Arc;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::Widget,
};

use crate::app::state::ListingScreen;
use crate::ui::home::format_price;
use crate::ui::image::render_halfblocks_at;
use crate::ui::layout::HitZones;
use crate::ui::spinner::LoadingIndicator;
use crate::ui::stars::stars_line;
use crate::ui::theme::Theme;

/// Rows given to the inline carousel (plus one row of dots below it).
const CAROUSEL_ROWS: u16 = 12;

/// Greedy word wrap for the description body.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let mut out = Vec::new();
    if width == 0 {
        return out;
    }
    for paragraph in text.split('\n') {
        let mut line = String::new();
        for word in paragraph.split_whitespace() {
            let needed = if line.is_empty() {
                word.chars().count()
            } else {
                line.chars().count() + 1 + word.chars().count()
            };
            if needed > width && !line.is_empty() {
                out.push(std::mem::take(&mut line));
            }
            if !line.is_empty() {
                line.push(' ');
            }
            line.push_str(word);
        }
        out.push(line);
    }
    out
}

pub struct ListingView<'a> {
    pub images: &'a HashMap<String, Arc<image::RgbaImage>>,
    pub tick: u64,
}

impl<'a> ListingView<'a> {
    /// Render the screen into `area`. Records the carousel viewport width
    /// on the screen so offset-to-page mapping uses the laid-out width.
    pub fn render(
        self,
        screen: &mut ListingScreen,
        area: Rect,
        buf: &mut Buffer,
        hit: &mut HitZones,
    ) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        if let Some(err) = &screen.error {
            let line = Line::from(Span::styled(format!("Hiba: {err}"), Theme::error_style()));
            buf.set_line(area.x + 1, area.y + 1, &line, area.width.saturating_sub(2));
            return;
        }
        if screen.loading || screen.data.is_none() {
            LoadingIndicator {
                visible: true,
                tick: self.tick,
            }
            .render(area, buf);
            return;
        }

        let carousel_rows = CAROUSEL_ROWS.min(area.height / 2);
        let carousel = Rect::new(area.x, area.y, area.width, carousel_rows);
        screen.inline_width = carousel.width;
        hit.carousel = Some(carousel);

        let Some(data) = screen.data.clone() else {
            return;
        };

        self.render_strip(screen, &data.images, carousel, buf);

        let mut y = carousel.bottom();
        if carousel_rows > 0 && y < area.bottom() {
            render_dots(
                screen.pager.current_page,
                screen.pager.image_count,
                Rect::new(area.x, y, area.width, 1),
                buf,
            );
            y += 1;
        }

        // ── body ────────────────────────────────────────────────
        let body = Rect::new(area.x, y, area.width, area.bottom().saturating_sub(y));
        let text_w = body.width.saturating_sub(4) as usize;

        let mut lines: Vec<Line> = Vec::new();
        lines.push(Line::from(Span::styled(data.title.clone(), Theme::title_style())));
        lines.push(Line::from(Span::styled(
            format!(
                "{} {} · {} · {}",
                data.brand, data.model, data.category, data.condition
            ),
            Theme::meta_style(),
        )));
        lines.push(stars_line(data.ai_rating));
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            format_price(data.price),
            Theme::price_style(),
        )));
        lines.push(Line::default());

        let button_line = lines.len();
        lines.push(cart_button_line(screen, self.tick));
        lines.push(Line::default());

        let seller_line = (!data.seller.is_empty()).then(|| lines.len());
        if !data.seller.is_empty() {
            lines.push(Line::from(vec![
                Span::styled("Eladó: ", Theme::meta_style()),
                Span::styled(data.seller.clone(), Theme::link_style()),
            ]));
            lines.push(Line::default());
        }
        for wrapped in wrap_text(&data.description, text_w) {
            lines.push(Line::from(Span::styled(wrapped, Theme::meta_style())));
        }

        let skip = screen.scroll_rows.min(lines.len().saturating_sub(1));
        for (row, line) in lines.iter().skip(skip).enumerate() {
            let ly = body.y + row as u16;
            if ly >= body.bottom() {
                break;
            }
            buf.set_line(body.x + 2, ly, line, body.width.saturating_sub(4));
            if button_line == row + skip {
                let w = line.width() as u16;
                hit.cart_button = Some(Rect::new(body.x + 2, ly, w.min(body.width), 1));
            }
            if seller_line == Some(row + skip) {
                let w = line.width() as u16;
                hit.seller_link = Some(Rect::new(body.x + 2, ly, w.min(body.width), 1));
            }
        }
    }

    /// Paged image strip: every slide is one viewport wide; the glide
    /// offset shifts the whole strip, clipped to the carousel rect.
    fn render_strip(
        &self,
        screen: &ListingScreen,
        ids: &[String],
        carousel: Rect,
        buf: &mut Buffer,
    ) {
        buf.set_style(carousel, ratatui::style::Style::default().bg(Theme::NAVBAR_BG));
        if ids.is_empty() {
            let msg = "nincs kép";
            let x = carousel.x + carousel.width.saturating_sub(msg.chars().count() as u16) / 2;
            buf.set_line(
                x,
                carousel.y + carousel.height / 2,
                &Line::from(Span::styled(msg, Theme::meta_style())),
                carousel.width,
            );
            return;
        }

        let offset = screen.inline.offset_x();
        let width = carousel.width as i32;
        for (i, id) in ids.iter().enumerate() {
            let slide_x = carousel.x as i32 + i as i32 * width - offset.round() as i32;
            if slide_x + width <= carousel.x as i32
                || slide_x >= carousel.x as i32 + width
            {
                continue;
            }
            match self.images.get(id) {
                Some(thumb) => render_halfblocks_at(
                    thumb,
                    slide_x,
                    carousel.y as i32,
                    carousel.width,
                    carousel.height,
                    carousel,
                    buf,
                ),
                None => {
                    let glyph = LoadingIndicator::frame(self.tick);
                    let x = slide_x + width / 2;
                    if x >= carousel.x as i32 && x < (carousel.x + carousel.width) as i32 {
                        buf.set_line(
                            x as u16,
                            carousel.y + carousel.height / 2,
                            &Line::from(Span::styled(glyph.to_string(), Theme::meta_style())),
                            1,
                        );
                    }
                }
            }
        }
    }
}

fn cart_button_line(screen: &ListingScreen, tick: u64) -> Line<'static> {
    if screen.in_cart {
        Line::from(Span::styled(
            "  A kosárban ✓  ".to_string(),
            Theme::button_done_style(),
        ))
    } else if screen.cart_loading {
        Line::from(Span::styled(
            format!("  {}  ", LoadingIndicator::frame(tick)),
            Theme::meta_style(),
        ))
    } else if screen.adding_to_cart {
        Line::from(Span::styled(
            format!("  {} Kosárba…  ", LoadingIndicator::frame(tick)),
            Theme::button_style(),
        ))
    } else {
        Line::from(Span::styled("  Kosárba  ".to_string(), Theme::button_style()))
    }
}

/// The page-dot indicator under the carousel. Filled dot = current page.
pub fn render_dots(current: usize, count: usize, area: Rect, buf: &mut Buffer) {
    if count < 2 || area.width == 0 {
        return;
    }
    let mut spans = Vec::with_capacity(count * 2);
    for i in 0..count {
        if i > 0 {
            spans.push(Span::raw(" "));
        }
        if i == current {
            spans.push(Span::styled("●", ratatui::style::Style::default().fg(Theme::ACCENT)));
        } else {
            spans.push(Span::styled("○", Theme::meta_style()));
        }
    }
    let line = Line::from(spans);
    let w = line.width() as u16;
    let x = area.x + area.width.saturating_sub(w) / 2;
    buf.set_line(x, area.y, &line, area.width);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_at_word_boundaries() {
        let lines = wrap_text("régi de nagyon jól karbantartott hangszer", 14);
        assert!(lines.iter().all(|l| l.chars().count() <= 14));
        assert_eq!(lines.join(" "), "régi de nagyon jól karbantartott hangszer");
    }

    #[test]
    fn overlong_word_gets_its_own_line() {
        let lines = wrap_text("a összehasonlíthatatlanul b", 10);
        assert!(lines.contains(&"összehasonlíthatatlanul".to_string()));
    }

    #[test]
    fn preserves_paragraph_breaks() {
        let lines = wrap_text("első\nmásodik", 40);
        assert_eq!(lines, vec!["első".to_string(), "második".to_string()]);
    }
}
