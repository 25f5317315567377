//! Fullscreen image viewer — a black, whole-terminal paged strip that
//! mounts over everything else (header and navigation bar included).

use std::collections::HashMap;
use std::sync::Arc;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Clear, Widget},
};

use crate::app::state::FullscreenViewer;
use crate::ui::image::render_halfblocks_at;
use crate::ui::layout::HitZones;
use crate::ui::spinner::LoadingIndicator;
use crate::ui::theme::Theme;

pub struct FullscreenView<'a> {
    pub images: &'a HashMap<String, Arc<image::RgbaImage>>,
    pub tick: u64,
}

impl<'a> FullscreenView<'a> {
    /// Render the viewer over the whole terminal. Marks the viewer as laid
    /// out — its first render is the readiness signal the deferred
    /// positioning waits for.
    pub fn render(
        self,
        viewer: &mut FullscreenViewer,
        ids: &[String],
        current_page: usize,
        area: Rect,
        buf: &mut Buffer,
        hit: &mut HitZones,
    ) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        Clear.render(area, buf);
        buf.set_style(
            area,
            ratatui::style::Style::default().bg(ratatui::style::Color::Black),
        );

        viewer.width = area.width;
        viewer.laid_out = true;
        hit.fullscreen = Some(area);

        let strip_rows = area.height.saturating_sub(1);
        let strip = Rect::new(area.x, area.y, area.width, strip_rows);
        let offset = viewer.strip.offset_x();
        let width = area.width as i32;

        for (i, id) in ids.iter().enumerate() {
            let slide_x = area.x as i32 + i as i32 * width - offset.round() as i32;
            if slide_x + width <= area.x as i32 || slide_x >= area.x as i32 + width {
                continue;
            }
            match self.images.get(id) {
                Some(thumb) => render_halfblocks_at(
                    thumb,
                    slide_x,
                    strip.y as i32,
                    strip.width,
                    strip.height,
                    strip,
                    buf,
                ),
                None => {
                    let glyph = LoadingIndicator::frame(self.tick);
                    let x = slide_x + width / 2;
                    if x >= area.x as i32 && x < (area.x + area.width) as i32 {
                        buf.set_line(
                            x as u16,
                            area.y + strip_rows / 2,
                            &Line::from(Span::styled(glyph.to_string(), Theme::meta_style())),
                            1,
                        );
                    }
                }
            }
        }

        // Page indicator in the bottom row, e.g. "2 / 5".
        if !ids.is_empty() && strip_rows < area.height {
            let label = format!("{} / {}", current_page + 1, ids.len());
            let x = area.x + area.width.saturating_sub(label.chars().count() as u16) / 2;
            buf.set_line(
                x,
                area.y + area.height - 1,
                &Line::from(Span::styled(label, Theme::meta_style())),
                area.width,
            );
        }
    }
}
