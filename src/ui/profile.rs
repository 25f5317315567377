//! Profile screen — a login form until a session exists, then the
//! logged-in panel.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::Widget,
};

use crate::app::state::{LoginField, ProfileScreen};
use crate::ui::spinner::LoadingIndicator;
use crate::ui::theme::Theme;

pub struct ProfileView<'a> {
    pub screen: &'a ProfileScreen,
    pub logged_in: bool,
    pub tick: u64,
}

impl<'a> ProfileView<'a> {
    pub fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 10 || area.height < 6 {
            return;
        }

        if self.logged_in {
            let lines = [
                Line::from(Span::styled("Bejelentkezve.", Theme::title_style())),
                Line::default(),
                Line::from(Span::styled("Enter — kijelentkezés", Theme::meta_style())),
            ];
            for (i, line) in lines.iter().enumerate() {
                buf.set_line(area.x + 2, area.y + 1 + i as u16, line, area.width - 4);
            }
            return;
        }

        let field_w = (area.width - 4).min(36);
        let mut y = area.y + 1;
        let mut put = |buf: &mut Buffer, line: &Line, y: u16| {
            buf.set_line(area.x + 2, y, line, area.width - 4);
        };

        put(
            buf,
            &Line::from(Span::styled("Bejelentkezés", Theme::title_style())),
            y,
        );
        y += 2;

        put(
            buf,
            &field_line(
                "Felhasználónév",
                &self.screen.username,
                self.screen.field == LoginField::Username,
                field_w,
                false,
            ),
            y,
        );
        y += 2;

        put(
            buf,
            &field_line(
                "Jelszó",
                &self.screen.password,
                self.screen.field == LoginField::Password,
                field_w,
                true,
            ),
            y,
        );
        y += 2;

        if let Some(err) = &self.screen.error {
            put(buf, &Line::from(Span::styled(err.clone(), Theme::error_style())), y);
            y += 2;
        }

        put(
            buf,
            &Line::from(Span::styled(
                "Tab — mező váltás · Enter — belépés",
                Theme::meta_style(),
            )),
            y,
        );

        LoadingIndicator {
            visible: self.screen.submitting,
            tick: self.tick,
        }
        .render(area, buf);
    }
}

/// One labelled input. The focused field shows a trailing cursor block.
fn field_line(label: &str, value: &str, focused: bool, width: u16, masked: bool) -> Line<'static> {
    let shown: String = if masked {
        "•".repeat(value.chars().count())
    } else {
        value.to_string()
    };
    // Keep the tail visible when the value outgrows the field.
    let budget = (width as usize).saturating_sub(label.chars().count() + 3);
    let tail: String = shown
        .chars()
        .skip(shown.chars().count().saturating_sub(budget))
        .collect();

    let mut spans = vec![
        Span::styled(format!("{label}: "), Theme::meta_style()),
        Span::styled(
            tail,
            if focused {
                Theme::title_style()
            } else {
                Theme::meta_style()
            },
        ),
    ];
    if focused {
        spans.push(Span::styled("█", Theme::selected_card_style()));
    }
    Line::from(spans)
}
