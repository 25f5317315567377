//! Fractional star-rating line (e.g. `★★★★☆ 4.5`).

use ratatui::{
    style::Style,
    text::{Line, Span},
};

use crate::ui::theme::Theme;

const MAX_STARS: usize = 5;

/// Build a five-star rating line. The fractional part rounds to the
/// nearest half: ≥ 0.75 fills the star, ≥ 0.25 shows a half star.
pub fn stars_line(rating: f64) -> Line<'static> {
    let rating = rating.clamp(0.0, MAX_STARS as f64);
    let mut glyphs = String::new();
    for i in 0..MAX_STARS {
        let fill = (rating - i as f64).clamp(0.0, 1.0);
        glyphs.push(if fill >= 0.75 {
            '★'
        } else if fill >= 0.25 {
            '⯪'
        } else {
            '☆'
        });
    }
    Line::from(vec![
        Span::styled(glyphs, Style::default().fg(Theme::STAR_FILLED)),
        Span::styled(format!(" {rating:.1}"), Theme::meta_style()),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn glyphs(rating: f64) -> String {
        stars_line(rating).spans[0].content.to_string()
    }

    #[test]
    fn whole_and_half_stars() {
        assert_eq!(glyphs(0.0), "☆☆☆☆☆");
        assert_eq!(glyphs(3.0), "★★★☆☆");
        assert_eq!(glyphs(3.5), "★★★⯪☆");
        assert_eq!(glyphs(5.0), "★★★★★");
    }

    #[test]
    fn out_of_range_is_clamped() {
        assert_eq!(glyphs(-2.0), "☆☆☆☆☆");
        assert_eq!(glyphs(9.9), "★★★★★");
    }
}
