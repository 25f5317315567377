//! Half-block image rendering shared by the feed, carousel and fullscreen
//! viewer.

use ratatui::{buffer::Buffer, layout::Rect, style::Color};

/// Longest edge of a cached thumbnail, in pixels. Decoded uploads are
/// pre-resized to this bound off the UI task so render-time resizes stay
/// cheap.
pub const THUMB_MAX_EDGE: u32 = 512;

/// Downscale a freshly decoded upload for the cache.
pub fn make_thumbnail(img: image::DynamicImage) -> image::RgbaImage {
    let (w, h) = (img.width(), img.height());
    if w.max(h) <= THUMB_MAX_EDGE {
        return img.to_rgba8();
    }
    img.resize(
        THUMB_MAX_EDGE,
        THUMB_MAX_EDGE,
        image::imageops::FilterType::Triangle,
    )
    .to_rgba8()
}

/// Render a pre-resized `RgbaImage` using Unicode `▀` half-blocks (2 pixels
/// per cell), fitted inside `dest` and centred, clipped to `clip`.
pub fn render_halfblocks(thumb: &image::RgbaImage, dest: Rect, clip: Rect, buf: &mut Buffer) {
    render_halfblocks_at(
        thumb,
        dest.x as i32,
        dest.y as i32,
        dest.width,
        dest.height,
        clip,
        buf,
    );
}

/// Like [`render_halfblocks`] but with a signed origin, so a paged strip
/// can draw a slide partly scrolled past the left edge of its viewport and
/// a feed can draw a card partly scrolled above it.
///
/// Terminal cells are ~2× taller than wide, so each cell represents 1 pixel
/// wide × 2 pixels tall; the fit calculation accounts for this.
pub fn render_halfblocks_at(
    thumb: &image::RgbaImage,
    origin_x: i32,
    origin_y: i32,
    slot_w: u16,
    slot_h: u16,
    clip: Rect,
    buf: &mut Buffer,
) {
    use image::imageops::FilterType;
    use ratatui::layout::Position;

    if slot_w == 0 || slot_h == 0 || thumb.width() == 0 || thumb.height() == 0 {
        return;
    }

    // Available pixel budget: each column = 1 px wide, each row = 2 px tall.
    let max_px_w = slot_w as f64;
    let max_px_h = (slot_h as f64) * 2.0;

    let src_w = thumb.width() as f64;
    let src_h = thumb.height() as f64;

    // Scale to fit within the pixel budget, preserving aspect ratio.
    let scale = (max_px_w / src_w).min(max_px_h / src_h).min(1.0);
    let fit_w = (src_w * scale).round().max(1.0) as u32;
    let fit_h = (src_h * scale).round().max(1.0) as u32;

    let rgba = image::imageops::resize(thumb, fit_w, fit_h, FilterType::Triangle);
    let (iw, ih) = (rgba.width(), rgba.height());

    // Centre within the slot.
    let col_offset = (slot_w.saturating_sub(iw as u16) / 2) as i32;
    let row_offset = (slot_h.saturating_sub(ih.div_ceil(2) as u16) / 2) as i32;

    let clip_x0 = clip.x as i32;
    let clip_x1 = clip_x0 + clip.width as i32;
    let clip_y0 = clip.y as i32;
    let clip_y1 = clip_y0 + clip.height as i32;

    for row in 0..ih.div_ceil(2).min(slot_h as u32) {
        let yt = row * 2;
        let yb = yt + 1;
        let y = origin_y + row_offset + row as i32;
        if y < clip_y0 || y >= clip_y1 {
            continue;
        }
        for col in 0..iw.min(slot_w as u32) {
            let x = origin_x + col_offset + col as i32;
            if x < clip_x0 || x >= clip_x1 {
                continue;
            }
            let t = rgba.get_pixel(col, yt);
            let fg = Color::Rgb(t[0], t[1], t[2]);
            let bg = if yb < ih {
                let b = rgba.get_pixel(col, yb);
                Color::Rgb(b[0], b[1], b[2])
            } else {
                Color::Reset
            };
            if let Some(cell) = buf.cell_mut(Position::new(x as u16, y as u16)) {
                cell.set_char('▀').set_fg(fg).set_bg(bg);
            }
        }
    }
}
