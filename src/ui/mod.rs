//! All rendering. `render` is the single entry point: it lays out the
//! frame, draws the active screen, and records the clickable regions the
//! mouse handler will consult.

pub mod cart;
pub mod fullscreen;
pub mod glide;
pub mod home;
pub mod image;
pub mod layout;
pub mod listing;
pub mod navbar;
pub mod profile;
pub mod seller;
pub mod spinner;
pub mod stars;
pub mod theme;

use std::time::Instant;

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    Frame,
};

use crate::app::state::{AppState, Route};
use layout::{AppLayout, HitZones};
use navbar::NavBar;
use theme::Theme;

pub fn render(frame: &mut Frame, state: &mut AppState, now: Instant) {
    let area = frame.area();
    let buf = frame.buffer_mut();
    let mut hit = HitZones::default();

    // The fullscreen viewer mounts over everything, chrome included.
    if let Some(listing) = state.listing.as_mut() {
        if listing.pager.fullscreen_open {
            if let (Some(viewer), Some(data)) = (listing.fullscreen.as_mut(), listing.data.as_ref())
            {
                fullscreen::FullscreenView {
                    images: &state.images,
                    tick: state.tick,
                }
                .render(viewer, &data.images, listing.pager.current_page, area, buf, &mut hit);
                state.hit = hit;
                return;
            }
        }
    }

    let layout = AppLayout::from_area(area, state.chrome.hidden_fraction(now));
    hit.content = Some(layout.content_area);

    render_header(state, layout.header_area, buf);

    match state.route {
        Route::Home => home::HomeView {
            screen: &state.home,
            images: &state.images,
            tick: state.tick,
        }
        .render(layout.content_area, buf, &mut hit),
        Route::Listing => {
            if let Some(listing) = state.listing.as_mut() {
                listing::ListingView {
                    images: &state.images,
                    tick: state.tick,
                }
                .render(listing, layout.content_area, buf, &mut hit);
            }
        }
        Route::Seller => {
            if let Some(seller) = state.seller.as_ref() {
                seller::SellerView {
                    screen: seller,
                    images: &state.images,
                    tick: state.tick,
                }
                .render(layout.content_area, buf);
            }
        }
        Route::Cart => cart::CartView {
            screen: &state.cart,
            logged_in: state.cookie.is_some(),
            tick: state.tick,
        }
        .render(layout.content_area, buf, &mut hit),
        Route::Profile => profile::ProfileView {
            screen: &state.profile,
            logged_in: state.cookie.is_some(),
            tick: state.tick,
        }
        .render(layout.content_area, buf),
    }

    if let Some(navbar_area) = layout.navbar_area {
        let zones = NavBar { route: state.route }.render_and_hit(navbar_area, buf);
        hit.nav_home = Some(zones.home);
        hit.nav_cart = Some(zones.cart);
        hit.nav_profile = Some(zones.profile);
    }

    state.hit = hit;
}

fn render_header(state: &AppState, area: Rect, buf: &mut ratatui::buffer::Buffer) {
    if area.height == 0 {
        return;
    }
    buf.set_style(area, Theme::header_style());
    buf.set_line(
        area.x + 1,
        area.y,
        &Line::from(Span::styled("hangszercsere.hu", Theme::header_style())),
        area.width.saturating_sub(2),
    );

    // Right side: a transient status message, or the quit hint.
    let text = match &state.status_message {
        Some(msg) => msg.clone(),
        None => format!(
            "{} — kilépés",
            state.config.short_binding(crate::config::Action::Quit)
        ),
    };
    let w = text.chars().count() as u16;
    let x = area.x + area.width.saturating_sub(w + 1);
    buf.set_line(
        x,
        area.y,
        &Line::from(Span::styled(text, Theme::meta_style())),
        w,
    );
}
