//! Input handling — maps key and mouse events onto state mutations.
//!
//! Handlers never perform I/O; network side effects are queued as
//! `NetRequest`s for the main loop to spawn.

use std::time::Instant;

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::{Position, Rect};

use crate::app::session;
use crate::app::state::{AppState, FullscreenViewer, NetRequest, Route};
use crate::config::Action;
use crate::ui::home::CARD_ROWS;

/// Hysteresis units represented by one terminal row of feed scroll. Three
/// rows of steady scrolling cross the toggle threshold.
const SCROLL_UNITS_PER_ROW: f64 = 8.0;

/// Rows moved per mouse-wheel notch.
const WHEEL_ROWS: usize = 2;

pub fn handle_key(state: &mut AppState, key: KeyEvent, now: Instant) {
    if key.kind == KeyEventKind::Release {
        return;
    }
    state.status_message = None;

    // Ctrl+C quits from anywhere, text entry included.
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        state.should_quit = true;
        return;
    }

    if fullscreen_active(state) {
        handle_fullscreen_key(state, key);
        return;
    }

    if state.route == Route::Profile && state.cookie.is_none() {
        handle_login_key(state, key, now);
        return;
    }

    let Some(action) = state.config.match_key(key) else {
        return;
    };

    match action {
        Action::Quit => state.should_quit = true,
        Action::GoHome => state.goto_home(now),
        Action::GoCart => state.goto_cart(now),
        Action::GoProfile => state.goto_profile(now),
        _ => match state.route {
            Route::Home => handle_home_action(state, action, now),
            Route::Listing => handle_listing_action(state, action, now),
            Route::Seller => handle_seller_action(state, action, now),
            Route::Cart => handle_cart_action(state, action, now),
            Route::Profile => {
                // Logged in: the form is gone, only logout remains.
                match action {
                    Action::Select => logout(state),
                    Action::Back => state.goto_home(now),
                    _ => {}
                }
            }
        },
    }
}

// ───────────────────────────────────────── per screen ────────

fn handle_home_action(state: &mut AppState, action: Action, now: Instant) {
    let count = state.home.listings.len();
    match action {
        Action::MoveUp if count > 0 => {
            state.home.selected = state.home.selected.saturating_sub(1);
            scroll_home_to_selection(state, now);
        }
        Action::MoveDown if count > 0 => {
            state.home.selected = (state.home.selected + 1).min(count - 1);
            scroll_home_to_selection(state, now);
        }
        Action::Select if count > 0 => {
            let id = state.home.listings[state.home.selected].id;
            state.open_listing(id, now);
        }
        Action::Refresh => {
            if !state.home.loading && !state.home.refreshing {
                state.home.refreshing = true;
                state.home.error = None;
                state.requests.push(NetRequest::Feed);
            }
        }
        Action::Back => {}
        _ => {}
    }
}

fn handle_listing_action(state: &mut AppState, action: Action, now: Instant) {
    let Some(listing) = state.listing.as_mut() else {
        return;
    };
    match action {
        Action::Back => state.goto_home(now),
        Action::MoveUp => {
            let rows = listing.scroll_rows.saturating_sub(1);
            set_listing_scroll(state, rows, now);
        }
        Action::MoveDown => {
            let rows = listing.scroll_rows + 1;
            set_listing_scroll(state, rows, now);
        }
        Action::PrevPage | Action::NextPage => {
            let count = listing.pager.image_count;
            if count == 0 || listing.inline_width == 0 {
                return;
            }
            // Glide toward the neighbouring page; the page index itself
            // only updates when the motion settles.
            let target = target_page(&listing.inline, listing.inline_width, count);
            let page = match action {
                Action::PrevPage => target.saturating_sub(1),
                _ => (target + 1).min(count - 1),
            };
            listing
                .inline
                .glide_to(page as f64 * listing.inline_width as f64);
        }
        Action::Select | Action::Fullscreen => {
            let page = listing.pager.current_page;
            if listing.sync.open(&mut listing.pager, page, now) {
                listing.fullscreen = Some(FullscreenViewer::new());
            }
        }
        Action::AddToCart => add_to_cart(state),
        Action::SellerProfile => {
            let link = listing
                .data
                .as_ref()
                .filter(|data| data.user_id != 0)
                .map(|data| (data.user_id, data.seller.clone()));
            if let Some((user_id, name)) = link {
                state.open_seller(user_id, name, now);
            }
        }
        Action::Refresh => {
            listing.loading = true;
            listing.error = None;
            let id = listing.id;
            state.requests.push(NetRequest::Detail { id });
        }
        _ => {}
    }
}

fn handle_seller_action(state: &mut AppState, action: Action, now: Instant) {
    match action {
        Action::Back | Action::Select => state.close_seller(now),
        Action::Refresh => {
            if let Some(seller) = state.seller.as_mut() {
                seller.loading = true;
                seller.error = None;
                let id = seller.id;
                state.requests.push(NetRequest::Seller { id });
            }
        }
        _ => {}
    }
}

fn handle_fullscreen_key(state: &mut AppState, key: KeyEvent) {
    let action = state.config.match_key(key);
    let Some(listing) = state.listing.as_mut() else {
        return;
    };
    let Some(viewer) = listing.fullscreen.as_mut() else {
        return;
    };
    match action {
        Some(Action::PrevPage) | Some(Action::NextPage) => {
            let count = listing.pager.image_count;
            if count == 0 || viewer.width == 0 {
                return;
            }
            let target = target_page(&viewer.strip, viewer.width, count);
            let page = match action {
                Some(Action::PrevPage) => target.saturating_sub(1),
                _ => (target + 1).min(count - 1),
            };
            viewer.strip.glide_to(page as f64 * viewer.width as f64);
        }
        Some(Action::Back) | Some(Action::Select) | Some(Action::Fullscreen) => {
            close_fullscreen(state);
        }
        Some(Action::Quit) => state.should_quit = true,
        _ => {}
    }
}

fn handle_cart_action(state: &mut AppState, action: Action, now: Instant) {
    let count = state.cart.items.len();
    match action {
        Action::MoveUp if count > 0 => {
            state.cart.selected = state.cart.selected.saturating_sub(1);
        }
        Action::MoveDown if count > 0 => {
            state.cart.selected = (state.cart.selected + 1).min(count - 1);
        }
        Action::Select if count > 0 => {
            let id = state.cart.items[state.cart.selected].id;
            state.open_listing(id, now);
        }
        Action::Refresh => {
            if state.cookie.is_some() {
                state.cart.loading = true;
                state.cart.error = None;
                state.requests.push(NetRequest::CartList);
            }
        }
        Action::Back => state.goto_home(now),
        _ => {}
    }
}

fn handle_login_key(state: &mut AppState, key: KeyEvent, now: Instant) {
    use crate::app::state::LoginField;

    if state.profile.submitting {
        return;
    }
    match key.code {
        KeyCode::Esc => state.goto_home(now),
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Down | KeyCode::Up => {
            state.profile.field = match state.profile.field {
                LoginField::Username => LoginField::Password,
                LoginField::Password => LoginField::Username,
            };
        }
        KeyCode::Backspace => {
            let value = active_field(state);
            value.pop();
        }
        KeyCode::Enter => {
            if state.profile.username.is_empty() || state.profile.password.is_empty() {
                state.profile.error = Some("Minden mező kötelező.".into());
                return;
            }
            state.profile.submitting = true;
            state.profile.error = None;
            state.requests.push(NetRequest::Login {
                name: state.profile.username.clone(),
                password: state.profile.password.clone(),
            });
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            active_field(state).push(c);
        }
        _ => {}
    }
}

fn active_field(state: &mut AppState) -> &mut String {
    use crate::app::state::LoginField;
    match state.profile.field {
        LoginField::Username => &mut state.profile.username,
        LoginField::Password => &mut state.profile.password,
    }
}

// ───────────────────────────────────────── mouse ─────────────

pub fn handle_mouse(state: &mut AppState, ev: MouseEvent, now: Instant) {
    let pos = Position::new(ev.column, ev.row);
    match ev.kind {
        MouseEventKind::ScrollDown => handle_wheel(state, WHEEL_ROWS as isize, now),
        MouseEventKind::ScrollUp => handle_wheel(state, -(WHEEL_ROWS as isize), now),
        MouseEventKind::Down(MouseButton::Left) => handle_click(state, pos, now),
        _ => {}
    }
}

fn handle_wheel(state: &mut AppState, delta_rows: isize, now: Instant) {
    match state.route {
        Route::Home => {
            let rows = state.home.scroll_rows as isize + delta_rows;
            set_home_scroll(state, rows.max(0) as usize, now);
        }
        Route::Listing => {
            if let Some(listing) = state.listing.as_ref() {
                if !listing.pager.fullscreen_open {
                    let rows = listing.scroll_rows as isize + delta_rows;
                    set_listing_scroll(state, rows.max(0) as usize, now);
                }
            }
        }
        _ => {}
    }
}

fn handle_click(state: &mut AppState, pos: Position, now: Instant) {
    let hit = state.hit.clone();

    if hit.fullscreen.is_some_and(|r| r.contains(pos)) {
        close_fullscreen(state);
        return;
    }
    if hit.nav_home.is_some_and(|r| r.contains(pos)) {
        state.goto_home(now);
        return;
    }
    if hit.nav_cart.is_some_and(|r| r.contains(pos)) {
        state.goto_cart(now);
        return;
    }
    if hit.nav_profile.is_some_and(|r| r.contains(pos)) {
        state.goto_profile(now);
        return;
    }
    if hit.carousel.is_some_and(|r| r.contains(pos)) {
        if let Some(listing) = state.listing.as_mut() {
            let page = listing.pager.current_page;
            if listing.sync.open(&mut listing.pager, page, now) {
                listing.fullscreen = Some(FullscreenViewer::new());
            }
        }
        return;
    }
    if hit.cart_button.is_some_and(|r| r.contains(pos)) {
        add_to_cart(state);
        return;
    }
    if hit.seller_link.is_some_and(|r| r.contains(pos)) {
        let link = state
            .listing
            .as_ref()
            .and_then(|l| l.data.as_ref())
            .filter(|data| data.user_id != 0)
            .map(|data| (data.user_id, data.seller.clone()));
        if let Some((user_id, name)) = link {
            state.open_seller(user_id, name, now);
        }
        return;
    }
    for (idx, rect) in &hit.items {
        if rect.contains(pos) {
            // Zones are from the previous frame; the list may have changed.
            match state.route {
                Route::Home => {
                    if let Some(item) = state.home.listings.get(*idx) {
                        let id = item.id;
                        state.home.selected = *idx;
                        state.open_listing(id, now);
                    }
                }
                Route::Cart => {
                    if let Some(item) = state.cart.items.get(*idx) {
                        let id = item.id;
                        state.cart.selected = *idx;
                        state.open_listing(id, now);
                    }
                }
                _ => {}
            }
            return;
        }
    }
}

// ───────────────────────────────────────── shared ────────────

fn fullscreen_active(state: &AppState) -> bool {
    state
        .listing
        .as_ref()
        .is_some_and(|l| l.pager.fullscreen_open)
}

/// The page a strip is (or will be) resting on.
fn target_page(glide: &crate::ui::glide::PageGlide, width: u16, count: usize) -> usize {
    let page = (glide.target_x() / width as f64).round().max(0.0) as usize;
    page.min(count.saturating_sub(1))
}

fn close_fullscreen(state: &mut AppState) {
    let Some(listing) = state.listing.as_mut() else {
        return;
    };
    listing.sync.close(&mut listing.pager);
    listing.fullscreen = None;
    // Keep the inline carousel on the page the viewer was left on.
    if listing.inline_width > 0 {
        listing
            .inline
            .snap_to(listing.pager.current_page as f64 * listing.inline_width as f64);
    }
}

fn add_to_cart(state: &mut AppState) {
    if state.cookie.is_none() {
        state.status_message = Some("A kosárhoz be kell jelentkezni.".into());
        return;
    }
    let Some(listing) = state.listing.as_mut() else {
        return;
    };
    if listing.in_cart || listing.adding_to_cart {
        return;
    }
    listing.adding_to_cart = true;
    let id = listing.id;
    state.requests.push(NetRequest::CartAdd { id });
}

fn logout(state: &mut AppState) {
    if let Err(err) = session::clear_cookie() {
        tracing::warn!("failed to clear session: {err:#}");
    }
    state.cookie = None;
    state.status_message = Some("Kijelentkezve.".into());
}

/// Scroll the feed so the selected card is fully visible, feeding the
/// chrome hysteresis with the resulting offset.
fn scroll_home_to_selection(state: &mut AppState, now: Instant) {
    let view_rows = content_rows(state);
    let top = state.home.selected * CARD_ROWS as usize;
    let bottom = top + CARD_ROWS as usize;

    let mut rows = state.home.scroll_rows;
    if top < rows {
        rows = top;
    } else if bottom > rows + view_rows {
        rows = bottom.saturating_sub(view_rows);
    }
    set_home_scroll(state, rows, now);
}

/// Set the listing-body scroll offset, feeding the screen's own
/// hysteresis filter.
fn set_listing_scroll(state: &mut AppState, rows: usize, now: Instant) {
    let Some(listing) = state.listing.as_mut() else {
        return;
    };
    listing.scroll_rows = rows;
    let decision = listing.signal.process(rows as f64 * SCROLL_UNITS_PER_ROW);
    state.chrome.apply(decision, now);
}

/// Set the feed scroll offset and run it through the hysteresis filter;
/// the resulting decision drives the chrome transition.
fn set_home_scroll(state: &mut AppState, rows: usize, now: Instant) {
    let max_rows = (state.home.listings.len() * CARD_ROWS as usize)
        .saturating_sub(content_rows(state));
    let rows = rows.min(max_rows);
    state.home.scroll_rows = rows;

    let decision = state.home.signal.process(rows as f64 * SCROLL_UNITS_PER_ROW);
    state.chrome.apply(decision, now);
}

fn content_rows(state: &AppState) -> usize {
    state
        .hit
        .content
        .map(|r: Rect| r.height as usize)
        .unwrap_or(22)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    fn test_state() -> AppState {
        let mut state = AppState::new(AppConfig::default(), None, Instant::now());
        state.home.splash_until = None;
        state.home.loading = false;
        state
    }

    fn feed(n: usize) -> Vec<crate::api::types::Instrument> {
        (0..n)
            .map(|i| {
                serde_json::from_value(serde_json::json!({
                    "id": i as u64 + 1,
                    "title": format!("Hangszer {i}"),
                    "price": 10_000,
                }))
                .unwrap()
            })
            .collect()
    }

    fn press(state: &mut AppState, code: KeyCode) {
        handle_key(state, KeyEvent::new(code, KeyModifiers::NONE), Instant::now());
    }

    #[test]
    fn ctrl_c_quits_even_in_login_form() {
        let mut state = test_state();
        state.goto_profile(Instant::now());
        handle_key(
            &mut state,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
            Instant::now(),
        );
        assert!(state.should_quit);
    }

    #[test]
    fn login_form_captures_text() {
        let mut state = test_state();
        state.goto_profile(Instant::now());
        press(&mut state, KeyCode::Char('q'));
        assert!(!state.should_quit);
        assert_eq!(state.profile.username, "q");

        press(&mut state, KeyCode::Tab);
        press(&mut state, KeyCode::Char('x'));
        assert_eq!(state.profile.password, "x");

        press(&mut state, KeyCode::Backspace);
        assert!(state.profile.password.is_empty());
    }

    #[test]
    fn empty_login_is_rejected_locally() {
        let mut state = test_state();
        state.goto_profile(Instant::now());
        state.requests.clear();
        press(&mut state, KeyCode::Enter);
        assert!(state.profile.error.is_some());
        assert!(state.requests.is_empty());
    }

    #[test]
    fn selecting_a_card_opens_the_listing() {
        let mut state = test_state();
        state.home.listings = feed(3);
        state.home.selected = 1;
        press(&mut state, KeyCode::Enter);
        assert_eq!(state.route, Route::Listing);
        assert_eq!(state.listing.as_ref().unwrap().id, 2);
    }

    #[test]
    fn feed_scroll_hides_then_reveals_chrome() {
        let mut state = test_state();
        state.home.listings = feed(30);

        // Scroll well past the threshold: bar hides.
        set_home_scroll(&mut state, 10, Instant::now());
        assert!(state.home.signal.is_hidden());

        // Scroll back up: bar returns.
        set_home_scroll(&mut state, 0, Instant::now());
        assert!(!state.home.signal.is_hidden());
    }

    #[test]
    fn fullscreen_opens_from_carousel_and_closes_in_place() {
        let now = Instant::now();
        let mut state = test_state();
        state.home.listings = feed(1);
        state.open_listing(1, now);
        {
            let listing = state.listing.as_mut().unwrap();
            listing.set_data(
                serde_json::from_value(serde_json::json!({
                    "id": 1,
                    "title": "Zongora",
                    "price": 1_000_000,
                    "images": ["a.jpg", "b.jpg", "c.jpg"],
                }))
                .unwrap(),
            );
            listing.inline_width = 40;
        }

        press(&mut state, KeyCode::Char('f'));
        let listing = state.listing.as_ref().unwrap();
        assert!(listing.pager.fullscreen_open);
        assert!(listing.fullscreen.is_some());

        press(&mut state, KeyCode::Esc);
        let listing = state.listing.as_ref().unwrap();
        assert!(!listing.pager.fullscreen_open);
        assert!(listing.fullscreen.is_none());
        assert_eq!(state.route, Route::Listing);
    }

    #[test]
    fn seller_link_opens_the_profile_and_back_returns() {
        let now = Instant::now();
        let mut state = test_state();
        state.open_listing(1, now);
        state
            .listing
            .as_mut()
            .unwrap()
            .set_data(
                serde_json::from_value(serde_json::json!({
                    "id": 1,
                    "title": "Hegedű",
                    "price": 80_000,
                    "seller": "joe",
                    "user_id": 7,
                }))
                .unwrap(),
            );
        state.requests.clear();

        press(&mut state, KeyCode::Char('s'));
        assert_eq!(state.route, Route::Seller);
        let seller = state.seller.as_ref().unwrap();
        assert_eq!(seller.id, 7);
        assert_eq!(seller.name, "joe");
        assert!(matches!(state.requests.as_slice(), [NetRequest::Seller { id: 7 }]));

        // Back pops the profile; the listing is still mounted underneath.
        press(&mut state, KeyCode::Esc);
        assert_eq!(state.route, Route::Listing);
        assert!(state.seller.is_none());
        assert!(state.listing.is_some());
    }

    #[test]
    fn navigating_away_drops_the_seller_profile() {
        let now = Instant::now();
        let mut state = test_state();
        state.open_listing(1, now);
        state
            .listing
            .as_mut()
            .unwrap()
            .set_data(
                serde_json::from_value(serde_json::json!({
                    "id": 1,
                    "title": "Hegedű",
                    "price": 80_000,
                    "seller": "joe",
                    "user_id": 7,
                }))
                .unwrap(),
            );
        press(&mut state, KeyCode::Char('s'));
        assert_eq!(state.route, Route::Seller);

        press(&mut state, KeyCode::Char('2'));
        assert_eq!(state.route, Route::Cart);
        assert!(state.seller.is_none());
    }

    #[test]
    fn add_to_cart_requires_session() {
        let now = Instant::now();
        let mut state = test_state();
        state.open_listing(5, now);
        state.requests.clear();
        press(&mut state, KeyCode::Char('a'));
        assert!(state.requests.is_empty());
        assert!(state.status_message.is_some());

        state.cookie = Some("session=abc".into());
        press(&mut state, KeyCode::Char('a'));
        assert!(matches!(state.requests.as_slice(), [NetRequest::CartAdd { id: 5 }]));
    }
}
