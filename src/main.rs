//! Terminal client for the hangszercsere.hu instrument marketplace.

mod api;
mod app;
mod config;
mod core;
mod ui;

use std::io;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;

use api::client::ApiClient;
use app::event::{spawn_event_reader, AppEvent};
use app::net_runtime::{
    spawn_cart_add, spawn_cart_fetch, spawn_cart_status, spawn_detail_fetch, spawn_feed_fetch,
    spawn_image_fetch, spawn_login, spawn_seller_fetch, NetUpdate,
};
use app::state::{AppState, NetRequest};
use app::{handler, session};
use config::AppConfig;
use crate::core::pager::settle_page;

/// Animation frame interval — the chrome slide, carousel glide and spinner
/// all advance on this tick.
const TICK_RATE: Duration = Duration::from_millis(33);

#[derive(Parser)]
#[command(name = "hangszer", about = "Terminal client for the hangszercsere.hu marketplace")]
struct Cli {
    /// Marketplace server base URL.
    #[arg(long)]
    server: Option<String>,

    /// Request timeout in seconds.
    #[arg(long)]
    timeout: Option<u64>,

    /// Use canned data instead of the network.
    #[arg(long)]
    offline: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let mut cfg = AppConfig::load();
    if let Some(server) = cli.server {
        cfg.server_url = server.trim_end_matches('/').to_string();
    }
    if let Some(timeout) = cli.timeout {
        cfg.timeout_secs = timeout.clamp(1, 120);
    }

    let api = ApiClient::new(
        &cfg.server_url,
        Duration::from_secs(cfg.timeout_secs),
        cli.offline,
    )?;
    let cookie = session::load_cookie();
    let state = AppState::new(cfg, cookie, Instant::now());

    // Restore the terminal even on panic, so a crash doesn't leave the
    // shell in raw mode.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal();
        default_hook(info);
    }));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let result = run_app(&mut terminal, state, api).await;

    restore_terminal()?;
    result
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture)?;
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mut state: AppState,
    api: ApiClient,
) -> Result<()> {
    let mut events = spawn_event_reader(TICK_RATE);
    let (net_tx, mut net_rx) = mpsc::unbounded_channel::<NetUpdate>();

    loop {
        terminal.draw(|frame| ui::render(frame, &mut state, Instant::now()))?;

        dispatch_requests(&mut state, &api, &net_tx);

        tokio::select! {
            event = events.recv() => {
                let Some(event) = event else { break };
                let now = Instant::now();
                match event {
                    AppEvent::Key(key) => handler::handle_key(&mut state, key, now),
                    AppEvent::Mouse(mouse) => handler::handle_mouse(&mut state, mouse, now),
                    AppEvent::Resize(..) => {}
                    AppEvent::Tick => on_tick(&mut state, now),
                }
            }
            update = net_rx.recv() => {
                let Some(update) = update else { break };
                apply_net_update(&mut state, update);
                // Apply everything already queued before redrawing.
                while let Ok(update) = net_rx.try_recv() {
                    apply_net_update(&mut state, update);
                }
            }
        }

        if state.should_quit {
            break;
        }
    }

    Ok(())
}

/// Spawn the network jobs the handlers queued.
fn dispatch_requests(
    state: &mut AppState,
    api: &ApiClient,
    net_tx: &mpsc::UnboundedSender<NetUpdate>,
) {
    for request in state.requests.drain(..) {
        match request {
            NetRequest::Feed => {
                state.feed_generation += 1;
                spawn_feed_fetch(net_tx.clone(), api.clone(), state.feed_generation);
            }
            NetRequest::Detail { id } => spawn_detail_fetch(net_tx.clone(), api.clone(), id),
            NetRequest::Seller { id } => spawn_seller_fetch(net_tx.clone(), api.clone(), id),
            NetRequest::CartList => {
                if let Some(cookie) = state.cookie.clone() {
                    spawn_cart_fetch(net_tx.clone(), api.clone(), cookie);
                }
            }
            NetRequest::CartStatus { id } => {
                if let Some(cookie) = state.cookie.clone() {
                    spawn_cart_status(net_tx.clone(), api.clone(), cookie, id);
                }
            }
            NetRequest::CartAdd { id } => {
                if let Some(cookie) = state.cookie.clone() {
                    spawn_cart_add(net_tx.clone(), api.clone(), cookie, id);
                }
            }
            NetRequest::Login { name, password } => {
                spawn_login(net_tx.clone(), api.clone(), name, password);
            }
            NetRequest::Image { id } => spawn_image_fetch(net_tx.clone(), api.clone(), id),
        }
    }
}

/// Advance the animations one frame.
fn on_tick(state: &mut AppState, now: Instant) {
    state.tick = state.tick.wrapping_add(1);

    // Splash over: kick off the first feed load.
    if state.home.splash_until.is_some_and(|until| now >= until) {
        state.home.splash_until = None;
        state.home.loading = true;
        state.requests.push(NetRequest::Feed);
    }

    let Some(listing) = state.listing.as_mut() else {
        return;
    };

    // Inline carousel: the page index only changes when a glide settles.
    if listing.inline.tick() {
        if let Some(page) = settle_page(
            listing.inline.offset_x(),
            listing.inline_width as f64,
            listing.pager.image_count,
        ) {
            listing.sync.page_settled(&mut listing.pager, page);
        }
    }

    if let Some(viewer) = listing.fullscreen.as_mut() {
        // Deferred positioning: prefer the explicit first-layout signal,
        // fall back to the mount deadline.
        let snap = if viewer.laid_out {
            listing.sync.viewer_ready(&listing.pager)
        } else {
            listing.sync.poll(&listing.pager, now)
        };
        if let Some(page) = snap {
            viewer.strip.snap_to(page as f64 * viewer.width as f64);
        }

        if viewer.strip.tick() {
            if let Some(page) = settle_page(
                viewer.strip.offset_x(),
                viewer.width as f64,
                listing.pager.image_count,
            ) {
                listing.sync.page_settled(&mut listing.pager, page);
            }
        }
    }
}

/// Fold one background-job result into the state.
fn apply_net_update(state: &mut AppState, update: NetUpdate) {
    match update {
        NetUpdate::Feed { generation, result } => {
            if generation != state.feed_generation {
                tracing::debug!(generation, "dropping stale feed response");
                return;
            }
            state.home.loading = false;
            state.home.refreshing = false;
            match result {
                Ok(items) => {
                    let ids: Vec<String> = items
                        .iter()
                        .filter_map(|item| item.images.first().cloned())
                        .collect();
                    state.home.listings = items;
                    state.home.error = None;
                    state.home.selected = state
                        .home
                        .selected
                        .min(state.home.listings.len().saturating_sub(1));
                    for id in ids {
                        state.request_image(&id);
                    }
                }
                Err(err) => state.home.error = Some(err.to_string()),
            }
        }
        NetUpdate::Detail { id, result } => {
            let logged_in = state.cookie.is_some();
            let Some(listing) = state.listing.as_mut().filter(|l| l.id == id) else {
                return;
            };
            match result {
                Ok(data) => {
                    let ids = data.images.clone();
                    listing.set_data(data);
                    if logged_in {
                        listing.cart_loading = true;
                        state.requests.push(NetRequest::CartStatus { id });
                    }
                    for image_id in ids {
                        state.request_image(&image_id);
                    }
                }
                Err(err) => {
                    listing.loading = false;
                    listing.error = Some(err.to_string());
                }
            }
        }
        NetUpdate::Seller { id, result } => {
            let Some(seller) = state.seller.as_mut().filter(|s| s.id == id) else {
                return;
            };
            seller.loading = false;
            match result {
                Ok(profile) => {
                    let avatar = profile.profile_url.clone();
                    seller.data = Some(profile);
                    seller.error = None;
                    state.request_image(&avatar);
                }
                Err(err) => seller.error = Some(err.to_string()),
            }
        }
        NetUpdate::Cart { result } => {
            state.cart.loading = false;
            match result {
                Ok(items) => {
                    let ids: Vec<String> = items
                        .iter()
                        .filter_map(|item| item.images.first().cloned())
                        .collect();
                    state.cart.items = items;
                    state.cart.error = None;
                    state.cart.selected = state
                        .cart
                        .selected
                        .min(state.cart.items.len().saturating_sub(1));
                    for id in ids {
                        state.request_image(&id);
                    }
                }
                Err(err) => state.cart.error = Some(err.to_string()),
            }
        }
        NetUpdate::CartStatus { id, in_cart } => {
            if let Some(listing) = state.listing.as_mut().filter(|l| l.id == id) {
                listing.cart_loading = false;
                listing.in_cart = in_cart;
            }
        }
        NetUpdate::CartAdded { id, result } => {
            if let Some(listing) = state.listing.as_mut().filter(|l| l.id == id) {
                listing.adding_to_cart = false;
                match result {
                    Ok(()) => {
                        listing.in_cart = true;
                        state.status_message = Some("A kosárba téve.".into());
                    }
                    Err(err) => state.status_message = Some(format!("Hiba: {err}")),
                }
            }
        }
        NetUpdate::LoggedIn { result } => {
            state.profile.submitting = false;
            match result {
                Ok(cookie) => {
                    if let Err(err) = session::store_cookie(&cookie) {
                        tracing::warn!("failed to persist session: {err:#}");
                    }
                    state.cookie = Some(cookie);
                    state.profile.password.clear();
                    state.status_message = Some("Sikeres bejelentkezés.".into());
                }
                Err(err) => state.profile.error = Some(err.to_string()),
            }
        }
        NetUpdate::Image { id, result } => {
            state.pending_images.remove(&id);
            match result {
                Ok(thumb) => {
                    state.images.insert(id, std::sync::Arc::new(thumb));
                }
                Err(err) => tracing::debug!(%id, "image fetch failed: {err:#}"),
            }
        }
    }
}
