//! Central application state.
//!
//! All mutable state lives here so that the rest of the app can be pure
//! functions over `&AppState` (rendering) or `&mut AppState` (event
//! handling). Network side effects are requested by pushing a `NetRequest`;
//! the main loop drains the queue and spawns the jobs.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::api::types::{Instrument, UserProfile};
use crate::config::AppConfig;
use crate::core::chrome::ChromeSlide;
use crate::core::pager::{FullscreenSync, PagerState};
use crate::core::scroll::ScrollSignal;
use crate::ui::glide::PageGlide;
use crate::ui::layout::HitZones;

/// Damping used by every paged strip.
pub const GLIDE_SPEED: f64 = 0.45;

/// How long the first-visit splash stays up.
pub const SPLASH_DURATION: Duration = Duration::from_millis(2500);

/// Which screen is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Home,
    Cart,
    Profile,
    Listing,
    /// Public profile of a listing's seller, pushed over the listing.
    Seller,
}

/// A network side effect requested by an event handler, executed by the
/// main loop.
#[derive(Debug)]
pub enum NetRequest {
    Feed,
    Detail { id: u64 },
    Seller { id: u64 },
    CartList,
    CartStatus { id: u64 },
    CartAdd { id: u64 },
    Login { name: String, password: String },
    Image { id: String },
}

// ───────────────────────────────────────── screens ───────────

/// Home feed screen state. Rebuilt on every navigation to Home, which is
/// what gives the hysteresis filter its per-mount lifecycle.
pub struct HomeScreen {
    pub listings: Vec<Instrument>,
    pub loading: bool,
    pub refreshing: bool,
    pub error: Option<String>,
    /// Index of the highlighted card.
    pub selected: usize,
    /// First visible content row of the feed.
    pub scroll_rows: usize,
    /// Screen-owned scroll hysteresis, fed from `scroll_rows`.
    pub signal: ScrollSignal,
    /// While set, the splash overlay is shown instead of the feed.
    pub splash_until: Option<Instant>,
}

impl HomeScreen {
    pub fn new(now: Instant) -> Self {
        // The splash plays once per process, not once per visit.
        let splash_until = if crate::app::session::take_splash() {
            Some(now + SPLASH_DURATION)
        } else {
            None
        };
        Self {
            listings: Vec::new(),
            loading: true,
            refreshing: false,
            error: None,
            selected: 0,
            scroll_rows: 0,
            signal: ScrollSignal::new(),
            splash_until,
        }
    }
}

/// Listing detail screen state, including the carousel core.
pub struct ListingScreen {
    pub id: u64,
    pub data: Option<Instrument>,
    pub loading: bool,
    pub error: Option<String>,
    /// First visible row of the detail body (below the carousel).
    pub scroll_rows: usize,
    /// Screen-owned scroll hysteresis, fed from `scroll_rows`.
    pub signal: ScrollSignal,
    /// Shared page state for the inline and fullscreen viewers.
    pub pager: PagerState,
    pub sync: FullscreenSync,
    /// Inline carousel motion.
    pub inline: PageGlide,
    /// Carousel viewport width in columns, from the last layout.
    pub inline_width: u16,
    /// Present only while the fullscreen viewer is mounted.
    pub fullscreen: Option<FullscreenViewer>,
    pub cart_loading: bool,
    pub in_cart: bool,
    pub adding_to_cart: bool,
}

impl ListingScreen {
    pub fn new(id: u64) -> Self {
        Self {
            id,
            data: None,
            loading: true,
            error: None,
            scroll_rows: 0,
            signal: ScrollSignal::new(),
            pager: PagerState::new(0),
            sync: FullscreenSync::new(),
            inline: PageGlide::new(GLIDE_SPEED),
            inline_width: 0,
            fullscreen: None,
            cart_loading: false,
            in_cart: false,
            adding_to_cart: false,
        }
    }

    /// Listing data arrived: fix the image count for this load and reset
    /// the carousel to the first page.
    pub fn set_data(&mut self, data: Instrument) {
        self.pager = PagerState::new(data.images.len());
        self.inline = PageGlide::new(GLIDE_SPEED);
        self.data = Some(data);
        self.loading = false;
    }
}

/// The independently-mounted fullscreen paged viewer.
pub struct FullscreenViewer {
    pub strip: PageGlide,
    /// Viewport width in columns, recorded at layout.
    pub width: u16,
    /// Set by the first render — the explicit "viewer ready" signal the
    /// sync controller prefers over its deadline fallback.
    pub laid_out: bool,
}

impl FullscreenViewer {
    pub fn new() -> Self {
        Self {
            strip: PageGlide::new(GLIDE_SPEED),
            width: 0,
            laid_out: false,
        }
    }
}

/// Seller profile screen state. The listing it was opened from stays
/// mounted underneath so Back returns to it in place.
pub struct SellerScreen {
    pub id: u64,
    /// Name carried over from the listing, shown while the profile loads.
    pub name: String,
    pub loading: bool,
    pub data: Option<UserProfile>,
    pub error: Option<String>,
}

impl SellerScreen {
    pub fn new(id: u64, name: String) -> Self {
        Self {
            id,
            name,
            loading: true,
            data: None,
            error: None,
        }
    }
}

/// Cart screen state.
pub struct CartScreen {
    pub items: Vec<Instrument>,
    pub loading: bool,
    pub error: Option<String>,
    pub selected: usize,
}

impl CartScreen {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            loading: false,
            error: None,
            selected: 0,
        }
    }
}

/// Which login input currently receives typed characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    Username,
    Password,
}

/// Profile screen state — a login form until a session exists.
pub struct ProfileScreen {
    pub username: String,
    pub password: String,
    pub field: LoginField,
    pub submitting: bool,
    pub error: Option<String>,
}

impl ProfileScreen {
    pub fn new() -> Self {
        Self {
            username: String::new(),
            password: String::new(),
            field: LoginField::Username,
            submitting: false,
            error: None,
        }
    }
}

// ───────────────────────────────────────── top level ─────────

/// Top-level application state.
pub struct AppState {
    pub route: Route,
    pub should_quit: bool,
    /// Transient message shown in the header.
    pub status_message: Option<String>,
    pub config: AppConfig,
    /// Session cookie replayed on authenticated requests.
    pub cookie: Option<String>,

    /// Navigation-bar transition, driven by the home feed's hysteresis.
    pub chrome: ChromeSlide,

    pub home: HomeScreen,
    pub cart: CartScreen,
    pub profile: ProfileScreen,
    /// Present while the listing detail screen is mounted.
    pub listing: Option<ListingScreen>,
    /// Present while a seller profile is shown over the listing.
    pub seller: Option<SellerScreen>,

    /// Pre-resized thumbnails keyed by image identifier.
    pub images: HashMap<String, Arc<image::RgbaImage>>,
    /// Image fetches already in flight (dedup).
    pub pending_images: HashSet<String>,

    /// Network side effects to be spawned by the main loop.
    pub requests: Vec<NetRequest>,
    /// Monotonic id used to drop stale feed responses.
    pub feed_generation: u64,

    /// Spinner frame counter.
    pub tick: u64,
    /// Clickable regions from the last render.
    pub hit: HitZones,
}

impl AppState {
    pub fn new(config: AppConfig, cookie: Option<String>, now: Instant) -> Self {
        let home = HomeScreen::new(now);
        let mut requests = Vec::new();
        if home.splash_until.is_none() {
            requests.push(NetRequest::Feed);
        }
        Self {
            route: Route::Home,
            should_quit: false,
            status_message: None,
            config,
            cookie,
            chrome: ChromeSlide::new(),
            home,
            cart: CartScreen::new(),
            profile: ProfileScreen::new(),
            listing: None,
            seller: None,
            images: HashMap::new(),
            pending_images: HashSet::new(),
            requests,
            feed_generation: 0,
            tick: 0,
            hit: HitZones::default(),
        }
    }

    // ── navigation ──────────────────────────────────────────────
    //
    // Each transition remounts the target screen: fresh scroll state, a
    // fresh fetch, and the navigation bar slid back in so the bar and the
    // new screen's hysteresis baseline agree.

    pub fn goto_home(&mut self, now: Instant) {
        self.leave_listing();
        self.route = Route::Home;
        self.home = HomeScreen::new(now);
        if self.home.splash_until.is_none() {
            self.requests.push(NetRequest::Feed);
        }
        self.show_chrome(now);
    }

    pub fn goto_cart(&mut self, now: Instant) {
        self.leave_listing();
        self.route = Route::Cart;
        self.cart = CartScreen::new();
        if self.cookie.is_some() {
            self.cart.loading = true;
            self.requests.push(NetRequest::CartList);
        }
        self.show_chrome(now);
    }

    pub fn goto_profile(&mut self, now: Instant) {
        self.leave_listing();
        self.route = Route::Profile;
        self.profile = ProfileScreen::new();
        self.show_chrome(now);
    }

    pub fn open_listing(&mut self, id: u64, now: Instant) {
        self.leave_listing();
        self.route = Route::Listing;
        self.listing = Some(ListingScreen::new(id));
        self.requests.push(NetRequest::Detail { id });
        self.show_chrome(now);
    }

    /// Show the public profile of `user_id`, keeping the current listing
    /// mounted underneath. `name` fills the header while the fetch runs.
    pub fn open_seller(&mut self, user_id: u64, name: String, now: Instant) {
        self.route = Route::Seller;
        self.seller = Some(SellerScreen::new(user_id, name));
        self.requests.push(NetRequest::Seller { id: user_id });
        self.show_chrome(now);
    }

    /// Pop the seller profile, returning to the listing it was opened
    /// from (or Home if the listing is gone).
    pub fn close_seller(&mut self, now: Instant) {
        self.seller = None;
        if self.listing.is_some() {
            self.route = Route::Listing;
        } else {
            self.goto_home(now);
        }
    }

    /// Unmount the listing screen, cancelling its pending fullscreen
    /// positioning so no stale timer can fire afterwards. Any seller
    /// profile opened from it goes with it.
    fn leave_listing(&mut self) {
        if let Some(listing) = self.listing.as_mut() {
            listing.sync.cancel();
        }
        self.listing = None;
        self.seller = None;
    }

    fn show_chrome(&mut self, now: Instant) {
        self.chrome
            .apply(crate::core::scroll::ChromeDecision::Show, now);
    }

    /// Queue an image fetch unless it is cached or already in flight.
    pub fn request_image(&mut self, id: &str) {
        if id.is_empty()
            || self.images.contains_key(id)
            || self.pending_images.contains(id)
        {
            return;
        }
        self.pending_images.insert(id.to_string());
        self.requests.push(NetRequest::Image { id: id.to_string() });
    }
}
