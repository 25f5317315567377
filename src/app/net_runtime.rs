//! Background network jobs to keep the UI task responsive.
//!
//! Every job is fire-and-forget: it runs on the tokio pool, performs one
//! request (plus any decode work), and reports back with a single
//! `NetUpdate` message. Image decoding and thumbnailing happen here, off
//! the UI task.

use tokio::sync::mpsc;

use crate::api::client::{ApiClient, ApiResult};
use crate::api::types::{Instrument, UserProfile};
use crate::ui::image::make_thumbnail;

pub enum NetUpdate {
    Feed {
        generation: u64,
        result: ApiResult<Vec<Instrument>>,
    },
    Detail {
        id: u64,
        result: ApiResult<Instrument>,
    },
    Seller {
        id: u64,
        result: ApiResult<UserProfile>,
    },
    Cart {
        result: ApiResult<Vec<Instrument>>,
    },
    /// Cart membership of one listing. Errors degrade to "not in cart".
    CartStatus {
        id: u64,
        in_cart: bool,
    },
    CartAdded {
        id: u64,
        result: ApiResult<()>,
    },
    LoggedIn {
        result: ApiResult<String>,
    },
    Image {
        id: String,
        result: anyhow::Result<image::RgbaImage>,
    },
}

pub fn spawn_feed_fetch(tx: mpsc::UnboundedSender<NetUpdate>, api: ApiClient, generation: u64) {
    tokio::spawn(async move {
        let result = api.instruments().await;
        let _ = tx.send(NetUpdate::Feed { generation, result });
    });
}

pub fn spawn_detail_fetch(tx: mpsc::UnboundedSender<NetUpdate>, api: ApiClient, id: u64) {
    tokio::spawn(async move {
        let result = api.instrument(id).await;
        let _ = tx.send(NetUpdate::Detail { id, result });
    });
}

pub fn spawn_seller_fetch(tx: mpsc::UnboundedSender<NetUpdate>, api: ApiClient, id: u64) {
    tokio::spawn(async move {
        let result = api.user(id).await;
        let _ = tx.send(NetUpdate::Seller { id, result });
    });
}

pub fn spawn_cart_fetch(tx: mpsc::UnboundedSender<NetUpdate>, api: ApiClient, cookie: String) {
    tokio::spawn(async move {
        let result = api.cart_items(&cookie).await;
        let _ = tx.send(NetUpdate::Cart { result });
    });
}

/// Check whether listing `id` is already in the session's cart.
pub fn spawn_cart_status(
    tx: mpsc::UnboundedSender<NetUpdate>,
    api: ApiClient,
    cookie: String,
    id: u64,
) {
    tokio::spawn(async move {
        let in_cart = match api.cart_items(&cookie).await {
            Ok(items) => items.iter().any(|item| item.id == id),
            Err(err) => {
                tracing::debug!("cart status check failed: {err}");
                false
            }
        };
        let _ = tx.send(NetUpdate::CartStatus { id, in_cart });
    });
}

pub fn spawn_cart_add(
    tx: mpsc::UnboundedSender<NetUpdate>,
    api: ApiClient,
    cookie: String,
    id: u64,
) {
    tokio::spawn(async move {
        let result = api.add_to_cart(&cookie, id).await;
        let _ = tx.send(NetUpdate::CartAdded { id, result });
    });
}

pub fn spawn_login(
    tx: mpsc::UnboundedSender<NetUpdate>,
    api: ApiClient,
    name: String,
    password: String,
) {
    tokio::spawn(async move {
        let result = api.login(&name, &password).await;
        let _ = tx.send(NetUpdate::LoggedIn { result });
    });
}

/// Fetch, decode and pre-resize one uploaded image.
pub fn spawn_image_fetch(tx: mpsc::UnboundedSender<NetUpdate>, api: ApiClient, id: String) {
    tokio::spawn(async move {
        let result = fetch_thumbnail(&api, &id).await;
        let _ = tx.send(NetUpdate::Image { id, result });
    });
}

async fn fetch_thumbnail(api: &ApiClient, id: &str) -> anyhow::Result<image::RgbaImage> {
    let bytes = api.fetch_image(id).await?;
    // Decode + resize on a blocking thread; large JPEGs are not cheap.
    let thumb = tokio::task::spawn_blocking(move || -> anyhow::Result<image::RgbaImage> {
        let decoded = image::load_from_memory(&bytes)?;
        Ok(make_thumbnail(decoded))
    })
    .await??;
    Ok(thumb)
}
