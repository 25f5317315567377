//! HTTP client for the marketplace backend.
//!
//! A thin `reqwest` wrapper: one pooled client, a bounded timeout, and one
//! method per endpoint. `--offline` swaps every call for canned data so the
//! UI can be exercised without a server.

use std::time::Duration;

use reqwest::header::{COOKIE, SET_COOKIE};
use serde_json::json;

use super::types::{Instrument, UserProfile};

/// Errors surfaced by the API layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server returned HTTP {0}")]
    Status(u16),
    #[error("login succeeded but no session cookie was set")]
    MissingCookie,
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Marketplace API client. Cheap to clone; the inner `reqwest::Client`
/// shares its connection pool across clones.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    offline: bool,
}

impl ApiClient {
    /// Build a client against `base_url` (no trailing slash) with a bounded
    /// request timeout so a dead server can never freeze the UI task.
    pub fn new(base_url: &str, timeout: Duration, offline: bool) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            offline,
        })
    }

    /// Full URL for an uploaded image identifier.
    pub fn image_url(&self, image_id: &str) -> String {
        format!("{}/uploads/{}", self.base_url, image_id)
    }

    /// `GET /api/instruments` — the home feed.
    pub async fn instruments(&self) -> ApiResult<Vec<Instrument>> {
        if self.offline {
            return Ok(offline_feed());
        }
        let res = self
            .client
            .get(format!("{}/api/instruments", self.base_url))
            .send()
            .await?;
        if !res.status().is_success() {
            return Err(ApiError::Status(res.status().as_u16()));
        }
        Ok(res.json().await?)
    }

    /// `GET /api/instrument/{id}` — one listing's full detail.
    pub async fn instrument(&self, id: u64) -> ApiResult<Instrument> {
        if self.offline {
            return Ok(offline_detail(id));
        }
        let res = self
            .client
            .get(format!("{}/api/instrument/{id}", self.base_url))
            .send()
            .await?;
        if !res.status().is_success() {
            return Err(ApiError::Status(res.status().as_u16()));
        }
        Ok(res.json().await?)
    }

    /// `GET /api/users/{id}` — a seller's public profile.
    pub async fn user(&self, id: u64) -> ApiResult<UserProfile> {
        if self.offline {
            return Ok(offline_user(id));
        }
        let res = self
            .client
            .get(format!("{}/api/users/{id}", self.base_url))
            .send()
            .await?;
        if !res.status().is_success() {
            return Err(ApiError::Status(res.status().as_u16()));
        }
        Ok(res.json().await?)
    }

    /// `GET /api/cart-items` — the session's cart.
    pub async fn cart_items(&self, cookie: &str) -> ApiResult<Vec<Instrument>> {
        if self.offline {
            return Ok(Vec::new());
        }
        let res = self
            .client
            .get(format!("{}/api/cart-items", self.base_url))
            .header(COOKIE, cookie)
            .send()
            .await?;
        if !res.status().is_success() {
            return Err(ApiError::Status(res.status().as_u16()));
        }
        Ok(res.json().await?)
    }

    /// `POST /api/cart-items` — add one listing to the cart.
    pub async fn add_to_cart(&self, cookie: &str, id: u64) -> ApiResult<()> {
        if self.offline {
            return Ok(());
        }
        let res = self
            .client
            .post(format!("{}/api/cart-items", self.base_url))
            .header(COOKIE, cookie)
            .json(&json!({ "id": id }))
            .send()
            .await?;
        if !res.status().is_success() {
            return Err(ApiError::Status(res.status().as_u16()));
        }
        Ok(())
    }

    /// `POST /api/users/login` — returns the session cookie captured from
    /// the `Set-Cookie` response header.
    pub async fn login(&self, name: &str, password: &str) -> ApiResult<String> {
        if self.offline {
            return Ok("session=offline".to_string());
        }
        let res = self
            .client
            .post(format!("{}/api/users/login", self.base_url))
            .json(&json!({ "name": name, "password": password }))
            .send()
            .await?;
        if !res.status().is_success() {
            return Err(ApiError::Status(res.status().as_u16()));
        }
        let cookie = res
            .headers()
            .get(SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            // Only the name=value pair is replayed on later requests.
            .and_then(|v| v.split(';').next())
            .map(str::to_string)
            .ok_or(ApiError::MissingCookie)?;
        Ok(cookie)
    }

    /// `GET /uploads/{id}` — raw image bytes.
    pub async fn fetch_image(&self, image_id: &str) -> ApiResult<Vec<u8>> {
        if self.offline {
            return Ok(Vec::new());
        }
        let res = self.client.get(self.image_url(image_id)).send().await?;
        if !res.status().is_success() {
            return Err(ApiError::Status(res.status().as_u16()));
        }
        Ok(res.bytes().await?.to_vec())
    }
}

// ── offline fixtures ─────────────────────────────────────────────

fn offline_feed() -> Vec<Instrument> {
    (1..=4)
        .map(|id| Instrument {
            id,
            title: format!("Offline listing #{id}"),
            price: 10_000 * id as i64,
            brand: "Demo".into(),
            model: String::new(),
            category: "offline".into(),
            condition: String::new(),
            description: String::new(),
            images: Vec::new(),
            seller: String::new(),
            user_id: 0,
            ai_rating: 3.3,
        })
        .collect()
}

fn offline_detail(id: u64) -> Instrument {
    Instrument {
        id,
        title: "Offline mode".into(),
        price: 10_000,
        brand: "Demo".into(),
        model: "Model".into(),
        category: "offline".into(),
        condition: "mint".into(),
        description: "Offline demo listing — no server contacted.".into(),
        images: Vec::new(),
        seller: "offline".into(),
        user_id: 1,
        ai_rating: 3.33,
    }
}

fn offline_user(id: u64) -> UserProfile {
    UserProfile {
        id,
        name: "offline".into(),
        profile_url: String::new(),
        bio: None,
        location: "—".into(),
        join_date: "2024-01-01T00:00:00Z".into(),
        total_listings: 4,
        rating_count: 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_url_joins_base_and_id() {
        let api = ApiClient::new(
            "https://example.test/",
            Duration::from_secs(5),
            true,
        )
        .unwrap();
        assert_eq!(api.image_url("abc.jpg"), "https://example.test/uploads/abc.jpg");
    }
}
