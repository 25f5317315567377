//! Wire types for the marketplace API.
//!
//! The feed endpoint returns a trimmed-down instrument (no description,
//! seller or condition), so everything beyond the card fields is optional
//! or defaulted. No UI types are used here.

use serde::Deserialize;

/// One marketplace listing. The detail endpoint fills every field; the
/// feed and cart endpoints only populate the card subset.
#[derive(Debug, Clone, Deserialize)]
pub struct Instrument {
    pub id: u64,
    pub title: String,
    pub price: i64,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub condition: String,
    #[serde(default)]
    pub description: String,
    /// Image identifiers; full URLs are built by the client.
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub seller: String,
    #[serde(default)]
    pub user_id: u64,
    /// Star rating in `[0, 5]`, fractional.
    #[serde(default)]
    pub ai_rating: f64,
}

/// A seller's public profile, from `GET /api/users/{id}`. Only the fields
/// the profile card shows; nullable columns default to empty.
#[derive(Debug, Clone, Deserialize)]
pub struct UserProfile {
    pub id: u64,
    pub name: String,
    /// Avatar image identifier under `/uploads/`.
    #[serde(default)]
    pub profile_url: String,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub location: String,
    /// ISO-8601 timestamp of account creation.
    #[serde(default)]
    pub join_date: String,
    #[serde(default)]
    pub total_listings: u64,
    #[serde(default)]
    pub rating_count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_payload_decodes() {
        let json = r#"{
            "id": 42,
            "title": "Stratocaster",
            "price": 250000,
            "brand": "Fender",
            "model": "Player II",
            "category": "guitar",
            "condition": "used",
            "description": "Plays great.",
            "images": ["a.jpg", "b.jpg"],
            "seller": "joe",
            "user_id": 7,
            "ai_rating": 4.5
        }"#;
        let item: Instrument = serde_json::from_str(json).unwrap();
        assert_eq!(item.id, 42);
        assert_eq!(item.images.len(), 2);
        assert_eq!(item.ai_rating, 4.5);
    }

    #[test]
    fn feed_payload_decodes_without_detail_fields() {
        // The feed omits description, seller, condition and model.
        let json = r#"{
            "id": 1,
            "title": "Trumpet",
            "price": 90000,
            "brand": "Yamaha",
            "category": "brass",
            "images": [],
            "ai_rating": 3.6
        }"#;
        let item: Instrument = serde_json::from_str(json).unwrap();
        assert!(item.description.is_empty());
        assert!(item.images.is_empty());
        assert_eq!(item.user_id, 0);
    }

    #[test]
    fn user_profile_decodes_with_null_bio() {
        let json = r#"{
            "id": 7,
            "name": "joe",
            "profile_url": "avatar.jpg",
            "bio": null,
            "location": "Budapest",
            "join_date": "2023-05-01T10:00:00Z",
            "total_listings": 12,
            "rating_count": 4
        }"#;
        let profile: UserProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.id, 7);
        assert!(profile.bio.is_none());
        assert_eq!(profile.total_listings, 12);
    }
}
