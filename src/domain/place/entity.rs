use crate::domain::shared::{
    collection::Collection,
    document::{Reference, SeedDocument},
    schema::{FieldKind, FieldSpec, field},
    value_objects::{
        PHONE_NUMBER_REGEX, check_not_before, validate_optional_url, validate_url_list,
    },
    violation::Violation,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use validator::Validate;

/// A point of interest in a city: attraction, park, restaurant, hotel or
/// museum. All kinds share one shape and are told apart by `category`.
///
/// # Invariants
/// - `city_id` must name a city loaded in the same batch
/// - `average_rating` is within 0.0..=5.0
/// - `updated_at` is not earlier than `created_at`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, Validate)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Place {
    #[validate(length(min = 1))]
    pub id: String,

    #[validate(length(min = 1))]
    pub name: String,

    pub description: String,

    /// City this place belongs to
    #[validate(length(min = 1))]
    pub city_id: String,

    pub category: PlaceCategory,

    #[validate(custom(function = "validate_url_list"))]
    pub image_urls: Vec<String>,

    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,

    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,

    pub address: String,

    /// May be empty when the place has no public line
    #[validate(regex(path = *PHONE_NUMBER_REGEX))]
    pub phone_number: String,

    /// May be empty
    #[validate(custom(function = "validate_optional_url"))]
    pub website: String,

    /// Free text such as "9:00 AM - 5:00 PM" or "24/7"
    pub opening_hours: String,

    #[validate(range(min = 0.0, max = 5.0))]
    pub average_rating: f64,

    pub total_reviews: u32,

    /// Coarse price tier, 1.0 (free/cheap) to 5.0 (luxury)
    #[validate(range(min = 1.0, max = 5.0))]
    pub price_range: f64,

    pub tags: Vec<String>,

    pub is_active: bool,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub enum PlaceCategory {
    TouristAttraction,
    Park,
    Restaurant,
    Hotel,
    Museum,
    Shopping,
    Entertainment,
    Nightlife,
}

impl PlaceCategory {
    pub const WIRE_NAMES: &'static [&'static str] = &[
        "touristAttraction",
        "park",
        "restaurant",
        "hotel",
        "museum",
        "shopping",
        "entertainment",
        "nightlife",
    ];
}

impl SeedDocument for Place {
    const COLLECTION: Collection = Collection::Attractions;

    const FIELDS: &'static [FieldSpec] = &[
        field("id", FieldKind::String),
        field("name", FieldKind::String),
        field("description", FieldKind::String),
        field("cityId", FieldKind::String),
        field("category", FieldKind::OneOf(PlaceCategory::WIRE_NAMES)),
        field("imageUrls", FieldKind::StringList),
        field("latitude", FieldKind::Float),
        field("longitude", FieldKind::Float),
        field("address", FieldKind::String),
        field("phoneNumber", FieldKind::String),
        field("website", FieldKind::String),
        field("openingHours", FieldKind::String),
        field("averageRating", FieldKind::Float),
        field("totalReviews", FieldKind::UnsignedInteger),
        field("priceRange", FieldKind::Float),
        field("tags", FieldKind::StringList),
        field("isActive", FieldKind::Bool),
        field("createdAt", FieldKind::Timestamp),
        field("updatedAt", FieldKind::Timestamp),
    ];

    fn id(&self) -> &str {
        &self.id
    }

    fn references(&self) -> Vec<Reference> {
        vec![Reference::new("cityId", Collection::Cities, &self.city_id)]
    }

    fn invariant_violations(&self) -> Vec<Violation> {
        check_not_before("updatedAt", &self.updated_at, "createdAt", &self.created_at)
            .into_iter()
            .collect()
    }
}
