use crate::domain::shared::{
    collection::Collection,
    document::{Reference, SeedDocument},
    schema::{FieldKind, FieldSpec, field},
};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use validator::Validate;

/// A city the guide covers.
///
/// `attractions` lists the ids of places featured for this city, in display
/// order. The places are separate records; the list only references them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, Validate)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct City {
    #[validate(length(min = 1))]
    pub id: String,
    #[validate(length(min = 1))]
    pub name: String,
    pub description: String,
    #[validate(url)]
    pub image_url: String,
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
    pub country: String,
    pub population: u64,
    pub attractions: Vec<String>,
    pub is_active: bool,
}

impl SeedDocument for City {
    const COLLECTION: Collection = Collection::Cities;

    const FIELDS: &'static [FieldSpec] = &[
        field("id", FieldKind::String),
        field("name", FieldKind::String),
        field("description", FieldKind::String),
        field("imageUrl", FieldKind::String),
        field("latitude", FieldKind::Float),
        field("longitude", FieldKind::Float),
        field("country", FieldKind::String),
        field("population", FieldKind::UnsignedInteger),
        field("attractions", FieldKind::StringList),
        field("isActive", FieldKind::Bool),
    ];

    fn id(&self) -> &str {
        &self.id
    }

    fn references(&self) -> Vec<Reference> {
        Reference::many("attractions", Collection::Attractions, &self.attractions).collect()
    }
}
