use crate::domain::shared::{
    collection::Collection,
    document::{Reference, SeedDocument},
    schema::{FieldKind, FieldSpec, field},
    value_objects::{PHONE_NUMBER_REGEX, check_not_before},
    violation::Violation,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use validator::Validate;

/// An app user. E-mail addresses are unique across all users; the loader
/// enforces that across the batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, Validate)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct User {
    #[validate(length(min = 1))]
    pub id: String,
    #[validate(email)]
    pub email: String,
    pub name: String,
    #[validate(url)]
    pub profile_image_url: String,
    #[validate(regex(path = *PHONE_NUMBER_REGEX))]
    pub phone_number: String,
    pub favorite_attractions: Vec<String>,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
    pub last_login_at: DateTime<Utc>,
}

impl User {
    /// Key used for the e-mail uniqueness check.
    pub fn normalized_email(&self) -> String {
        self.email.trim().to_lowercase()
    }
}

impl SeedDocument for User {
    const COLLECTION: Collection = Collection::Users;

    const FIELDS: &'static [FieldSpec] = &[
        field("id", FieldKind::String),
        field("email", FieldKind::String),
        field("name", FieldKind::String),
        field("profileImageUrl", FieldKind::String),
        field("phoneNumber", FieldKind::String),
        field("favoriteAttractions", FieldKind::StringList),
        field("isAdmin", FieldKind::Bool),
        field("createdAt", FieldKind::Timestamp),
        field("lastLoginAt", FieldKind::Timestamp),
    ];

    fn id(&self) -> &str {
        &self.id
    }

    fn references(&self) -> Vec<Reference> {
        Reference::many(
            "favoriteAttractions",
            Collection::Attractions,
            &self.favorite_attractions,
        )
        .collect()
    }

    fn invariant_violations(&self) -> Vec<Violation> {
        check_not_before(
            "lastLoginAt",
            &self.last_login_at,
            "createdAt",
            &self.created_at,
        )
        .into_iter()
        .collect()
    }
}
