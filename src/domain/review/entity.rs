use crate::domain::shared::{
    collection::Collection,
    document::{Reference, SeedDocument},
    schema::{FieldKind, FieldSpec, field},
    value_objects::{check_not_before, validate_url_list},
    violation::Violation,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use ts_rs::TS;
use validator::Validate;

/// A user's review of a place.
///
/// `likes` is a cached counter and must always equal the number of users in
/// `liked_by`, which holds each user at most once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, Validate)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Review {
    #[validate(length(min = 1))]
    pub id: String,
    #[validate(length(min = 1))]
    pub attraction_id: String,
    #[validate(length(min = 1))]
    pub user_id: String,
    pub user_name: String,
    #[validate(url)]
    pub user_profile_image: String,
    #[validate(range(min = 0.0, max = 5.0))]
    pub rating: f64,
    pub comment: String,
    #[validate(custom(function = "validate_url_list"))]
    pub images: Vec<String>,
    pub likes: u32,
    pub liked_by: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SeedDocument for Review {
    const COLLECTION: Collection = Collection::Reviews;

    const FIELDS: &'static [FieldSpec] = &[
        field("id", FieldKind::String),
        field("attractionId", FieldKind::String),
        field("userId", FieldKind::String),
        field("userName", FieldKind::String),
        field("userProfileImage", FieldKind::String),
        field("rating", FieldKind::Float),
        field("comment", FieldKind::String),
        field("images", FieldKind::StringList),
        field("likes", FieldKind::UnsignedInteger),
        field("likedBy", FieldKind::StringList),
        field("createdAt", FieldKind::Timestamp),
        field("updatedAt", FieldKind::Timestamp),
    ];

    fn id(&self) -> &str {
        &self.id
    }

    fn references(&self) -> Vec<Reference> {
        let mut refs = vec![
            Reference::new("attractionId", Collection::Attractions, &self.attraction_id),
            Reference::new("userId", Collection::Users, &self.user_id),
        ];
        refs.extend(Reference::many("likedBy", Collection::Users, &self.liked_by));
        refs
    }

    fn invariant_violations(&self) -> Vec<Violation> {
        let mut violations = Vec::new();

        let mut seen = HashSet::new();
        if let Some(repeated) = self.liked_by.iter().find(|id| !seen.insert(id.as_str())) {
            violations.push(Violation::invalid(
                "likedBy",
                format!("user `{repeated}` appears more than once"),
            ));
        }

        if self.likes as usize != self.liked_by.len() {
            violations.push(Violation::invalid(
                "likes",
                format!(
                    "{} does not match the {} entries in `likedBy`",
                    self.likes,
                    self.liked_by.len()
                ),
            ));
        }

        violations.extend(check_not_before(
            "updatedAt",
            &self.updated_at,
            "createdAt",
            &self.created_at,
        ));
        violations
    }
}
