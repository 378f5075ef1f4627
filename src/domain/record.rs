use crate::domain::{
    city::entity::City,
    place::entity::Place,
    review::entity::Review,
    shared::{
        collection::Collection,
        document::{Reference, SeedDocument},
        violation::Violation,
    },
    user::entity::User,
};
use serde_json::Value;

/// A validated record of any kind, tagged by the collection it belongs to.
#[derive(Debug, Clone, PartialEq)]
pub enum SeedRecord {
    City(City),
    Place(Place),
    Review(Review),
    User(User),
}

impl SeedRecord {
    /// Decodes and validates a raw document destined for `collection`.
    pub fn decode(collection: Collection, document: &Value) -> Result<Self, Vec<Violation>> {
        match collection {
            Collection::Cities => City::decode(document).map(SeedRecord::City),
            Collection::Attractions => Place::decode(document).map(SeedRecord::Place),
            Collection::Reviews => Review::decode(document).map(SeedRecord::Review),
            Collection::Users => User::decode(document).map(SeedRecord::User),
        }
    }

    pub fn collection(&self) -> Collection {
        match self {
            SeedRecord::City(_) => City::COLLECTION,
            SeedRecord::Place(_) => Place::COLLECTION,
            SeedRecord::Review(_) => Review::COLLECTION,
            SeedRecord::User(_) => User::COLLECTION,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            SeedRecord::City(city) => city.id(),
            SeedRecord::Place(place) => place.id(),
            SeedRecord::Review(review) => review.id(),
            SeedRecord::User(user) => user.id(),
        }
    }

    pub fn references(&self) -> Vec<Reference> {
        match self {
            SeedRecord::City(city) => city.references(),
            SeedRecord::Place(place) => place.references(),
            SeedRecord::Review(review) => review.references(),
            SeedRecord::User(user) => user.references(),
        }
    }

    /// Canonical wire form written to the document store.
    pub fn to_document(&self) -> serde_json::Result<Value> {
        match self {
            SeedRecord::City(city) => serde_json::to_value(city),
            SeedRecord::Place(place) => serde_json::to_value(place),
            SeedRecord::Review(review) => serde_json::to_value(review),
            SeedRecord::User(user) => serde_json::to_value(user),
        }
    }
}
