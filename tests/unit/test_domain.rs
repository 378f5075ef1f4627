use city_guide_seeder::domain::{
    city::entity::City,
    place::entity::{Place, PlaceCategory},
    record::SeedRecord,
    review::entity::Review,
    shared::{collection::Collection, document::SeedDocument, violation::Violation},
    user::entity::User,
};
use serde_json::{Value, json};

fn paris() -> Value {
    json!({
        "id": "paris",
        "name": "Paris",
        "description": "The City of Light.",
        "imageUrl": "https://images.unsplash.com/photo-1502602898534-47d3c0c0b8a9?w=800",
        "latitude": 48.8566,
        "longitude": 2.3522,
        "country": "France",
        "population": 2161000,
        "attractions": ["eiffel-tower"],
        "isActive": true
    })
}

fn review_by_john() -> Value {
    json!({
        "id": "review-1",
        "attractionId": "eiffel-tower",
        "userId": "user-1",
        "userName": "John Smith",
        "userProfileImage": "https://images.unsplash.com/photo-1472099645785-5658abf4ff4e?w=100",
        "rating": 4.8,
        "comment": "Book tickets in advance.",
        "images": [],
        "likes": 0,
        "likedBy": [],
        "createdAt": "2024-01-25T19:45:00Z",
        "updatedAt": "2024-01-25T19:45:00Z"
    })
}

fn john() -> Value {
    json!({
        "id": "user-1",
        "email": "john.smith@email.com",
        "name": "John Smith",
        "profileImageUrl": "https://images.unsplash.com/photo-1472099645785-5658abf4ff4e?w=100",
        "phoneNumber": "+1-555-0001",
        "favoriteAttractions": [],
        "isAdmin": false,
        "createdAt": "2024-01-10T00:00:00Z",
        "lastLoginAt": "2024-01-30T10:30:00Z"
    })
}

fn only_violation_field(violations: &[Violation]) -> &str {
    assert_eq!(violations.len(), 1, "unexpected violations: {violations:?}");
    violations[0].field()
}

fn louvre() -> Value {
    json!({
        "id": "louvre-museum",
        "name": "Louvre Museum",
        "description": "World's largest art museum, home to the Mona Lisa.",
        "cityId": "paris",
        "category": "museum",
        "imageUrls": ["https://images.unsplash.com/photo-1541961017774-22349e4a1262?w=800"],
        "latitude": 48.8606,
        "longitude": 2.3376,
        "address": "Rue de Rivoli, 75001 Paris, France",
        "phoneNumber": "+33-1-40-20-50-50",
        "website": "https://www.louvre.fr/",
        "openingHours": "9:00 AM - 6:00 PM (Closed Tuesdays)",
        "averageRating": 4.7,
        "totalReviews": 2800,
        "priceRange": 3.0,
        "tags": ["museum", "art", "mona-lisa", "culture"],
        "isActive": true,
        "createdAt": "2024-01-01T00:00:00Z",
        "updatedAt": "2024-01-01T00:00:00Z"
    })
}

#[test]
fn place_decodes_with_category() {
    let place = Place::decode(&louvre()).unwrap();
    assert_eq!(place.category, PlaceCategory::Museum);
    assert_eq!(place.city_id, "paris");
    assert_eq!(place.references().len(), 1);
}

#[test]
fn place_accepts_empty_phone_and_website() {
    let mut doc = louvre();
    doc["phoneNumber"] = json!("");
    doc["website"] = json!("");
    assert!(Place::decode(&doc).is_ok());
}

#[test]
fn place_rejects_unknown_category() {
    let mut doc = louvre();
    doc["category"] = json!("casino");
    let violations = Place::decode(&doc).unwrap_err();
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].field(), "category");
}

#[test]
fn place_rejects_update_before_creation() {
    let mut doc = louvre();
    doc["updatedAt"] = json!("2023-12-31T23:59:59Z");
    let violations = Place::decode(&doc).unwrap_err();
    assert_eq!(violations[0].field(), "updatedAt");
}

#[test]
fn place_rejects_negative_review_count_and_bad_website() {
    let mut doc = louvre();
    doc["totalReviews"] = json!(-3);
    let violations = Place::decode(&doc).unwrap_err();
    assert_eq!(violations[0].field(), "totalReviews");

    let mut doc = louvre();
    doc["website"] = json!("louvre dot fr");
    let violations = Place::decode(&doc).unwrap_err();
    assert_eq!(violations[0].field(), "website");
}

#[test]
fn review_references_place_author_and_likers() {
    let review = Review::decode(&json!({
        "id": "review-2",
        "attractionId": "central-park",
        "userId": "user-2",
        "userName": "Sarah Johnson",
        "userProfileImage": "https://images.unsplash.com/photo-1494790108755-2616b612b786?w=100",
        "rating": 4.5,
        "comment": "Beautiful park with so much to see and do.",
        "images": [],
        "likes": 1,
        "likedBy": ["user-1"],
        "createdAt": "2024-01-20T14:15:00Z",
        "updatedAt": "2024-01-20T14:15:00Z"
    }))
    .unwrap();

    let targets: Vec<(Collection, String)> = review
        .references()
        .into_iter()
        .map(|r| (r.target, r.id))
        .collect();
    assert_eq!(
        targets,
        vec![
            (Collection::Attractions, "central-park".to_string()),
            (Collection::Users, "user-2".to_string()),
            (Collection::Users, "user-1".to_string()),
        ]
    );
}

#[test]
fn user_rejects_malformed_email() {
    let violations = User::decode(&json!({
        "id": "user-9",
        "email": "not-an-email",
        "name": "Nobody",
        "profileImageUrl": "https://images.unsplash.com/photo-1472099645785-5658abf4ff4e?w=100",
        "phoneNumber": "",
        "favoriteAttractions": [],
        "isAdmin": false,
        "createdAt": "2024-01-10T00:00:00Z",
        "lastLoginAt": "2024-01-30T10:30:00Z"
    }))
    .unwrap_err();
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].field(), "email");
}

#[test]
fn seed_record_dispatches_on_collection() {
    let record = SeedRecord::decode(Collection::Attractions, &louvre()).unwrap();
    assert!(matches!(record, SeedRecord::Place(_)));
    assert_eq!(record.collection(), Collection::Attractions);
}

#[test]
fn place_without_category_reports_missing_field() {
    let mut doc = louvre();
    doc.as_object_mut().unwrap().remove("category");
    let violations = Place::decode(&doc).unwrap_err();
    assert_eq!(violations, vec![Violation::missing("category")]);
}

#[test]
fn place_price_range_is_a_one_to_five_tier() {
    for price in [0.5, 6.0] {
        let mut doc = louvre();
        doc["priceRange"] = json!(price);
        let violations = Place::decode(&doc).unwrap_err();
        assert_eq!(only_violation_field(&violations), "priceRange");
        assert!(violations[0].is_invalid_value());
    }

    let mut doc = louvre();
    doc["priceRange"] = json!(5.0);
    assert!(Place::decode(&doc).is_ok());
}

#[test]
fn city_decodes_and_references_its_attractions() {
    let city = City::decode(&paris()).unwrap();
    assert_eq!(city.population, 2161000);
    assert_eq!(city.references().len(), 1);
}

#[test]
fn city_rejects_longitude_out_of_range() {
    let mut doc = paris();
    doc["longitude"] = json!(181.0);
    let violations = City::decode(&doc).unwrap_err();
    assert_eq!(only_violation_field(&violations), "longitude");
}

#[test]
fn city_population_must_be_a_non_negative_integer() {
    for population in [json!(-5), json!(2.5), json!("2161000")] {
        let mut doc = paris();
        doc["population"] = population;
        let violations = City::decode(&doc).unwrap_err();
        assert_eq!(only_violation_field(&violations), "population");
        assert!(violations[0].is_invalid_value());
    }
}

#[test]
fn review_rejects_update_before_creation() {
    let mut doc = review_by_john();
    doc["updatedAt"] = json!("2024-01-25T19:44:59Z");
    let violations = Review::decode(&doc).unwrap_err();
    assert_eq!(only_violation_field(&violations), "updatedAt");
}

#[test]
fn user_rejects_login_before_creation() {
    let mut doc = john();
    doc["lastLoginAt"] = json!("2024-01-09T23:00:00Z");
    let violations = User::decode(&doc).unwrap_err();
    assert_eq!(only_violation_field(&violations), "lastLoginAt");

    assert!(User::decode(&john()).is_ok());
}
