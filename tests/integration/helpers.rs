use city_guide_seeder::{
    application::seed_catalog::{
        dto::{LoadOptions, SeedEntry},
        use_case::SeedCatalogUseCase,
    },
    infrastructure::store::memory_store::InMemoryStore,
};
use serde_json::{Value, json};
use std::sync::Arc;

pub struct TestLoader {
    pub use_case: SeedCatalogUseCase,
    pub store: Arc<InMemoryStore>,
}

pub fn spawn_loader() -> TestLoader {
    let store = Arc::new(InMemoryStore::new());
    TestLoader {
        use_case: SeedCatalogUseCase::new(store.clone(), LoadOptions::default()),
        store,
    }
}

pub fn sample_data_path() -> String {
    format!("{}/seed/sample_data.json", env!("CARGO_MANIFEST_DIR"))
}

pub fn entry(collection: &str, document: Value) -> SeedEntry {
    SeedEntry::new(collection, document)
}

pub fn city(id: &str, attractions: &[&str]) -> Value {
    json!({
        "id": id,
        "name": "Paris",
        "description": "The City of Light - famous for art, fashion, gastronomy, and culture.",
        "imageUrl": "https://images.unsplash.com/photo-1502602898534-47d3c0c0b8a9?w=800",
        "latitude": 48.8566,
        "longitude": 2.3522,
        "country": "France",
        "population": 2161000,
        "attractions": attractions,
        "isActive": true
    })
}

pub fn place(id: &str, city_id: &str) -> Value {
    json!({
        "id": id,
        "name": "Eiffel Tower",
        "description": "Iconic iron lattice tower on the Champ de Mars.",
        "cityId": city_id,
        "category": "touristAttraction",
        "imageUrls": ["https://images.unsplash.com/photo-1511739001486-6bfe10ce785f?w=800"],
        "latitude": 48.8584,
        "longitude": 2.2945,
        "address": "Champ de Mars, 5 Avenue Anatole France, 75007 Paris, France",
        "phoneNumber": "+33-892-70-12-39",
        "website": "https://www.toureiffel.paris/",
        "openingHours": "9:00 AM - 11:45 PM",
        "averageRating": 4.6,
        "totalReviews": 3200,
        "priceRange": 4.0,
        "tags": ["landmark", "tower", "romance", "views"],
        "isActive": true,
        "createdAt": "2024-01-01T00:00:00Z",
        "updatedAt": "2024-01-01T00:00:00Z"
    })
}

pub fn user(id: &str, email: &str) -> Value {
    json!({
        "id": id,
        "email": email,
        "name": "John Smith",
        "profileImageUrl": "https://images.unsplash.com/photo-1472099645785-5658abf4ff4e?w=100",
        "phoneNumber": "+1-555-0001",
        "favoriteAttractions": [],
        "isAdmin": false,
        "createdAt": "2024-01-10T00:00:00Z",
        "lastLoginAt": "2024-01-30T10:30:00Z"
    })
}

pub fn review(id: &str, attraction_id: &str, user_id: &str, liked_by: &[&str]) -> Value {
    json!({
        "id": id,
        "attractionId": attraction_id,
        "userId": user_id,
        "userName": "John Smith",
        "userProfileImage": "https://images.unsplash.com/photo-1472099645785-5658abf4ff4e?w=100",
        "rating": 4.8,
        "comment": "Book tickets in advance to avoid long queues.",
        "images": [],
        "likes": liked_by.len(),
        "likedBy": liked_by,
        "createdAt": "2024-01-25T19:45:00Z",
        "updatedAt": "2024-01-25T19:45:00Z"
    })
}

/// A small batch where every reference resolves.
pub fn consistent_batch() -> Vec<SeedEntry> {
    vec![
        entry("cities", city("paris", &["eiffel-tower"])),
        entry("attractions", place("eiffel-tower", "paris")),
        entry("users", user("user-1", "john.smith@email.com")),
        entry("users", user("user-2", "sarah.johnson@email.com")),
        entry(
            "reviews",
            review("review-1", "eiffel-tower", "user-1", &["user-2"]),
        ),
    ]
}
