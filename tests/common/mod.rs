// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use std::sync::Arc;

use voyageur::config::Config;
use voyageur::db::FirestoreDb;
use voyageur::models::Place;
use voyageur::routes::create_router;
use voyageur::services::{PlaceCatalog, RecommendationPlanner, TripLocks, VotingService};
use voyageur::AppState;

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Create a test database connection.
#[allow(dead_code)]
pub async fn test_db() -> FirestoreDb {
    FirestoreDb::new("test-project")
        .await
        .expect("Failed to connect to Firestore emulator")
}

/// Create a mock database connection (offline).
#[allow(dead_code)]
pub fn test_db_offline() -> FirestoreDb {
    FirestoreDb::new_mock()
}

/// Make a catalog place for tests.
#[allow(dead_code)]
pub fn place(id: u64, name: &str, category: &str, city: &str) -> Place {
    Place {
        id,
        name: name.to_string(),
        description: format!("{} in {}", name, city),
        category: category.to_string(),
        city: city.to_string(),
        price: 25_000.0,
        rating: 4.3,
        location: "-8.65,115.21".to_string(),
    }
}

/// A 20-place catalog with 8 Bali beach/temple entries, used across the
/// API and planning-flow tests.
#[allow(dead_code)]
pub fn test_catalog() -> PlaceCatalog {
    let mut places = vec![
        place(1, "Kuta Beach", "Bahari", "Bali"),
        place(2, "Sanur Beach", "Bahari", "Bali"),
        place(3, "Nusa Dua Beach", "Bahari", "Bali"),
        place(4, "Padang Padang Beach", "Bahari", "Bali"),
        place(5, "Tanah Lot", "Budaya", "Bali"),
        place(6, "Uluwatu Temple", "Budaya", "Bali"),
        place(7, "Besakih Temple", "Budaya", "Bali"),
        place(8, "Tirta Empul", "Budaya", "Bali"),
    ];
    // Non-matching filler: wrong category or wrong city
    places.extend([
        place(9, "Waterbom", "Taman Hiburan", "Bali"),
        place(10, "Bali Zoo", "Cagar Alam", "Bali"),
        place(11, "Garuda Wisnu Kencana", "Taman Hiburan", "Bali"),
        place(12, "Parangtritis Beach", "Bahari", "Yogyakarta"),
        place(13, "Prambanan", "Budaya", "Yogyakarta"),
        place(14, "Malioboro", "Pusat Perbelanjaan", "Yogyakarta"),
        place(15, "Kota Tua", "Budaya", "Jakarta"),
        place(16, "Ancol", "Bahari", "Jakarta"),
        place(17, "Ragunan", "Cagar Alam", "Jakarta"),
        place(18, "Museum Angkut", "Museum", "Malang"),
        place(19, "Jatim Park", "Taman Hiburan", "Malang"),
        place(20, "Bromo", "Cagar Alam", "Malang"),
    ]);
    PlaceCatalog::from_places(places)
}

/// Create a JWT accepted by the test app's auth middleware.
#[allow(dead_code)]
pub fn create_test_jwt(user_id: &str, user_name: &str, email: &str, signing_key: &[u8]) -> String {
    voyageur::middleware::auth::create_jwt(user_id, user_name, email, signing_key)
        .expect("Failed to create test JWT")
}

/// Create a test app with offline mock dependencies.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    let config = Config::default();
    let db = test_db_offline();
    let catalog = test_catalog();

    let trip_locks: TripLocks = Arc::new(dashmap::DashMap::new());
    let planner = RecommendationPlanner::new(catalog.clone(), db.clone());
    let voting = VotingService::new(db.clone(), trip_locks);

    let state = Arc::new(AppState {
        config,
        db,
        catalog,
        planner,
        voting,
    });

    (create_router(state.clone()), state)
}
