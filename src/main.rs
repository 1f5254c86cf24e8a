// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Voyageur API Server
//!
//! Collaborative trip planning: participants submit travel preferences,
//! the service derives a group consensus, proposes candidate itineraries
//! from a places dataset and finalizes the vote into a daily schedule.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use voyageur::{
    config::Config,
    db::FirestoreDb,
    services::{PlaceCatalog, RecommendationPlanner, TripLocks, VotingService},
    AppState,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(port = config.port, "Starting Voyageur API");

    // Initialize Firestore database
    let db = FirestoreDb::new(&config.gcp_project_id)
        .await
        .expect("Failed to connect to Firestore");

    // Load the places catalog
    let catalog = match &config.places_data_url {
        Some(url) => {
            tracing::info!(url = %url, "Fetching places catalog");
            PlaceCatalog::load_from_url(url)
                .await
                .expect("Failed to fetch places catalog")
        }
        None => {
            tracing::info!(path = %config.places_data_path, "Loading places catalog");
            PlaceCatalog::load_from_file(&config.places_data_path)
                .expect("Failed to load places catalog")
        }
    };
    tracing::info!(count = catalog.places().len(), "Places catalog loaded");

    // Per-trip vote locks, shared across all request handlers
    let trip_locks: TripLocks = Arc::new(dashmap::DashMap::new());

    let planner = RecommendationPlanner::new(catalog.clone(), db.clone());
    let voting = VotingService::new(db.clone(), trip_locks);

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        db,
        catalog,
        planner,
        voting,
    });

    // Build router
    let app = voyageur::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("voyageur=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
