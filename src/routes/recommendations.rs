// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Consensus and candidate-itinerary routes.

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;

use crate::error::Result;
use crate::models::{CandidateItinerary, Consensus, RecommendationSet};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/trips/{trip_id}/consensus", post(compute_consensus))
        .route(
            "/trips/{trip_id}/recommendations",
            post(generate_recommendations).get(get_recommendations),
        )
        .route(
            "/trips/{trip_id}/recommendations/{itinerary_id}",
            get(get_candidate),
        )
}

#[derive(Serialize)]
pub struct ConsensusResponse {
    pub trip_id: String,
    pub consensus: Consensus,
}

/// Aggregate participant preferences and persist the result onto the
/// trip. Requires at least 2 participants, all with complete
/// preferences.
async fn compute_consensus(
    State(state): State<Arc<AppState>>,
    Path(trip_id): Path<String>,
) -> Result<Json<ConsensusResponse>> {
    let consensus = state.planner.compute_consensus(&trip_id).await?;
    Ok(Json(ConsensusResponse { trip_id, consensus }))
}

/// Generate (or regenerate) the trip's three candidate itineraries.
async fn generate_recommendations(
    State(state): State<Arc<AppState>>,
    Path(trip_id): Path<String>,
) -> Result<Json<RecommendationSet>> {
    let set = state.planner.generate(&trip_id).await?;
    Ok(Json(set))
}

/// Get the live recommendation set for a trip.
async fn get_recommendations(
    State(state): State<Arc<AppState>>,
    Path(trip_id): Path<String>,
) -> Result<Json<RecommendationSet>> {
    let set = state.planner.get_by_trip(&trip_id).await?;
    Ok(Json(set))
}

/// Get one candidate itinerary.
async fn get_candidate(
    State(state): State<Arc<AppState>>,
    Path((trip_id, itinerary_id)): Path<(String, String)>,
) -> Result<Json<CandidateItinerary>> {
    let candidate = state.planner.get_candidate(&trip_id, &itinerary_id).await?;
    Ok(Json(candidate))
}
