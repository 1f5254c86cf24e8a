// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Places catalog browsing routes.

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::Result;
use crate::models::Place;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/places", get(get_places))
        .route("/places/search", get(search_places))
}

#[derive(Serialize)]
pub struct PlacesResponse {
    pub places: Vec<Place>,
}

/// Get the full places catalog.
async fn get_places(State(state): State<Arc<AppState>>) -> Result<Json<PlacesResponse>> {
    Ok(Json(PlacesResponse {
        places: state.catalog.places().to_vec(),
    }))
}

#[derive(Deserialize)]
struct SearchPlacesQuery {
    city: Option<String>,
    category: Option<String>,
}

/// Filter the catalog by city and/or category (case-insensitive) and
/// return the matches in random order.
async fn search_places(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchPlacesQuery>,
) -> Result<Json<PlacesResponse>> {
    let mut places = state
        .catalog
        .search(params.city.as_deref(), params.category.as_deref());
    places.shuffle(&mut rand::thread_rng());

    Ok(Json(PlacesResponse { places }))
}
