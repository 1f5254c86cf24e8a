// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Voyageur: collaborative trip planning backend
//!
//! This crate provides the backend API for planning group trips:
//! aggregating participant preferences into a consensus, generating
//! candidate itineraries from a places catalog, and voting them down
//! to a day-by-day schedule.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use config::Config;
use db::FirestoreDb;
use services::{PlaceCatalog, RecommendationPlanner, VotingService};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: FirestoreDb,
    pub catalog: PlaceCatalog,
    pub planner: RecommendationPlanner,
    pub voting: VotingService,
}
