// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod catalog;
pub mod consensus;
pub mod itinerary;
pub mod recommendation;
pub mod voting;

pub use catalog::PlaceCatalog;
pub use recommendation::RecommendationPlanner;
pub use voting::{TripLocks, VoteStatus, VotingService};
