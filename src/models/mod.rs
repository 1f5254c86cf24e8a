// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod place;
pub mod recommendation;
pub mod trip;
pub mod user;

pub use place::Place;
pub use recommendation::{CandidateItinerary, RecommendationSet};
pub use trip::{Consensus, DayPlan, Participant, Preference, Trip};
pub use user::User;
