// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Trip, participant and preference models.

use serde::{Deserialize, Serialize};

use crate::models::Place;

/// A planned group trip stored in Firestore.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trip {
    /// Trip ID (also used as document ID)
    pub id: String,
    /// Trip title
    pub title: String,
    /// Trip length in days (>= 1)
    pub duration: u32,
    /// Free-text description
    pub description: String,
    /// User ID of the creator
    pub created_by: String,
    /// When the trip was created (RFC3339)
    pub created_at: String,
    /// Last modification timestamp (RFC3339)
    #[serde(default)]
    pub updated_at: Option<String>,
    /// Trip members; the creator is always the first entry
    #[serde(default)]
    pub participants: Vec<Participant>,
    /// Group consensus, present once computed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consensus: Option<Consensus>,
    /// Day-by-day schedule, present once voting is finalized
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finalized_itinerary: Option<Vec<DayPlan>>,
}

impl Trip {
    pub fn is_participant(&self, user_id: &str) -> bool {
        self.participants.iter().any(|p| p.user_id == user_id)
    }

    pub fn participant(&self, user_id: &str) -> Option<&Participant> {
        self.participants.iter().find(|p| p.user_id == user_id)
    }

    pub fn participant_mut(&mut self, user_id: &str) -> Option<&mut Participant> {
        self.participants.iter_mut().find(|p| p.user_id == user_id)
    }
}

/// A trip member and their (optional) submitted preferences.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Participant {
    pub user_id: String,
    pub user_name: String,
    pub email: String,
    /// Submitted travel preferences; replaced wholesale on resubmission
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preference: Option<Preference>,
}

/// One participant's travel preferences.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Preference {
    /// Cities the participant wants to visit
    pub preferred_destinations: Vec<String>,
    /// Place categories the participant enjoys
    pub preferred_categories: Vec<String>,
    /// Budget as [min, max], min <= max
    pub budget_range: [f64; 2],
    /// Days the participant is available ("YYYY-MM-DD")
    pub available_dates: Vec<String>,
}

impl Preference {
    /// All four fields populated and the budget range ordered.
    pub fn is_complete(&self) -> bool {
        !self.preferred_destinations.is_empty()
            && !self.preferred_categories.is_empty()
            && !self.available_dates.is_empty()
            && self.budget_range[0] <= self.budget_range[1]
    }
}

/// Group-wide preference summary, derived from participant preferences.
///
/// Stored on the trip document and overwritten on every recomputation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Consensus {
    /// Most frequently requested destination city
    pub most_common_destination: String,
    /// Up to 3 categories, ordered by descending frequency
    pub most_common_categories: Vec<String>,
    /// Midpoint of the mean budget minimum and mean budget maximum
    pub average_budget: f64,
    /// Every date tied for the highest availability count, ascending
    pub most_available_dates: Vec<String>,
    /// Earliest of `most_available_dates`
    pub trip_start_date: String,
    /// `trip_start_date` + duration - 1 days ("YYYY-MM-DD")
    pub trip_end_date: String,
}

/// One day of the finalized schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayPlan {
    /// Day number, 1..=duration
    pub day: u32,
    /// Places assigned to this day; may be empty for trailing days
    pub places: Vec<Place>,
}
