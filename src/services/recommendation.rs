// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Recommendation set lifecycle.
//!
//! Handles the generation workflow:
//! 1. Aggregate participant preferences into a group consensus
//! 2. Filter the places catalog against that consensus
//! 3. Partition the filtered places into 3 candidate itineraries
//! 4. Create or replace the trip's recommendation set

use chrono::Utc;
use uuid::Uuid;

use crate::db::FirestoreDb;
use crate::error::{AppError, Result};
use crate::models::{CandidateItinerary, Consensus, RecommendationSet, Trip};
use crate::services::catalog::PlaceCatalog;
use crate::services::{consensus, itinerary};

/// Owns consensus computation and candidate itinerary generation.
#[derive(Clone)]
pub struct RecommendationPlanner {
    catalog: PlaceCatalog,
    db: FirestoreDb,
}

impl RecommendationPlanner {
    pub fn new(catalog: PlaceCatalog, db: FirestoreDb) -> Self {
        Self { catalog, db }
    }

    async fn load_trip(&self, trip_id: &str) -> Result<Trip> {
        self.db
            .get_trip(trip_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Trip {} not found", trip_id)))
    }

    /// Compute the group consensus and persist it onto the trip.
    ///
    /// Recomputed on demand; previously stored consensus fields are
    /// overwritten.
    pub async fn compute_consensus(&self, trip_id: &str) -> Result<Consensus> {
        let mut trip = self.load_trip(trip_id).await?;

        let consensus = consensus::compute_consensus(&trip.participants, trip.duration)?;

        trip.consensus = Some(consensus.clone());
        trip.updated_at = Some(Utc::now().to_rfc3339());
        self.db.set_trip(&trip).await?;

        tracing::info!(
            trip_id,
            destination = %consensus.most_common_destination,
            start = %consensus.trip_start_date,
            end = %consensus.trip_end_date,
            "Consensus computed"
        );

        Ok(consensus)
    }

    /// Generate (or regenerate) the candidate itineraries for a trip.
    ///
    /// Create-or-replace: an existing recommendation set keeps its
    /// identity and gets a fresh itinerary list; any votes on the old
    /// candidates are discarded with them.
    pub async fn generate(&self, trip_id: &str) -> Result<RecommendationSet> {
        let trip = self.load_trip(trip_id).await?;

        let all_complete = trip
            .participants
            .iter()
            .all(|p| p.preference.as_ref().is_some_and(|pref| pref.is_complete()));
        if !all_complete {
            return Err(AppError::IncompleteInput(
                "all participants must submit preferred destinations, categories, \
                 budget range, and available dates"
                    .to_string(),
            ));
        }

        let consensus = trip.consensus.clone().ok_or_else(|| {
            AppError::BadRequest(
                "group consensus has not been computed for this trip".to_string(),
            )
        })?;

        let filtered = self.catalog.filter_for_consensus(&consensus);
        if filtered.is_empty() {
            return Err(AppError::BadRequest(format!(
                "no catalog places match destination {} with the consensus categories",
                consensus.most_common_destination
            )));
        }

        let place_count = filtered.len();
        let partitioned = itinerary::partition_places(filtered, &mut rand::thread_rng());
        let itineraries: Vec<CandidateItinerary> = partitioned
            .into_iter()
            .enumerate()
            .map(|(i, places)| CandidateItinerary {
                id: Uuid::new_v4().to_string(),
                name: format!("Recommendation {}", i + 1),
                places,
                votes: vec![],
            })
            .collect();

        let now = Utc::now().to_rfc3339();
        let existing = self.db.recommendation_sets_for_trip(trip_id).await?;

        let set = match existing.into_iter().next() {
            Some(live) => {
                tracing::info!(
                    trip_id,
                    set_id = %live.id,
                    place_count,
                    "Replacing existing recommendation set"
                );
                RecommendationSet {
                    id: live.id,
                    trip_id: trip_id.to_string(),
                    itineraries,
                    created_at: live.created_at,
                    updated_at: Some(now),
                }
            }
            None => {
                let set_id = Uuid::new_v4().to_string();
                tracing::info!(trip_id, set_id = %set_id, place_count, "Created recommendation set");
                RecommendationSet {
                    id: set_id,
                    trip_id: trip_id.to_string(),
                    itineraries,
                    created_at: now,
                    updated_at: None,
                }
            }
        };

        self.db.set_recommendation_set(&set).await?;
        Ok(set)
    }

    /// Get the live recommendation set for a trip.
    pub async fn get_by_trip(&self, trip_id: &str) -> Result<RecommendationSet> {
        self.db
            .recommendation_sets_for_trip(trip_id)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| {
                AppError::NotFound(format!("No recommendations found for trip {}", trip_id))
            })
    }

    /// Get one candidate itinerary within a trip's set.
    pub async fn get_candidate(
        &self,
        trip_id: &str,
        candidate_id: &str,
    ) -> Result<CandidateItinerary> {
        let set = self.get_by_trip(trip_id).await?;
        set.candidate(candidate_id).cloned().ok_or_else(|| {
            AppError::NotFound(format!(
                "Itinerary {} not found for trip {}",
                candidate_id, trip_id
            ))
        })
    }
}
