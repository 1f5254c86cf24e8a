// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Voting ledger and finalization.
//!
//! Every vote and finalization is a read-then-write sequence over the
//! trip's recommendation set, so both run behind a per-trip async lock:
//! without it two concurrent votes by the same participant could each
//! pass the "not yet voted" check before either write lands.

use std::sync::Arc;

use chrono::Utc;
use dashmap::DashMap;
use serde::Serialize;
use tokio::sync::Mutex;

use crate::db::FirestoreDb;
use crate::error::{AppError, Result};
use crate::models::recommendation::select_winner;
use crate::models::{DayPlan, RecommendationSet, Trip};
use crate::services::itinerary::divide_into_days;

/// Per-trip locks serializing vote/finalize read-modify-write cycles
/// within this instance. Shared across all `VotingService` clones.
pub type TripLocks = Arc<DashMap<String, Arc<Mutex<()>>>>;

/// Outcome of a vote-status query.
///
/// "No recommendations exist yet" and "recommendations exist but this
/// user has not voted" are distinct situations; both report
/// `voted: false` but differ in `recommendations_available`.
#[derive(Debug, Clone, Serialize)]
pub struct VoteStatus {
    pub voted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub candidate_id: Option<String>,
    pub recommendations_available: bool,
}

/// Enforces one-vote-per-participant and runs finalization.
#[derive(Clone)]
pub struct VotingService {
    db: FirestoreDb,
    trip_locks: TripLocks,
}

impl VotingService {
    /// The `trip_locks` map should be shared across all `VotingService`
    /// instances within this server process.
    pub fn new(db: FirestoreDb, trip_locks: TripLocks) -> Self {
        Self { db, trip_locks }
    }

    async fn load_trip(&self, trip_id: &str) -> Result<Trip> {
        self.db
            .get_trip(trip_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Trip {} not found", trip_id)))
    }

    async fn load_sets(&self, trip_id: &str) -> Result<Vec<RecommendationSet>> {
        self.db.recommendation_sets_for_trip(trip_id).await
    }

    fn trip_lock(&self, trip_id: &str) -> Arc<Mutex<()>> {
        self.trip_locks
            .entry(trip_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Record a participant's vote for one candidate itinerary.
    ///
    /// A participant gets exactly one vote per trip, across all
    /// candidates, with no change-vote operation. Returns the
    /// candidate's new vote count.
    pub async fn cast_vote(
        &self,
        trip_id: &str,
        voter_id: &str,
        candidate_id: &str,
    ) -> Result<usize> {
        let lock = self.trip_lock(trip_id);
        let _guard = lock.lock().await;

        let trip = self.load_trip(trip_id).await?;
        if !trip.is_participant(voter_id) {
            return Err(AppError::Forbidden(
                "only trip participants may vote".to_string(),
            ));
        }

        let sets = self.load_sets(trip_id).await?;
        let set = sets.into_iter().next().ok_or_else(|| {
            AppError::NotFound(format!("No recommendations found for trip {}", trip_id))
        })?;

        if let Some(previous) = set.voted_candidate(voter_id) {
            return Err(AppError::AlreadyVoted(format!(
                "participant {} already voted for itinerary {}",
                voter_id, previous.id
            )));
        }

        let (mut updated, count) = set.with_vote(candidate_id, voter_id).ok_or_else(|| {
            AppError::NotFound(format!(
                "Itinerary {} not found for trip {}",
                candidate_id, trip_id
            ))
        })?;
        updated.updated_at = Some(Utc::now().to_rfc3339());

        self.db.set_recommendation_set(&updated).await?;

        tracing::info!(trip_id, voter_id, candidate_id, votes = count, "Vote recorded");
        Ok(count)
    }

    /// Report whether a participant has voted, and for which candidate.
    ///
    /// Never fails just because no recommendation set exists; that case
    /// reports "not voted" with `recommendations_available: false`.
    pub async fn vote_status(&self, trip_id: &str, user_id: &str) -> Result<VoteStatus> {
        self.load_trip(trip_id).await?;

        let sets = self.load_sets(trip_id).await?;
        let Some(set) = sets.first() else {
            return Ok(VoteStatus {
                voted: false,
                candidate_id: None,
                recommendations_available: false,
            });
        };

        Ok(match set.voted_candidate(user_id) {
            Some(candidate) => VoteStatus {
                voted: true,
                candidate_id: Some(candidate.id.clone()),
                recommendations_available: true,
            },
            None => VoteStatus {
                voted: false,
                candidate_id: None,
                recommendations_available: true,
            },
        })
    }

    /// Close the vote: pick the winning itinerary, split it across the
    /// trip's days, collapse the recommendation set to the winner and
    /// persist the schedule onto the trip in one transaction.
    ///
    /// A trip that already carries a finalized schedule returns it
    /// unchanged; the schedule is immutable once written.
    pub async fn finalize(&self, trip_id: &str) -> Result<Vec<DayPlan>> {
        let lock = self.trip_lock(trip_id);
        let _guard = lock.lock().await;

        let mut trip = self.load_trip(trip_id).await?;
        if let Some(schedule) = trip.finalized_itinerary.take() {
            tracing::debug!(trip_id, "Trip already finalized, returning stored schedule");
            return Ok(schedule);
        }

        let sets = self.load_sets(trip_id).await?;
        if sets.is_empty() {
            return Err(AppError::NotFound(format!(
                "No recommendations found for trip {}",
                trip_id
            )));
        }

        let winner = select_winner(&sets).ok_or_else(|| {
            AppError::NoVotes("no itinerary has received any votes".to_string())
        })?;
        let winner_id = winner.id.clone();
        let schedule = divide_into_days(winner.places.clone(), trip.duration);

        let now = Utc::now().to_rfc3339();
        let collapsed: Vec<RecommendationSet> = sets
            .iter()
            .map(|set| {
                let mut next = set.collapsed_to(&winner_id);
                next.updated_at = Some(now.clone());
                next
            })
            .collect();

        trip.finalized_itinerary = Some(schedule.clone());
        trip.updated_at = Some(now);
        self.db.commit_finalization(&trip, &collapsed).await?;

        tracing::info!(
            trip_id,
            winner = %winner_id,
            days = schedule.len(),
            "Voting finalized"
        );

        Ok(schedule)
    }

    /// Get the finalized schedule for a trip.
    pub async fn final_schedule(&self, trip_id: &str) -> Result<Vec<DayPlan>> {
        let trip = self.load_trip(trip_id).await?;
        trip.finalized_itinerary.ok_or_else(|| {
            AppError::NotFound(format!("No finalized itinerary found for trip {}", trip_id))
        })
    }
}
