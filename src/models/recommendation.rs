// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Candidate itineraries and the per-trip recommendation set.

use serde::{Deserialize, Serialize};

use crate::models::Place;

/// One proposed itinerary participants can vote on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateItinerary {
    /// Itinerary ID
    pub id: String,
    /// Display label ("Recommendation 1" .. "Recommendation 3")
    pub name: String,
    /// Ordered places to visit
    pub places: Vec<Place>,
    /// User IDs that voted for this itinerary
    #[serde(default)]
    pub votes: Vec<String>,
}

impl CandidateItinerary {
    pub fn vote_count(&self) -> usize {
        self.votes.len()
    }
}

/// The live set of candidate itineraries for a trip.
///
/// At most one set exists per trip; regeneration replaces the itinerary
/// list in place, finalization collapses it to the winner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationSet {
    /// Set ID (also used as document ID)
    pub id: String,
    /// Owning trip
    pub trip_id: String,
    /// Candidate itineraries (3 until finalization)
    pub itineraries: Vec<CandidateItinerary>,
    /// When the set was first created (RFC3339)
    pub created_at: String,
    /// Last regeneration/vote/finalization timestamp (RFC3339)
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl RecommendationSet {
    pub fn candidate(&self, candidate_id: &str) -> Option<&CandidateItinerary> {
        self.itineraries.iter().find(|it| it.id == candidate_id)
    }

    /// The candidate this user voted for, if any.
    pub fn voted_candidate(&self, user_id: &str) -> Option<&CandidateItinerary> {
        self.itineraries
            .iter()
            .find(|it| it.votes.iter().any(|v| v == user_id))
    }

    /// Build a new set with `user_id`'s vote appended to `candidate_id`.
    ///
    /// Returns the updated set and the candidate's new vote count, or
    /// `None` when the candidate does not exist. Callers are responsible
    /// for the one-vote-per-participant check via [`Self::voted_candidate`].
    pub fn with_vote(&self, candidate_id: &str, user_id: &str) -> Option<(Self, usize)> {
        let mut next = self.clone();
        let candidate = next
            .itineraries
            .iter_mut()
            .find(|it| it.id == candidate_id)?;
        candidate.votes.push(user_id.to_string());
        let count = candidate.votes.len();
        Some((next, count))
    }

    /// Build a new set containing only the given candidate.
    pub fn collapsed_to(&self, candidate_id: &str) -> Self {
        let mut next = self.clone();
        next.itineraries.retain(|it| it.id == candidate_id);
        next
    }
}

/// Pick the winning candidate across all sets for a trip.
///
/// The winner must have strictly more votes than every candidate seen
/// before it: on a tie the first candidate in iteration order (sets in
/// query order, candidates in list order) keeps the lead. Returns `None`
/// when no candidate has received a vote.
pub fn select_winner(sets: &[RecommendationSet]) -> Option<&CandidateItinerary> {
    let mut best: Option<&CandidateItinerary> = None;
    for set in sets {
        for candidate in &set.itineraries {
            if candidate.vote_count() > best.map_or(0, CandidateItinerary::vote_count) {
                best = Some(candidate);
            }
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(id: &str, votes: &[&str]) -> CandidateItinerary {
        CandidateItinerary {
            id: id.to_string(),
            name: format!("Recommendation {}", id),
            places: vec![],
            votes: votes.iter().map(|v| v.to_string()).collect(),
        }
    }

    fn set(candidates: Vec<CandidateItinerary>) -> RecommendationSet {
        RecommendationSet {
            id: "rec-1".to_string(),
            trip_id: "trip-1".to_string(),
            itineraries: candidates,
            created_at: "2026-08-01T00:00:00Z".to_string(),
            updated_at: None,
        }
    }

    #[test]
    fn test_with_vote_leaves_original_untouched() {
        let original = set(vec![candidate("a", &[]), candidate("b", &["u9"])]);

        let (updated, count) = original.with_vote("a", "u1").unwrap();

        assert_eq!(count, 1);
        assert_eq!(updated.candidate("a").unwrap().votes, vec!["u1"]);
        assert!(original.candidate("a").unwrap().votes.is_empty());
    }

    #[test]
    fn test_with_vote_unknown_candidate() {
        let original = set(vec![candidate("a", &[])]);
        assert!(original.with_vote("nope", "u1").is_none());
    }

    #[test]
    fn test_voted_candidate_scans_all_candidates() {
        let s = set(vec![candidate("a", &["u1"]), candidate("b", &["u2"])]);

        assert_eq!(s.voted_candidate("u2").unwrap().id, "b");
        assert!(s.voted_candidate("u3").is_none());
    }

    #[test]
    fn test_select_winner_highest_count() {
        let s = set(vec![
            candidate("a", &["u1", "u2", "u3"]),
            candidate("b", &["u4", "u5", "u6", "u7", "u8", "u9", "u10"]),
            candidate("c", &["u11", "u12"]),
        ]);

        let winner = select_winner(std::slice::from_ref(&s)).unwrap();
        assert_eq!(winner.id, "b");
    }

    #[test]
    fn test_select_winner_tie_goes_to_first() {
        let s = set(vec![
            candidate("a", &["u1"]),
            candidate("b", &["u2"]),
            candidate("c", &[]),
        ]);

        let winner = select_winner(std::slice::from_ref(&s)).unwrap();
        assert_eq!(winner.id, "a");
    }

    #[test]
    fn test_select_winner_no_votes() {
        let s = set(vec![candidate("a", &[]), candidate("b", &[])]);
        assert!(select_winner(std::slice::from_ref(&s)).is_none());
    }

    #[test]
    fn test_collapsed_to_keeps_only_winner() {
        let s = set(vec![
            candidate("a", &["u1"]),
            candidate("b", &[]),
            candidate("c", &[]),
        ]);

        let collapsed = s.collapsed_to("a");

        assert_eq!(collapsed.id, s.id);
        assert_eq!(collapsed.itineraries.len(), 1);
        assert_eq!(collapsed.itineraries[0].id, "a");
    }
}
