// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! End-to-end planning flow over the pure planning logic:
//! consensus -> catalog filter -> partition -> votes -> finalize split.

use rand::rngs::StdRng;
use rand::SeedableRng;

use voyageur::models::recommendation::select_winner;
use voyageur::models::{CandidateItinerary, Participant, Preference, RecommendationSet};
use voyageur::services::consensus::compute_consensus;
use voyageur::services::itinerary::{divide_into_days, partition_places};

mod common;

fn participant(user_id: &str, destinations: &[&str], dates: &[&str]) -> Participant {
    Participant {
        user_id: user_id.to_string(),
        user_name: format!("User {}", user_id),
        email: format!("{}@example.com", user_id),
        preference: Some(Preference {
            preferred_destinations: destinations.iter().map(|s| s.to_string()).collect(),
            preferred_categories: vec!["Bahari".to_string(), "Budaya".to_string()],
            budget_range: [100_000.0, 500_000.0],
            available_dates: dates.iter().map(|s| s.to_string()).collect(),
        }),
    }
}

#[test]
fn test_full_planning_flow() {
    let duration = 3u32;
    let participants = vec![
        participant("u1", &["Bali"], &["2026-09-10", "2026-09-11"]),
        participant("u2", &["Bali", "Lombok"], &["2026-09-10", "2026-09-12"]),
    ];

    // 1. Consensus: both share Bali, so Bali wins.
    let consensus = compute_consensus(&participants, duration).unwrap();
    assert_eq!(consensus.most_common_destination, "Bali");
    assert!(consensus
        .most_common_categories
        .contains(&"Bahari".to_string()));
    assert!(consensus
        .most_common_categories
        .contains(&"Budaya".to_string()));
    assert_eq!(consensus.trip_start_date, "2026-09-10");
    assert_eq!(consensus.trip_end_date, "2026-09-12");

    // 2. Filter: the 20-place catalog holds exactly 8 Bali beach/temple
    // entries.
    let catalog = common::test_catalog();
    let filtered = catalog.filter_for_consensus(&consensus);
    assert_eq!(filtered.len(), 8);
    assert!(filtered.iter().all(|p| p.city == "Bali"));

    // 3. Partition: 3 itineraries covering all 8 places exactly once.
    let mut rng = StdRng::seed_from_u64(42);
    let partitioned = partition_places(filtered, &mut rng);
    let mut covered: Vec<u64> = partitioned
        .iter()
        .flat_map(|it| it.iter().map(|p| p.id))
        .collect();
    covered.sort_unstable();
    assert_eq!(covered, (1..=8).collect::<Vec<_>>());

    // 4. Wrap as a recommendation set and let each participant vote for
    // a different candidate.
    let set = RecommendationSet {
        id: "rec-1".to_string(),
        trip_id: "trip-1".to_string(),
        itineraries: partitioned
            .into_iter()
            .enumerate()
            .map(|(i, places)| CandidateItinerary {
                id: format!("cand-{}", i + 1),
                name: format!("Recommendation {}", i + 1),
                places,
                votes: vec![],
            })
            .collect(),
        created_at: "2026-08-07T00:00:00Z".to_string(),
        updated_at: None,
    };

    let (set, count1) = set.with_vote("cand-1", "u1").unwrap();
    assert_eq!(count1, 1);
    assert!(set.voted_candidate("u1").is_some());

    let (set, count2) = set.with_vote("cand-2", "u2").unwrap();
    assert_eq!(count2, 1);

    // 5. Finalize: with a 1-1 tie the first candidate in list order
    // wins; the schedule covers every winner place across `duration`
    // day buckets.
    let sets = vec![set];
    let winner = select_winner(&sets).unwrap();
    assert_eq!(winner.id, "cand-1");

    let winner_places = winner.places.clone();
    let schedule = divide_into_days(winner_places.clone(), duration);
    assert_eq!(schedule.len(), duration as usize);
    let scheduled: usize = schedule.iter().map(|d| d.places.len()).sum();
    assert_eq!(scheduled, winner_places.len());

    // The collapsed set keeps only the winner.
    let collapsed = sets[0].collapsed_to(&winner.id);
    assert_eq!(collapsed.itineraries.len(), 1);
    assert_eq!(collapsed.itineraries[0].id, "cand-1");
}

#[test]
fn test_vote_ledger_uniqueness_over_vote_sequences() {
    let set = RecommendationSet {
        id: "rec-1".to_string(),
        trip_id: "trip-1".to_string(),
        itineraries: (1..=3)
            .map(|i| CandidateItinerary {
                id: format!("cand-{}", i),
                name: format!("Recommendation {}", i),
                places: vec![],
                votes: vec![],
            })
            .collect(),
        created_at: "2026-08-07T00:00:00Z".to_string(),
        updated_at: None,
    };

    // Replay a vote sequence the way the voting service does: check the
    // ledger, then append. The second vote by the same user never lands.
    let voters = ["u1", "u2", "u1", "u3", "u2"];
    let targets = ["cand-1", "cand-2", "cand-3", "cand-1", "cand-1"];

    let mut current = set;
    let mut rejected = 0;
    for (voter, target) in voters.into_iter().zip(targets) {
        if current.voted_candidate(voter).is_some() {
            rejected += 1;
            continue;
        }
        let (next, _) = current.with_vote(target, voter).unwrap();
        current = next;
    }

    assert_eq!(rejected, 2);

    // No user id appears in more than one candidate's vote list.
    for voter in ["u1", "u2", "u3"] {
        let appearances = current
            .itineraries
            .iter()
            .filter(|it| it.votes.iter().any(|v| v == voter))
            .count();
        assert_eq!(appearances, 1, "voter {} appears {} times", voter, appearances);
    }

    // Final tallies: u1 -> cand-1, u2 -> cand-2, u3 -> cand-1.
    assert_eq!(current.candidate("cand-1").unwrap().vote_count(), 2);
    assert_eq!(current.candidate("cand-2").unwrap().vote_count(), 1);
    assert_eq!(current.candidate("cand-3").unwrap().vote_count(), 0);
}
