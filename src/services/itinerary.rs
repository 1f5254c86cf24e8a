// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Candidate itinerary partitioning and day segmentation.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::{DayPlan, Place};

/// Number of candidate itineraries generated per trip.
pub const ITINERARY_COUNT: usize = 3;

/// Each itinerary is filled to this size before round-robin kicks in.
pub const MIN_PLACES_PER_ITINERARY: usize = 5;

/// Split a filtered place list into [`ITINERARY_COUNT`] candidate lists.
///
/// The input is shuffled (Fisher-Yates via `rand`, so the grouping is
/// intentionally non-deterministic), then itineraries are filled to
/// [`MIN_PLACES_PER_ITINERARY`] one after another; every remaining place
/// at shuffled index `i` goes to itinerary `i % 3`. Undersized input is
/// not an error here: itineraries simply come out short or empty, and
/// callers decide whether that is acceptable.
pub fn partition_places(places: Vec<Place>, rng: &mut impl Rng) -> [Vec<Place>; ITINERARY_COUNT] {
    let mut shuffled = places;
    shuffled.shuffle(rng);

    let mut itineraries: [Vec<Place>; ITINERARY_COUNT] = Default::default();
    for (idx, place) in shuffled.into_iter().enumerate() {
        let slot = itineraries
            .iter()
            .position(|it| it.len() < MIN_PLACES_PER_ITINERARY)
            .unwrap_or(idx % ITINERARY_COUNT);
        itineraries[slot].push(place);
    }
    itineraries
}

/// Segment a winning itinerary into one bucket per trip day.
///
/// `items_per_day = ceil(count / duration)`; day `i` (0-based) receives
/// the slice `[i * items_per_day, (i + 1) * items_per_day)` clipped to
/// the list length, so trailing days may be empty.
pub fn divide_into_days(places: Vec<Place>, duration: u32) -> Vec<DayPlan> {
    let days = duration.max(1) as usize;
    let items_per_day = places.len().div_ceil(days);

    (0..days)
        .map(|i| {
            let start = (i * items_per_day).min(places.len());
            let end = ((i + 1) * items_per_day).min(places.len());
            DayPlan {
                day: (i + 1) as u32,
                places: places[start..end].to_vec(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn places(n: u64) -> Vec<Place> {
        (0..n)
            .map(|id| Place {
                id,
                name: format!("Place {}", id),
                description: String::new(),
                category: "Bahari".to_string(),
                city: "Bali".to_string(),
                price: 10_000.0,
                rating: 4.0,
                location: String::new(),
            })
            .collect()
    }

    fn sorted_ids(itineraries: &[Vec<Place>]) -> Vec<u64> {
        let mut ids: Vec<u64> = itineraries
            .iter()
            .flat_map(|it| it.iter().map(|p| p.id))
            .collect();
        ids.sort_unstable();
        ids
    }

    #[test]
    fn test_partition_covers_all_places_exactly_once() {
        let mut rng = StdRng::seed_from_u64(7);
        let result = partition_places(places(20), &mut rng);

        assert_eq!(sorted_ids(&result), (0..20).collect::<Vec<_>>());
    }

    #[test]
    fn test_partition_balanced_above_minimum() {
        // With 15+ places every itinerary holds the minimum and the
        // round-robin keeps sizes within 1 of each other.
        for n in [15, 16, 17, 18, 21] {
            let mut rng = StdRng::seed_from_u64(n);
            let result = partition_places(places(n), &mut rng);

            let sizes: Vec<usize> = result.iter().map(Vec::len).collect();
            assert_eq!(sizes.iter().sum::<usize>(), n as usize);
            let max = sizes.iter().max().unwrap();
            let min = sizes.iter().min().unwrap();
            assert!(max - min <= 1, "sizes {:?} for n={}", sizes, n);
        }
    }

    #[test]
    fn test_partition_fills_sequentially_below_minimum() {
        let mut rng = StdRng::seed_from_u64(3);
        let result = partition_places(places(8), &mut rng);

        let sizes: Vec<usize> = result.iter().map(Vec::len).collect();
        assert_eq!(sizes, vec![5, 3, 0]);
    }

    #[test]
    fn test_partition_empty_input() {
        let mut rng = StdRng::seed_from_u64(1);
        let result = partition_places(vec![], &mut rng);

        assert!(result.iter().all(Vec::is_empty));
    }

    #[test]
    fn test_divide_into_days_even_split() {
        let buckets = divide_into_days(places(12), 3);

        let sizes: Vec<usize> = buckets.iter().map(|d| d.places.len()).collect();
        assert_eq!(sizes, vec![4, 4, 4]);
        assert_eq!(
            buckets.iter().map(|d| d.day).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
    }

    #[test]
    fn test_divide_into_days_remainder_truncates_last_day() {
        let buckets = divide_into_days(places(10), 3);

        let sizes: Vec<usize> = buckets.iter().map(|d| d.places.len()).collect();
        assert_eq!(sizes, vec![4, 4, 2]);
    }

    #[test]
    fn test_divide_into_days_trailing_days_may_be_empty() {
        let buckets = divide_into_days(places(2), 3);

        let sizes: Vec<usize> = buckets.iter().map(|d| d.places.len()).collect();
        assert_eq!(sizes, vec![1, 1, 0]);
    }

    #[test]
    fn test_divide_preserves_order_within_and_across_days() {
        let buckets = divide_into_days(places(7), 2);

        let flattened: Vec<u64> = buckets
            .iter()
            .flat_map(|d| d.places.iter().map(|p| p.id))
            .collect();
        assert_eq!(flattened, vec![0, 1, 2, 3, 4, 5, 6]);
    }
}
