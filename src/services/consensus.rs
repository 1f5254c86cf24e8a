// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Group preference aggregation.
//!
//! Reduces the participants' individual preference records into a single
//! group consensus: one destination, up to three categories, a budget
//! midpoint, and the trip date range.

use std::collections::HashMap;

use chrono::{Days, NaiveDate};

use crate::error::AppError;
use crate::models::{Consensus, Participant, Preference};

const TOP_CATEGORIES: usize = 3;
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Errors from consensus computation.
#[derive(Debug, thiserror::Error)]
pub enum ConsensusError {
    #[error("at least 2 participants are required, got {0}")]
    NotEnoughParticipants(usize),

    #[error("participant {0} has not submitted complete preferences")]
    IncompletePreferences(String),

    #[error("trip duration must be at least 1 day")]
    InvalidDuration,

    #[error("invalid available date: {0}")]
    InvalidDate(String),
}

impl From<ConsensusError> for AppError {
    fn from(err: ConsensusError) -> Self {
        match err {
            ConsensusError::NotEnoughParticipants(_) => AppError::EmptyInput(err.to_string()),
            ConsensusError::IncompletePreferences(_) => AppError::IncompleteInput(err.to_string()),
            ConsensusError::InvalidDuration | ConsensusError::InvalidDate(_) => {
                AppError::BadRequest(err.to_string())
            }
        }
    }
}

/// Occurrence count plus the position of the first occurrence, used for
/// deterministic tie-breaking.
struct Tally {
    count: usize,
    first_seen: usize,
}

fn tally<'a>(values: impl Iterator<Item = &'a str>) -> HashMap<&'a str, Tally> {
    let mut table: HashMap<&str, Tally> = HashMap::new();
    for (idx, value) in values.enumerate() {
        table
            .entry(value)
            .and_modify(|t| t.count += 1)
            .or_insert(Tally {
                count: 1,
                first_seen: idx,
            });
    }
    table
}

/// Compute the group consensus for a trip.
///
/// Requires at least 2 participants, each with a complete preference
/// record. Tie-break rules (deterministic, covered by tests):
/// - destination: highest count; ties go to the value whose first
///   occurrence appears LATEST in submission order
/// - categories: descending count; ties go to the EARLIEST first
///   occurrence
pub fn compute_consensus(
    participants: &[Participant],
    duration: u32,
) -> Result<Consensus, ConsensusError> {
    if duration < 1 {
        return Err(ConsensusError::InvalidDuration);
    }
    if participants.len() < 2 {
        return Err(ConsensusError::NotEnoughParticipants(participants.len()));
    }

    let preferences: Vec<&Preference> = participants
        .iter()
        .map(|p| {
            p.preference
                .as_ref()
                .filter(|pref| pref.is_complete())
                .ok_or_else(|| ConsensusError::IncompletePreferences(p.user_name.clone()))
        })
        .collect::<Result<_, _>>()?;

    let most_common_destination = most_common_destination(&preferences);
    let most_common_categories = top_categories(&preferences);
    let average_budget = average_budget(&preferences);
    let (most_available_dates, trip_start_date, trip_end_date) =
        date_consensus(&preferences, duration)?;

    Ok(Consensus {
        most_common_destination,
        most_common_categories,
        average_budget,
        most_available_dates,
        trip_start_date,
        trip_end_date,
    })
}

fn most_common_destination(preferences: &[&Preference]) -> String {
    let table = tally(
        preferences
            .iter()
            .flat_map(|p| p.preferred_destinations.iter())
            .map(String::as_str),
    );

    table
        .iter()
        .max_by_key(|(_, t)| (t.count, t.first_seen))
        .map(|(value, _)| (*value).to_string())
        .unwrap_or_default()
}

fn top_categories(preferences: &[&Preference]) -> Vec<String> {
    let table = tally(
        preferences
            .iter()
            .flat_map(|p| p.preferred_categories.iter())
            .map(String::as_str),
    );

    let mut ranked: Vec<(&str, Tally)> = table.into_iter().collect();
    ranked.sort_by(|a, b| {
        b.1.count
            .cmp(&a.1.count)
            .then(a.1.first_seen.cmp(&b.1.first_seen))
    });
    ranked.truncate(TOP_CATEGORIES);
    ranked.into_iter().map(|(v, _)| v.to_string()).collect()
}

fn average_budget(preferences: &[&Preference]) -> f64 {
    let n = preferences.len() as f64;
    let mean_min: f64 = preferences.iter().map(|p| p.budget_range[0]).sum::<f64>() / n;
    let mean_max: f64 = preferences.iter().map(|p| p.budget_range[1]).sum::<f64>() / n;
    (mean_min + mean_max) / 2.0
}

/// All dates tied for maximum availability, plus the derived trip range.
fn date_consensus(
    preferences: &[&Preference],
    duration: u32,
) -> Result<(Vec<String>, String, String), ConsensusError> {
    let table = tally(
        preferences
            .iter()
            .flat_map(|p| p.available_dates.iter())
            .map(String::as_str),
    );

    let max_count = table.values().map(|t| t.count).max().unwrap_or(0);
    let mut most_available: Vec<String> = table
        .iter()
        .filter(|(_, t)| t.count == max_count)
        .map(|(date, _)| (*date).to_string())
        .collect();
    // ISO dates sort lexically in calendar order
    most_available.sort();

    let start = most_available
        .first()
        .cloned()
        .ok_or_else(|| ConsensusError::InvalidDate("<empty>".to_string()))?;
    let start_date = NaiveDate::parse_from_str(&start, DATE_FORMAT)
        .map_err(|_| ConsensusError::InvalidDate(start.clone()))?;
    let end_date = start_date
        .checked_add_days(Days::new(u64::from(duration - 1)))
        .ok_or_else(|| ConsensusError::InvalidDate(start.clone()))?;

    Ok((
        most_available,
        start,
        end_date.format(DATE_FORMAT).to_string(),
    ))
}
