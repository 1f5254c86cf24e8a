// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Trip, participant, preference and voting routes.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Extension, Json, Router,
};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{DayPlan, Participant, Preference, Trip};
use crate::services::VoteStatus;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/trips", post(create_trip).get(list_trips))
        .route(
            "/trips/{trip_id}",
            get(get_trip).put(update_trip).delete(delete_trip),
        )
        .route(
            "/trips/{trip_id}/participants",
            get(get_participants).post(add_participant),
        )
        .route(
            "/trips/{trip_id}/participants/{user_id}",
            delete(remove_participant),
        )
        .route(
            "/trips/{trip_id}/participants/{user_id}/preferences",
            put(submit_preferences),
        )
        .route("/trips/{trip_id}/vote/{itinerary_id}", post(cast_vote))
        .route("/trips/{trip_id}/vote-status", get(vote_status))
        .route("/trips/{trip_id}/finalize", post(finalize_voting))
        .route("/trips/{trip_id}/schedule", get(get_schedule))
}

async fn load_trip(state: &AppState, trip_id: &str) -> Result<Trip> {
    state
        .db
        .get_trip(trip_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Trip {} not found", trip_id)))
}

// ─── Trip CRUD ───────────────────────────────────────────────

#[derive(Deserialize, Validate)]
pub struct CreateTripRequest {
    #[validate(length(min = 1))]
    pub title: String,
    #[validate(range(min = 1))]
    pub duration: u32,
    #[validate(length(min = 1))]
    pub description: String,
}

/// Create a trip; the creator becomes the first participant.
async fn create_trip(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<CreateTripRequest>,
) -> Result<(StatusCode, Json<Trip>)> {
    payload
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let trip = Trip {
        id: Uuid::new_v4().to_string(),
        title: payload.title,
        duration: payload.duration,
        description: payload.description,
        created_by: user.user_id.clone(),
        created_at: Utc::now().to_rfc3339(),
        updated_at: None,
        participants: vec![Participant {
            user_id: user.user_id,
            user_name: user.user_name,
            email: user.user_email,
            preference: None,
        }],
        consensus: None,
        finalized_itinerary: None,
    };

    state.db.set_trip(&trip).await?;
    tracing::info!(trip_id = %trip.id, "Trip created");

    Ok((StatusCode::CREATED, Json(trip)))
}

#[derive(Serialize)]
pub struct TripsResponse {
    pub trips: Vec<Trip>,
}

/// List trips the authenticated user created or participates in.
async fn list_trips(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<TripsResponse>> {
    let trips = state
        .db
        .list_trips()
        .await?
        .into_iter()
        .filter(|t| t.created_by == user.user_id || t.is_participant(&user.user_id))
        .collect();

    Ok(Json(TripsResponse { trips }))
}

/// Get trip details.
async fn get_trip(
    State(state): State<Arc<AppState>>,
    Path(trip_id): Path<String>,
) -> Result<Json<Trip>> {
    Ok(Json(load_trip(&state, &trip_id).await?))
}

#[derive(Deserialize, Validate)]
pub struct UpdateTripRequest {
    #[validate(length(min = 1))]
    pub title: Option<String>,
    #[validate(range(min = 1))]
    pub duration: Option<u32>,
    #[validate(length(min = 1))]
    pub description: Option<String>,
}

/// Update trip metadata (creator only).
async fn update_trip(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(trip_id): Path<String>,
    Json(payload): Json<UpdateTripRequest>,
) -> Result<Json<Trip>> {
    payload
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;
    if payload.title.is_none() && payload.duration.is_none() && payload.description.is_none() {
        return Err(AppError::BadRequest(
            "no data provided for update".to_string(),
        ));
    }

    let mut trip = load_trip(&state, &trip_id).await?;
    if trip.created_by != user.user_id {
        return Err(AppError::Forbidden(
            "only the trip creator may update the trip".to_string(),
        ));
    }

    if let Some(title) = payload.title {
        trip.title = title;
    }
    if let Some(duration) = payload.duration {
        trip.duration = duration;
    }
    if let Some(description) = payload.description {
        trip.description = description;
    }
    trip.updated_at = Some(Utc::now().to_rfc3339());

    state.db.set_trip(&trip).await?;
    Ok(Json(trip))
}

#[derive(Serialize)]
pub struct DeleteTripResponse {
    pub deleted: bool,
}

/// Delete a trip (creator only).
async fn delete_trip(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(trip_id): Path<String>,
) -> Result<Json<DeleteTripResponse>> {
    let trip = load_trip(&state, &trip_id).await?;
    if trip.created_by != user.user_id {
        return Err(AppError::Forbidden(
            "only the trip creator may delete the trip".to_string(),
        ));
    }

    state.db.delete_trip(&trip_id).await?;
    tracing::info!(trip_id = %trip_id, "Trip deleted");

    Ok(Json(DeleteTripResponse { deleted: true }))
}

// ─── Participants ────────────────────────────────────────────

#[derive(Serialize)]
pub struct ParticipantsResponse {
    pub participants: Vec<Participant>,
}

/// List a trip's participants.
async fn get_participants(
    State(state): State<Arc<AppState>>,
    Path(trip_id): Path<String>,
) -> Result<Json<ParticipantsResponse>> {
    let trip = load_trip(&state, &trip_id).await?;
    Ok(Json(ParticipantsResponse {
        participants: trip.participants,
    }))
}

#[derive(Deserialize, Validate)]
pub struct AddParticipantRequest {
    #[validate(length(min = 1))]
    pub user_id: String,
    #[validate(length(min = 1))]
    pub user_name: String,
    #[validate(email)]
    pub email: String,
}

/// Add a participant to a trip. Duplicates are rejected.
async fn add_participant(
    State(state): State<Arc<AppState>>,
    Path(trip_id): Path<String>,
    Json(payload): Json<AddParticipantRequest>,
) -> Result<Json<ParticipantsResponse>> {
    payload
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let mut trip = load_trip(&state, &trip_id).await?;
    if trip.is_participant(&payload.user_id) {
        return Err(AppError::Conflict(format!(
            "user {} is already a participant in this trip",
            payload.user_id
        )));
    }

    trip.participants.push(Participant {
        user_id: payload.user_id,
        user_name: payload.user_name,
        email: payload.email,
        preference: None,
    });
    trip.updated_at = Some(Utc::now().to_rfc3339());

    state.db.set_trip(&trip).await?;
    Ok(Json(ParticipantsResponse {
        participants: trip.participants,
    }))
}

#[derive(Serialize)]
pub struct RemoveParticipantResponse {
    pub removed: String,
}

/// Remove a participant from a trip.
async fn remove_participant(
    State(state): State<Arc<AppState>>,
    Path((trip_id, user_id)): Path<(String, String)>,
) -> Result<Json<RemoveParticipantResponse>> {
    let mut trip = load_trip(&state, &trip_id).await?;

    let index = trip
        .participants
        .iter()
        .position(|p| p.user_id == user_id)
        .ok_or_else(|| {
            AppError::NotFound(format!("Participant {} not found in this trip", user_id))
        })?;

    let removed = trip.participants.remove(index);
    trip.updated_at = Some(Utc::now().to_rfc3339());

    state.db.set_trip(&trip).await?;
    Ok(Json(RemoveParticipantResponse {
        removed: removed.user_name,
    }))
}

// ─── Preferences ─────────────────────────────────────────────

#[derive(Deserialize, Validate)]
pub struct PreferenceRequest {
    #[validate(length(min = 1))]
    pub preferred_destinations: Vec<String>,
    #[validate(length(min = 1))]
    pub preferred_categories: Vec<String>,
    pub budget_range: [f64; 2],
    #[validate(length(min = 1))]
    pub available_dates: Vec<String>,
}

/// Submit (or replace) a participant's travel preferences.
///
/// Resubmission overwrites the whole record; there is no partial merge.
async fn submit_preferences(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path((trip_id, user_id)): Path<(String, String)>,
    Json(payload): Json<PreferenceRequest>,
) -> Result<Json<Participant>> {
    payload
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;
    if payload.budget_range[0] > payload.budget_range[1] {
        return Err(AppError::BadRequest(
            "budget_range minimum must not exceed the maximum".to_string(),
        ));
    }
    for date in &payload.available_dates {
        NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .map_err(|_| AppError::BadRequest(format!("invalid available date: {}", date)))?;
    }

    if user.user_id != user_id {
        return Err(AppError::Forbidden(
            "participants may only submit their own preferences".to_string(),
        ));
    }

    let mut trip = load_trip(&state, &trip_id).await?;
    let participant = trip.participant_mut(&user_id).ok_or_else(|| {
        AppError::NotFound(format!("Participant {} not found in this trip", user_id))
    })?;

    participant.preference = Some(Preference {
        preferred_destinations: payload.preferred_destinations,
        preferred_categories: payload.preferred_categories,
        budget_range: payload.budget_range,
        available_dates: payload.available_dates,
    });
    let updated = participant.clone();
    trip.updated_at = Some(Utc::now().to_rfc3339());

    state.db.set_trip(&trip).await?;
    Ok(Json(updated))
}

// ─── Voting ──────────────────────────────────────────────────

#[derive(Serialize)]
pub struct VoteResponse {
    pub trip_id: String,
    pub itinerary_id: String,
    pub votes: usize,
}

/// Vote for a candidate itinerary. One vote per participant per trip.
async fn cast_vote(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path((trip_id, itinerary_id)): Path<(String, String)>,
) -> Result<Json<VoteResponse>> {
    let votes = state
        .voting
        .cast_vote(&trip_id, &user.user_id, &itinerary_id)
        .await?;

    Ok(Json(VoteResponse {
        trip_id,
        itinerary_id,
        votes,
    }))
}

/// Report whether the authenticated user has voted in this trip.
async fn vote_status(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(trip_id): Path<String>,
) -> Result<Json<VoteStatus>> {
    let status = state.voting.vote_status(&trip_id, &user.user_id).await?;
    Ok(Json(status))
}

#[derive(Serialize)]
pub struct ScheduleResponse {
    pub trip_id: String,
    pub schedule: Vec<DayPlan>,
}

/// Close the vote and produce the day-by-day schedule.
async fn finalize_voting(
    State(state): State<Arc<AppState>>,
    Path(trip_id): Path<String>,
) -> Result<Json<ScheduleResponse>> {
    let schedule = state.voting.finalize(&trip_id).await?;
    Ok(Json(ScheduleResponse { trip_id, schedule }))
}

/// Get the finalized schedule.
async fn get_schedule(
    State(state): State<Arc<AppState>>,
    Path(trip_id): Path<String>,
) -> Result<Json<ScheduleResponse>> {
    let schedule = state.voting.final_schedule(&trip_id).await?;
    Ok(Json(ScheduleResponse { trip_id, schedule }))
}
