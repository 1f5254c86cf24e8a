// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Account registration, login and user lookup routes.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, Result};
use crate::middleware::auth::create_jwt;
use crate::models::user::UserProfile;
use crate::models::User;
use crate::AppState;

/// Session cookie name, mirrored by the auth middleware.
const SESSION_COOKIE: &str = "voyageur_token";

/// Public routes (no token required).
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
}

/// User lookup routes (token required; wired behind the auth
/// middleware in routes/mod.rs).
pub fn user_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/users", get(search_users))
        .route("/users/{user_id}", get(get_user_profile))
}

// ─── Registration ────────────────────────────────────────────

#[derive(Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8))]
    pub password: String,
    #[validate(length(min = 1))]
    pub user_name: String,
}

#[derive(Serialize)]
pub struct RegisterResponse {
    pub user_id: String,
    pub email: String,
    pub user_name: String,
}

/// Create a new account.
async fn register(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>)> {
    payload
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let email = payload.email.trim().to_lowercase();
    if state.db.find_user_by_email(&email).await?.is_some() {
        return Err(AppError::Conflict(format!(
            "email {} is already registered",
            email
        )));
    }

    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(payload.password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Password hashing failed: {}", e)))?
        .to_string();

    let user = User {
        user_id: Uuid::new_v4().to_string(),
        email,
        user_name: payload.user_name,
        password_hash,
        created_at: Utc::now().to_rfc3339(),
    };
    state.db.upsert_user(&user).await?;

    tracing::info!(user_id = %user.user_id, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            user_id: user.user_id,
            email: user.email,
            user_name: user.user_name,
        }),
    ))
}

// ─── Login ───────────────────────────────────────────────────

#[derive(Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub user_id: String,
    pub email: String,
    pub user_name: String,
    pub token: String,
}

/// Verify credentials and mint a session token.
///
/// The token is returned in the body and additionally set as an
/// HTTP-only cookie for browser clients.
async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(payload): Json<LoginRequest>,
) -> Result<(CookieJar, Json<LoginResponse>)> {
    payload
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let email = payload.email.trim().to_lowercase();
    // Same response for unknown email and wrong password
    let user = state
        .db
        .find_user_by_email(&email)
        .await?
        .ok_or(AppError::Unauthorized)?;

    let parsed_hash = PasswordHash::new(&user.password_hash)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Stored hash is invalid: {}", e)))?;
    if Argon2::default()
        .verify_password(payload.password.as_bytes(), &parsed_hash)
        .is_err()
    {
        return Err(AppError::Unauthorized);
    }

    let token = create_jwt(
        &user.user_id,
        &user.user_name,
        &user.email,
        &state.config.jwt_signing_key,
    )?;

    let cookie = Cookie::build((SESSION_COOKIE, token.clone()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build();

    tracing::info!(user_id = %user.user_id, "User logged in");

    Ok((
        jar.add(cookie),
        Json(LoginResponse {
            user_id: user.user_id,
            email: user.email,
            user_name: user.user_name,
            token,
        }),
    ))
}

// ─── User Lookup ─────────────────────────────────────────────

/// Get a user's public profile.
async fn get_user_profile(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<UserProfile>> {
    let user = state
        .db
        .get_user(&user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", user_id)))?;

    Ok(Json(UserProfile::from(&user)))
}

#[derive(Deserialize)]
struct SearchUsersQuery {
    email: String,
}

#[derive(Serialize)]
pub struct SearchUsersResponse {
    pub users: Vec<UserProfile>,
}

/// Find users by exact email (used to invite trip participants).
async fn search_users(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchUsersQuery>,
) -> Result<Json<SearchUsersResponse>> {
    if params.email.trim().is_empty() {
        return Err(AppError::BadRequest(
            "email is required for search".to_string(),
        ));
    }

    let users = state
        .db
        .find_user_by_email(&params.email.trim().to_lowercase())
        .await?
        .map(|u| vec![UserProfile::from(&u)])
        .unwrap_or_default();

    Ok(Json(SearchUsersResponse { users }))
}
