//! `/users` resource handlers.
//!
//! Request bodies and query strings are extracted as `Result`s so that
//! malformed input is answered with the same JSON error body as a rule
//! violation. Update and patch check the target email first: an unknown
//! user is a 404 whatever the body looks like.

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
};
use chrono::NaiveDate;
use serde::Deserialize;

use user_registry_core::{User, UserPatch, UserPayload, UserReplacement};

use crate::error::Result;
use crate::services::UserError;
use crate::state::AppState;

/// Query parameters for the birth date search.
#[derive(Debug, Deserialize)]
pub struct BirthDateRange {
    /// Exclusive lower bound (ISO date).
    pub from: NaiveDate,
    /// Exclusive upper bound (ISO date).
    pub to: NaiveDate,
}

/// Unwrap a body addressed to `email`, preferring not-found over a rejection.
async fn body_for<T>(
    state: &AppState,
    email: &str,
    body: std::result::Result<Json<T>, JsonRejection>,
) -> Result<T> {
    match body {
        Ok(Json(body)) => Ok(body),
        Err(rejection) => {
            if state.users().exists(email).await {
                Err(rejection.into())
            } else {
                Err(UserError::NotFound(email.to_string()).into())
            }
        }
    }
}

/// Create a user.
///
/// POST /users
///
/// # Errors
///
/// Returns 400 if the body is malformed, a field rule fails, or the user is
/// younger than the configured minimum age.
pub async fn create(
    State(state): State<AppState>,
    payload: std::result::Result<Json<UserPayload>, JsonRejection>,
) -> Result<(StatusCode, &'static str)> {
    let Json(payload) = payload?;
    state.users().create(payload).await?;
    Ok((StatusCode::CREATED, "User created successfully"))
}

/// List every user in insertion order.
///
/// GET /users
pub async fn index(State(state): State<AppState>) -> Json<Vec<User>> {
    Json(state.users().list().await)
}

/// Users born strictly between `from` and `to`.
///
/// GET /users/search?from=YYYY-MM-DD&to=YYYY-MM-DD
///
/// # Errors
///
/// Returns 400 if either date is missing or malformed, or if `from` is after
/// `to`.
pub async fn search(
    State(state): State<AppState>,
    range: std::result::Result<Query<BirthDateRange>, QueryRejection>,
) -> Result<Json<Vec<User>>> {
    let Query(range) = range?;
    let users = state
        .users()
        .search_by_birth_date(range.from, range.to)
        .await?;
    Ok(Json(users))
}

/// Replace every field except the email. Fields left out of the body are
/// cleared.
///
/// PUT /users/{email}
///
/// # Errors
///
/// Returns 404 if no user has the email, otherwise 400 if the body is
/// malformed.
pub async fn update(
    State(state): State<AppState>,
    email: std::result::Result<Path<String>, PathRejection>,
    replacement: std::result::Result<Json<UserReplacement>, JsonRejection>,
) -> Result<&'static str> {
    let Path(email) = email?;
    let replacement = body_for(&state, &email, replacement).await?;
    state.users().update(&email, replacement).await?;
    Ok("User updated successfully")
}

/// Replace only the fields present in the body.
///
/// PATCH /users/{email}
///
/// # Errors
///
/// Returns 404 if no user has the email, otherwise 400 if the body is
/// malformed.
pub async fn patch(
    State(state): State<AppState>,
    email: std::result::Result<Path<String>, PathRejection>,
    patch: std::result::Result<Json<UserPatch>, JsonRejection>,
) -> Result<&'static str> {
    let Path(email) = email?;
    let patch = body_for(&state, &email, patch).await?;
    state.users().patch(&email, patch).await?;
    Ok("User patched successfully")
}

/// Remove every user with the email.
///
/// DELETE /users/{email}
///
/// # Errors
///
/// Returns 404 if no user has the email.
pub async fn delete(
    State(state): State<AppState>,
    email: std::result::Result<Path<String>, PathRejection>,
) -> Result<&'static str> {
    let Path(email) = email?;
    state.users().delete(&email).await?;
    Ok("User deleted successfully")
}
