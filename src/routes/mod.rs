// ABOUTME: Route module organization for the GymTrack HTTP API
// ABOUTME: One route group per domain plus shared caller authentication and id parsing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Routes
//!
//! Each domain module owns a `XRoutes` struct whose `routes` function returns
//! a router with its state already applied. Handlers are thin: authenticate,
//! parse, delegate to `services`, shape the JSON response.

/// Login, session, and logout
pub mod auth;
/// Exercise library
pub mod exercises;
/// Gym branding and settings
pub mod gyms;
/// Liveness and readiness probes
pub mod health;
/// Role-specific home page
pub mod home;
/// Progress charts
pub mod progress;
/// Accounts, clients, and trainers
pub mod users;
/// Workouts, sets, and rounds
pub mod workouts;

pub use auth::AuthRoutes;
pub use exercises::ExerciseRoutes;
pub use gyms::GymRoutes;
pub use health::HealthRoutes;
pub use home::HomeRoutes;
pub use progress::ProgressRoutes;
pub use users::UserRoutes;
pub use workouts::WorkoutRoutes;

use crate::auth::AuthResult;
use crate::errors::{AppError, AppResult};
use crate::middleware::authenticate_headers;
use crate::resources::ServerResources;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Json, Query};
use axum::http::HeaderMap;
use chrono::NaiveDate;
use uuid::Uuid;

/// Authenticate the caller of a handler
pub(crate) fn authenticate(headers: &HeaderMap, resources: &ServerResources) -> AppResult<AuthResult> {
    authenticate_headers(headers, &resources.auth_manager)
}

/// Unwrap a JSON body once the caller is known
///
/// Handlers take the extractor result rather than `Json<T>` itself so a
/// malformed body is reported after authentication, in the API error format.
pub(crate) fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> AppResult<T> {
    payload
        .map(|Json(value)| value)
        .map_err(|rejection| AppError::invalid_input(format!("Invalid request body: {}", rejection.body_text())))
}

/// Unwrap query parameters once the caller is known
pub(crate) fn query_params<T>(params: Result<Query<T>, QueryRejection>) -> AppResult<T> {
    params
        .map(|Query(value)| value)
        .map_err(|rejection| AppError::invalid_input(format!("Invalid query parameters: {}", rejection.body_text())))
}

/// Parse a path identifier
pub(crate) fn parse_id(value: &str, what: &str) -> AppResult<Uuid> {
    Uuid::parse_str(value).map_err(|_| AppError::invalid_format(format!("Invalid {what} id: {value}")))
}

/// Current calendar day (UTC)
pub(crate) fn today() -> NaiveDate {
    chrono::Utc::now().date_naive()
}
