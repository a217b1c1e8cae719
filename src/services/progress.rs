// ABOUTME: Progress chart business logic
// ABOUTME: Forces clients onto their own data, validates the date window, and aggregates samples
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::auth::AuthResult;
use crate::database::{Database, ExerciseWithHistory};
use crate::errors::{AppError, AppResult};
use crate::models::{aggregate_progress, DateRange, ProgressPoint, User};
use crate::permissions::UserRole;
use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

/// Chart query as received from the query string
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProgressQuery {
    /// Exercise to chart
    pub exercise_id: Option<Uuid>,
    /// Client filter (staff only)
    pub client_id: Option<Uuid>,
    /// First day, inclusive
    pub start: Option<NaiveDate>,
    /// Last day, inclusive
    pub end: Option<NaiveDate>,
}

/// Which client a caller may chart; clients only ever see themselves
fn effective_client(caller: &AuthResult, requested: Option<Uuid>) -> Option<Uuid> {
    if caller.is_staff() {
        requested
    } else {
        Some(caller.user_id)
    }
}

/// Chart points for one exercise
///
/// # Errors
///
/// Returns `MISSING_REQUIRED_FIELD` without an exercise
pub async fn progress_data(
    database: &Database,
    caller: &AuthResult,
    query: ProgressQuery,
    today: NaiveDate,
) -> AppResult<Vec<ProgressPoint>> {
    let exercise_id = query
        .exercise_id
        .ok_or_else(|| AppError::missing_field("exercise_id"))?;
    let range = DateRange::new(query.start, query.end, today);
    if range.is_empty() {
        return Ok(Vec::new());
    }

    let client = effective_client(caller, query.client_id);
    let samples = database
        .progress_samples(caller.scope(), exercise_id, client, range)
        .await?;
    Ok(aggregate_progress(&samples))
}

/// Exercises the caller can chart
///
/// # Errors
///
/// Returns a database error if the query fails
pub async fn exercises_with_history(database: &Database, caller: &AuthResult) -> AppResult<Vec<ExerciseWithHistory>> {
    database
        .exercises_with_history(caller.scope(), effective_client(caller, None))
        .await
}

/// Clients offered in the chart filter; a client only sees themselves
///
/// # Errors
///
/// Returns a database error if the query fails
pub async fn clients(database: &Database, caller: &AuthResult) -> AppResult<Vec<User>> {
    if caller.is_staff() {
        database
            .list_users(caller.scope(), &[UserRole::Client], false)
            .await
    } else {
        Ok(database.get_user(caller.user_id).await?.into_iter().collect())
    }
}
