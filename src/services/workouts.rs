// ABOUTME: Workout business logic extracted from route handlers
// ABOUTME: Creation with structure copy, ownership and gym checks, completion locks, and round editing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Workout rules
//!
//! - Only staff build or restructure workouts.
//! - Clients read and log only their own sessions.
//! - A completed session is locked against structural edits (sets, exercises,
//!   rounds, targets); staff may still correct logged values.
//! - Everything outside the caller's gym is reported as missing.

use super::clean;
use crate::auth::AuthResult;
use crate::constants::limits::{MAX_ROUNDS_PER_ADD, RECENT_WORKOUTS_LIMIT, WORKOUT_LIST_LIMIT};
use crate::database::{Database, SetExerciseActuals, SetRecord, WorkoutListItem};
use crate::errors::{AppError, AppResult};
use crate::logging::AppLogger;
use crate::models::{
    copy_structure, group_rounds, summarize_workout, ExerciseGroup, SetExercise, Targets, User,
    UserSummary, WorkoutSession, WorkoutStatus,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

/// New workout form
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateWorkoutRequest {
    /// Client the workout is for
    pub client_id: Option<Uuid>,
    /// Trainer running it
    pub trainer_id: Option<Uuid>,
    /// Completed workout whose structure is copied
    pub copy_from_id: Option<Uuid>,
    /// Session date, today when omitted
    pub date: Option<NaiveDate>,
}

/// Add-exercise form
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AddExerciseRequest {
    /// Library exercise
    pub exercise_id: Option<Uuid>,
    /// Variation
    pub modifier: Option<String>,
    /// Planned values
    #[serde(flatten)]
    pub targets: Targets,
    /// Rounds to create, 1 when omitted
    pub rounds: Option<i32>,
}

/// Identifies one exercise group inside a set
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct GroupKey {
    /// Library exercise
    pub exercise_id: Uuid,
    /// Position within the set
    pub order: i32,
}

/// Target edit form
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TargetsRequest {
    /// Planned values
    #[serde(flatten)]
    pub targets: Targets,
    /// Variation
    pub modifier: Option<String>,
}

/// Date and trainer edit form
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WorkoutDetailsRequest {
    /// New date
    pub date: Option<NaiveDate>,
    /// New trainer; `none` or blank clears it
    pub trainer_id: Option<String>,
}

/// A set with its exercises grouped into rounds
#[derive(Debug, Clone, Serialize)]
pub struct SetView {
    /// Set id
    pub id: Uuid,
    /// Position in the session
    pub order: i32,
    /// Notes
    pub notes: Option<String>,
    /// Exercise groups ordered by position
    pub groups: Vec<ExerciseGroup>,
}

/// Full workout for the editor
#[derive(Debug, Clone, Serialize)]
pub struct WorkoutDetail {
    /// Session
    #[serde(flatten)]
    pub session: WorkoutSession,
    /// Client
    pub client: UserSummary,
    /// Trainer
    pub trainer: Option<UserSummary>,
    /// Sets in order
    pub sets: Vec<SetView>,
}

/// A completed workout offered as a copy source
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RecentWorkout {
    /// Session id
    pub id: Uuid,
    /// Session date
    pub date: NaiveDate,
    /// `<date> - <names>[ +N more]`
    pub summary: String,
}

// ================================
// Access helpers
// ================================

/// Load a session the caller may read
async fn load_session(database: &Database, caller: &AuthResult, id: Uuid) -> AppResult<WorkoutSession> {
    let session = database
        .get_workout_session(id)
        .await?
        .filter(|s| caller.scope().allows(s.gym_id))
        .ok_or_else(|| AppError::not_found("Workout"))?;

    if !caller.is_staff() && session.client_id != caller.user_id {
        AppLogger::log_security_event(
            "workout_access_denied",
            &format!("workout {id} belongs to another client"),
            Some(&caller.user_id.to_string()),
        );
        return Err(AppError::forbidden("You can only access your own workouts"));
    }
    Ok(session)
}

/// Load a session the caller may restructure
async fn load_editable_session(database: &Database, caller: &AuthResult, id: Uuid) -> AppResult<WorkoutSession> {
    caller.require_staff()?;
    let session = load_session(database, caller, id).await?;
    ensure_editable(&session)?;
    Ok(session)
}

fn ensure_editable(session: &WorkoutSession) -> AppResult<()> {
    if session.is_editable() {
        Ok(())
    } else {
        Err(AppError::locked("Workout is completed and can no longer be restructured"))
    }
}

async fn load_set(database: &Database, caller: &AuthResult, set_id: Uuid) -> AppResult<(SetRecord, WorkoutSession)> {
    let set = database
        .get_set(set_id)
        .await?
        .ok_or_else(|| AppError::not_found("Set"))?;
    let session = load_session(database, caller, set.workout_session_id).await?;
    Ok((set, session))
}

async fn load_editable_set(database: &Database, caller: &AuthResult, set_id: Uuid) -> AppResult<SetRecord> {
    caller.require_staff()?;
    let (set, session) = load_set(database, caller, set_id).await?;
    ensure_editable(&session)?;
    Ok(set)
}

async fn load_set_exercise(
    database: &Database,
    caller: &AuthResult,
    id: Uuid,
) -> AppResult<(SetExercise, WorkoutSession)> {
    let row = database
        .get_set_exercise(id)
        .await?
        .ok_or_else(|| AppError::not_found("Set exercise"))?;
    let (_, session) = load_set(database, caller, row.workout_set_id).await?;
    Ok((row, session))
}

async fn load_user_in_scope(database: &Database, caller: &AuthResult, id: Uuid, what: &str) -> AppResult<User> {
    database
        .get_user(id)
        .await?
        .filter(|u| caller.scope().allows(u.gym_id))
        .ok_or_else(|| AppError::not_found(what))
}

async fn resolve_trainer(database: &Database, caller: &AuthResult, trainer_id: Option<Uuid>) -> AppResult<Option<Uuid>> {
    let Some(trainer_id) = trainer_id else {
        return Ok(None);
    };
    let trainer = load_user_in_scope(database, caller, trainer_id, "Trainer").await?;
    if !trainer.role.is_staff() {
        return Err(AppError::invalid_input(format!("{} is not a trainer", trainer.name)));
    }
    Ok(Some(trainer.id))
}

/// Parse the trainer field of the details form; `none` or blank clears it
///
/// # Errors
///
/// Returns `INVALID_FORMAT` for anything else that is not a UUID
pub fn parse_trainer_field(value: Option<&str>) -> AppResult<Option<Uuid>> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) if v.eq_ignore_ascii_case("none") => Ok(None),
        Some(v) => Uuid::parse_str(v)
            .map(Some)
            .map_err(|e| AppError::invalid_format(format!("Invalid trainer id: {e}"))),
    }
}

// ================================
// Sessions
// ================================

/// Create a workout, optionally copying a previous workout's structure
///
/// A copy source the caller cannot see, or that does not exist, is ignored.
///
/// # Errors
///
/// Returns `PERMISSION_DENIED` for clients, `MISSING_REQUIRED_FIELD` without
/// a client, and `RESOURCE_NOT_FOUND` for a client outside the gym
pub async fn create_workout(
    database: &Database,
    caller: &AuthResult,
    request: CreateWorkoutRequest,
    today: NaiveDate,
) -> AppResult<WorkoutSession> {
    caller.require_staff()?;
    let client_id = request
        .client_id
        .ok_or_else(|| AppError::missing_field("Client"))?;
    let client = load_user_in_scope(database, caller, client_id, "Client").await?;
    let trainer_id = resolve_trainer(database, caller, request.trainer_id).await?;

    let structure = match request.copy_from_id {
        Some(source_id) => match database.get_workout_session(source_id).await? {
            Some(source) if caller.scope().allows(source.gym_id) => {
                copy_structure(&database.get_workout_sets(source.id).await?)
            }
            _ => {
                debug!(source_id = %source_id, "Copy source not found, creating empty workout");
                Vec::new()
            }
        },
        None => Vec::new(),
    };

    let session = WorkoutSession::new(
        request.date.unwrap_or(today),
        client.id,
        trainer_id,
        client.gym_id,
    );
    database.create_workout(&session, &structure).await?;

    info!(
        workout_id = %session.id,
        client_id = %client.id,
        copied_sets = structure.len(),
        "Workout created"
    );
    Ok(session)
}

/// Workouts the caller may see, newest first
///
/// # Errors
///
/// Returns a database error if the query fails
pub async fn list_workouts(database: &Database, caller: &AuthResult) -> AppResult<Vec<WorkoutListItem>> {
    let client_filter = (!caller.is_staff()).then_some(caller.user_id);
    database
        .list_workouts(caller.scope(), client_filter, WORKOUT_LIST_LIMIT)
        .await
}

/// A workout with its sets grouped into rounds
///
/// # Errors
///
/// Returns `RESOURCE_NOT_FOUND` outside the caller's gym and
/// `PERMISSION_DENIED` for another client's workout
pub async fn get_workout(database: &Database, caller: &AuthResult, id: Uuid) -> AppResult<WorkoutDetail> {
    let session = load_session(database, caller, id).await?;

    let client = database
        .get_user(session.client_id)
        .await?
        .ok_or_else(|| AppError::not_found("Client"))?
        .summary();
    let trainer = match session.trainer_id {
        Some(trainer_id) => database.get_user(trainer_id).await?.map(|u| u.summary()),
        None => None,
    };

    let sets = database
        .get_workout_sets(session.id)
        .await?
        .into_iter()
        .map(|set| SetView {
            id: set.id,
            order: set.order,
            notes: set.notes,
            groups: group_rounds(&set.exercises),
        })
        .collect();

    Ok(WorkoutDetail {
        session,
        client,
        trainer,
        sets,
    })
}

/// Completed workouts of a client, offered as copy sources
///
/// # Errors
///
/// Returns `PERMISSION_DENIED` for clients and `RESOURCE_NOT_FOUND` for a
/// client outside the gym
pub async fn recent_workouts_for_client(
    database: &Database,
    caller: &AuthResult,
    client_id: Uuid,
) -> AppResult<Vec<RecentWorkout>> {
    caller.require_staff()?;
    load_user_in_scope(database, caller, client_id, "Client").await?;

    let rows = database
        .recent_completed_workouts(caller.scope(), client_id, RECENT_WORKOUTS_LIMIT)
        .await?;
    Ok(rows
        .into_iter()
        .map(|row| RecentWorkout {
            id: row.id,
            date: row.date,
            summary: summarize_workout(row.date, row.exercise_names.iter().map(String::as_str)),
        })
        .collect())
}

/// Mark a workout completed
///
/// # Errors
///
/// Returns `PERMISSION_DENIED` unless the caller is staff or the session's
/// client, and `RESOURCE_LOCKED` if it is already completed
pub async fn complete_workout(database: &Database, caller: &AuthResult, id: Uuid) -> AppResult<()> {
    let session = load_session(database, caller, id).await?;
    ensure_editable(&session)?;
    database
        .update_workout_status(session.id, WorkoutStatus::Completed)
        .await?;
    info!(workout_id = %id, by = %caller.user_id, "Workout completed");
    Ok(())
}

/// Change the date and trainer of a workout
///
/// # Errors
///
/// Returns `PERMISSION_DENIED` for clients, `RESOURCE_LOCKED` once the
/// workout is completed, and `MISSING_REQUIRED_FIELD` without a date
pub async fn update_workout_details(
    database: &Database,
    caller: &AuthResult,
    id: Uuid,
    request: WorkoutDetailsRequest,
) -> AppResult<()> {
    let session = load_editable_session(database, caller, id).await?;
    let date = request.date.ok_or_else(|| AppError::missing_field("Date"))?;
    let trainer_id = parse_trainer_field(request.trainer_id.as_deref())?;
    let trainer_id = resolve_trainer(database, caller, trainer_id).await?;

    database
        .update_workout_details(session.id, date, trainer_id)
        .await
}

/// Delete a workout with its sets and rounds
///
/// # Errors
///
/// Returns `PERMISSION_DENIED` for clients
pub async fn delete_workout(database: &Database, caller: &AuthResult, id: Uuid) -> AppResult<()> {
    caller.require_staff()?;
    let session = load_session(database, caller, id).await?;
    database.delete_workout(session.id).await?;
    info!(workout_id = %id, by = %caller.user_id, "Workout deleted");
    Ok(())
}

// ================================
// Sets and rounds
// ================================

/// Append an empty set
///
/// # Errors
///
/// Returns `RESOURCE_LOCKED` for completed workouts
pub async fn add_set(database: &Database, caller: &AuthResult, workout_id: Uuid) -> AppResult<SetRecord> {
    let session = load_editable_session(database, caller, workout_id).await?;
    database.append_set(session.id).await
}

/// Delete a set and its rounds
///
/// # Errors
///
/// Returns `RESOURCE_LOCKED` for completed workouts
pub async fn delete_set(database: &Database, caller: &AuthResult, set_id: Uuid) -> AppResult<()> {
    let set = load_editable_set(database, caller, set_id).await?;
    database.delete_set(set.id).await
}

/// Append an exercise to a set with one or more identical rounds
///
/// # Errors
///
/// Returns `MISSING_REQUIRED_FIELD` without an exercise, `INVALID_INPUT` for
/// a round count above the limit, and `RESOURCE_NOT_FOUND` for an exercise
/// the caller cannot see
pub async fn add_exercise_to_set(
    database: &Database,
    caller: &AuthResult,
    set_id: Uuid,
    request: AddExerciseRequest,
) -> AppResult<Vec<SetExercise>> {
    let set = load_editable_set(database, caller, set_id).await?;
    let exercise_id = request
        .exercise_id
        .ok_or_else(|| AppError::missing_field("Exercise"))?;
    database
        .get_exercise(exercise_id, caller.scope())
        .await?
        .ok_or_else(|| AppError::not_found("Exercise"))?;

    let rounds = request.rounds.unwrap_or(1).max(1);
    if rounds > MAX_ROUNDS_PER_ADD {
        return Err(AppError::invalid_input(format!(
            "At most {MAX_ROUNDS_PER_ADD} rounds can be added at once"
        )));
    }

    database
        .append_exercise_to_set(set.id, exercise_id, clean(request.modifier), request.targets, rounds)
        .await
}

/// Append a round to a group, copying the previous round
///
/// # Errors
///
/// Returns `RESOURCE_NOT_FOUND` when the group has no rounds
pub async fn add_round(database: &Database, caller: &AuthResult, set_id: Uuid, key: GroupKey) -> AppResult<SetExercise> {
    let set = load_editable_set(database, caller, set_id).await?;
    database
        .append_round(set.id, key.exercise_id, key.order)
        .await
}

/// Log actual values on one round
///
/// Clients may log only while the workout is in progress.
///
/// # Errors
///
/// Returns `PERMISSION_DENIED` unless the caller is staff or the session's
/// client, and `RESOURCE_LOCKED` for clients on a completed workout
pub async fn update_exercise(
    database: &Database,
    caller: &AuthResult,
    id: Uuid,
    actuals: SetExerciseActuals,
) -> AppResult<SetExercise> {
    let (row, session) = load_set_exercise(database, caller, id).await?;
    if !caller.is_staff() {
        ensure_editable(&session)?;
    }

    let actuals = SetExerciseActuals {
        notes: clean(actuals.notes),
        ..actuals
    };
    database.update_set_exercise_actuals(row.id, &actuals).await?;
    database
        .get_set_exercise(row.id)
        .await?
        .ok_or_else(|| AppError::not_found("Set exercise"))
}

/// Change targets and modifier of one round
///
/// # Errors
///
/// Returns `RESOURCE_LOCKED` for completed workouts
pub async fn update_exercise_targets(
    database: &Database,
    caller: &AuthResult,
    id: Uuid,
    request: TargetsRequest,
) -> AppResult<()> {
    caller.require_staff()?;
    let (row, session) = load_set_exercise(database, caller, id).await?;
    ensure_editable(&session)?;
    database
        .update_set_exercise_targets(row.id, request.targets, clean(request.modifier).as_deref())
        .await
}

/// Change targets and modifier of every round in a group
///
/// # Errors
///
/// Returns `RESOURCE_LOCKED` for completed workouts and `RESOURCE_NOT_FOUND`
/// for an empty group
pub async fn update_all_rounds_targets(
    database: &Database,
    caller: &AuthResult,
    set_id: Uuid,
    key: GroupKey,
    request: TargetsRequest,
) -> AppResult<u64> {
    let set = load_editable_set(database, caller, set_id).await?;
    database
        .update_group_targets(
            set.id,
            key.exercise_id,
            key.order,
            request.targets,
            clean(request.modifier).as_deref(),
        )
        .await
}

/// Delete one round
///
/// # Errors
///
/// Returns `RESOURCE_LOCKED` for completed workouts
pub async fn delete_exercise(database: &Database, caller: &AuthResult, id: Uuid) -> AppResult<()> {
    caller.require_staff()?;
    let (row, session) = load_set_exercise(database, caller, id).await?;
    ensure_editable(&session)?;
    database.delete_set_exercise(row.id).await
}

/// Delete every round of a group
///
/// # Errors
///
/// Returns `RESOURCE_LOCKED` for completed workouts and `RESOURCE_NOT_FOUND`
/// for an empty group
pub async fn delete_exercise_group(database: &Database, caller: &AuthResult, set_id: Uuid, key: GroupKey) -> AppResult<u64> {
    let set = load_editable_set(database, caller, set_id).await?;
    database
        .delete_exercise_group(set.id, key.exercise_id, key.order)
        .await
}
