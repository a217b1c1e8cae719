// ABOUTME: Workout session, set, and set-exercise database operations
// ABOUTME: Scoped listings, nested set loading, round management, and transactional structure copies
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{
    format_date, parse_date, parse_gym_id, parse_optional_uuid, parse_timestamp, parse_uuid,
    Database,
};
use crate::errors::{AppError, AppResult};
use crate::models::{
    GymScope, SetExercise, SetExerciseDraft, Targets, WorkoutSession, WorkoutSet, WorkoutSetDraft,
    WorkoutStatus,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, Sqlite, Transaction};
use uuid::Uuid;

const SESSION_COLUMNS: &str = "id, date, client_id, trainer_id, gym_id, status, created_at";

const SET_EXERCISE_SELECT: &str = r"
    SELECT se.id, se.workout_set_id, se.exercise_id, e.name AS exercise_name,
           se.sort_order, se.round, se.modifier,
           se.target_reps, se.target_weight, se.target_duration,
           se.actual_reps, se.actual_weight, se.actual_duration,
           se.notes, se.completed
    FROM set_exercises se
    JOIN exercises e ON e.id = se.exercise_id
";

const WORKOUT_LIST_SELECT: &str = r"
    SELECT ws.id, ws.date, ws.status, ws.client_id, c.name AS client_name,
           ws.trainer_id, t.name AS trainer_name,
           (SELECT COUNT(*) FROM workout_sets s WHERE s.workout_session_id = ws.id) AS set_count,
           (SELECT COUNT(*) FROM set_exercises se
              JOIN workout_sets s ON s.id = se.workout_set_id
             WHERE s.workout_session_id = ws.id) AS exercise_count
    FROM workout_sessions ws
    JOIN users c ON c.id = ws.client_id
    LEFT JOIN users t ON t.id = ws.trainer_id
";

/// One row of a workout listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutListItem {
    /// Session id
    pub id: Uuid,
    /// Session date
    pub date: NaiveDate,
    /// Lifecycle status
    pub status: WorkoutStatus,
    /// Client id
    pub client_id: Uuid,
    /// Client name
    pub client_name: String,
    /// Trainer id
    pub trainer_id: Option<Uuid>,
    /// Trainer name
    pub trainer_name: Option<String>,
    /// Number of sets
    pub set_count: i64,
    /// Number of set-exercise rows across all sets
    pub exercise_count: i64,
}

/// A completed session with its exercise names in workout order
#[derive(Debug, Clone)]
pub struct WorkoutSummaryRow {
    /// Session id
    pub id: Uuid,
    /// Session date
    pub date: NaiveDate,
    /// Exercise names ordered by set then position then round
    pub exercise_names: Vec<String>,
}

/// A set without its exercises
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SetRecord {
    /// Set id
    pub id: Uuid,
    /// Parent session
    pub workout_session_id: Uuid,
    /// Position in the session
    pub order: i32,
    /// Notes
    pub notes: Option<String>,
}

/// Logged values for one round
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SetExerciseActuals {
    /// Performed repetitions
    pub actual_reps: Option<i32>,
    /// Performed weight
    pub actual_weight: Option<f64>,
    /// Performed duration in seconds
    pub actual_duration: Option<i32>,
    /// Notes
    pub notes: Option<String>,
    /// Done
    #[serde(default)]
    pub completed: bool,
}

/// Where a list query is narrowed beyond the gym scope
enum ListWindow {
    All,
    Upcoming(NaiveDate),
    Past(NaiveDate),
}

impl Database {
    pub(super) async fn migrate_workouts(&self) -> AppResult<()> {
        let statements = [
            r"
            CREATE TABLE IF NOT EXISTS workout_sessions (
                id TEXT PRIMARY KEY,
                date TEXT NOT NULL,
                client_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                trainer_id TEXT REFERENCES users(id) ON DELETE SET NULL,
                gym_id TEXT REFERENCES gyms(id) ON DELETE CASCADE,
                status TEXT NOT NULL DEFAULT 'IN_PROGRESS'
                    CHECK (status IN ('IN_PROGRESS', 'COMPLETED')),
                created_at TEXT NOT NULL
            )
            ",
            r"
            CREATE TABLE IF NOT EXISTS workout_sets (
                id TEXT PRIMARY KEY,
                workout_session_id TEXT NOT NULL REFERENCES workout_sessions(id) ON DELETE CASCADE,
                sort_order INTEGER NOT NULL,
                notes TEXT
            )
            ",
            r"
            CREATE TABLE IF NOT EXISTS set_exercises (
                id TEXT PRIMARY KEY,
                workout_set_id TEXT NOT NULL REFERENCES workout_sets(id) ON DELETE CASCADE,
                exercise_id TEXT NOT NULL REFERENCES exercises(id),
                sort_order INTEGER NOT NULL,
                round INTEGER NOT NULL DEFAULT 1,
                modifier TEXT,
                target_reps INTEGER,
                target_weight REAL,
                target_duration INTEGER,
                actual_reps INTEGER,
                actual_weight REAL,
                actual_duration INTEGER,
                notes TEXT,
                completed INTEGER NOT NULL DEFAULT 0
            )
            ",
            "CREATE INDEX IF NOT EXISTS idx_sessions_gym_date ON workout_sessions(gym_id, date)",
            "CREATE INDEX IF NOT EXISTS idx_sessions_client ON workout_sessions(client_id)",
            "CREATE INDEX IF NOT EXISTS idx_sets_session ON workout_sets(workout_session_id)",
            "CREATE INDEX IF NOT EXISTS idx_set_exercises_set ON set_exercises(workout_set_id)",
            "CREATE INDEX IF NOT EXISTS idx_set_exercises_exercise ON set_exercises(exercise_id)",
        ];

        for statement in statements {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .map_err(|e| AppError::database(format!("Failed to migrate workout tables: {e}")))?;
        }
        Ok(())
    }

    // ================================
    // Sessions
    // ================================

    /// Insert a session together with a copied structure, atomically
    ///
    /// # Errors
    ///
    /// Returns a database error if any insert fails; nothing is written then
    pub async fn create_workout(
        &self,
        session: &WorkoutSession,
        structure: &[WorkoutSetDraft],
    ) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(&format!(
            "INSERT INTO workout_sessions ({SESSION_COLUMNS}) VALUES (?, ?, ?, ?, ?, ?, ?)"
        ))
        .bind(session.id.to_string())
        .bind(format_date(session.date))
        .bind(session.client_id.to_string())
        .bind(session.trainer_id.map(|t| t.to_string()))
        .bind(session.gym_id.map(|g| g.to_string()))
        .bind(session.status.as_str())
        .bind(session.created_at.to_rfc3339())
        .execute(&mut *tx)
        .await?;

        for set in structure {
            let set_id = Uuid::new_v4();
            sqlx::query(
                "INSERT INTO workout_sets (id, workout_session_id, sort_order, notes) VALUES (?, ?, ?, ?)",
            )
            .bind(set_id.to_string())
            .bind(session.id.to_string())
            .bind(set.order)
            .bind(&set.notes)
            .execute(&mut *tx)
            .await?;

            for draft in &set.exercises {
                insert_set_exercise(&mut tx, set_id, draft).await?;
            }
        }

        tx.commit().await?;
        Ok(())
    }

    /// Fetch a session by id
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails
    pub async fn get_workout_session(&self, id: Uuid) -> AppResult<Option<WorkoutSession>> {
        let row = sqlx::query(&format!(
            "SELECT {SESSION_COLUMNS} FROM workout_sessions WHERE id = ?"
        ))
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to fetch workout: {e}")))?;
        row.as_ref().map(row_to_session).transpose()
    }

    /// Sessions in scope, newest first
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails
    pub async fn list_workouts(
        &self,
        scope: GymScope,
        client_id: Option<Uuid>,
        limit: i64,
    ) -> AppResult<Vec<WorkoutListItem>> {
        self.query_workout_list(scope, client_id, &ListWindow::All, limit)
            .await
    }

    /// In-progress sessions of a client dated today or later, soonest first
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails
    pub async fn upcoming_workouts(
        &self,
        client_id: Uuid,
        today: NaiveDate,
        limit: i64,
    ) -> AppResult<Vec<WorkoutListItem>> {
        self.query_workout_list(
            GymScope::unrestricted(),
            Some(client_id),
            &ListWindow::Upcoming(today),
            limit,
        )
        .await
    }

    /// Completed or past-dated sessions of a client, newest first
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails
    pub async fn past_workouts(
        &self,
        client_id: Uuid,
        today: NaiveDate,
        limit: i64,
    ) -> AppResult<Vec<WorkoutListItem>> {
        self.query_workout_list(
            GymScope::unrestricted(),
            Some(client_id),
            &ListWindow::Past(today),
            limit,
        )
        .await
    }

    async fn query_workout_list(
        &self,
        scope: GymScope,
        client_id: Option<Uuid>,
        window: &ListWindow,
        limit: i64,
    ) -> AppResult<Vec<WorkoutListItem>> {
        let (window_clause, order, pivot) = match window {
            ListWindow::All => ("", "ws.date DESC, ws.created_at DESC", None),
            ListWindow::Upcoming(today) => (
                "AND ws.status = 'IN_PROGRESS' AND ws.date >= ?",
                "ws.date ASC, ws.created_at ASC",
                Some(format_date(*today)),
            ),
            ListWindow::Past(today) => (
                "AND (ws.status = 'COMPLETED' OR ws.date < ?)",
                "ws.date DESC, ws.created_at DESC",
                Some(format_date(*today)),
            ),
        };

        let sql = format!(
            r"
            {WORKOUT_LIST_SELECT}
            WHERE (? OR ws.gym_id IS ?)
              AND (? IS NULL OR ws.client_id = ?)
              {window_clause}
            ORDER BY {order}
            LIMIT ?
            "
        );

        let client = client_id.map(|c| c.to_string());
        let mut query = sqlx::query(&sql)
            .bind(scope.unrestricted)
            .bind(scope.gym_param())
            .bind(client.clone())
            .bind(client);
        if let Some(pivot) = pivot {
            query = query.bind(pivot);
        }

        let rows = query
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to list workouts: {e}")))?;
        rows.iter().map(row_to_list_item).collect()
    }

    /// Completed sessions of a client in scope with their exercise names
    ///
    /// # Errors
    ///
    /// Returns a database error if a query fails
    pub async fn recent_completed_workouts(
        &self,
        scope: GymScope,
        client_id: Uuid,
        limit: i64,
    ) -> AppResult<Vec<WorkoutSummaryRow>> {
        let rows = sqlx::query(
            r"
            SELECT id, date FROM workout_sessions
            WHERE client_id = ? AND status = 'COMPLETED' AND (? OR gym_id IS ?)
            ORDER BY date DESC, created_at DESC
            LIMIT ?
            ",
        )
        .bind(client_id.to_string())
        .bind(scope.unrestricted)
        .bind(scope.gym_param())
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list recent workouts: {e}")))?;

        let mut summaries = Vec::with_capacity(rows.len());
        for row in &rows {
            let id: String = row.get("id");
            let date: String = row.get("date");
            let names: Vec<String> = sqlx::query_scalar(
                r"
                SELECT e.name FROM set_exercises se
                JOIN workout_sets s ON s.id = se.workout_set_id
                JOIN exercises e ON e.id = se.exercise_id
                WHERE s.workout_session_id = ?
                ORDER BY s.sort_order, se.sort_order, se.round
                ",
            )
            .bind(&id)
            .fetch_all(&self.pool)
            .await?;

            summaries.push(WorkoutSummaryRow {
                id: parse_uuid(&id)?,
                date: parse_date(&date)?,
                exercise_names: names,
            });
        }
        Ok(summaries)
    }

    /// Change a session's status
    ///
    /// # Errors
    ///
    /// Returns `RESOURCE_NOT_FOUND` for unknown sessions
    pub async fn update_workout_status(&self, id: Uuid, status: WorkoutStatus) -> AppResult<()> {
        let result = sqlx::query("UPDATE workout_sessions SET status = ? WHERE id = ?")
            .bind(status.as_str())
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Workout {id}")));
        }
        Ok(())
    }

    /// Change a session's date and trainer
    ///
    /// # Errors
    ///
    /// Returns `RESOURCE_NOT_FOUND` for unknown sessions
    pub async fn update_workout_details(
        &self,
        id: Uuid,
        date: NaiveDate,
        trainer_id: Option<Uuid>,
    ) -> AppResult<()> {
        let result = sqlx::query("UPDATE workout_sessions SET date = ?, trainer_id = ? WHERE id = ?")
            .bind(format_date(date))
            .bind(trainer_id.map(|t| t.to_string()))
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Workout {id}")));
        }
        Ok(())
    }

    /// Delete a session with its sets and rounds
    ///
    /// # Errors
    ///
    /// Returns `RESOURCE_NOT_FOUND` for unknown sessions
    pub async fn delete_workout(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM workout_sessions WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Workout {id}")));
        }
        Ok(())
    }

    // ================================
    // Sets
    // ================================

    /// Sets of a session in order, each with its rows ordered by position and round
    ///
    /// # Errors
    ///
    /// Returns a database error if a query fails
    pub async fn get_workout_sets(&self, session_id: Uuid) -> AppResult<Vec<WorkoutSet>> {
        let set_rows = sqlx::query(
            r"
            SELECT id, workout_session_id, sort_order, notes FROM workout_sets
            WHERE workout_session_id = ?
            ORDER BY sort_order ASC
            ",
        )
        .bind(session_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to fetch sets: {e}")))?;

        let exercise_rows = sqlx::query(&format!(
            r"
            {SET_EXERCISE_SELECT}
            JOIN workout_sets s ON s.id = se.workout_set_id
            WHERE s.workout_session_id = ?
            ORDER BY s.sort_order, se.sort_order, se.round
            "
        ))
        .bind(session_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to fetch set exercises: {e}")))?;

        let mut exercises: Vec<SetExercise> = exercise_rows
            .iter()
            .map(row_to_set_exercise)
            .collect::<AppResult<_>>()?;

        set_rows
            .iter()
            .map(|row| {
                let record = row_to_set_record(row)?;
                let (mine, rest): (Vec<_>, Vec<_>) = exercises
                    .drain(..)
                    .partition(|e| e.workout_set_id == record.id);
                exercises = rest;
                Ok(WorkoutSet {
                    id: record.id,
                    workout_session_id: record.workout_session_id,
                    order: record.order,
                    notes: record.notes,
                    exercises: mine,
                })
            })
            .collect()
    }

    /// Fetch a set without its exercises
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails
    pub async fn get_set(&self, set_id: Uuid) -> AppResult<Option<SetRecord>> {
        let row = sqlx::query(
            "SELECT id, workout_session_id, sort_order, notes FROM workout_sets WHERE id = ?",
        )
        .bind(set_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to fetch set: {e}")))?;
        row.as_ref().map(row_to_set_record).transpose()
    }

    /// Append a set to a session (order = last + 1)
    ///
    /// # Errors
    ///
    /// Returns a database error if the insert fails
    pub async fn append_set(&self, session_id: Uuid) -> AppResult<SetRecord> {
        let mut tx = self.pool.begin().await?;
        let last: Option<i32> =
            sqlx::query_scalar("SELECT MAX(sort_order) FROM workout_sets WHERE workout_session_id = ?")
                .bind(session_id.to_string())
                .fetch_one(&mut *tx)
                .await?;

        let record = SetRecord {
            id: Uuid::new_v4(),
            workout_session_id: session_id,
            order: last.unwrap_or(0) + 1,
            notes: None,
        };
        sqlx::query(
            "INSERT INTO workout_sets (id, workout_session_id, sort_order, notes) VALUES (?, ?, ?, NULL)",
        )
        .bind(record.id.to_string())
        .bind(session_id.to_string())
        .bind(record.order)
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;
        Ok(record)
    }

    /// Delete a set and its rounds
    ///
    /// # Errors
    ///
    /// Returns `RESOURCE_NOT_FOUND` for unknown sets
    pub async fn delete_set(&self, set_id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM workout_sets WHERE id = ?")
            .bind(set_id.to_string())
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Set {set_id}")));
        }
        Ok(())
    }

    // ================================
    // Set exercises
    // ================================

    /// Add an exercise at the end of a set with `rounds` identical rounds
    ///
    /// Returns the created rows.
    ///
    /// # Errors
    ///
    /// Returns a database error if an insert fails; nothing is written then
    pub async fn append_exercise_to_set(
        &self,
        set_id: Uuid,
        exercise_id: Uuid,
        modifier: Option<String>,
        targets: Targets,
        rounds: i32,
    ) -> AppResult<Vec<SetExercise>> {
        let mut tx = self.pool.begin().await?;
        let last: Option<i32> =
            sqlx::query_scalar("SELECT MAX(sort_order) FROM set_exercises WHERE workout_set_id = ?")
                .bind(set_id.to_string())
                .fetch_one(&mut *tx)
                .await?;
        let order = last.unwrap_or(0) + 1;

        for round in 1..=rounds {
            let draft = SetExerciseDraft {
                exercise_id,
                order,
                round,
                modifier: modifier.clone(),
                targets,
            };
            insert_set_exercise(&mut tx, set_id, &draft).await?;
        }
        tx.commit().await?;

        self.group_rows(set_id, exercise_id, order).await
    }

    /// Append one round to a group, copying the last round's modifier and targets
    ///
    /// # Errors
    ///
    /// Returns `RESOURCE_NOT_FOUND` when the group has no rounds
    pub async fn append_round(
        &self,
        set_id: Uuid,
        exercise_id: Uuid,
        order: i32,
    ) -> AppResult<SetExercise> {
        let rows = self.group_rows(set_id, exercise_id, order).await?;
        let last = rows
            .last()
            .ok_or_else(|| AppError::not_found("Exercise group"))?;

        let draft = SetExerciseDraft {
            exercise_id,
            order,
            round: last.round + 1,
            modifier: last.modifier.clone(),
            targets: last.targets,
        };

        let mut tx = self.pool.begin().await?;
        let id = insert_set_exercise(&mut tx, set_id, &draft).await?;
        tx.commit().await?;

        self.get_set_exercise(id)
            .await?
            .ok_or_else(|| AppError::internal("Round vanished after insert"))
    }

    /// Rounds of one group ordered by round
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails
    pub async fn group_rows(
        &self,
        set_id: Uuid,
        exercise_id: Uuid,
        order: i32,
    ) -> AppResult<Vec<SetExercise>> {
        let rows = sqlx::query(&format!(
            r"
            {SET_EXERCISE_SELECT}
            WHERE se.workout_set_id = ? AND se.exercise_id = ? AND se.sort_order = ?
            ORDER BY se.round ASC
            "
        ))
        .bind(set_id.to_string())
        .bind(exercise_id.to_string())
        .bind(order)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to fetch rounds: {e}")))?;
        rows.iter().map(row_to_set_exercise).collect()
    }

    /// Fetch one round
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails
    pub async fn get_set_exercise(&self, id: Uuid) -> AppResult<Option<SetExercise>> {
        let row = sqlx::query(&format!("{SET_EXERCISE_SELECT} WHERE se.id = ?"))
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to fetch set exercise: {e}")))?;
        row.as_ref().map(row_to_set_exercise).transpose()
    }

    /// Record performed values for one round
    ///
    /// # Errors
    ///
    /// Returns `RESOURCE_NOT_FOUND` for unknown rows
    pub async fn update_set_exercise_actuals(
        &self,
        id: Uuid,
        actuals: &SetExerciseActuals,
    ) -> AppResult<()> {
        let result = sqlx::query(
            r"
            UPDATE set_exercises
            SET actual_reps = ?, actual_weight = ?, actual_duration = ?, notes = ?, completed = ?
            WHERE id = ?
            ",
        )
        .bind(actuals.actual_reps)
        .bind(actuals.actual_weight)
        .bind(actuals.actual_duration)
        .bind(&actuals.notes)
        .bind(actuals.completed)
        .bind(id.to_string())
        .execute(&self.pool)
        .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Set exercise {id}")));
        }
        Ok(())
    }

    /// Change planned values of one round
    ///
    /// # Errors
    ///
    /// Returns `RESOURCE_NOT_FOUND` for unknown rows
    pub async fn update_set_exercise_targets(
        &self,
        id: Uuid,
        targets: Targets,
        modifier: Option<&str>,
    ) -> AppResult<()> {
        let result = sqlx::query(
            r"
            UPDATE set_exercises
            SET target_reps = ?, target_weight = ?, target_duration = ?, modifier = ?
            WHERE id = ?
            ",
        )
        .bind(targets.target_reps)
        .bind(targets.target_weight)
        .bind(targets.target_duration)
        .bind(modifier)
        .bind(id.to_string())
        .execute(&self.pool)
        .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Set exercise {id}")));
        }
        Ok(())
    }

    /// Change planned values of every round in a group
    ///
    /// # Errors
    ///
    /// Returns `RESOURCE_NOT_FOUND` when the group has no rounds
    pub async fn update_group_targets(
        &self,
        set_id: Uuid,
        exercise_id: Uuid,
        order: i32,
        targets: Targets,
        modifier: Option<&str>,
    ) -> AppResult<u64> {
        let result = sqlx::query(
            r"
            UPDATE set_exercises
            SET target_reps = ?, target_weight = ?, target_duration = ?, modifier = ?
            WHERE workout_set_id = ? AND exercise_id = ? AND sort_order = ?
            ",
        )
        .bind(targets.target_reps)
        .bind(targets.target_weight)
        .bind(targets.target_duration)
        .bind(modifier)
        .bind(set_id.to_string())
        .bind(exercise_id.to_string())
        .bind(order)
        .execute(&self.pool)
        .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Exercise group"));
        }
        Ok(result.rows_affected())
    }

    /// Delete one round
    ///
    /// # Errors
    ///
    /// Returns `RESOURCE_NOT_FOUND` for unknown rows
    pub async fn delete_set_exercise(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM set_exercises WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Set exercise {id}")));
        }
        Ok(())
    }

    /// Delete every round of a group
    ///
    /// # Errors
    ///
    /// Returns `RESOURCE_NOT_FOUND` when the group has no rounds
    pub async fn delete_exercise_group(
        &self,
        set_id: Uuid,
        exercise_id: Uuid,
        order: i32,
    ) -> AppResult<u64> {
        let result = sqlx::query(
            "DELETE FROM set_exercises WHERE workout_set_id = ? AND exercise_id = ? AND sort_order = ?",
        )
        .bind(set_id.to_string())
        .bind(exercise_id.to_string())
        .bind(order)
        .execute(&self.pool)
        .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Exercise group"));
        }
        Ok(result.rows_affected())
    }
}

async fn insert_set_exercise(
    tx: &mut Transaction<'_, Sqlite>,
    set_id: Uuid,
    draft: &SetExerciseDraft,
) -> AppResult<Uuid> {
    let id = Uuid::new_v4();
    sqlx::query(
        r"
        INSERT INTO set_exercises (id, workout_set_id, exercise_id, sort_order, round, modifier,
                                   target_reps, target_weight, target_duration, completed)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, 0)
        ",
    )
    .bind(id.to_string())
    .bind(set_id.to_string())
    .bind(draft.exercise_id.to_string())
    .bind(draft.order)
    .bind(draft.round)
    .bind(&draft.modifier)
    .bind(draft.targets.target_reps)
    .bind(draft.targets.target_weight)
    .bind(draft.targets.target_duration)
    .execute(&mut **tx)
    .await?;
    Ok(id)
}

fn row_to_session(row: &SqliteRow) -> AppResult<WorkoutSession> {
    let id: String = row.get("id");
    let date: String = row.get("date");
    let client_id: String = row.get("client_id");
    let status: String = row.get("status");
    let created_at: String = row.get("created_at");

    Ok(WorkoutSession {
        id: parse_uuid(&id)?,
        date: parse_date(&date)?,
        client_id: parse_uuid(&client_id)?,
        trainer_id: parse_optional_uuid(row.get("trainer_id"))?,
        gym_id: parse_gym_id(row.get("gym_id"))?,
        status: WorkoutStatus::parse(&status),
        created_at: parse_timestamp(&created_at)?,
    })
}

fn row_to_list_item(row: &SqliteRow) -> AppResult<WorkoutListItem> {
    let id: String = row.get("id");
    let date: String = row.get("date");
    let status: String = row.get("status");
    let client_id: String = row.get("client_id");

    Ok(WorkoutListItem {
        id: parse_uuid(&id)?,
        date: parse_date(&date)?,
        status: WorkoutStatus::parse(&status),
        client_id: parse_uuid(&client_id)?,
        client_name: row.get("client_name"),
        trainer_id: parse_optional_uuid(row.get("trainer_id"))?,
        trainer_name: row.get("trainer_name"),
        set_count: row.get("set_count"),
        exercise_count: row.get("exercise_count"),
    })
}

fn row_to_set_record(row: &SqliteRow) -> AppResult<SetRecord> {
    let id: String = row.get("id");
    let session_id: String = row.get("workout_session_id");
    Ok(SetRecord {
        id: parse_uuid(&id)?,
        workout_session_id: parse_uuid(&session_id)?,
        order: row.get("sort_order"),
        notes: row.get("notes"),
    })
}

fn row_to_set_exercise(row: &SqliteRow) -> AppResult<SetExercise> {
    let id: String = row.get("id");
    let set_id: String = row.get("workout_set_id");
    let exercise_id: String = row.get("exercise_id");
    let completed: i64 = row.get("completed");

    Ok(SetExercise {
        id: parse_uuid(&id)?,
        workout_set_id: parse_uuid(&set_id)?,
        exercise_id: parse_uuid(&exercise_id)?,
        exercise_name: row.get("exercise_name"),
        order: row.get("sort_order"),
        round: row.get("round"),
        modifier: row.get("modifier"),
        targets: Targets {
            target_reps: row.get("target_reps"),
            target_weight: row.get("target_weight"),
            target_duration: row.get("target_duration"),
        },
        actual_reps: row.get("actual_reps"),
        actual_weight: row.get("actual_weight"),
        actual_duration: row.get("actual_duration"),
        notes: row.get("notes"),
        completed: completed == 1,
    })
}
